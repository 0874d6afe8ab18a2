use crate::operations::op_helper::{print_yaml, BridgeContext};
use crate::webcam::WebcamSource;
use anyhow::Result;
use log::{info, warn};
use std::time::Instant;

pub async fn handle_list_webcams_cli(ctx: &BridgeContext) -> Result<()> {
    let op_start_time = Instant::now();
    info!("📷 Querying webcams from {}", ctx.settings.server_url);

    let webcams = ctx.provider.webcams().await;
    if webcams.is_empty() {
        warn!("⚠️ No webcams available. Is go2rtc reachable and does it define streams?");
    }
    print_yaml(&webcams)?;
    info!("✅ Listed {} webcam(s) in {:?}", webcams.len(), op_start_time.elapsed());
    Ok(())
}
