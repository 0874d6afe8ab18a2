use crate::operations::op_helper::{print_yaml, with_status, BridgeContext};
use anyhow::{bail, Result};
use log::{info, warn};
use std::time::Instant;

pub async fn handle_test_url_cli(ctx: &BridgeContext) -> Result<()> {
    let op_start_time = Instant::now();
    info!("🩺 Validating go2rtc server {}", ctx.settings.server_url);

    let validation = ctx
        .management
        .validate_server(&ctx.server_target())
        .await
        .map_err(with_status)?;
    print_yaml(&validation)?;

    if !validation.success {
        bail!("Server {} did not validate: {}", ctx.settings.server_url, validation.error.unwrap_or_default());
    }
    if !validation.api {
        warn!("⚠️ go2rtc does not allow cross-origin requests yet; run 'enable-cors' for in-browser streaming.");
    }
    info!("✅ Server validated with {} stream(s) in {:?}", validation.streams.len(), op_start_time.elapsed());
    Ok(())
}

pub async fn handle_sources_cli(ctx: &BridgeContext) -> Result<()> {
    let op_start_time = Instant::now();
    let sources = ctx
        .management
        .list_capture_sources(&ctx.server_target())
        .await
        .map_err(with_status)?;
    print_yaml(&sources)?;
    info!("✅ Listed {} capture source(s) in {:?}", sources.len(), op_start_time.elapsed());
    Ok(())
}
