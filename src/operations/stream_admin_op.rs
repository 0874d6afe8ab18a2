use crate::core::CommandResponse;
use crate::operations::op_helper::{print_yaml, with_status, BridgeContext};
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use log::{error, info};
use std::time::Instant;

fn report(action: &str, response: CommandResponse, op_start_time: Instant) -> Result<()> {
    print_yaml(&response)?;
    if response.success {
        info!("✅ {} succeeded in {:?}", action, op_start_time.elapsed());
        Ok(())
    } else {
        error!("❌ {} failed after {:?}: {}", action, op_start_time.elapsed(), response.error.as_deref().unwrap_or("unknown"));
        bail!("{} was rejected by go2rtc", action)
    }
}

pub async fn handle_add_stream_cli(ctx: &BridgeContext, args: &ArgMatches) -> Result<()> {
    let op_start_time = Instant::now();
    let name = args.get_one::<String>("name").context("Missing --name argument")?;
    let src = args.get_one::<String>("src").context("Missing --src argument")?;

    let response = ctx
        .management
        .add_stream(&ctx.server_target(), name, src)
        .await
        .map_err(with_status)?;
    report("add-stream", response, op_start_time)
}

pub async fn handle_remove_stream_cli(ctx: &BridgeContext, args: &ArgMatches) -> Result<()> {
    let op_start_time = Instant::now();
    let name = args.get_one::<String>("name").context("Missing --name argument")?;

    let response = ctx
        .management
        .remove_stream(&ctx.server_target(), name)
        .await
        .map_err(with_status)?;
    report("remove-stream", response, op_start_time)
}

pub async fn handle_enable_cors_cli(ctx: &BridgeContext) -> Result<()> {
    let op_start_time = Instant::now();
    info!("🌐 Enabling CORS on {}", ctx.settings.server_url);
    let response = ctx
        .management
        .enable_cors(&ctx.server_target())
        .await
        .map_err(with_status)?;
    report("enable-cors", response, op_start_time)
}
