use anyhow::{bail, Context, Result};
use go2rtc_bridge::common::logging_setup;
use go2rtc_bridge::operations::op_helper::BridgeContext;
use go2rtc_bridge::{cli, config_loader, operations};
use log::{debug, error, info};
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<()> {
    let main_start_time = Instant::now();
    let matches = cli::build_cli().get_matches();

    let explicit_path = matches.get_one::<String>("config");
    let config_path = explicit_path.map(|s| s.as_str()).unwrap_or(config_loader::DEFAULT_CONFIG_PATH);

    let mut settings = match config_loader::load_config(config_path, explicit_path.is_some()) {
        Ok(settings) => {
            logging_setup::initialize_logging(Some(&settings), &matches);
            settings
        }
        Err(e) => {
            logging_setup::initialize_logging(None, &matches);
            error!("❌ Failed to load settings from '{}': {:#}. Exiting.", config_path, e);
            return Err(e.context(format!("Failed to load settings from '{}'", config_path)));
        }
    };

    let (operation_name, sub_matches) = match matches.subcommand() {
        Some(sub) => sub,
        None => bail!("No subcommand provided."),
    };

    if let Some(url) = sub_matches.get_one::<String>("server-url") {
        debug!("Server URL overridden from CLI: {}", url);
        settings.server_url = url.clone();
    }
    if sub_matches.get_flag("ignore-ssl") {
        settings.ignore_ssl_validation = true;
    }
    config_loader::validate_settings(&settings).context("Settings invalid after CLI overrides")?;

    info!("🚀 go2rtc-bridge starting against {}", settings.server_url);
    let ctx = BridgeContext::new(settings);

    debug!("🎬 Dispatching to subcommand: {}", operation_name);
    let op_start_time = Instant::now();
    let op_result: Result<()> = match operation_name {
        "webcams" => operations::webcam_list_op::handle_list_webcams_cli(&ctx).await,
        "snapshot" => operations::snapshot_op::handle_snapshot_cli(&ctx, sub_matches).await,
        "add-stream" => operations::stream_admin_op::handle_add_stream_cli(&ctx, sub_matches).await,
        "remove-stream" => operations::stream_admin_op::handle_remove_stream_cli(&ctx, sub_matches).await,
        "enable-cors" => operations::stream_admin_op::handle_enable_cors_cli(&ctx).await,
        "test-url" => operations::diagnostic_op::handle_test_url_cli(&ctx).await,
        "sources" => operations::diagnostic_op::handle_sources_cli(&ctx).await,
        other => bail!("Subcommand '{}' not implemented.", other),
    };

    if let Err(e) = op_result {
        error!("❌ Operation '{}' failed after {:?}: {:#}", operation_name, op_start_time.elapsed(), e);
        return Err(e);
    }
    info!("🏁 go2rtc-bridge finished in {:?}.", main_start_time.elapsed());
    Ok(())
}
