use crate::app_config::BridgeSettings;
use crate::go2rtc::client::parse_server_url;
use anyhow::{anyhow, bail, Context, Result};
use chrono::format::{Item, StrftimeItems};
use log::{debug, info, warn};
use std::fs;
use std::path::Path;
use std::time::Instant;

pub const DEFAULT_CONFIG_PATH: &str = "config/go2rtc-bridge.yaml";

/// Loads settings from `path`. A missing file at the default location falls
/// back to built-in defaults; a missing explicit file is an error.
pub fn load_config(path: &str, explicit: bool) -> Result<BridgeSettings> {
    debug!("📄 Attempting to load config from: {}", path);
    let start_time = Instant::now();

    if !explicit && !Path::new(path).exists() {
        warn!("⚠️ No settings file at '{}', using built-in defaults.", path);
        let settings = BridgeSettings::default();
        validate_settings(&settings)?;
        return Ok(settings);
    }

    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file '{}'. 📖", path))?;
    debug!("Read config file in {:?}", start_time.elapsed());

    let parse_start_time = Instant::now();
    let settings: BridgeSettings = serde_yaml::from_str(&config_str)
        .with_context(|| format!("Failed to parse YAML configuration from '{}'. 💔", path))?;
    debug!("Parsed YAML in {:?}", parse_start_time.elapsed());

    validate_settings(&settings).with_context(|| "Settings validation failed 👎")?;

    info!("✅ Successfully loaded and validated configuration from '{}' in {:?}", path, start_time.elapsed());
    Ok(settings)
}

pub fn validate_settings(settings: &BridgeSettings) -> Result<()> {
    debug!("🕵️ Validating bridge settings...");
    validate_server_url(&settings.server_url)?;

    if settings.stream_timeout == 0 {
        bail!("❌ stream_timeout must be greater than zero.");
    }
    if settings.snapshot_timeout == 0 {
        bail!("❌ snapshot_timeout must be greater than zero.");
    }
    if settings.stream_profiles.keys().any(|k| k.trim().is_empty()) {
        bail!("❌ Stream profile names cannot be empty.");
    }
    if settings.output_directory.is_empty() {
        bail!("❌ output_directory cannot be empty.");
    }
    if StrftimeItems::new(&settings.filename_timestamp_format).any(|i| matches!(i, Item::Error)) {
        bail!("❌ filename_timestamp_format '{}' is not a valid strftime format.", settings.filename_timestamp_format);
    }
    debug!("Settings validated, {} stream profile(s).", settings.stream_profiles.len());
    Ok(())
}

pub fn validate_server_url(server_url: &str) -> Result<()> {
    if server_url.trim().is_empty() {
        bail!("❌ server_url cannot be empty.");
    }
    parse_server_url(server_url).map_err(|e| anyhow!("❌ {}", e))?;
    Ok(())
}
