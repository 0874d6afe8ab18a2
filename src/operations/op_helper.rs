use crate::app_config::BridgeSettings;
use crate::core::{ManagementCommands, Permissions, ServerTarget, SnapshotProxy};
use crate::errors::BridgeError;
use crate::webcam::Go2rtcWebcamProvider;
use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use std::sync::Arc;

/// Everything an operation handler needs, built once from the settings.
pub struct BridgeContext {
    pub settings: Arc<BridgeSettings>,
    pub provider: Go2rtcWebcamProvider,
    pub snapshot_proxy: SnapshotProxy,
    pub management: ManagementCommands,
}

impl BridgeContext {
    pub fn new(settings: BridgeSettings) -> Self {
        let settings = Arc::new(settings);
        let permissions = Permissions::from_capabilities(settings.capabilities.iter().copied());
        debug!("🛠️ Bridge context for {} with capabilities {:?}", settings.server_url, settings.capabilities);
        BridgeContext {
            provider: Go2rtcWebcamProvider::new(settings.clone()),
            snapshot_proxy: SnapshotProxy::new(),
            management: ManagementCommands::new(permissions),
            settings,
        }
    }

    /// The configured go2rtc server, as a management-command target.
    pub fn server_target(&self) -> ServerTarget {
        ServerTarget::new(self.settings.server_url.clone(), self.settings.ignore_ssl_validation)
    }
}

/// Attaches the HTTP status the host would answer with.
pub fn with_status(err: BridgeError) -> anyhow::Error {
    let status = err.status_code();
    anyhow::Error::new(err).context(format!("request failed (HTTP {})", status))
}

pub fn print_yaml<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_yaml::to_string(value).context("Failed to render result as YAML")?;
    print!("{}", rendered);
    Ok(())
}
