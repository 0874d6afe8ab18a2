use crate::app_config::BridgeSettings;
use crate::go2rtc::{Go2rtcClient, RemoteConfig};
use crate::webcam::descriptor::{build_webcam_descriptor, WebcamDescriptor};
use async_trait::async_trait;
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Instant;

/// Anything that can answer "what are the current webcams?".
#[async_trait]
pub trait WebcamSource: Send + Sync {
    async fn webcams(&self) -> Vec<WebcamDescriptor>;

    /// Looks a webcam up by its namespaced name or its display name.
    async fn find_webcam(&self, name: &str) -> Option<WebcamDescriptor> {
        self.webcams()
            .await
            .into_iter()
            .find(|w| w.name == name || w.display_name == name)
    }
}

/// Webcams derived from the live go2rtc configuration. Nothing is cached:
/// every query goes back to the server.
#[derive(Clone)]
pub struct Go2rtcWebcamProvider {
    settings: Arc<BridgeSettings>,
}

impl Go2rtcWebcamProvider {
    pub fn new(settings: Arc<BridgeSettings>) -> Self {
        Go2rtcWebcamProvider { settings }
    }

    pub fn settings(&self) -> &BridgeSettings {
        &self.settings
    }

    pub async fn fetch_remote_config(&self) -> RemoteConfig {
        match Go2rtcClient::for_config(&self.settings.server_url, !self.settings.ignore_ssl_validation) {
            Ok(client) => client.fetch_config().await,
            Err(e) => {
                error!("❌ Cannot query go2rtc, bad server_url '{}': {}", self.settings.server_url, e);
                RemoteConfig::default()
            }
        }
    }

    /// Builds one descriptor per enabled stream of `config`.
    pub fn descriptors_for(&self, config: &RemoteConfig) -> Vec<WebcamDescriptor> {
        config
            .stream_names()
            .into_iter()
            .filter(|name| {
                let disabled = self.settings.is_stream_disabled(name);
                if disabled {
                    debug!("  Skipping disabled stream '{}'", name);
                }
                !disabled
            })
            .map(|name| {
                let profile = self.settings.stream_profiles.get(&name);
                build_webcam_descriptor(&name, profile, &self.settings)
            })
            .collect()
    }
}

#[async_trait]
impl WebcamSource for Go2rtcWebcamProvider {
    async fn webcams(&self) -> Vec<WebcamDescriptor> {
        let start_time = Instant::now();
        let config = self.fetch_remote_config().await;
        let webcams = self.descriptors_for(&config);
        info!("📷 Resolved {} webcam(s) from {} in {:?}", webcams.len(), self.settings.server_url, start_time.elapsed());
        webcams
    }
}
