use crate::errors::BridgeError;
use crate::go2rtc::remote_config::RemoteConfig;
use log::{debug, error, info, warn};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub const CONFIG_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
pub const CONFIG_READ_TIMEOUT: Duration = Duration::from_secs(10);
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// One entry of `GET /api/ffmpeg/devices`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CaptureSourceInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct DevicesResponse {
    #[serde(default)]
    sources: Vec<CaptureSourceInfo>,
}

/// Checks that `server_url` is an absolute http(s) URL.
pub fn parse_server_url(server_url: &str) -> Result<Url, BridgeError> {
    let url = Url::parse(server_url.trim())
        .map_err(|e| BridgeError::InvalidServerUrl(format!("'{}': {}", server_url, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(BridgeError::InvalidServerUrl(format!(
            "'{}': unsupported scheme '{}'",
            server_url, other
        ))),
    }
}

/// Thin HTTP client for one go2rtc server. Every call is single-shot.
#[derive(Clone)]
pub struct Go2rtcClient {
    base_url: String,
    http: Client,
}

impl Go2rtcClient {
    pub fn new(server_url: &str, timeout: Duration, ssl_validation: bool) -> Result<Self, BridgeError> {
        parse_server_url(server_url)?;
        let http = Client::builder()
            .connect_timeout(CONFIG_CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .danger_accept_invalid_certs(!ssl_validation)
            .build()?;
        Ok(Go2rtcClient {
            base_url: server_url.trim().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Client with the config-fetch timeouts (3s connect, 10s read).
    pub fn for_config(server_url: &str, ssl_validation: bool) -> Result<Self, BridgeError> {
        Self::new(server_url, CONFIG_READ_TIMEOUT, ssl_validation)
    }

    /// Client with the short management-command timeout.
    pub fn for_commands(server_url: &str, ssl_validation: bool) -> Result<Self, BridgeError> {
        Self::new(server_url, COMMAND_TIMEOUT, ssl_validation)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn try_fetch_config(&self) -> Result<RemoteConfig, BridgeError> {
        let url = self.endpoint("/api/config");
        debug!("📡 Fetching go2rtc config from {}", url);
        let start_time = Instant::now();

        let response = self.http.get(&url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(BridgeError::RemoteHttp { status: response.status().as_u16(), url });
        }
        let body = response.text().await?;
        let config = RemoteConfig::parse(&body)?;
        debug!(
            "Fetched config with {} stream(s) from {} in {:?}",
            config.stream_names().len(),
            self.base_url,
            start_time.elapsed()
        );
        Ok(config)
    }

    /// Like [`try_fetch_config`](Self::try_fetch_config), but every failure
    /// degrades to an empty config after logging its cause.
    pub async fn fetch_config(&self) -> RemoteConfig {
        match self.try_fetch_config().await {
            Ok(config) => config,
            Err(e) => {
                match &e {
                    BridgeError::Timeout(_) => {
                        warn!("⏱️ Timed out fetching config from {}: {}", self.base_url, e)
                    }
                    BridgeError::NetworkUnavailable(_) => {
                        warn!("🔌 Could not reach go2rtc at {}: {}", self.base_url, e)
                    }
                    BridgeError::RemoteHttp { status, .. } => {
                        warn!("❌ go2rtc at {} answered config request with HTTP {}", self.base_url, status)
                    }
                    BridgeError::InvalidDocument(_) => {
                        warn!("💔 go2rtc at {} returned an unparsable config: {}", self.base_url, e)
                    }
                    _ => error!("❌ Failed to fetch config from {}: {}", self.base_url, e),
                }
                RemoteConfig::default()
            }
        }
    }

    pub async fn ffmpeg_devices(&self) -> Result<Vec<CaptureSourceInfo>, BridgeError> {
        let url = self.endpoint("/api/ffmpeg/devices");
        debug!("📷 Listing capture sources from {}", url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(BridgeError::RemoteHttp { status: response.status().as_u16(), url });
        }
        let devices: DevicesResponse = response.json().await.map_err(|e| {
            BridgeError::InvalidDocument(format!("ffmpeg device list from {}: {}", self.base_url, e))
        })?;
        info!("📷 go2rtc at {} reports {} capture source(s)", self.base_url, devices.sources.len());
        Ok(devices.sources)
    }

    pub async fn put_stream(&self, name: &str, src: &str) -> Result<StatusCode, BridgeError> {
        let response = self
            .http
            .put(self.endpoint("/api/streams"))
            .query(&[("src", src), ("name", name)])
            .send()
            .await?;
        Ok(response.status())
    }

    pub async fn delete_stream(&self, name: &str) -> Result<StatusCode, BridgeError> {
        let response = self
            .http
            .delete(self.endpoint("/api/streams"))
            .query(&[("src", name)])
            .send()
            .await?;
        Ok(response.status())
    }

    pub async fn patch_config(&self, yaml_body: String) -> Result<StatusCode, BridgeError> {
        let response = self
            .http
            .patch(self.endpoint("/api/config"))
            .body(yaml_body)
            .send()
            .await?;
        Ok(response.status())
    }

    pub async fn restart(&self) -> Result<StatusCode, BridgeError> {
        let response = self.http.post(self.endpoint("/api/restart")).send().await?;
        Ok(response.status())
    }
}
