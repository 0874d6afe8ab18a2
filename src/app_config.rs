use crate::core::permissions::Capability;
use crate::stream_profile::StreamProfile;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BridgeSettings {
    pub server_url: String,
    pub stream_timeout: u64,   // seconds
    pub snapshot_timeout: u64, // seconds
    pub cache_buster: bool,
    pub snapshot_ssl_validation: bool,
    pub ignore_ssl_validation: bool, // API calls to the go2rtc server
    pub webrtc_ice_servers: Vec<String>,
    pub stream_profiles: HashMap<String, StreamProfile>,
    pub disabled_streams: Vec<String>,
    pub capabilities: Vec<Capability>,
    pub output_directory: String,
    pub filename_timestamp_format: String, // strftime format string
    pub log_level: Option<String>,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        BridgeSettings {
            server_url: "http://localhost:1984".to_string(),
            stream_timeout: 15,
            snapshot_timeout: 15,
            cache_buster: true,
            snapshot_ssl_validation: true,
            ignore_ssl_validation: false,
            webrtc_ice_servers: Vec::new(),
            stream_profiles: HashMap::new(),
            disabled_streams: Vec::new(),
            capabilities: vec![Capability::ManageStreams],
            output_directory: "./output".to_string(),
            filename_timestamp_format: "%Y%m%d_%H%M%S".to_string(),
            log_level: Some("info".to_string()),
        }
    }
}

impl BridgeSettings {
    /// Server URL without a trailing slash, ready for path joining.
    pub fn base_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }

    pub fn is_stream_disabled(&self, name: &str) -> bool {
        self.disabled_streams.iter().any(|d| d == name)
    }
}
