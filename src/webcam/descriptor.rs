use crate::app_config::BridgeSettings;
use crate::stream_profile::StreamProfile;
use log::debug;
use serde::{Deserialize, Serialize};

pub const WEBCAM_NAMESPACE: &str = "go2rtc";
pub const DEFAULT_STREAM_RATIO: &str = "4:3";

/// Normalized, host-facing view of one go2rtc stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebcamDescriptor {
    pub name: String,
    pub display_name: String,
    pub flip_h: bool,
    pub flip_v: bool,
    pub rotate90: bool,
    pub snapshot_display: Option<String>,
    pub can_snapshot: bool,
    pub stream: String,
    pub stream_timeout: u64,
    pub stream_ratio: String,
    pub cache_buster: bool,
    pub stream_webrtc_ice_servers: Vec<String>,
    pub snapshot: Option<String>,
    pub snapshot_timeout: u64,
    pub snapshot_ssl_validation: bool,
}

impl WebcamDescriptor {
    /// Re-checks the snapshot URL the capture would actually use.
    pub fn snapshot_url(&self) -> Option<&str> {
        self.snapshot.as_deref().filter(|url| is_usable_snapshot_url(Some(*url)))
    }
}

/// `false` for a missing URL, an empty one, or a bare scheme placeholder.
pub fn is_usable_snapshot_url(url: Option<&str>) -> bool {
    match url.map(|u| u.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("http://") | Some("https://") => false,
        Some(_) => true,
    }
}

pub fn default_stream_url(server_url: &str, name: &str) -> String {
    format!("{}/api/ws?src={}", server_url.trim_end_matches('/'), name)
}

pub fn default_snapshot_url(server_url: &str, name: &str) -> String {
    format!("{}/api/frame.jpeg?src={}", server_url.trim_end_matches('/'), name)
}

/// Builds the descriptor for stream `name`. Each field takes the profile's
/// value when it is set and non-empty, else the computed default. A missing
/// profile behaves like one with every field unset.
pub fn build_webcam_descriptor(
    name: &str,
    profile: Option<&StreamProfile>,
    settings: &BridgeSettings,
) -> WebcamDescriptor {
    let unset = StreamProfile::default();
    let profile = profile.unwrap_or(&unset);
    let server_url = settings.base_url();

    let stream = profile
        .url_override()
        .map(str::to_string)
        .unwrap_or_else(|| default_stream_url(server_url, name));
    let snapshot = profile
        .snapshot_override()
        .map(str::to_string)
        .unwrap_or_else(|| default_snapshot_url(server_url, name));
    let stream_ratio = profile.ratio_override().unwrap_or(DEFAULT_STREAM_RATIO).to_string();
    let can_snapshot = is_usable_snapshot_url(Some(snapshot.as_str()));

    let webcam = WebcamDescriptor {
        name: format!("{}/{}", WEBCAM_NAMESPACE, name),
        display_name: name.to_string(),
        flip_h: profile.flip_h.unwrap_or(false),
        flip_v: profile.flip_v.unwrap_or(false),
        rotate90: profile.rotate90.unwrap_or(false),
        snapshot_display: Some(snapshot.clone()),
        can_snapshot,
        stream,
        stream_timeout: settings.stream_timeout,
        stream_ratio,
        cache_buster: settings.cache_buster,
        stream_webrtc_ice_servers: settings.webrtc_ice_servers.clone(),
        snapshot: Some(snapshot),
        snapshot_timeout: settings.snapshot_timeout,
        snapshot_ssl_validation: settings.snapshot_ssl_validation,
    };
    debug!("Webcam: {:?}", webcam);
    webcam
}
