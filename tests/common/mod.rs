// Shared helpers for the integration tests.
#![allow(dead_code)]

use go2rtc_bridge::core::{Capability, ManagementCommands, Permissions, ServerTarget};
use go2rtc_bridge::BridgeSettings;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SAMPLE_CONFIG: &str = r#"
api:
  listen: ":1984"
  origin: "*"
streams:
  printer: rtsp://10.0.0.12:554/live
  bed: ffmpeg:device?video=0
"#;

/// A port nothing listens on.
pub const UNREACHABLE_SERVER: &str = "http://127.0.0.1:9";

pub fn settings_for(server_url: &str) -> BridgeSettings {
    BridgeSettings {
        server_url: server_url.to_string(),
        snapshot_timeout: 5,
        ..Default::default()
    }
}

pub fn admin() -> ManagementCommands {
    ManagementCommands::new(Permissions::from_capabilities([Capability::ManageStreams]))
}

pub fn nobody() -> ManagementCommands {
    ManagementCommands::new(Permissions::none())
}

pub fn target(server: &MockServer) -> ServerTarget {
    ServerTarget::new(server.uri(), false)
}

pub fn fake_jpeg(len: usize) -> Vec<u8> {
    let mut body = vec![0xFF, 0xD8, 0xFF, 0xE0];
    body.extend((0..len.saturating_sub(6)).map(|i| (i % 251) as u8));
    body.extend([0xFF, 0xD9]);
    body
}

pub async fn mount_config(server: &MockServer, yaml: &str) {
    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(ResponseTemplate::new(200).set_body_string(yaml))
        .mount(server)
        .await;
}

pub async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map(|r| r.len()).unwrap_or(0)
}
