mod common;

use common::{mount_config, settings_for, SAMPLE_CONFIG, UNREACHABLE_SERVER};
use go2rtc_bridge::errors::BridgeError;
use go2rtc_bridge::go2rtc::Go2rtcClient;
use go2rtc_bridge::webcam::{Go2rtcWebcamProvider, WebcamSource};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetches_streams_and_origin() {
    let server = MockServer::start().await;
    mount_config(&server, SAMPLE_CONFIG).await;

    let client = Go2rtcClient::for_config(&server.uri(), true).unwrap();
    let config = client.fetch_config().await;
    assert_eq!(config.stream_names(), vec!["printer", "bed"]);
    assert_eq!(config.api_origin(), Some("*"));
}

#[tokio::test]
async fn unreachable_server_degrades_to_empty() {
    let client = Go2rtcClient::for_config(UNREACHABLE_SERVER, true).unwrap();
    let config = client.fetch_config().await;
    assert!(config.is_empty());

    let err = client.try_fetch_config().await.unwrap_err();
    assert!(matches!(err, BridgeError::NetworkUnavailable(_)), "got {:?}", err);
}

#[tokio::test]
async fn non_200_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let client = Go2rtcClient::for_config(&server.uri(), true).unwrap();
    assert!(client.fetch_config().await.is_empty());
    let err = client.try_fetch_config().await.unwrap_err();
    assert!(matches!(err, BridgeError::RemoteHttp { status: 500, .. }));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_CONFIG).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = Go2rtcClient::new(&server.uri(), Duration::from_millis(300), true).unwrap();
    let err = client.try_fetch_config().await.unwrap_err();
    assert!(matches!(err, BridgeError::Timeout(_)), "got {:?}", err);
}

#[tokio::test]
async fn provider_builds_one_webcam_per_stream() {
    let server = MockServer::start().await;
    mount_config(&server, SAMPLE_CONFIG).await;

    let provider = Go2rtcWebcamProvider::new(Arc::new(settings_for(&server.uri())));
    let webcams = provider.webcams().await;

    assert_eq!(webcams.len(), 2);
    let printer = &webcams[0];
    assert_eq!(printer.display_name, "printer");
    assert_eq!(printer.name, "go2rtc/printer");
    assert_eq!(printer.stream, format!("{}/api/ws?src=printer", server.uri()));
    assert_eq!(
        printer.snapshot.as_deref(),
        Some(format!("{}/api/frame.jpeg?src=printer", server.uri()).as_str())
    );
    assert!(printer.can_snapshot);
    assert_eq!(webcams[1].display_name, "bed");
}

#[tokio::test]
async fn provider_refetches_on_every_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_CONFIG))
        .expect(2)
        .mount(&server)
        .await;

    let provider = Go2rtcWebcamProvider::new(Arc::new(settings_for(&server.uri())));
    provider.webcams().await;
    provider.webcams().await;
}

#[tokio::test]
async fn provider_against_dead_server_lists_nothing() {
    let provider = Go2rtcWebcamProvider::new(Arc::new(settings_for(UNREACHABLE_SERVER)));
    assert!(provider.webcams().await.is_empty());
}
