mod common;

use common::{fake_jpeg, mount_config, request_count, settings_for, SAMPLE_CONFIG};
use futures::StreamExt;
use go2rtc_bridge::core::{SnapshotProxy, SnapshotTarget};
use go2rtc_bridge::errors::BridgeError;
use go2rtc_bridge::stream_profile::StreamProfile;
use go2rtc_bridge::webcam::{build_webcam_descriptor, Go2rtcWebcamProvider};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_frame(server: &MockServer, src: &str, body: Vec<u8>, delay: Duration) {
    Mock::given(method("GET"))
        .and(path("/api/frame.jpeg"))
        .and(query_param("src", src))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(body)
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn named_snapshot_resolves_against_live_config() {
    let server = MockServer::start().await;
    mount_config(&server, SAMPLE_CONFIG).await;
    let jpeg = fake_jpeg(3000);
    mount_frame(&server, "printer", jpeg.clone(), Duration::ZERO).await;

    let provider = Go2rtcWebcamProvider::new(Arc::new(settings_for(&server.uri())));
    let proxy = SnapshotProxy::new();
    let snapshot = proxy
        .take_snapshot(SnapshotTarget::Named("printer".into()), &provider)
        .await
        .unwrap();
    assert_eq!(snapshot.webcam(), "go2rtc/printer");

    let chunks: Vec<_> = snapshot.map(|c| c.unwrap()).collect().await;
    let sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
    assert_eq!(sizes, vec![1024, 1024, 952]);
    let joined: Vec<u8> = chunks.iter().flat_map(|c| c.iter().copied()).collect();
    assert_eq!(joined, jpeg);
}

#[tokio::test]
async fn namespaced_name_also_resolves() {
    let server = MockServer::start().await;
    mount_config(&server, SAMPLE_CONFIG).await;
    mount_frame(&server, "bed", fake_jpeg(64), Duration::ZERO).await;

    let provider = Go2rtcWebcamProvider::new(Arc::new(settings_for(&server.uri())));
    let body = SnapshotProxy::new()
        .take_snapshot("go2rtc/bed".into(), &provider)
        .await
        .unwrap()
        .collect_bytes()
        .await
        .unwrap();
    assert_eq!(body.len(), 64);
}

#[tokio::test]
async fn unknown_webcam_is_not_found() {
    let server = MockServer::start().await;
    mount_config(&server, SAMPLE_CONFIG).await;

    let provider = Go2rtcWebcamProvider::new(Arc::new(settings_for(&server.uri())));
    let err = SnapshotProxy::new()
        .take_snapshot(SnapshotTarget::Named("garage".into()), &provider)
        .await
        .unwrap_err();
    assert!(matches!(err, BridgeError::NotFound(_)));
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn placeholder_snapshot_url_is_refused_without_network() {
    let server = MockServer::start().await;
    let mut settings = settings_for(&server.uri());
    settings.stream_profiles.insert(
        "printer".into(),
        StreamProfile { snapshot: Some("http://".into()), ..Default::default() },
    );
    let webcam = build_webcam_descriptor("printer", settings.stream_profiles.get("printer"), &settings);
    assert!(!webcam.can_snapshot);

    let err = SnapshotProxy::new().capture(&webcam).await.unwrap_err();
    match err {
        BridgeError::SnapshotUnsupported(name) => assert_eq!(name, "go2rtc/printer"),
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn upstream_failure_keeps_its_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/frame.jpeg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let settings = settings_for(&server.uri());
    let webcam = build_webcam_descriptor("printer", None, &settings);
    let err = SnapshotProxy::new()
        .take_snapshot(SnapshotTarget::Resolved(webcam), &Go2rtcWebcamProvider::new(Arc::new(settings)))
        .await
        .unwrap_err();
    assert!(matches!(err, BridgeError::RemoteHttp { status: 404, .. }));
    assert_eq!(err.status_code(), 404);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn captures_of_different_webcams_never_overlap() {
    let server = MockServer::start().await;
    let delay = Duration::from_millis(400);
    mount_frame(&server, "printer", fake_jpeg(128), delay).await;
    mount_frame(&server, "bed", fake_jpeg(256), delay).await;

    let settings = settings_for(&server.uri());
    let printer = build_webcam_descriptor("printer", None, &settings);
    let bed = build_webcam_descriptor("bed", None, &settings);

    let proxy = SnapshotProxy::new();
    let other_handle = proxy.clone();
    let start = Instant::now();
    let (a, b) = tokio::join!(proxy.capture(&printer), other_handle.capture(&bed));
    let elapsed = start.elapsed();

    assert!(a.is_ok() && b.is_ok());
    assert!(elapsed >= delay * 2, "captures overlapped: finished in {:?}", elapsed);
    assert_eq!(a.unwrap().collect_bytes().await.unwrap().len(), 128);
    assert_eq!(b.unwrap().collect_bytes().await.unwrap().len(), 256);
}
