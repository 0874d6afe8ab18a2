use crate::errors::BridgeError;
use crate::webcam::{WebcamDescriptor, WebcamSource};
use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream, Stream, StreamExt};
use log::{debug, error, info};
use reqwest::Client;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

pub const SNAPSHOT_CHUNK_SIZE: usize = 1024;

/// What the host asks to capture: a webcam name still to be resolved
/// against the live configuration, or a descriptor it already holds.
#[derive(Debug, Clone)]
pub enum SnapshotTarget {
    Named(String),
    Resolved(WebcamDescriptor),
}

impl From<WebcamDescriptor> for SnapshotTarget {
    fn from(webcam: WebcamDescriptor) -> Self {
        SnapshotTarget::Resolved(webcam)
    }
}

impl From<&str> for SnapshotTarget {
    fn from(name: &str) -> Self {
        SnapshotTarget::Named(name.to_string())
    }
}

/// Snapshot body as fixed-size chunks. Consumed once.
pub struct SnapshotStream {
    webcam: String,
    inner: BoxStream<'static, Result<Bytes, BridgeError>>,
}

impl SnapshotStream {
    pub fn webcam(&self) -> &str {
        &self.webcam
    }

    /// Drains the remaining chunks into one buffer.
    pub async fn collect_bytes(mut self) -> Result<Vec<u8>, BridgeError> {
        let mut body = Vec::new();
        while let Some(chunk) = self.inner.next().await {
            body.extend_from_slice(&chunk?);
        }
        Ok(body)
    }
}

impl fmt::Debug for SnapshotStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotStream").field("webcam", &self.webcam).finish_non_exhaustive()
    }
}

impl Stream for SnapshotStream {
    type Item = Result<Bytes, BridgeError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

/// Re-slices `inner` into `chunk_size` pieces; only the last may be shorter.
/// An upstream error ends the stream after being yielded.
fn fixed_chunks<S>(inner: S, chunk_size: usize) -> BoxStream<'static, Result<Bytes, BridgeError>>
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
{
    stream::unfold(
        (Box::pin(inner), BytesMut::new(), false),
        move |(mut inner, mut buf, mut exhausted)| async move {
            loop {
                if buf.len() >= chunk_size {
                    let chunk = buf.split_to(chunk_size).freeze();
                    return Some((Ok(chunk), (inner, buf, exhausted)));
                }
                if exhausted {
                    if buf.is_empty() {
                        return None;
                    }
                    let chunk = buf.split().freeze();
                    return Some((Ok(chunk), (inner, buf, exhausted)));
                }
                match inner.next().await {
                    Some(Ok(bytes)) => buf.extend_from_slice(&bytes),
                    Some(Err(e)) => {
                        buf.clear();
                        return Some((Err(BridgeError::from(e)), (inner, buf, true)));
                    }
                    None => exhausted = true,
                }
            }
        },
    )
    .boxed()
}

/// Proxies snapshot requests to the webcams' snapshot URLs.
///
/// All captures share one lock, across every webcam, so at most one
/// snapshot request is in flight. The lock is held from sending the request
/// until the response headers arrive; the body is streamed without it.
#[derive(Clone)]
pub struct SnapshotProxy {
    capture_lock: Arc<Mutex<()>>,
}

impl Default for SnapshotProxy {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotProxy {
    pub fn new() -> Self {
        SnapshotProxy { capture_lock: Arc::new(Mutex::new(())) }
    }

    pub async fn resolve(
        &self,
        target: SnapshotTarget,
        source: &dyn WebcamSource,
    ) -> Result<WebcamDescriptor, BridgeError> {
        match target {
            SnapshotTarget::Resolved(webcam) => Ok(webcam),
            SnapshotTarget::Named(name) => {
                debug!("🔎 Resolving webcam '{}' against live config", name);
                source
                    .find_webcam(&name)
                    .await
                    .ok_or_else(|| BridgeError::NotFound(format!("webcam '{}'", name)))
            }
        }
    }

    pub async fn take_snapshot(
        &self,
        target: SnapshotTarget,
        source: &dyn WebcamSource,
    ) -> Result<SnapshotStream, BridgeError> {
        let webcam = self.resolve(target, source).await?;
        self.capture(&webcam).await
    }

    pub async fn capture(&self, webcam: &WebcamDescriptor) -> Result<SnapshotStream, BridgeError> {
        let snapshot_url = match webcam.snapshot_url() {
            Some(url) if webcam.can_snapshot => url.to_string(),
            _ => {
                error!("❌ Webcam '{}' has no usable snapshot URL", webcam.name);
                return Err(BridgeError::SnapshotUnsupported(webcam.name.clone()));
            }
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(webcam.snapshot_timeout))
            .danger_accept_invalid_certs(!webcam.snapshot_ssl_validation)
            .build()?;

        let response = {
            let _guard = self.capture_lock.lock().await;
            let start_time = Instant::now();
            debug!("Capturing image from {}", snapshot_url);
            let response = client.get(&snapshot_url).send().await?;
            debug!(
                "Snapshot headers for '{}' received in {:?} (HTTP {})",
                webcam.name,
                start_time.elapsed(),
                response.status()
            );
            response
        };

        if !response.status().is_success() {
            error!("❌ Snapshot for '{}' failed with HTTP {}", webcam.name, response.status());
            return Err(BridgeError::RemoteHttp {
                status: response.status().as_u16(),
                url: snapshot_url,
            });
        }

        info!("📸 Streaming snapshot for '{}' from {}", webcam.name, snapshot_url);
        Ok(SnapshotStream {
            webcam: webcam.name.clone(),
            inner: fixed_chunks(response.bytes_stream(), SNAPSHOT_CHUNK_SIZE),
        })
    }
}
