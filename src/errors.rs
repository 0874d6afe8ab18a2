use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Network Unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Remote server returned HTTP {status} for {url}")]
    RemoteHttp { status: u16, url: String },

    #[error("Snapshot not supported by webcam {0}")]
    SnapshotUnsupported(String),

    #[error("Permission Denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid server URL: {0}")]
    InvalidServerUrl(String),

    #[error("Resource Not Found: {0}")]
    NotFound(String),

    #[error("Invalid document from remote server: {0}")]
    InvalidDocument(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("File I/O Error: {0}")]
    Io(String),
}

impl BridgeError {
    /// HTTP status the host framework should answer with for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            BridgeError::PermissionDenied(_) => 403,
            BridgeError::NotFound(_) => 404,
            BridgeError::SnapshotUnsupported(_) => 409,
            BridgeError::RemoteHttp { status, .. } => *status,
            BridgeError::InvalidServerUrl(_)
            | BridgeError::NetworkUnavailable(_)
            | BridgeError::InvalidDocument(_) => 502,
            BridgeError::Timeout(_) => 504,
            BridgeError::Config(_) | BridgeError::Io(_) => 500,
        }
    }
}

// Allow conversion from std::io::Error to BridgeError::Io
impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown url>".to_string());
        if err.is_timeout() {
            BridgeError::Timeout(url)
        } else if err.is_builder() {
            BridgeError::InvalidServerUrl(err.to_string())
        } else if let Some(status) = err.status() {
            BridgeError::RemoteHttp { status: status.as_u16(), url }
        } else if err.is_connect() {
            BridgeError::NetworkUnavailable(format!("{}: {}", url, err))
        } else {
            BridgeError::NetworkUnavailable(err.to_string())
        }
    }
}

impl From<serde_yaml::Error> for BridgeError {
    fn from(err: serde_yaml::Error) -> Self {
        BridgeError::InvalidDocument(err.to_string())
    }
}
