use crate::core::permissions::{Capability, Permissions};
use crate::errors::BridgeError;
use crate::go2rtc::{CaptureSourceInfo, Go2rtcClient};
use log::{debug, error, info, warn};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use std::time::Instant;

/// Success envelope returned to the host for a management command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandResponse {
    pub fn ok() -> Self {
        CommandResponse { success: true, error: None }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        CommandResponse { success: false, error: Some(reason.into()) }
    }
}

/// Result of probing a server URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerValidation {
    pub success: bool,
    /// `true` when go2rtc already allows cross-origin requests (`api.origin: "*"`).
    pub api: bool,
    pub streams: Mapping,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The go2rtc server a command is aimed at, as sent by the host UI.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerTarget {
    pub server_url: String,
    #[serde(default)]
    pub ignore_ssl_validation: bool,
}

impl ServerTarget {
    pub fn new(server_url: impl Into<String>, ignore_ssl_validation: bool) -> Self {
        ServerTarget { server_url: server_url.into(), ignore_ssl_validation }
    }

    fn command_client(&self) -> Result<Go2rtcClient, BridgeError> {
        Go2rtcClient::for_commands(&self.server_url, !self.ignore_ssl_validation)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ApiCommand {
    AddStream {
        name: String,
        src: String,
        server_url: String,
        #[serde(default)]
        ignore_ssl_validation: bool,
    },
    RemoveStream {
        name: String,
        server_url: String,
        #[serde(default)]
        ignore_ssl_validation: bool,
    },
    EnableCors {
        server_url: String,
        #[serde(default)]
        ignore_ssl_validation: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum ApiQuery {
    TestUrl {
        server_url: String,
        #[serde(default)]
        ignore_ssl_validation: bool,
    },
    GetCams {
        server_url: String,
        #[serde(default)]
        ignore_ssl_validation: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Validation(ServerValidation),
    Sources { sources: Vec<CaptureSourceInfo> },
}

#[derive(Serialize)]
struct CorsPatch {
    api: CorsOrigin,
}

#[derive(Serialize)]
struct CorsOrigin {
    origin: &'static str,
}

/// Replaces every character outside `[A-Za-z0-9_]` with `_`.
pub fn sanitize_stream_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

fn status_response(action: &str, server_url: &str, status: StatusCode) -> CommandResponse {
    if status == StatusCode::OK {
        CommandResponse::ok()
    } else {
        warn!("⚠️ {} on {} answered HTTP {}", action, server_url, status);
        CommandResponse::failed(format!("{} returned HTTP {}", action, status.as_u16()))
    }
}

/// Management API over a go2rtc server. Every operation checks the
/// caller's capabilities before any request leaves the process.
#[derive(Debug, Clone)]
pub struct ManagementCommands {
    permissions: Permissions,
}

impl ManagementCommands {
    pub fn new(permissions: Permissions) -> Self {
        ManagementCommands { permissions }
    }

    fn authorize(&self, action: &str) -> Result<(), BridgeError> {
        self.permissions.require(Capability::ManageStreams, action)
    }

    pub async fn add_stream(&self, server: &ServerTarget, name: &str, src: &str) -> Result<CommandResponse, BridgeError> {
        self.authorize("add_stream")?;
        let client = server.command_client()?;
        let name = sanitize_stream_name(name);
        if name.is_empty() || src.trim().is_empty() {
            return Ok(CommandResponse::failed("stream name and source are required"));
        }
        info!("➕ Adding stream '{}' ({}) on {}", name, src, client.base_url());
        let status = client.put_stream(&name, src.trim()).await?;
        Ok(status_response("add_stream", client.base_url(), status))
    }

    pub async fn remove_stream(&self, server: &ServerTarget, name: &str) -> Result<CommandResponse, BridgeError> {
        self.authorize("remove_stream")?;
        let client = server.command_client()?;
        let name = name.trim();
        if name.is_empty() {
            return Ok(CommandResponse::failed("stream name is required"));
        }
        info!("➖ Removing stream '{}' from {}", name, client.base_url());
        let status = client.delete_stream(name).await?;
        Ok(status_response("remove_stream", client.base_url(), status))
    }

    /// Sets `api.origin: "*"` and restarts go2rtc. A failed restart is an
    /// overall failure even though the patch stays applied.
    pub async fn enable_cors(&self, server: &ServerTarget) -> Result<CommandResponse, BridgeError> {
        self.authorize("enable_cors")?;
        let client = server.command_client()?;
        let start_time = Instant::now();

        let body = serde_yaml::to_string(&CorsPatch { api: CorsOrigin { origin: "*" } })
            .map_err(|e| BridgeError::Config(e.to_string()))?;
        info!("🌐 Enabling CORS on {}", client.base_url());
        let patch_status = client.patch_config(body).await?;
        if patch_status != StatusCode::OK {
            return Ok(status_response("config patch", client.base_url(), patch_status));
        }

        debug!("Config patched, restarting go2rtc at {}", client.base_url());
        let restart_status = client.restart().await?;
        if restart_status != StatusCode::OK {
            error!("❌ CORS patch applied on {} but restart answered HTTP {}", client.base_url(), restart_status);
            return Ok(status_response("restart", client.base_url(), restart_status));
        }
        info!("✅ CORS enabled and go2rtc restarted in {:?}", start_time.elapsed());
        Ok(CommandResponse::ok())
    }

    pub async fn validate_server(&self, server: &ServerTarget) -> Result<ServerValidation, BridgeError> {
        self.authorize("test_url")?;
        let client = match Go2rtcClient::for_config(&server.server_url, !server.ignore_ssl_validation) {
            Ok(client) => client,
            Err(e) => {
                return Ok(ServerValidation { success: false, api: false, streams: Mapping::new(), error: Some(e.to_string()) })
            }
        };
        match client.try_fetch_config().await {
            Ok(config) => Ok(ServerValidation {
                success: true,
                api: config.cors_enabled(),
                streams: config.streams_mapping(),
                error: None,
            }),
            Err(e) => {
                warn!("⚠️ Server {} failed validation: {}", server.server_url, e);
                Ok(ServerValidation { success: false, api: false, streams: Mapping::new(), error: Some(e.to_string()) })
            }
        }
    }

    pub async fn list_capture_sources(&self, server: &ServerTarget) -> Result<Vec<CaptureSourceInfo>, BridgeError> {
        self.authorize("get_cams")?;
        let client = Go2rtcClient::for_config(&server.server_url, !server.ignore_ssl_validation)?;
        client.ffmpeg_devices().await
    }

    pub async fn dispatch(&self, command: ApiCommand) -> Result<CommandResponse, BridgeError> {
        match command {
            ApiCommand::AddStream { name, src, server_url, ignore_ssl_validation } => {
                self.add_stream(&ServerTarget::new(server_url, ignore_ssl_validation), &name, &src).await
            }
            ApiCommand::RemoveStream { name, server_url, ignore_ssl_validation } => {
                self.remove_stream(&ServerTarget::new(server_url, ignore_ssl_validation), &name).await
            }
            ApiCommand::EnableCors { server_url, ignore_ssl_validation } => {
                self.enable_cors(&ServerTarget::new(server_url, ignore_ssl_validation)).await
            }
        }
    }

    pub async fn query(&self, query: ApiQuery) -> Result<QueryResponse, BridgeError> {
        match query {
            ApiQuery::TestUrl { server_url, ignore_ssl_validation } => self
                .validate_server(&ServerTarget::new(server_url, ignore_ssl_validation))
                .await
                .map(QueryResponse::Validation),
            ApiQuery::GetCams { server_url, ignore_ssl_validation } => self
                .list_capture_sources(&ServerTarget::new(server_url, ignore_ssl_validation))
                .await
                .map(|sources| QueryResponse::Sources { sources }),
        }
    }
}
