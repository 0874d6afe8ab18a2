use crate::errors::BridgeError;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

/// Transient parse of `GET /api/config`. Only `streams` and `api.origin`
/// are read; everything else in the document is ignored.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RemoteConfig {
    streams: Option<Mapping>,
    api: Option<ApiSection>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ApiSection {
    pub origin: Option<String>,
}

impl RemoteConfig {
    pub fn parse(body: &str) -> Result<Self, BridgeError> {
        if body.trim().is_empty() {
            return Ok(RemoteConfig::default());
        }
        Ok(serde_yaml::from_str(body)?)
    }

    /// Stream name -> raw definition, in document order.
    pub fn streams(&self) -> Vec<(String, Value)> {
        self.streams
            .iter()
            .flat_map(|m| m.iter())
            .filter_map(|(k, v)| stream_key(k).map(|name| (name, v.clone())))
            .collect()
    }

    pub fn stream_names(&self) -> Vec<String> {
        self.streams().into_iter().map(|(name, _)| name).collect()
    }

    pub fn streams_mapping(&self) -> Mapping {
        self.streams
            .iter()
            .flat_map(|m| m.iter())
            .filter_map(|(k, v)| stream_key(k).map(|name| (Value::String(name), v.clone())))
            .collect()
    }

    pub fn api_origin(&self) -> Option<&str> {
        self.api.as_ref().and_then(|a| a.origin.as_deref())
    }

    pub fn cors_enabled(&self) -> bool {
        self.api_origin() == Some("*")
    }

    pub fn is_empty(&self) -> bool {
        self.streams.as_ref().map_or(true, |m| m.is_empty())
    }
}

fn stream_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
