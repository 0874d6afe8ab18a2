use crate::errors::BridgeError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Mutate or inspect the go2rtc server through the management API.
    ManageStreams,
}

/// Capabilities granted to the caller of a management operation.
#[derive(Debug, Clone, Default)]
pub struct Permissions {
    granted: HashSet<Capability>,
}

impl Permissions {
    pub fn none() -> Self {
        Permissions::default()
    }

    pub fn from_capabilities<I: IntoIterator<Item = Capability>>(caps: I) -> Self {
        Permissions { granted: caps.into_iter().collect() }
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.granted.contains(&capability)
    }

    pub fn require(&self, capability: Capability, action: &str) -> Result<(), BridgeError> {
        if self.has(capability) {
            Ok(())
        } else {
            warn!("🚫 '{}' refused: caller lacks {:?}", action, capability);
            Err(BridgeError::PermissionDenied(format!("{} requires {:?}", action, capability)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_is_closed_without_capability() {
        let err = Permissions::none().require(Capability::ManageStreams, "add_stream").unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert!(Permissions::from_capabilities([Capability::ManageStreams])
            .require(Capability::ManageStreams, "add_stream")
            .is_ok());
    }

    #[test]
    fn capabilities_parse_from_settings_yaml() {
        let caps: Vec<Capability> = serde_yaml::from_str("[manage_streams]").unwrap();
        assert_eq!(caps, vec![Capability::ManageStreams]);
    }
}
