use serde::{Deserialize, Serialize};

/// Per-stream override record, stored by the host under `stream_profiles`.
///
/// Key names follow the host's settings layout. Every field is optional;
/// `None` or an empty string means the computed default applies.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct StreamProfile {
    pub name: Option<String>,
    #[serde(rename = "URL")]
    pub url: Option<String>,
    pub snapshot: Option<String>,
    #[serde(rename = "streamRatio")]
    pub stream_ratio: Option<String>,
    #[serde(rename = "flipH")]
    pub flip_h: Option<bool>,
    #[serde(rename = "flipV")]
    pub flip_v: Option<bool>,
    pub rotate90: Option<bool>,
    #[serde(rename = "isButtonEnabled")]
    pub is_button_enabled: Option<String>,
}

impl StreamProfile {
    pub fn url_override(&self) -> Option<&str> {
        non_empty(self.url.as_deref())
    }

    pub fn snapshot_override(&self) -> Option<&str> {
        non_empty(self.snapshot.as_deref())
    }

    pub fn ratio_override(&self) -> Option<&str> {
        non_empty(self.stream_ratio.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_keys() {
        let yaml = "URL: http://cam/stream\nsnapshot: http://cam/snap.jpg\nstreamRatio: '16:9'\nflipH: true\n";
        let profile: StreamProfile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(profile.url_override(), Some("http://cam/stream"));
        assert_eq!(profile.snapshot_override(), Some("http://cam/snap.jpg"));
        assert_eq!(profile.ratio_override(), Some("16:9"));
        assert_eq!(profile.flip_h, Some(true));
        assert_eq!(profile.flip_v, None);
    }

    #[test]
    fn blank_strings_count_as_unset() {
        let profile = StreamProfile {
            url: Some("   ".to_string()),
            snapshot: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(profile.url_override(), None);
        assert_eq!(profile.snapshot_override(), None);
    }
}
