//! Row key configuration.

use serde::{Deserialize, Serialize};

/// How many row keys an edge is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKeyPolicy {
    /// One key per edge, with the byte-wise smaller endpoint first.
    ///
    /// A prefix scan on the smaller endpoint finds the edge; a scan on the
    /// larger one does not.
    Canonical,
    /// The canonical key plus a mirrored key with the larger endpoint first,
    /// so a prefix scan on either endpoint finds the edge. Self-loops get a
    /// single key.
    #[default]
    BothEndpoints,
}

/// Configuration for [`RowKeyEncoder`](super::RowKeyEncoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyEncodingConfig {
    /// How edges map to row keys.
    pub edge_keys: EdgeKeyPolicy,
}

impl KeyEncodingConfig {
    /// Set the edge key policy.
    #[must_use]
    pub const fn with_edge_keys(mut self, policy: EdgeKeyPolicy) -> Self {
        self.edge_keys = policy;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_both_endpoints() {
        assert_eq!(KeyEncodingConfig::default().edge_keys, EdgeKeyPolicy::BothEndpoints);
    }

    #[test]
    fn deserializes_snake_case() {
        let config: KeyEncodingConfig =
            serde_json::from_str(r#"{"edge_keys": "canonical"}"#).unwrap();
        assert_eq!(config.edge_keys, EdgeKeyPolicy::Canonical);

        let config: KeyEncodingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, KeyEncodingConfig::default());

        assert!(serde_json::from_str::<KeyEncodingConfig>(r#"{"edge_keys": "sideways"}"#).is_err());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&KeyEncodingConfig::default()).unwrap();
        assert_eq!(json, r#"{"edge_keys":"both_endpoints"}"#);
    }
}
