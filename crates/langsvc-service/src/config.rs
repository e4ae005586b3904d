//! The two recognized configuration options: whether to silence logging,
//! and the initial set of workspace roots.

use serde::Deserialize;
use std::path::PathBuf;

/// Deserialized from the editor's initialization payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Silences non-error logging when set.
    pub quiet: bool,
    /// Directories to index on startup.
    pub workspace_roots: Vec<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { quiet: false, workspace_roots: Vec::new() }
    }
}

impl ServiceConfig {
    /// Parses a configuration payload, falling back to defaults for any
    /// field the caller omitted.
    pub fn from_json(value: &serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = ServiceConfig::from_json(&json!({})).unwrap();
        assert!(!config.quiet);
        assert!(config.workspace_roots.is_empty());
    }

    #[test]
    fn parses_both_recognized_options() {
        let config = ServiceConfig::from_json(&json!({
            "quiet": true,
            "workspace_roots": ["/ws/src"],
        }))
        .unwrap();
        assert!(config.quiet);
        assert_eq!(config.workspace_roots, vec![PathBuf::from("/ws/src")]);
    }
}
