use serde::Deserialize;

use crate::builtin;
use crate::error::EngineError;

/// Root configuration, parsed from TOML.
///
/// `converters` lists the chain in resolution order. Omitting the key
/// yields the built-in default chain; `converters = []` yields an empty
/// chain that never converts anything.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_converters")]
    pub converters: Vec<ConverterConfig>,
}

fn default_converters() -> Vec<ConverterConfig> {
    builtin::DEFAULT_CHAIN
        .iter()
        .map(|kind| ConverterConfig {
            kind: (*kind).to_string(),
            config: None,
        })
        .collect()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            converters: default_converters(),
        }
    }
}

/// One `[[converters]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConverterConfig {
    /// Registered converter kind, e.g. `string_to_bool`.
    pub kind: String,
    /// Kind-specific parameters, validated against the kind's declarations.
    #[serde(default)]
    pub config: Option<toml::Value>,
}

impl ConverterConfig {
    /// Config table as a format-independent JSON value.
    pub fn config_json(&self) -> Result<Option<serde_json::Value>, EngineError> {
        self.config
            .as_ref()
            .map(|v| {
                serde_json::to_value(v)
                    .map_err(|e| EngineError::Config(format!("converter '{}': {e}", self.kind)))
            })
            .transpose()
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::parse(&content).map_err(|e| e.with_context(path))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_converters_key_uses_default_chain() {
        let cfg = EngineConfig::parse("").unwrap();
        let kinds: Vec<_> = cfg.converters.iter().map(|c| c.kind.as_str()).collect();
        assert_eq!(kinds, builtin::DEFAULT_CHAIN);
    }

    #[test]
    fn explicit_empty_list_is_kept_empty() {
        let cfg = EngineConfig::parse("converters = []").unwrap();
        assert!(cfg.converters.is_empty());
    }

    #[test]
    fn parses_ordered_entries_with_config() {
        let cfg = EngineConfig::parse(
            r#"
            [[converters]]
            kind = "string_to_bool"
            [converters.config]
            truthy = ["yes"]

            [[converters]]
            kind = "identity"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.converters.len(), 2);
        assert_eq!(cfg.converters[0].kind, "string_to_bool");
        assert_eq!(
            cfg.converters[0].config_json().unwrap(),
            Some(serde_json::json!({ "truthy": ["yes"] }))
        );
        assert_eq!(cfg.converters[1].config_json().unwrap(), None);
    }

    #[test]
    fn rejects_entry_without_kind() {
        let err = EngineConfig::parse("[[converters]]\nconfig = {}").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn load_reports_path_on_missing_file() {
        let err = EngineConfig::load("/nonexistent/paramconv.toml").unwrap_err();
        assert!(
            matches!(&err, EngineError::Io { path, source }
                if path == "/nonexistent/paramconv.toml"
                    && source.kind() == std::io::ErrorKind::NotFound),
            "{err:?}"
        );
        assert!(err.to_string().starts_with("io error: /nonexistent/paramconv.toml: "));
    }

    #[test]
    fn load_reports_path_on_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paramconv.toml");
        std::fs::write(&path, "converters = 3\n").unwrap();
        let path = path.to_str().unwrap();
        let err = EngineConfig::load(path).unwrap_err();
        assert!(matches!(err, EngineError::Config(ref msg) if msg.starts_with(path)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paramconv.toml");
        std::fs::write(&path, "[[converters]]\nkind = \"identity\"\n").unwrap();
        let cfg = EngineConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.converters[0].kind, "identity");
    }
}
