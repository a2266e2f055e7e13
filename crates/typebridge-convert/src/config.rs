//! Converter configuration

use serde::{Deserialize, Serialize};
use typebridge_diagnostics::{ConvertError, Result};

/// Settings used to assemble a [`UniversalConverter`](crate::UniversalConverter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Backend identifier, e.g. `postgresql` or `clickhouse`
    pub backend: String,
    /// Register the stock handler for a known backend identifier
    pub install_backend_handler: bool,
    /// Keep the unwrapped value when it has no nullable container.
    /// When off, the failed wrap is a conversion error.
    pub lenient_nullable_wrap: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            backend: String::new(),
            install_backend_handler: true,
            lenient_nullable_wrap: true,
        }
    }
}

impl ConverterConfig {
    /// Create a config for a backend with default settings
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            ..Self::default()
        }
    }

    /// Load a config from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ConvertError::config(format!("invalid converter config: {e}")))
    }

    pub fn with_backend_handler(mut self, install: bool) -> Self {
        self.install_backend_handler = install;
        self
    }

    pub fn with_lenient_nullable_wrap(mut self, lenient: bool) -> Self {
        self.lenient_nullable_wrap = lenient;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typebridge_diagnostics::TB0300;

    #[test]
    fn test_defaults() {
        let config = ConverterConfig::default();
        assert!(config.backend.is_empty());
        assert!(config.install_backend_handler);
        assert!(config.lenient_nullable_wrap);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ConverterConfig::from_json(r#"{"backend":"clickhouse"}"#).unwrap();
        assert_eq!(config, ConverterConfig::new("clickhouse"));

        let strict =
            ConverterConfig::from_json(r#"{"backend":"mysql","lenient_nullable_wrap":false}"#)
                .unwrap();
        assert!(!strict.lenient_nullable_wrap);
        assert!(strict.install_backend_handler);
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        let err = ConverterConfig::from_json(r#"{"backend":42}"#).unwrap_err();
        assert_eq!(err.code(), TB0300);
        assert!(ConverterConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_builders() {
        let config = ConverterConfig::new("sqlite")
            .with_backend_handler(false)
            .with_lenient_nullable_wrap(false);
        assert_eq!(config.backend, "sqlite");
        assert!(!config.install_backend_handler);
        assert!(!config.lenient_nullable_wrap);
    }
}
