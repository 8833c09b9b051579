//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! database and logging sections. Every section defaults sensibly so a
//! completely empty `{}` file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.database.pool_size == 0 {
            warnings.push("database.pool_size is 0; pool creation will fail".into());
        }
        if self.database.path.as_os_str().is_empty() {
            warnings.push("database.path is empty".into());
        }
        if self.logging.filter.trim().is_empty() {
            warnings.push("logging.filter is empty; nothing will be logged".into());
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// SQLite storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub pool_size: u32,
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("mediaseg.db"),
            pool_size: 4,
            busy_timeout_ms: 5000,
        }
    }
}

/// Log output settings. `RUST_LOG` takes precedence over `filter`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "mediaseg=info,ms_db=info,ms_segments=info".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = Config::default();
        assert_eq!(cfg.database.path, PathBuf::from("mediaseg.db"));
        assert_eq!(cfg.database.pool_size, 4);
        assert_eq!(cfg.database.busy_timeout_ms, 5000);
        assert!(cfg.logging.filter.contains("ms_segments"));
    }

    #[test]
    fn default_config_no_warnings() {
        let warnings = Config::default().validate();
        assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
    }

    #[test]
    fn zero_pool_size_warns() {
        let mut cfg = Config::default();
        cfg.database.pool_size = 0;
        assert!(cfg.validate().iter().any(|w| w.contains("pool_size")));
    }

    #[test]
    fn empty_filter_warns() {
        let mut cfg = Config::default();
        cfg.logging.filter = "  ".into();
        assert!(cfg.validate().iter().any(|w| w.contains("logging.filter")));
    }

    #[test]
    fn parse_json_config() {
        let json = r#"{"database": {"path": "/tmp/x.db", "pool_size": 8}}"#;
        let cfg = Config::from_json(json).unwrap();
        assert_eq!(cfg.database.path, PathBuf::from("/tmp/x.db"));
        assert_eq!(cfg.database.pool_size, 8);
        assert_eq!(cfg.database.busy_timeout_ms, 5000);
    }

    #[test]
    fn parse_empty_json_uses_defaults() {
        let cfg = Config::from_json("{}").unwrap();
        assert_eq!(cfg.database.pool_size, 4);
    }

    #[test]
    fn parse_invalid_json_is_validation_error() {
        let err = Config::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn load_or_default_with_none() {
        let cfg = Config::load_or_default(None);
        assert_eq!(cfg.database.pool_size, 4);
    }

    #[test]
    fn load_or_default_with_missing_file() {
        let cfg = Config::load_or_default(Some(Path::new("/nonexistent/mediaseg.json")));
        assert_eq!(cfg.database.pool_size, 4);
    }

    #[test]
    fn load_or_default_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"logging": {"filter": "debug"}}"#).unwrap();
        let cfg = Config::load_or_default(Some(&path));
        assert_eq!(cfg.logging.filter, "debug");
    }

    #[test]
    fn load_or_default_with_garbage_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "garbage").unwrap();
        let cfg = Config::load_or_default(Some(&path));
        assert_eq!(cfg.database.pool_size, 4);
    }
}
