//! Configuration for the game synchronizer.
//!
//! Built in code with [`SyncConfig::new`], or loaded from TOML:
//!
//! ```toml
//! local_player = "player-7"
//! area_id = "tictactoe-area-1"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tictactoe_sync_types::{AreaId, PlayerId};

/// Configuration for [`GameSynchronizer`](crate::GameSynchronizer).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SyncConfig {
    /// Identity of the participant running this client.
    pub local_player: PlayerId,
    /// Game area that commands are addressed to.
    pub area_id: AreaId,
}

impl SyncConfig {
    /// Create a configuration for `local_player` attached to `area_id`.
    pub fn new(local_player: impl Into<String>, area_id: impl Into<String>) -> Self {
        Self {
            local_player: PlayerId::new(local_player),
            area_id: AreaId::new(area_id),
        }
    }

    /// Attach to a different area.
    pub fn with_area(mut self, area_id: &str) -> Self {
        self.area_id = AreaId::new(area_id);
        self
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
    /// In-memory configuration is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Invalid(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_pattern() {
        let config = SyncConfig::new("p1", "area-a").with_area("area-b");

        assert_eq!(config.local_player, PlayerId::new("p1"));
        assert_eq!(config.area_id, AreaId::new("area-b"));
    }

    #[test]
    fn config_from_toml_string() {
        let toml = r#"
local_player = "player-7"
area_id = "tictactoe-area-1"
"#;

        let config = SyncConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.local_player.as_str(), "player-7");
        assert_eq!(config.area_id.as_str(), "tictactoe-area-1");
    }

    #[test]
    fn config_missing_field_fails() {
        let result = SyncConfig::from_toml_str(r#"local_player = "p1""#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn config_missing_file_is_read_error() {
        let result = SyncConfig::from_file(Path::new("/nonexistent/tictactoe-sync.toml"));
        match result {
            Err(err @ ConfigError::ReadError { .. }) => {
                assert!(err.to_string().contains("/nonexistent/tictactoe-sync.toml"));
            }
            other => panic!("expected ReadError, got {:?}", other),
        }
    }

    #[test]
    fn config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sync.toml");
        std::fs::write(&path, "local_player = \"p2\"\narea_id = \"a\"\n").unwrap();

        let config = SyncConfig::from_file(&path).unwrap();
        assert_eq!(config, SyncConfig::new("p2", "a"));
    }

    #[test]
    fn parse_error_from_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "local_player = [").unwrap();

        let err = SyncConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }
}
