//! Configuration file loading for the terminal front end.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Front end settings. Every field has a default, so an empty or missing
/// file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Draw pieces as Unicode chess glyphs instead of letters.
    pub unicode_pieces: bool,
    /// Print file letters and rank numbers around the board.
    pub show_coordinates: bool,
    /// Maximum tracing level written to stderr.
    pub log_level: String,
    /// Position to start from instead of the standard layout.
    pub start_fen: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            unicode_pieces: false,
            show_coordinates: true,
            log_level: "warn".to_string(),
            start_fen: None,
        }
    }
}

impl Config {
    /// File name searched for when no explicit path is given.
    pub const FILE_NAME: &'static str = "chess.toml";

    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Otherwise `chess.toml` is looked up in
    /// the working directory and its two parents, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::read(path);
        }

        let candidates = ["", "..", "../.."].map(|dir| Path::new(dir).join(Self::FILE_NAME));
        match candidates.iter().find(|p| p.exists()) {
            Some(found) => Self::read(found),
            None => Ok(Self::default()),
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config = Config::parse(
            r#"
unicode_pieces = true
show_coordinates = false
log_level = "debug"
start_fen = "4k3/8/8/8/8/8/8/4K2R w K - 0 1"
"#,
        )
        .unwrap();
        assert!(config.unicode_pieces);
        assert!(!config.show_coordinates);
        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.start_fen.as_deref(),
            Some("4k3/8/8/8/8/8/8/4K2R w K - 0 1")
        );
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = Config::parse("unicode_pieces = true").unwrap();
        assert!(config.unicode_pieces);
        assert!(config.show_coordinates);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.start_fen, None);

        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn invalid_toml() {
        assert!(Config::parse("unicode_pieces = \"yes\"").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/chess.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
