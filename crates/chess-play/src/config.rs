//! Configuration file loading for the terminal game.
//!
//! Settings come from `chess-play.toml` when it exists; every field is
//! optional and command-line flags override whatever the file says.

use chess_core::Color;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A search depth of zero never produces a move.
    #[error("Search depth must be at least 1")]
    ZeroDepth,
}

/// The side the human plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// Settings for one game against the engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayConfig {
    /// Search depth in plies. Defaults to 2.
    #[serde(default = "default_depth")]
    pub depth: u32,
    /// Side played by the human. Defaults to White.
    #[serde(default = "default_human")]
    pub human: Side,
    /// Draw the board with Unicode piece glyphs. Defaults to true.
    #[serde(default = "default_unicode")]
    pub unicode: bool,
    /// Starting position in FEN; the standard start when absent.
    #[serde(default)]
    pub start_fen: Option<String>,
}

fn default_depth() -> u32 {
    2
}

fn default_human() -> Side {
    Side::White
}

fn default_unicode() -> bool {
    true
}

impl Default for PlayConfig {
    fn default() -> Self {
        PlayConfig {
            depth: default_depth(),
            human: default_human(),
            unicode: default_unicode(),
            start_fen: None,
        }
    }
}

impl PlayConfig {
    /// Loads the configuration from `path`, or the defaults if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] if it is not valid TOML, or
    /// [`ConfigError::ZeroDepth`] if it asks for a depth of 0.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: PlayConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values the type system cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }

    /// Returns the default configuration file path.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess-play.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlayConfig::default();
        assert_eq!(config.depth, 2);
        assert_eq!(config.human, Side::White);
        assert!(config.unicode);
        assert_eq!(config.start_fen, None);
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
depth = 3
human = "black"
unicode = false
start_fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1"
"#;
        let config = PlayConfig::parse(toml_str).unwrap();
        assert_eq!(config.depth, 3);
        assert_eq!(config.human, Side::Black);
        assert!(!config.unicode);
        assert_eq!(
            config.start_fen.as_deref(),
            Some("4k3/8/8/8/8/8/8/4K3 w - - 0 1")
        );
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let config = PlayConfig::parse("depth = 1").unwrap();
        assert_eq!(config.depth, 1);
        assert_eq!(config.human, Side::White);
        assert!(config.unicode);
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(PlayConfig::parse("").unwrap(), PlayConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            PlayConfig::parse("depth = 0"),
            Err(ConfigError::ZeroDepth)
        ));
        assert!(matches!(
            PlayConfig::parse("human = \"green\""),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = PlayConfig::load(Path::new("definitely/not/here/chess-play.toml")).unwrap();
        assert_eq!(config, PlayConfig::default());
    }

    #[test]
    fn test_side_to_color() {
        assert_eq!(Color::from(Side::White), Color::White);
        assert_eq!(Color::from(Side::Black), Color::Black);
    }
}
