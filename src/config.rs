use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::ConfigError;
use crate::game::{
    WinScan, DEFAULT_HEIGHT, DEFAULT_PLAYER1_COLOR, DEFAULT_PLAYER2_COLOR, DEFAULT_WIDTH,
    MIN_DIMENSION,
};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub players: PlayersConfig,
    pub engine: EngineConfig,
    pub snapshot: SnapshotConfig,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub height: usize,
    pub width: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
        }
    }
}

/// Display colors, passed through to the UI untouched. Any name or `#rrggbb`
/// value the terminal understands.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub player1_color: String,
    pub player2_color: String,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            player1_color: DEFAULT_PLAYER1_COLOR.to_string(),
            player2_color: DEFAULT_PLAYER2_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub win_scan: WinScan,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Where the UI saves the game and where `--resume` reads it from
    pub path: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        SnapshotConfig {
            path: PathBuf::from("connect_four_save.json"),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.height < MIN_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "board.height must be >= {MIN_DIMENSION}"
            )));
        }
        if self.board.width < MIN_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "board.width must be >= {MIN_DIMENSION}"
            )));
        }
        if self.players.player1_color.trim().is_empty() {
            return Err(ConfigError::Validation(
                "players.player1_color must not be empty".into(),
            ));
        }
        if self.players.player2_color.trim().is_empty() {
            return Err(ConfigError::Validation(
                "players.player2_color must not be empty".into(),
            ));
        }
        if self.snapshot.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "snapshot.path must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
