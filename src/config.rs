use crate::errors::{DataError, DataResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file the binaries read.
pub const CONFIG_ENV_VAR: &str = "POKEMON_GACHA_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding the RON tables.
    pub data_dir: PathBuf,
    pub save_path: PathBuf,
    pub starting_gold: u64,
    /// Amount granted by the "add gold" action.
    pub gold_cheat_amount: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            save_path: PathBuf::from("saves/player_save.json"),
            starting_gold: 0,
            gold_cheat_amount: 10_000,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> DataResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| DataError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        ron::from_str(&content).map_err(|e| DataError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Defaults when `path` does not exist; a file that exists but fails to
    /// parse is still an error.
    pub fn load_or_default(path: &Path) -> DataResult<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Reads the file named by `POKEMON_GACHA_CONFIG`, or `gacha.ron`.
    pub fn from_env() -> DataResult<Self> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("gacha.ron"));
        Self::load_or_default(&path)
    }
}
