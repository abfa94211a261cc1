use crate::collection::Collection;
use crate::errors::{DataError, DataResult};
use crate::ledger::PullLedger;
use crate::player::PlayerProfile;
use schema::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

pub const SAVE_VERSION: &str = "1.0";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveStats {
    pub total_pulls: u64,
    pub total_spent: u64,
    #[serde(default)]
    pub pulls_by_version: BTreeMap<Context, u64>,
}

/// On-disk JSON shape of a player's progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: String,
    pub gold: u64,
    #[serde(default)]
    pub pokemon_owned: BTreeMap<String, u32>,
    #[serde(default)]
    pub items_owned: BTreeMap<String, u32>,
    #[serde(default)]
    pub newly_acquired: Vec<String>,
    #[serde(default)]
    pub newly_acquired_items: Vec<String>,
    #[serde(default)]
    pub stats: SaveStats,
}

impl Default for SaveFile {
    fn default() -> Self {
        Self::from_profile(&PlayerProfile::default())
    }
}

impl SaveFile {
    pub fn from_profile(profile: &PlayerProfile) -> Self {
        let pulls_by_version = Context::iter()
            .map(|context| (context, profile.ledger.by_context(context)))
            .collect();
        Self {
            version: SAVE_VERSION.to_string(),
            gold: profile.gold,
            pokemon_owned: profile.pokemon.counts().clone(),
            items_owned: profile.items.counts().clone(),
            newly_acquired: profile.pokemon.newly_acquired().to_vec(),
            newly_acquired_items: profile.items.newly_acquired().to_vec(),
            stats: SaveStats {
                total_pulls: profile.ledger.total(),
                total_spent: profile.total_spent,
                pulls_by_version,
            },
        }
    }

    /// Rebuilds the profile. Per-version counts are replayed into a fresh
    /// ledger; pulls that predate per-version tracking are kept in the total.
    pub fn into_profile(self) -> PlayerProfile {
        let mut ledger = PullLedger::new();
        for (&context, &count) in &self.stats.pulls_by_version {
            // Zero counts are skipped; the ledger only takes real batches.
            if count > 0 && ledger.record(context, count).is_err() {
                log::warn!("Ignoring pull count {} for {}", count, context);
            }
        }
        let untracked = self.stats.total_pulls.saturating_sub(ledger.total());
        let ledger = ledger.with_untracked_total(untracked);

        PlayerProfile {
            gold: self.gold,
            total_spent: self.stats.total_spent,
            pokemon: Collection::from_counts(self.pokemon_owned, self.newly_acquired),
            items: Collection::from_counts(self.items_owned, self.newly_acquired_items),
            ledger,
        }
    }
}

/// Reads and writes the save file at a fixed path.
#[derive(Debug, Clone)]
pub struct SaveManager {
    path: PathBuf,
}

impl SaveManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, profile: &PlayerProfile) -> DataResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }
        let json = serde_json::to_string_pretty(&SaveFile::from_profile(profile)).map_err(|e| {
            DataError::Serialize {
                message: e.to_string(),
            }
        })?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        log::debug!("Saved game to {}", self.path.display());
        Ok(())
    }

    /// Loads the saved profile. A missing file starts a new game with
    /// `starting_gold`; an unreadable one is reported and also starts fresh.
    pub fn load(&self, starting_gold: u64) -> PlayerProfile {
        if !self.path.exists() {
            log::info!("No save file found, starting new game");
            return PlayerProfile::new(starting_gold);
        }
        match self.read() {
            Ok(save) => {
                log::info!("Loaded save file {}", self.path.display());
                save.into_profile()
            }
            Err(err) => {
                log::warn!("Load failed: {}, using default save", err);
                PlayerProfile::new(starting_gold)
            }
        }
    }

    pub fn read(&self) -> DataResult<SaveFile> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        serde_json::from_str(&content).map_err(|e| DataError::Parse {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn delete(&self) -> DataResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| self.io_error(e))?;
            log::info!("Save file deleted");
        }
        Ok(())
    }

    fn io_error(&self, err: std::io::Error) -> DataError {
        DataError::Io {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
    }
}
