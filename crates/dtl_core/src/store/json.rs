//! JSON file store: one directory, a few files per user.
//!
//! Layout under the root directory:
//! - `rounds-<user>.json`    completed history, append order
//! - `current-<user>.json`   the in-progress round; absent when none
//! - `equipment-<user>.json` reference records
//!
//! Every file is a versioned envelope around plain camelCase JSON, so the
//! records stay readable by external tooling. Writes are atomic: temp file
//! in the same directory, flush + sync, then rename over the target.

use std::fs::{remove_file, rename, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{EquipmentRepository, RoundRepository, StoreError, STORE_VERSION};
use crate::models::{EquipmentSet, Round};

#[derive(Debug, Serialize, Deserialize)]
struct HistoryFile {
    version: u32,
    rounds: Vec<Round>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CurrentFile {
    version: u32,
    round: Round,
}

#[derive(Debug, Serialize, Deserialize)]
struct EquipmentFile {
    version: u32,
    equipment: EquipmentSet,
}

/// File-backed repository rooted at one data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn history_path(&self, user_id: &str) -> PathBuf {
        self.root.join(format!("rounds-{}.json", file_key(user_id)))
    }

    fn current_path(&self, user_id: &str) -> PathBuf {
        self.root.join(format!("current-{}.json", file_key(user_id)))
    }

    fn equipment_path(&self, user_id: &str) -> PathBuf {
        self.root.join(format!("equipment-{}.json", file_key(user_id)))
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_vec_pretty(value).map_err(StoreError::Serialization)?;

        // Atomic save: write to temp file, then rename
        let temp_path = path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;

            // sync_all ensures data is written to disk (portable fsync)
            file.sync_all()?;
        }

        rename(&temp_path, path)?;

        log::debug!("Wrote {} bytes to {:?}", data.len(), path);
        Ok(())
    }

    /// Read and version-check an envelope; `None` when the file is absent.
    fn read_json<T: DeserializeOwned>(
        &self,
        path: &Path,
        version_of: impl Fn(&T) -> u32,
    ) -> Result<Option<T>, StoreError> {
        if !path.exists() {
            return Ok(None);
        }

        let data = std::fs::read(path)?;
        let value: T = serde_json::from_slice(&data).map_err(|source| {
            StoreError::Deserialization { path: path.display().to_string(), source }
        })?;

        let found = version_of(&value);
        if found != STORE_VERSION {
            return Err(StoreError::VersionMismatch {
                path: path.display().to_string(),
                found,
                expected: STORE_VERSION,
            });
        }

        log::debug!("Read {} bytes from {:?}", data.len(), path);
        Ok(Some(value))
    }
}

impl RoundRepository for JsonFileStore {
    fn load_completed_rounds(&self, user_id: &str) -> Result<Vec<Round>, StoreError> {
        let file = self.read_json::<HistoryFile>(&self.history_path(user_id), |f| f.version)?;
        Ok(file.map(|f| f.rounds).unwrap_or_default())
    }

    fn append_completed_round(&mut self, user_id: &str, round: &Round) -> Result<(), StoreError> {
        let mut rounds = self.load_completed_rounds(user_id)?;
        rounds.push(round.clone());

        let file = HistoryFile { version: STORE_VERSION, rounds };
        self.write_json(&self.history_path(user_id), &file)?;

        log::info!("Appended round {} for user {}", round.id, user_id);
        Ok(())
    }

    fn load_in_progress_round(&self, user_id: &str) -> Result<Option<Round>, StoreError> {
        let file = self.read_json::<CurrentFile>(&self.current_path(user_id), |f| f.version)?;
        Ok(file.map(|f| f.round))
    }

    fn save_in_progress_round(&mut self, user_id: &str, round: &Round) -> Result<(), StoreError> {
        let file = CurrentFile { version: STORE_VERSION, round: round.clone() };
        self.write_json(&self.current_path(user_id), &file)
    }

    fn clear_in_progress_round(&mut self, user_id: &str) -> Result<(), StoreError> {
        let path = self.current_path(user_id);
        if path.exists() {
            remove_file(&path)?;
            log::debug!("Cleared in-progress round for user {}", user_id);
        }
        Ok(())
    }
}

impl EquipmentRepository for JsonFileStore {
    fn load_equipment(&self, user_id: &str) -> Result<EquipmentSet, StoreError> {
        let file = self.read_json::<EquipmentFile>(&self.equipment_path(user_id), |f| f.version)?;
        Ok(file.map(|f| f.equipment).unwrap_or_default())
    }

    fn save_equipment(&mut self, user_id: &str, set: &EquipmentSet) -> Result<(), StoreError> {
        let file = EquipmentFile { version: STORE_VERSION, equipment: set.clone() };
        self.write_json(&self.equipment_path(user_id), &file)
    }
}

/// User ids appear in file names; anything outside `[A-Za-z0-9_-]` is
/// replaced so ids cannot escape the data directory.
fn file_key(user_id: &str) -> String {
    user_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
