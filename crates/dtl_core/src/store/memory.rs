//! In-memory repository for tests and embedding.

use std::collections::HashMap;

use super::{EquipmentRepository, RoundRepository, StoreError};
use crate::models::{EquipmentSet, Round};

/// HashMap-backed store with the same contract as the file store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    completed: HashMap<String, Vec<Round>>,
    in_progress: HashMap<String, Round>,
    equipment: HashMap<String, EquipmentSet>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed rounds across all users; test helper.
    pub fn total_completed(&self) -> usize {
        self.completed.values().map(Vec::len).sum()
    }
}

impl RoundRepository for MemoryStore {
    fn load_completed_rounds(&self, user_id: &str) -> Result<Vec<Round>, StoreError> {
        Ok(self.completed.get(user_id).cloned().unwrap_or_default())
    }

    fn append_completed_round(&mut self, user_id: &str, round: &Round) -> Result<(), StoreError> {
        self.completed.entry(user_id.to_string()).or_default().push(round.clone());
        Ok(())
    }

    fn load_in_progress_round(&self, user_id: &str) -> Result<Option<Round>, StoreError> {
        Ok(self.in_progress.get(user_id).cloned())
    }

    fn save_in_progress_round(&mut self, user_id: &str, round: &Round) -> Result<(), StoreError> {
        self.in_progress.insert(user_id.to_string(), round.clone());
        Ok(())
    }

    fn clear_in_progress_round(&mut self, user_id: &str) -> Result<(), StoreError> {
        self.in_progress.remove(user_id);
        Ok(())
    }
}

impl EquipmentRepository for MemoryStore {
    fn load_equipment(&self, user_id: &str) -> Result<EquipmentSet, StoreError> {
        Ok(self.equipment.get(user_id).cloned().unwrap_or_default())
    }

    fn save_equipment(&mut self, user_id: &str, set: &EquipmentSet) -> Result<(), StoreError> {
        self.equipment.insert(user_id.to_string(), set.clone());
        Ok(())
    }
}
