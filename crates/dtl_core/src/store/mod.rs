// Round persistence for the DTL tracker
// JSON files with versioned envelopes and atomic writes

pub mod error;
pub mod json;
pub mod memory;

pub use error::StoreError;
pub use json::JsonFileStore;
pub use memory::MemoryStore;

use crate::models::{EquipmentSet, Round};

pub const STORE_VERSION: u32 = 1;

/// Abstract round persistence.
///
/// One implementation-independent contract: `append_completed_round` is
/// called exactly once per completed round and appends without reordering
/// or touching what is already stored. `load_completed_rounds` promises no
/// particular order; callers wanting one sort via [`crate::stats`]. A user
/// with no data reads as empty/absent, never as an error.
pub trait RoundRepository {
    fn load_completed_rounds(&self, user_id: &str) -> Result<Vec<Round>, StoreError>;

    fn append_completed_round(&mut self, user_id: &str, round: &Round) -> Result<(), StoreError>;

    fn load_in_progress_round(&self, user_id: &str) -> Result<Option<Round>, StoreError>;

    fn save_in_progress_round(&mut self, user_id: &str, round: &Round) -> Result<(), StoreError>;

    fn clear_in_progress_round(&mut self, user_id: &str) -> Result<(), StoreError>;
}

/// Reference-data persistence backing the equipment directory.
pub trait EquipmentRepository {
    fn load_equipment(&self, user_id: &str) -> Result<EquipmentSet, StoreError>;

    fn save_equipment(&mut self, user_id: &str, set: &EquipmentSet) -> Result<(), StoreError>;
}
