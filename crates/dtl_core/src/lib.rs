//! # dtl_core - Down-The-Line Scoring Engine
//!
//! This library provides the scoring core for Down-The-Line (DTL)
//! clay shooting: round state, shot-by-shot score entry, persistence,
//! and statistics over completed rounds.
//!
//! ## Features
//! - DTL scoring rules (3/2/0 points, 25 targets, 75 max)
//! - Pure round state machine; every mutation returns a new value
//! - Pluggable storage (in-memory and atomic JSON files)
//! - Statistics: summaries, filtering, sorting, equipment comparison

pub mod directory;
pub mod error;
pub mod models;
pub mod session;
pub mod stats;
pub mod store;

// Re-export the scoring model
pub use models::{
    resolve_score, tally, BarrelOutcome, EquipmentSlot, Round, RoundSetup, RoundStatus, Shot,
    ShotEntry, StationBreakdown, FIRST_BARREL_POINTS, MAX_SCORE, SECOND_BARREL_POINTS,
    SHOTS_PER_ROUND, SHOTS_PER_STATION, STATIONS,
};

// Re-export equipment records
pub use directory::EquipmentDirectory;
pub use models::{Ammunition, Choke, Club, EquipmentSet, Gun};

// Re-export errors
pub use error::{ScoringError, ScoringResult, SessionError, SessionResult};

// Re-export the session and storage layer
pub use session::RoundSession;
pub use store::{
    EquipmentRepository, JsonFileStore, MemoryStore, RoundRepository, StoreError, STORE_VERSION,
};

// Re-export statistics
pub use stats::{
    aggregate_by_equipment, filter_rounds, rank_by_average, sort_rounds, summarize,
    BarrelBreakdown, EquipmentPerformance, RoundFilter, RoundSummary, SortKey, SortOrder,
    RECENT_WINDOW,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
