// Statistics engine: read-only aggregates over completed rounds
// Pure functions of their input; callers re-run them when the list changes

pub mod equipment;
pub mod filter;
pub mod summary;

pub use equipment::{aggregate_by_equipment, rank_by_average, EquipmentPerformance};
pub use filter::{filter_rounds, sort_rounds, RoundFilter, SortKey, SortOrder};
pub use summary::{barrel_breakdown, summarize, BarrelBreakdown, RoundSummary, RECENT_WINDOW};
