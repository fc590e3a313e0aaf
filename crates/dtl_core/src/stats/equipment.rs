//! Equipment comparison: group rounds by the id in one equipment slot and
//! accumulate per-group performance.
//!
//! Grouping is by the literal identifier, empty string included: rounds
//! shot with no recorded gun still show up as their own group rather than
//! vanishing from the comparison. Labeling such groups is the caller's
//! business (see [`crate::directory`]).

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{EquipmentSlot, Round, SHOTS_PER_ROUND};

/// Accumulated performance for one equipment id
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentPerformance {
    pub rounds: u32,
    pub total_score: u32,
    pub total_hits: u32,
    pub average_score: f64,
    pub average_hit_rate: f64,
}

/// Group rounds by the id in `slot` and derive per-group averages.
pub fn aggregate_by_equipment(
    rounds: &[Round],
    slot: EquipmentSlot,
) -> HashMap<String, EquipmentPerformance> {
    let mut groups: HashMap<String, EquipmentPerformance> = HashMap::new();

    for round in rounds {
        let entry = groups.entry(round.equipment_id(slot).to_string()).or_default();
        entry.rounds += 1;
        entry.total_score += round.total_score as u32;
        entry.total_hits += round.hit_count as u32;
    }

    for perf in groups.values_mut() {
        perf.average_score = perf.total_score as f64 / perf.rounds as f64;
        perf.average_hit_rate =
            perf.total_hits as f64 / (perf.rounds as usize * SHOTS_PER_ROUND) as f64 * 100.0;
    }

    groups
}

/// Groups ordered for display: best average score first, ties by id.
pub fn rank_by_average(
    groups: HashMap<String, EquipmentPerformance>,
) -> Vec<(String, EquipmentPerformance)> {
    let mut ranked: Vec<_> = groups.into_iter().collect();
    ranked.sort_by(|a, b| {
        b.1.average_score.total_cmp(&a.1.average_score).then_with(|| a.0.cmp(&b.0))
    });
    ranked
}
