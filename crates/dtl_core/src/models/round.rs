//! Round model and state machine.
//!
//! A round is 25 targets shot from 5 stations, 5 targets per station, in
//! station-major order. The round moves through `setup` → `in-progress` →
//! `completed`; `completed` is terminal and the record becomes immutable.
//!
//! Every mutating operation returns a new `Round` value. Totals are never
//! edited directly; [`tally`] recomputes them from the shot sequence after
//! each mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::equipment::EquipmentSet;
use super::shot::Shot;
use crate::error::{ScoringError, ScoringResult};

/// Shooting stations in a round
pub const STATIONS: u8 = 5;
/// Targets thrown per station
pub const SHOTS_PER_STATION: u8 = 5;
/// Targets in a full round
pub const SHOTS_PER_ROUND: usize = 25;
/// Best possible score (25 first-barrel kills)
pub const MAX_SCORE: u8 = 75;

/// Lifecycle of a round record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundStatus {
    Setup,
    InProgress,
    Completed,
}

/// Equipment slot on a round record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EquipmentSlot {
    Gun,
    OverChoke,
    UnderChoke,
    Ammunition,
}

impl EquipmentSlot {
    pub fn label(self) -> &'static str {
        match self {
            EquipmentSlot::Gun => "gun",
            EquipmentSlot::OverChoke => "over choke",
            EquipmentSlot::UnderChoke => "under choke",
            EquipmentSlot::Ammunition => "ammunition",
        }
    }
}

/// Parameters collected before a round starts.
///
/// Equipment fields are opaque identifiers and may be empty; the engine
/// stores them as given and never validates them against the directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSetup {
    pub user_id: String,
    #[serde(default)]
    pub gun_id: String,
    #[serde(default)]
    pub over_choke_id: String,
    #[serde(default)]
    pub under_choke_id: String,
    #[serde(default)]
    pub ammunition_id: String,
    /// Venue (club) name, free text
    #[serde(default)]
    pub club: String,
    /// Free-text conditions
    #[serde(default)]
    pub weather: String,
}

impl RoundSetup {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), ..Default::default() }
    }

    /// Setup with each equipment slot auto-selected when the user owns
    /// exactly one matching record, left empty otherwise.
    pub fn quick_start(user_id: impl Into<String>, equipment: &EquipmentSet) -> Self {
        let mut setup = Self::new(user_id);
        if let [gun] = equipment.guns.as_slice() {
            setup.gun_id = gun.id.clone();
        }
        if let [choke] = equipment.chokes.as_slice() {
            // A single choke record serves both barrels
            setup.over_choke_id = choke.id.clone();
            setup.under_choke_id = choke.id.clone();
        }
        if let [ammo] = equipment.ammunition.as_slice() {
            setup.ammunition_id = ammo.id.clone();
        }
        if let [club] = equipment.clubs.as_slice() {
            setup.club = club.name.clone();
        }
        setup
    }
}

/// Per-station slice of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StationBreakdown {
    pub station: u8,
    /// Targets broken at this station, out of 5
    pub hits: u8,
    /// Points at this station, out of 15
    pub score: u8,
}

/// One shooting session: 25 shots plus the equipment and venue they were
/// shot with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Unique round identifier
    pub id: Uuid,
    /// Owning user; rounds never move between users
    pub user_id: String,
    /// When the round was shot
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub gun_id: String,
    #[serde(default)]
    pub over_choke_id: String,
    #[serde(default)]
    pub under_choke_id: String,
    #[serde(default)]
    pub ammunition_id: String,
    /// Venue (club) name, free text
    #[serde(default)]
    pub club: String,
    #[serde(default)]
    pub weather: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Exactly 25 shots in station-major order
    pub shots: Vec<Shot>,
    /// Sum of resolved shot scores, 0-75
    pub total_score: u8,
    /// Targets broken with either barrel, 0-25
    pub hit_count: u8,
    pub status: RoundStatus,
}

/// Recompute `(total_score, hit_count)` from a shot sequence.
///
/// The only place totals are derived; every mutation site goes through it.
pub fn tally(shots: &[Shot]) -> (u8, u8) {
    let total = shots.iter().filter_map(|s| s.score).sum();
    let hits = shots.iter().filter(|s| s.is_hit()).count() as u8;
    (total, hits)
}

impl Round {
    /// Start a round: full 5×5 grid of unset shots, status `in-progress`.
    pub fn new(setup: RoundSetup) -> Self {
        let mut shots = Vec::with_capacity(SHOTS_PER_ROUND);
        for station in 1..=STATIONS {
            for shot_number in 1..=SHOTS_PER_STATION {
                shots.push(Shot::unset(station, shot_number));
            }
        }

        Self {
            id: Uuid::new_v4(),
            user_id: setup.user_id,
            date: Utc::now(),
            gun_id: setup.gun_id,
            over_choke_id: setup.over_choke_id,
            under_choke_id: setup.under_choke_id,
            ammunition_id: setup.ammunition_id,
            club: setup.club,
            weather: setup.weather,
            notes: None,
            shots,
            total_score: 0,
            hit_count: 0,
            status: RoundStatus::InProgress,
        }
    }

    /// Step the shot at `index` through the input cycle and return the
    /// updated round with totals recomputed.
    ///
    /// Rejects an out-of-range index and any mutation of a completed round
    /// without touching `self`.
    pub fn cycle_shot(&self, index: usize) -> ScoringResult<Round> {
        if self.status == RoundStatus::Completed {
            return Err(ScoringError::RoundAlreadyCompleted);
        }
        if index >= self.shots.len() {
            return Err(ScoringError::InvalidShotIndex { index });
        }

        let mut next = self.clone();
        next.shots[index].cycle();
        let (total_score, hit_count) = tally(&next.shots);
        next.total_score = total_score;
        next.hit_count = hit_count;
        Ok(next)
    }

    /// True once every shot has a resolved score.
    pub fn is_complete(&self) -> bool {
        self.shots.iter().all(Shot::is_scored)
    }

    /// Finalize the round.
    ///
    /// Precondition: all 25 shots scored. Fails with
    /// [`ScoringError::RoundNotComplete`] otherwise, leaving `self` alone.
    /// The returned record has status `completed` and keeps the totals as
    /// they stood.
    pub fn complete(&self) -> ScoringResult<Round> {
        if self.status == RoundStatus::Completed {
            return Err(ScoringError::RoundAlreadyCompleted);
        }
        if !self.is_complete() {
            return Err(ScoringError::RoundNotComplete { scored: self.scored_count() });
        }

        let mut done = self.clone();
        done.status = RoundStatus::Completed;
        Ok(done)
    }

    /// Shots with a resolved score.
    pub fn scored_count(&self) -> usize {
        self.shots.iter().filter(|s| s.is_scored()).count()
    }

    /// Scored share of the round, 0-100.
    pub fn progress_percent(&self) -> f32 {
        self.scored_count() as f32 / SHOTS_PER_ROUND as f32 * 100.0
    }

    /// Hit rate for this single round, 0-100.
    pub fn hit_rate(&self) -> f64 {
        self.hit_count as f64 / SHOTS_PER_ROUND as f64 * 100.0
    }

    /// Hits and score per station; sums equal the round totals.
    pub fn station_breakdown(&self) -> Vec<StationBreakdown> {
        (1..=STATIONS)
            .map(|station| {
                let shots = self.shots.iter().filter(|s| s.station == station);
                let (mut hits, mut score) = (0u8, 0u8);
                for shot in shots {
                    if shot.is_hit() {
                        hits += 1;
                    }
                    score += shot.score.unwrap_or(0);
                }
                StationBreakdown { station, hits, score }
            })
            .collect()
    }

    /// Identifier stored in the given equipment slot (possibly empty).
    pub fn equipment_id(&self, slot: EquipmentSlot) -> &str {
        match slot {
            EquipmentSlot::Gun => &self.gun_id,
            EquipmentSlot::OverChoke => &self.over_choke_id,
            EquipmentSlot::UnderChoke => &self.under_choke_id,
            EquipmentSlot::Ammunition => &self.ammunition_id,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
