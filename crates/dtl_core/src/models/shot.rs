//! Shot model: one firing position, its two barrel outcomes, and the DTL
//! score mapping.
//!
//! Scoring follows DTL rules: a target broken with the first barrel is worth
//! 3 points, with the second barrel 2 points, and a lost target 0. A shot
//! with no resolved score yet is "unset".

use serde::{Deserialize, Serialize};

/// Points for a target broken with the first barrel
pub const FIRST_BARREL_POINTS: u8 = 3;
/// Points for a target broken with the second barrel
pub const SECOND_BARREL_POINTS: u8 = 2;

/// Outcome of a single barrel fired at a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarrelOutcome {
    Hit,
    Miss,
}

/// Resolve the score for one target from its barrel outcomes.
///
/// Pure function, no side effects:
/// - first barrel hit → 3 (second barrel never fired)
/// - first miss, second hit → 2
/// - both missed → 0
/// - otherwise the shot is still unscored → `None`
pub fn resolve_score(
    first: Option<BarrelOutcome>,
    second: Option<BarrelOutcome>,
) -> Option<u8> {
    match (first, second) {
        (Some(BarrelOutcome::Hit), _) => Some(FIRST_BARREL_POINTS),
        (Some(BarrelOutcome::Miss), Some(BarrelOutcome::Hit)) => Some(SECOND_BARREL_POINTS),
        (Some(BarrelOutcome::Miss), Some(BarrelOutcome::Miss)) => Some(0),
        _ => None,
    }
}

/// Input state of one scoring cell.
///
/// Tapping a cell steps through a fixed four-state cycle:
/// unset → first-barrel hit (3) → second-barrel hit (2) → both missed (0) → unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotEntry {
    Unset,
    FirstBarrelHit,
    SecondBarrelHit,
    BothMissed,
}

impl ShotEntry {
    /// Next state in the input cycle.
    pub fn next(self) -> Self {
        match self {
            ShotEntry::Unset => ShotEntry::FirstBarrelHit,
            ShotEntry::FirstBarrelHit => ShotEntry::SecondBarrelHit,
            ShotEntry::SecondBarrelHit => ShotEntry::BothMissed,
            ShotEntry::BothMissed => ShotEntry::Unset,
        }
    }

    /// Barrel outcomes this state stands for.
    pub fn outcomes(self) -> (Option<BarrelOutcome>, Option<BarrelOutcome>) {
        match self {
            ShotEntry::Unset => (None, None),
            ShotEntry::FirstBarrelHit => (Some(BarrelOutcome::Hit), None),
            ShotEntry::SecondBarrelHit => (Some(BarrelOutcome::Miss), Some(BarrelOutcome::Hit)),
            ShotEntry::BothMissed => (Some(BarrelOutcome::Miss), Some(BarrelOutcome::Miss)),
        }
    }

    /// Classify an outcome pair.
    ///
    /// Total mapping: pairs that cannot be produced by the input cycle
    /// (a first-barrel miss with the second barrel unset) read as `Unset`.
    pub fn from_outcomes(
        first: Option<BarrelOutcome>,
        second: Option<BarrelOutcome>,
    ) -> Self {
        match (first, second) {
            (Some(BarrelOutcome::Hit), _) => ShotEntry::FirstBarrelHit,
            (Some(BarrelOutcome::Miss), Some(BarrelOutcome::Hit)) => ShotEntry::SecondBarrelHit,
            (Some(BarrelOutcome::Miss), Some(BarrelOutcome::Miss)) => ShotEntry::BothMissed,
            _ => ShotEntry::Unset,
        }
    }

    pub fn score(self) -> Option<u8> {
        let (first, second) = self.outcomes();
        resolve_score(first, second)
    }
}

/// One of the 25 firing positions in a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shot {
    /// Station 1-5
    pub station: u8,
    /// Position within the station, 1-5
    pub shot_number: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_barrel_outcome: Option<BarrelOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_barrel_outcome: Option<BarrelOutcome>,
    /// 3, 2, 0, or unset; always consistent with the outcomes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

impl Shot {
    pub fn unset(station: u8, shot_number: u8) -> Self {
        Self {
            station,
            shot_number,
            first_barrel_outcome: None,
            second_barrel_outcome: None,
            score: None,
        }
    }

    pub fn entry(&self) -> ShotEntry {
        ShotEntry::from_outcomes(self.first_barrel_outcome, self.second_barrel_outcome)
    }

    /// Overwrite outcomes and score from an input state.
    pub fn apply(&mut self, entry: ShotEntry) {
        let (first, second) = entry.outcomes();
        self.first_barrel_outcome = first;
        self.second_barrel_outcome = second;
        self.score = entry.score();
    }

    /// Step this shot one position through the input cycle.
    pub fn cycle(&mut self) {
        self.apply(self.entry().next());
    }

    /// A shot counts toward completion once its score is resolved.
    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }

    /// True when either barrel broke the target.
    pub fn is_hit(&self) -> bool {
        self.first_barrel_outcome == Some(BarrelOutcome::Hit)
            || self.second_barrel_outcome == Some(BarrelOutcome::Hit)
    }
}
