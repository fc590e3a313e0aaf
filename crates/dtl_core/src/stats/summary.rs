//! Summary statistics over a set of completed rounds.
//!
//! Pure functions of their input slice: no I/O, no mutation, recomputed on
//! demand. An empty input is a normal case, not an error; `summarize`
//! returns `None` and displays show their zero state.

use serde::Serialize;

use crate::models::{Round, ShotEntry, SHOTS_PER_ROUND};

/// Rounds that make up the "recent form" window
pub const RECENT_WINDOW: usize = 5;

/// How targets were broken across a set of rounds.
///
/// Counts cover scored shots only; rates are percentages of those.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarrelBreakdown {
    pub first_barrel_hits: u32,
    pub second_barrel_hits: u32,
    pub misses: u32,
    pub first_barrel_rate: f64,
    pub second_barrel_rate: f64,
}

/// Aggregate snapshot over a list of rounds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub rounds: usize,
    pub average_score: f64,
    pub best_score: u8,
    pub worst_score: u8,
    /// Targets broken out of all thrown, 0-100
    pub hit_rate: f64,
    /// Mean score over the last `min(5, rounds)` rounds by date
    pub recent_average: f64,
    /// Recent average minus overall average; only meaningful with a full
    /// recent window, absent below 5 rounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvement: Option<f64>,
    pub barrels: BarrelBreakdown,
}

/// Summarize a list of rounds; `None` for an empty list.
pub fn summarize(rounds: &[Round]) -> Option<RoundSummary> {
    if rounds.is_empty() {
        return None;
    }

    let count = rounds.len();
    let score_sum: u32 = rounds.iter().map(|r| r.total_score as u32).sum();
    let hit_sum: u32 = rounds.iter().map(|r| r.hit_count as u32).sum();

    let average_score = score_sum as f64 / count as f64;
    let best_score = rounds.iter().map(|r| r.total_score).max().unwrap_or(0);
    let worst_score = rounds.iter().map(|r| r.total_score).min().unwrap_or(0);
    let hit_rate = hit_sum as f64 / (count * SHOTS_PER_ROUND) as f64 * 100.0;

    // Recent form: order by date ascending, take the tail
    let mut by_date: Vec<&Round> = rounds.iter().collect();
    by_date.sort_by_key(|r| r.date);
    let window = count.min(RECENT_WINDOW);
    let recent_sum: u32 =
        by_date[count - window..].iter().map(|r| r.total_score as u32).sum();
    let recent_average = recent_sum as f64 / window as f64;

    let improvement =
        (count >= RECENT_WINDOW).then_some(recent_average - average_score);

    Some(RoundSummary {
        rounds: count,
        average_score,
        best_score,
        worst_score,
        hit_rate,
        recent_average,
        improvement,
        barrels: barrel_breakdown(rounds),
    })
}

/// Count how targets fell across every scored shot in the input.
pub fn barrel_breakdown(rounds: &[Round]) -> BarrelBreakdown {
    let mut breakdown = BarrelBreakdown::default();

    for round in rounds {
        for shot in &round.shots {
            match shot.entry() {
                ShotEntry::FirstBarrelHit => breakdown.first_barrel_hits += 1,
                ShotEntry::SecondBarrelHit => breakdown.second_barrel_hits += 1,
                ShotEntry::BothMissed => breakdown.misses += 1,
                ShotEntry::Unset => {}
            }
        }
    }

    let engaged =
        breakdown.first_barrel_hits + breakdown.second_barrel_hits + breakdown.misses;
    if engaged > 0 {
        breakdown.first_barrel_rate = breakdown.first_barrel_hits as f64 / engaged as f64 * 100.0;
        breakdown.second_barrel_rate =
            breakdown.second_barrel_hits as f64 / engaged as f64 * 100.0;
    }

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Round, RoundSetup, RoundStatus, SHOTS_PER_ROUND};
    use chrono::{Duration, Utc};

    /// Completed round with the given score laid down as first-barrel hits
    /// (3s), second-barrel hits (2s) as needed, and losses for the rest.
    /// Every total except 1 is reachable.
    fn round_scoring(total: u8, days_ago: i64) -> Round {
        let mut round = Round::new(RoundSetup::new("stats-user"));

        // total = 3 × threes + 2 × twos
        let (threes, twos) = match total % 3 {
            0 => (total / 3, 0),
            2 => (total / 3, 1),
            _ => (total / 3 - 1, 2),
        };

        let mut index = 0;
        for _ in 0..threes {
            round = round.cycle_shot(index).unwrap();
            index += 1;
        }
        for _ in 0..twos {
            round = round.cycle_shot(index).unwrap();
            round = round.cycle_shot(index).unwrap();
            index += 1;
        }
        for i in index..SHOTS_PER_ROUND {
            for _ in 0..3 {
                round = round.cycle_shot(i).unwrap();
            }
        }

        let mut done = round.complete().unwrap();
        done.date = Utc::now() - Duration::days(days_ago);
        assert_eq!(done.total_score, total);
        done
    }

    #[test]
    fn test_empty_input_sentinel() {
        assert_eq!(summarize(&[]), None);
    }

    #[test]
    fn test_five_round_summary() {
        // Newest last: dates descend with days_ago
        let rounds: Vec<Round> = [60u8, 65, 70, 55, 75]
            .iter()
            .enumerate()
            .map(|(i, &score)| round_scoring(score, (5 - i) as i64))
            .collect();

        let summary = summarize(&rounds).unwrap();
        assert_eq!(summary.rounds, 5);
        assert!((summary.average_score - 65.0).abs() < 1e-9);
        assert_eq!(summary.best_score, 75);
        assert_eq!(summary.worst_score, 55);
        assert!((summary.recent_average - 65.0).abs() < 1e-9);
        assert!((summary.improvement.unwrap() - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_improvement_needs_full_window() {
        let rounds: Vec<Round> =
            (0..4).map(|i| round_scoring(60, i)).collect();

        let summary = summarize(&rounds).unwrap();
        assert_eq!(summary.improvement, None);
        // Recent average still covers all four
        assert!((summary.recent_average - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_recent_window_uses_latest_by_date() {
        // Six rounds, oldest scored 0, the last five scored 75
        let mut rounds = vec![round_scoring(0, 10)];
        for i in 0..5 {
            rounds.push(round_scoring(75, i));
        }
        // Shuffle the slice order; dates must decide the window
        rounds.swap(0, 3);

        let summary = summarize(&rounds).unwrap();
        assert!((summary.recent_average - 75.0).abs() < 1e-9);
        assert!(summary.improvement.unwrap() > 0.0);
    }

    #[test]
    fn test_average_times_count_equals_sum() {
        let rounds: Vec<Round> =
            [12u8, 33, 47, 75, 0, 21].iter().map(|&s| round_scoring(s, 1)).collect();
        let sum: u32 = rounds.iter().map(|r| r.total_score as u32).sum();

        let summary = summarize(&rounds).unwrap();
        assert!((summary.average_score * summary.rounds as f64 - sum as f64).abs() < 1e-9);
    }

    #[test]
    fn test_hit_rate() {
        // One perfect round, one blank round
        let rounds = vec![round_scoring(75, 2), round_scoring(0, 1)];
        let summary = summarize(&rounds).unwrap();
        assert!((summary.hit_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_barrel_breakdown_counts() {
        // 65 = 21 threes + one 2: 21 first-barrel, 1 second-barrel, 3 lost
        let rounds = vec![round_scoring(65, 1)];
        let breakdown = barrel_breakdown(&rounds);

        assert_eq!(breakdown.first_barrel_hits, 21);
        assert_eq!(breakdown.second_barrel_hits, 1);
        assert_eq!(breakdown.misses, 3);
        assert!((breakdown.first_barrel_rate - 84.0).abs() < 1e-9);
        assert!((breakdown.second_barrel_rate - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_ignores_unset_shots() {
        let mut in_progress = Round::new(RoundSetup::new("stats-user"));
        in_progress = in_progress.cycle_shot(0).unwrap();

        let breakdown = barrel_breakdown(&[in_progress]);
        assert_eq!(breakdown.first_barrel_hits, 1);
        assert_eq!(breakdown.misses, 0);
        assert!((breakdown.first_barrel_rate - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_round_summary() {
        let summary = summarize(&[round_scoring(42, 0)]).unwrap();
        assert_eq!(summary.rounds, 1);
        assert_eq!(summary.best_score, 42);
        assert_eq!(summary.worst_score, 42);
        assert!((summary.recent_average - 42.0).abs() < 1e-9);
        assert_eq!(summary.improvement, None);
    }

    #[test]
    fn test_summary_status_agnostic() {
        // The engine summarizes whatever list it is handed; callers decide
        // whether in-progress rounds belong in it
        let mut round = Round::new(RoundSetup::new("stats-user"));
        round = round.cycle_shot(0).unwrap();
        assert_eq!(round.status, RoundStatus::InProgress);

        let summary = summarize(&[round]).unwrap();
        assert_eq!(summary.rounds, 1);
        assert_eq!(summary.best_score, 3);
    }

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: average × count round-trips to the score sum
            #[test]
            fn prop_average_consistency(
                scores in proptest::collection::vec(
                    (0u8..=75).prop_filter("1 point is not a reachable total", |s| *s != 1),
                    1..40,
                ),
            ) {
                let rounds: Vec<Round> =
                    scores.iter().map(|&s| round_scoring(s, 1)).collect();
                let sum: u32 = scores.iter().map(|&s| s as u32).sum();

                let summary = summarize(&rounds).unwrap();
                prop_assert!((summary.average_score * rounds.len() as f64 - sum as f64).abs() < 1e-6);
                prop_assert!(summary.best_score >= summary.worst_score);
            }
        }
    }
}
