//! Round list filtering and ordering.
//!
//! Filters are fully enumerated fields, ANDed together; an unset field
//! imposes nothing. Sorting is stable in both directions: equal keys keep
//! their input order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Round;

/// Filter predicate set for round listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundFilter {
    /// Inclusive lower date bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper date bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
    /// Exact gun id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gun_id: Option<String>,
    /// Exact choke id; a round matches on either barrel's choke
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choke_id: Option<String>,
    /// Exact ammunition id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ammunition_id: Option<String>,
    /// Case-insensitive substring of the venue name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
    /// Inclusive lower bound on total score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<u8>,
    /// Inclusive upper bound on total score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<u8>,
}

impl RoundFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.date_from.is_none()
            && self.date_to.is_none()
            && self.gun_id.is_none()
            && self.choke_id.is_none()
            && self.ammunition_id.is_none()
            && self.club.is_none()
            && self.min_score.is_none()
            && self.max_score.is_none()
    }

    pub fn matches(&self, round: &Round) -> bool {
        if let Some(from) = self.date_from {
            if round.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if round.date > to {
                return false;
            }
        }
        if let Some(gun_id) = &self.gun_id {
            if round.gun_id != *gun_id {
                return false;
            }
        }
        if let Some(choke_id) = &self.choke_id {
            if round.over_choke_id != *choke_id && round.under_choke_id != *choke_id {
                return false;
            }
        }
        if let Some(ammunition_id) = &self.ammunition_id {
            if round.ammunition_id != *ammunition_id {
                return false;
            }
        }
        if let Some(club) = &self.club {
            if !round.club.to_lowercase().contains(&club.to_lowercase()) {
                return false;
            }
        }
        if let Some(min) = self.min_score {
            if round.total_score < min {
                return false;
            }
        }
        if let Some(max) = self.max_score {
            if round.total_score > max {
                return false;
            }
        }
        true
    }
}

/// Rounds matching the filter, in input order.
pub fn filter_rounds(rounds: &[Round], filter: &RoundFilter) -> Vec<Round> {
    rounds.iter().filter(|r| filter.matches(r)).cloned().collect()
}

/// Sort key for round listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Date,
    TotalScore,
    HitRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Stable sort of a round list.
///
/// Descending reverses the comparator, not the result, so ties keep their
/// input order either way.
pub fn sort_rounds(rounds: &[Round], key: SortKey, order: SortOrder) -> Vec<Round> {
    let mut sorted = rounds.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::TotalScore => a.total_score.cmp(&b.total_score),
            // Hit rate orders identically to hit count (fixed 25-target denominator)
            SortKey::HitRate => a.hit_count.cmp(&b.hit_count),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RoundSetup, SHOTS_PER_ROUND};
    use chrono::{Duration, TimeZone};

    fn round_with(score_presses: usize, club: &str, gun: &str, days_ago: i64) -> Round {
        let mut setup = RoundSetup::new("filter-user");
        setup.club = club.to_string();
        setup.gun_id = gun.to_string();

        let mut round = Round::new(setup);
        for i in 0..score_presses.min(SHOTS_PER_ROUND) {
            round = round.cycle_shot(i).unwrap();
        }
        round.date = Utc::now() - Duration::days(days_ago);
        round
    }

    /// Round carrying an exact total score (3-point hits only, so score
    /// must be a multiple of 3 ≤ 75).
    fn round_scored(total: u8) -> Round {
        assert_eq!(total % 3, 0);
        round_with((total / 3) as usize, "", "", 0)
    }

    #[test]
    fn test_score_range_filter() {
        // First-barrel-only rounds, so totals are multiples of 3
        let rounds: Vec<Round> =
            [51u8, 60, 69, 75].iter().map(|&s| round_scored(s)).collect();

        let filter = RoundFilter {
            min_score: Some(60),
            max_score: Some(69),
            ..Default::default()
        };
        let kept = filter_rounds(&rounds, &filter);
        let scores: Vec<u8> = kept.iter().map(|r| r.total_score).collect();
        assert_eq!(scores, vec![60, 69]);

        // Bounds are inclusive
        let filter = RoundFilter {
            min_score: Some(51),
            max_score: Some(75),
            ..Default::default()
        };
        assert_eq!(filter_rounds(&rounds, &filter).len(), 4);
    }

    #[test]
    fn test_score_range_reads_total_only() {
        // The filter consults totalScore alone, whatever the shots say
        let rounds: Vec<Round> = [50u8, 60, 70, 80]
            .iter()
            .map(|&s| {
                let mut r = round_with(0, "", "", 0);
                r.total_score = s;
                r
            })
            .collect();

        let filter = RoundFilter {
            min_score: Some(60),
            max_score: Some(70),
            ..Default::default()
        };
        let scores: Vec<u8> =
            filter_rounds(&rounds, &filter).iter().map(|r| r.total_score).collect();
        assert_eq!(scores, vec![60, 70]);
    }

    #[test]
    fn test_venue_substring_case_insensitive() {
        let rounds = vec![
            round_with(5, "Northside Gun Club", "", 0),
            round_with(5, "SOUTHSIDE SHOOTING GROUND", "", 0),
            round_with(5, "Riverside", "", 0),
        ];

        let filter = RoundFilter { club: Some("side".to_string()), ..Default::default() };
        assert_eq!(filter_rounds(&rounds, &filter).len(), 3);

        let filter = RoundFilter { club: Some("southside".to_string()), ..Default::default() };
        let kept = filter_rounds(&rounds, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].club, "SOUTHSIDE SHOOTING GROUND");
    }

    #[test]
    fn test_equipment_filters() {
        let rounds = vec![
            round_with(5, "", "gun-a", 0),
            round_with(5, "", "gun-b", 0),
            round_with(5, "", "", 0),
        ];

        let filter = RoundFilter { gun_id: Some("gun-a".to_string()), ..Default::default() };
        assert_eq!(filter_rounds(&rounds, &filter).len(), 1);

        // Exact match: the empty id only matches an explicit empty filter value
        let filter = RoundFilter { gun_id: Some(String::new()), ..Default::default() };
        assert_eq!(filter_rounds(&rounds, &filter).len(), 1);
    }

    #[test]
    fn test_choke_matches_either_barrel() {
        let mut setup = RoundSetup::new("filter-user");
        setup.over_choke_id = "choke-half".to_string();
        setup.under_choke_id = "choke-full".to_string();
        let round = Round::new(setup);

        let filter =
            RoundFilter { choke_id: Some("choke-full".to_string()), ..Default::default() };
        assert!(filter.matches(&round));

        let filter =
            RoundFilter { choke_id: Some("choke-half".to_string()), ..Default::default() };
        assert!(filter.matches(&round));

        let filter =
            RoundFilter { choke_id: Some("choke-quarter".to_string()), ..Default::default() };
        assert!(!filter.matches(&round));
    }

    #[test]
    fn test_date_range_inclusive() {
        let mut round = round_with(5, "", "", 0);
        round.date = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();

        let filter = RoundFilter {
            date_from: Some(Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()),
            date_to: Some(Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()),
            ..Default::default()
        };
        assert!(filter.matches(&round));

        let filter = RoundFilter {
            date_to: Some(Utc.with_ymd_and_hms(2025, 6, 14, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        assert!(!filter.matches(&round));
    }

    #[test]
    fn test_filters_are_anded() {
        let rounds = vec![
            round_with(10, "Northside", "gun-a", 0),
            round_with(10, "Northside", "gun-b", 0),
            round_with(2, "Northside", "gun-a", 0),
        ];

        let filter = RoundFilter {
            club: Some("north".to_string()),
            gun_id: Some("gun-a".to_string()),
            min_score: Some(30),
            ..Default::default()
        };
        let kept = filter_rounds(&rounds, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].total_score, 30);
    }

    #[test]
    fn test_unconstrained_filter_keeps_everything() {
        let rounds = vec![round_with(1, "a", "", 2), round_with(2, "b", "", 1)];
        let filter = RoundFilter::new();
        assert!(filter.is_unconstrained());
        assert_eq!(filter_rounds(&rounds, &filter).len(), 2);
    }

    #[test]
    fn test_sort_by_score_and_date() {
        let rounds = vec![
            round_with(10, "", "", 1),
            round_with(2, "", "", 3),
            round_with(20, "", "", 2),
        ];

        let by_score = sort_rounds(&rounds, SortKey::TotalScore, SortOrder::Asc);
        let scores: Vec<u8> = by_score.iter().map(|r| r.total_score).collect();
        assert_eq!(scores, vec![6, 30, 60]);

        let by_date = sort_rounds(&rounds, SortKey::Date, SortOrder::Desc);
        assert_eq!(by_date[0].total_score, 30); // newest: 1 day ago
        assert_eq!(by_date[2].total_score, 6); // oldest: 3 days ago
    }

    #[test]
    fn test_sort_by_hit_rate() {
        let mut low = round_with(0, "", "", 0);
        // Two second-barrel hits: score 4, hit count 2
        for i in 0..2 {
            low = low.cycle_shot(i).unwrap();
            low = low.cycle_shot(i).unwrap();
        }
        let high = round_with(5, "", "", 0); // five hits

        let sorted = sort_rounds(&[low, high], SortKey::HitRate, SortOrder::Desc);
        assert_eq!(sorted[0].hit_count, 5);
        assert_eq!(sorted[1].hit_count, 2);
    }

    #[test]
    fn test_sort_stability_on_equal_keys() {
        // Same score everywhere; distinct clubs mark the input order
        let rounds: Vec<Round> = ["first", "second", "third", "fourth"]
            .iter()
            .map(|&club| round_with(4, club, "", 0))
            .collect();

        for order in [SortOrder::Asc, SortOrder::Desc] {
            let sorted = sort_rounds(&rounds, SortKey::TotalScore, order);
            let clubs: Vec<&str> = sorted.iter().map(|r| r.club.as_str()).collect();
            assert_eq!(clubs, vec!["first", "second", "third", "fourth"]);
        }
    }

    #[test]
    fn test_sort_does_not_touch_input() {
        let rounds = vec![round_with(10, "", "", 1), round_with(2, "", "", 2)];
        let _ = sort_rounds(&rounds, SortKey::TotalScore, SortOrder::Asc);
        assert_eq!(rounds[0].total_score, 30);
    }

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: equal-key runs preserve input order under both
            /// sort directions
            #[test]
            fn prop_sort_stable(tags in proptest::collection::vec(0u8..3, 1..30)) {
                // Encode the input position in the club name; all rounds
                // share one hit count per tag so ties are plentiful
                let rounds: Vec<Round> = tags
                    .iter()
                    .enumerate()
                    .map(|(i, &tag)| round_with(tag as usize, &format!("pos-{i}"), "", 0))
                    .collect();

                for order in [SortOrder::Asc, SortOrder::Desc] {
                    let sorted = sort_rounds(&rounds, SortKey::TotalScore, order);
                    // Within each equal-score run, pos indices must ascend
                    for pair in sorted.windows(2) {
                        if pair[0].total_score == pair[1].total_score {
                            let a: usize = pair[0].club[4..].parse().unwrap();
                            let b: usize = pair[1].club[4..].parse().unwrap();
                            prop_assert!(a < b);
                        }
                    }
                }
            }
        }
    }
}
