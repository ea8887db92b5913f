//! Repeat-play eligibility and head-to-head queries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CompetitorId, MatchRecord};

/// Number of meetings allowed before the best-of-three decider rule applies
pub const MAX_REGULAR_MATCHES: usize = 3;

/// Wins one side needs in a three-match series to earn a decider
const DECIDER_WINS: usize = 2;

/// Decide whether two competitors may be paired again.
///
/// Fewer than three prior meetings is always fine. At exactly three, a
/// fourth (deciding) match is allowed only if exactly one side has won two
/// of them. Anything beyond three is never allowed.
pub fn can_play(a: CompetitorId, b: CompetitorId, history: &[MatchRecord]) -> bool {
    if a == b {
        return false;
    }

    let meetings = history.iter().filter(|m| m.involves(a, b));
    let mut matches = 0;
    let mut wins_a = 0;
    let mut wins_b = 0;
    for record in meetings {
        matches += 1;
        if record.won_by(a) {
            wins_a += 1;
        } else if record.won_by(b) {
            wins_b += 1;
        }
    }

    match matches {
        n if n < MAX_REGULAR_MATCHES => true,
        MAX_REGULAR_MATCHES => (wins_a == DECIDER_WINS) != (wins_b == DECIDER_WINS),
        _ => false,
    }
}

/// All matches between `a` and `b`, newest first
pub fn head_to_head<'h>(
    a: CompetitorId,
    b: CompetitorId,
    history: &'h [MatchRecord],
) -> Vec<&'h MatchRecord> {
    let mut records: Vec<&MatchRecord> = history.iter().filter(|m| m.involves(a, b)).collect();
    records.sort_by(|x, y| y.timestamp.cmp(&x.timestamp));
    records
}

/// Number of prior meetings between `a` and `b`
pub fn head_to_head_count(a: CompetitorId, b: CompetitorId, history: &[MatchRecord]) -> usize {
    history.iter().filter(|m| m.involves(a, b)).count()
}

/// Aggregate view of a head-to-head series, from `a`'s side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadToHeadSummary {
    pub matches: usize,
    pub wins_a: usize,
    pub wins_b: usize,
    pub last_played: Option<DateTime<Utc>>,
}

pub fn head_to_head_summary(
    a: CompetitorId,
    b: CompetitorId,
    history: &[MatchRecord],
) -> HeadToHeadSummary {
    let records = head_to_head(a, b, history);
    HeadToHeadSummary {
        matches: records.len(),
        wins_a: records.iter().filter(|m| m.won_by(a)).count(),
        wins_b: records.iter().filter(|m| m.won_by(b)).count(),
        last_played: records.first().map(|m| m.timestamp),
    }
}

#[cfg(test)]
#[path = "eligibility_tests.rs"]
mod eligibility_tests;
