//! Opponent finder
//!
//! Candidates are ordered by score difference, then by how often the two
//! have already met, then by name. Both the "best opponent" and the
//! "top-N recommendations" queries use this same ordering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::eligibility::{can_play, head_to_head, head_to_head_count};
use crate::error::{PairingError, Result};
use crate::types::{Competitor, CompetitorId, Margin, MatchRecord};

/// A ranked opponent suggestion with head-to-head metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub opponent: Competitor,
    pub score_difference: u64,
    pub previous_matches: usize,
    pub last_played: Option<DateTime<Utc>>,
}

/// Every competitor in `pool` that `competitor` may legally play, best first.
///
/// Fails if `competitor` is not part of `pool`.
pub fn eligible_opponents<'p>(
    competitor: &Competitor,
    pool: &'p [Competitor],
    history: &[MatchRecord],
    margin: Margin,
) -> Result<Vec<&'p Competitor>> {
    find_competitor(competitor.id, pool)?;
    Ok(ranked_candidates(competitor, pool, history, margin))
}

/// Candidate ordering shared by every opponent query; `competitor` must
/// already be known to belong to `pool`.
pub(crate) fn ranked_candidates<'p>(
    competitor: &Competitor,
    pool: &'p [Competitor],
    history: &[MatchRecord],
    margin: Margin,
) -> Vec<&'p Competitor> {
    let mut candidates: Vec<(&Competitor, u64, usize)> = pool
        .iter()
        .filter(|c| c.id != competitor.id)
        .filter(|c| margin.allows(competitor, c))
        .filter(|c| can_play(competitor.id, c.id, history))
        .map(|c| {
            (
                c,
                competitor.score_difference(c),
                head_to_head_count(competitor.id, c.id, history),
            )
        })
        .collect();

    candidates.sort_by(|a, b| compare_candidates(a, b));
    candidates.into_iter().map(|(c, _, _)| c).collect()
}

fn compare_candidates(
    a: &(&Competitor, u64, usize),
    b: &(&Competitor, u64, usize),
) -> Ordering {
    a.1.cmp(&b.1)
        .then(a.2.cmp(&b.2))
        .then_with(|| a.0.name.cmp(&b.0.name))
}

/// First candidate of [`eligible_opponents`]; `Ok(None)` if nobody qualifies
pub fn best_opponent<'p>(
    competitor: &Competitor,
    pool: &'p [Competitor],
    history: &[MatchRecord],
    margin: Margin,
) -> Result<Option<&'p Competitor>> {
    Ok(eligible_opponents(competitor, pool, history, margin)?
        .into_iter()
        .next())
}

/// Up to `limit` ranked suggestions for the competitor with `id`.
///
/// Fails if `id` is not part of `pool`; an empty result means the
/// competitor exists but has nobody to play this round.
pub fn recommend_opponents(
    id: CompetitorId,
    pool: &[Competitor],
    history: &[MatchRecord],
    margin: Margin,
    limit: usize,
) -> Result<Vec<Recommendation>> {
    let competitor = find_competitor(id, pool)?;

    Ok(ranked_candidates(competitor, pool, history, margin)
        .into_iter()
        .take(limit)
        .map(|opponent| {
            let meetings = head_to_head(id, opponent.id, history);
            Recommendation {
                opponent: opponent.clone(),
                score_difference: competitor.score_difference(opponent),
                previous_matches: meetings.len(),
                last_played: meetings.first().map(|m| m.timestamp),
            }
        })
        .collect())
}

/// Look up a competitor by id, failing fast when the caller passed a stale id
pub fn find_competitor(id: CompetitorId, pool: &[Competitor]) -> Result<&Competitor> {
    pool.iter()
        .find(|c| c.id == id)
        .ok_or(PairingError::CompetitorNotFound(id))
}

#[cfg(test)]
#[path = "opponents_tests.rs"]
mod opponents_tests;
