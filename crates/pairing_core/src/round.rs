//! Round generation: greedy matching over a shuffled (or sorted) pool
//!
//! The greedy loop does not maximize the number of pairings. It guarantees
//! that nobody is paired twice in a round, and shuffling the visit order
//! gives every competitor the same chance of being matched early across
//! repeated regenerations.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::eligibility::can_play;
use crate::opponents::ranked_candidates;
use crate::types::{Competitor, CompetitorId, Margin, MatchRecord, Pairing};

/// Generate a round using the thread-local RNG.
///
/// Results differ between calls; use [`generate_round_with`] with a seeded
/// generator when reproducibility matters.
pub fn generate_round(pool: &[Competitor], history: &[MatchRecord], margin: Margin) -> Vec<Pairing> {
    generate_round_with(pool, history, margin, &mut rand::thread_rng())
}

/// Generate a round, shuffling the visit order with `rng`
pub fn generate_round_with<R: Rng + ?Sized>(
    pool: &[Competitor],
    history: &[MatchRecord],
    margin: Margin,
    rng: &mut R,
) -> Vec<Pairing> {
    if pool.len() < 2 {
        return Vec::new();
    }

    let mut order: Vec<&Competitor> = pool.iter().collect();
    order.shuffle(rng);
    pair_in_order(&order, pool, history, margin)
}

/// Generate a round visiting competitors strongest first.
///
/// Deterministic for a given pool and history. Ties in score keep the
/// order in which they appear in `pool`.
pub fn generate_round_sorted(
    pool: &[Competitor],
    history: &[MatchRecord],
    margin: Margin,
) -> Vec<Pairing> {
    if pool.len() < 2 {
        return Vec::new();
    }

    let mut order: Vec<&Competitor> = pool.iter().collect();
    order.sort_by(|a, b| b.score.cmp(&a.score));
    pair_in_order(&order, pool, history, margin)
}

fn pair_in_order(
    order: &[&Competitor],
    pool: &[Competitor],
    history: &[MatchRecord],
    margin: Margin,
) -> Vec<Pairing> {
    let mut used: HashSet<CompetitorId> = HashSet::with_capacity(pool.len());
    let mut pairings = Vec::with_capacity(pool.len() / 2);

    for &competitor in order {
        if used.contains(&competitor.id) {
            continue;
        }

        let opponent = ranked_candidates(competitor, pool, history, margin)
            .into_iter()
            .find(|c| !used.contains(&c.id));

        let Some(opponent) = opponent else {
            tracing::debug!(competitor = %competitor.id, "no eligible opponent left");
            continue;
        };

        // Re-check right before committing the pairing
        if !can_play(competitor.id, opponent.id, history) {
            tracing::debug!(
                competitor = %competitor.id,
                opponent = %opponent.id,
                "pairing rejected on re-validation"
            );
            continue;
        }

        used.insert(competitor.id);
        used.insert(opponent.id);
        let pairing = Pairing::new(competitor.clone(), opponent.clone());
        tracing::debug!(
            player_a = %pairing.player_a.id,
            player_b = %pairing.player_b.id,
            score_difference = pairing.score_difference,
            "paired"
        );
        pairings.push(pairing);
    }

    pairings
}

/// Competitors from `pool` that do not appear in any of `pairings`, in pool order
pub fn unpaired<'p>(pool: &'p [Competitor], pairings: &[Pairing]) -> Vec<&'p Competitor> {
    pool.iter()
        .filter(|c| !pairings.iter().any(|p| p.contains(c.id)))
        .collect()
}

/// True if at least one competitor has somebody to play
pub fn has_any_possible_pairing(
    pool: &[Competitor],
    history: &[MatchRecord],
    margin: Margin,
) -> bool {
    pool.iter()
        .any(|c| !ranked_candidates(c, pool, history, margin).is_empty())
}

/// Pool-wide eligibility statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairingStats {
    pub total_competitors: usize,
    /// Competitors with at least one eligible opponent
    pub competitors_with_opponents: usize,
    /// Directed (competitor, opponent) pairs; each unordered pair counts twice
    pub possible_pairs: usize,
    /// Mean score difference over the directed pairs (0 when there are none)
    pub average_score_difference: f64,
}

pub fn pairing_stats(pool: &[Competitor], history: &[MatchRecord], margin: Margin) -> PairingStats {
    let mut competitors_with_opponents = 0;
    let mut possible_pairs = 0;
    let mut total_difference: u128 = 0;

    for competitor in pool {
        let opponents = ranked_candidates(competitor, pool, history, margin);
        if !opponents.is_empty() {
            competitors_with_opponents += 1;
        }
        possible_pairs += opponents.len();
        total_difference += opponents
            .iter()
            .map(|o| u128::from(competitor.score_difference(o)))
            .sum::<u128>();
    }

    let average_score_difference = if possible_pairs == 0 {
        0.0
    } else {
        total_difference as f64 / possible_pairs as f64
    };

    PairingStats {
        total_competitors: pool.len(),
        competitors_with_opponents,
        possible_pairs,
        average_score_difference,
    }
}

#[cfg(test)]
#[path = "round_tests.rs"]
mod round_tests;
