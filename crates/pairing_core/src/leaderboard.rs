//! Leaderboard built from the match log

use serde::{Deserialize, Serialize};

use crate::types::{Competitor, CompetitorId, MatchRecord};

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub competitor: Competitor,
    pub wins: u32,
    pub losses: u32,
    pub total_matches: u32,
    /// Percentage in 0..=100, 0 when no matches were played
    pub win_rate: f64,
}

impl Standing {
    fn from_history(competitor: &Competitor, history: &[MatchRecord]) -> Self {
        let mut wins = 0;
        let mut losses = 0;
        for record in history.iter().filter(|m| m.includes(competitor.id)) {
            if record.won_by(competitor.id) {
                wins += 1;
            } else if record.loser == competitor.id {
                losses += 1;
            }
        }

        let total_matches = wins + losses;
        let win_rate = if total_matches == 0 {
            0.0
        } else {
            wins as f64 / total_matches as f64 * 100.0
        };

        Self {
            competitor: competitor.clone(),
            wins,
            losses,
            total_matches,
            win_rate,
        }
    }
}

/// Rank the pool: score, then win rate, then matches played (all
/// descending), then name ascending.
pub fn rank(pool: &[Competitor], history: &[MatchRecord]) -> Vec<Standing> {
    let mut standings: Vec<Standing> = pool
        .iter()
        .map(|c| Standing::from_history(c, history))
        .collect();

    standings.sort_by(|a, b| {
        b.competitor
            .score
            .cmp(&a.competitor.score)
            .then(b.win_rate.total_cmp(&a.win_rate))
            .then(b.total_matches.cmp(&a.total_matches))
            .then_with(|| a.competitor.name.cmp(&b.competitor.name))
    });
    standings
}

/// 1-based leaderboard position, `None` if `id` is not in the pool
pub fn rank_of(id: CompetitorId, pool: &[Competitor], history: &[MatchRecord]) -> Option<usize> {
    rank(pool, history)
        .iter()
        .position(|s| s.competitor.id == id)
        .map(|pos| pos + 1)
}

pub fn standing_of(id: CompetitorId, pool: &[Competitor], history: &[MatchRecord]) -> Option<Standing> {
    pool.iter()
        .find(|c| c.id == id)
        .map(|c| Standing::from_history(c, history))
}

#[cfg(test)]
#[path = "leaderboard_tests.rs"]
mod leaderboard_tests;
