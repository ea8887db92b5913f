//! Roster and match log, persisted as a single JSON file

use chrono::{DateTime, Utc};
use pairing_core::{can_play, Competitor, CompetitorId, MatchRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Result, TournamentError};

/// Default file the CLI reads and writes
pub const DEFAULT_DATA_FILE: &str = "tournament.json";

/// Points gained by the winner and lost by the loser of a match
pub const POINTS_PER_MATCH: i64 = 1;

/// Everything the pairing core needs a snapshot of
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentStore {
    competitors: Vec<Competitor>,
    /// Append-only match log
    history: Vec<MatchRecord>,
    /// Next id handed out by `add_competitor`
    next_id: u64,
}

impl Default for TournamentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TournamentStore {
    pub fn new() -> Self {
        Self {
            competitors: Vec::new(),
            history: Vec::new(),
            next_id: 1,
        }
    }

    /// Load the store from a JSON file, rejecting data that breaks the
    /// roster or match log invariants
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let store: Self = serde_json::from_str(&contents)?;
        store.validate()?;
        Ok(store)
    }

    /// Load the store, starting empty if the file does not exist yet
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), "no tournament data yet, starting empty");
            Ok(Self::new())
        }
    }

    /// Save the store to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn competitors(&self) -> &[Competitor] {
        &self.competitors
    }

    pub fn history(&self) -> &[MatchRecord] {
        &self.history
    }

    pub fn competitor(&self, id: CompetitorId) -> Result<&Competitor> {
        self.competitors
            .iter()
            .find(|c| c.id == id)
            .ok_or(TournamentError::UnknownCompetitor(id))
    }

    /// Register a new competitor with a fresh id
    pub fn add_competitor(&mut self, name: &str, score: i64) -> Result<&Competitor> {
        let name = self.validate_name(name)?;
        let id = CompetitorId(self.next_id);
        self.next_id += 1;

        tracing::info!(%id, name = %name, score, "competitor added");
        self.competitors.push(Competitor::new(id, name, score));
        Ok(&self.competitors[self.competitors.len() - 1])
    }

    pub fn rename_competitor(&mut self, id: CompetitorId, name: &str) -> Result<()> {
        self.competitor(id)?;
        let name = self.validate_name(name)?;
        if let Some(competitor) = self.competitors.iter_mut().find(|c| c.id == id) {
            competitor.name = name;
        }
        Ok(())
    }

    /// Remove a competitor who has never played; the match log is append-only
    pub fn remove_competitor(&mut self, id: CompetitorId) -> Result<Competitor> {
        let index = self
            .competitors
            .iter()
            .position(|c| c.id == id)
            .ok_or(TournamentError::UnknownCompetitor(id))?;
        if self.history.iter().any(|m| m.includes(id)) {
            return Err(TournamentError::CompetitorHasHistory(id));
        }

        tracing::info!(%id, "competitor removed");
        Ok(self.competitors.remove(index))
    }

    /// Record a decided match now
    pub fn record_match(
        &mut self,
        player_a: CompetitorId,
        player_b: CompetitorId,
        winner: CompetitorId,
    ) -> Result<&MatchRecord> {
        self.record_match_at(player_a, player_b, winner, Utc::now())
    }

    /// Append a match and move both scores, or change nothing at all.
    ///
    /// Every check runs before the first mutation.
    pub fn record_match_at(
        &mut self,
        player_a: CompetitorId,
        player_b: CompetitorId,
        winner: CompetitorId,
        timestamp: DateTime<Utc>,
    ) -> Result<&MatchRecord> {
        let record = MatchRecord::new(player_a, player_b, winner, timestamp)?;
        let winner_idx = self.index_of(record.winner)?;
        let loser_idx = self.index_of(record.loser)?;
        if !can_play(player_a, player_b, &self.history) {
            tracing::warn!(a = %player_a, b = %player_b, "match rejected: head-to-head limit");
            return Err(TournamentError::RepeatLimit {
                a: player_a,
                b: player_b,
            });
        }

        self.competitors[winner_idx].score += POINTS_PER_MATCH;
        self.competitors[loser_idx].score -= POINTS_PER_MATCH;
        tracing::info!(
            winner = %record.winner,
            loser = %record.loser,
            "match recorded"
        );
        self.history.push(record);
        Ok(&self.history[self.history.len() - 1])
    }

    fn validate(&self) -> Result<()> {
        let mut ids = HashSet::with_capacity(self.competitors.len());
        for competitor in &self.competitors {
            if !ids.insert(competitor.id) {
                return Err(corrupt(format!("duplicate competitor id {}", competitor.id)));
            }
            if competitor.id.0 >= self.next_id {
                return Err(corrupt(format!(
                    "competitor id {} is not below next_id {}",
                    competitor.id, self.next_id
                )));
            }
        }

        for record in &self.history {
            let well_formed = record.player_a != record.player_b
                && record.includes(record.winner)
                && record.includes(record.loser)
                && record.winner != record.loser;
            if !well_formed {
                return Err(corrupt(format!("malformed match record {}", record.id)));
            }
            for player in [record.player_a, record.player_b] {
                if !ids.contains(&player) {
                    return Err(corrupt(format!(
                        "match record {} names unknown competitor {player}",
                        record.id
                    )));
                }
            }
        }
        Ok(())
    }

    fn index_of(&self, id: CompetitorId) -> Result<usize> {
        self.competitors
            .iter()
            .position(|c| c.id == id)
            .ok_or(TournamentError::UnknownCompetitor(id))
    }

    fn validate_name(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        if self.competitors.iter().any(|c| c.name == name) {
            return Err(TournamentError::DuplicateName(name.to_string()));
        }
        Ok(name.to_string())
    }
}

fn corrupt(reason: String) -> TournamentError {
    tracing::warn!(%reason, "rejecting tournament data");
    TournamentError::CorruptData(reason)
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
