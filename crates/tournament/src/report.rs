//! Round reports and leaderboard tables

use chrono::{DateTime, Utc};
use pairing_core::{Competitor, Margin, Pairing, PairingStats, Standing};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// One generated round, ready to be shown or saved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundReport {
    pub generated_at: DateTime<Utc>,
    pub margin: Margin,
    pub pairings: Vec<Pairing>,
    /// Competitors who got no opponent this round
    pub unpaired: Vec<Competitor>,
    pub stats: PairingStats,
}

impl RoundReport {
    pub fn new(
        margin: Margin,
        pairings: Vec<Pairing>,
        unpaired: Vec<Competitor>,
        stats: PairingStats,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            margin,
            pairings,
            unpaired,
            stats,
        }
    }

    /// Mean score difference of the pairings actually produced
    pub fn mean_pairing_difference(&self) -> f64 {
        if self.pairings.is_empty() {
            return 0.0;
        }
        let total: u64 = self.pairings.iter().map(|p| p.score_difference).sum();
        total as f64 / self.pairings.len() as f64
    }

    /// Save report to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load report from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Round (margin {}) ===\n\n", self.margin));

        if self.pairings.is_empty() {
            report.push_str("No pairings possible.\n");
        } else {
            report.push_str(&format!(
                "{:<6} {:<20} {:>5}   {:<20} {:>5} {:>5}\n",
                "Board", "Player A", "Score", "Player B", "Score", "Diff"
            ));
            report.push_str(&"-".repeat(68));
            report.push('\n');
            for (board, p) in self.pairings.iter().enumerate() {
                report.push_str(&format!(
                    "{:<6} {:<20} {:>5}   {:<20} {:>5} {:>5}\n",
                    board + 1,
                    p.player_a.name,
                    p.player_a.score,
                    p.player_b.name,
                    p.player_b.score,
                    p.score_difference
                ));
            }
        }

        if !self.unpaired.is_empty() {
            let names: Vec<&str> = self.unpaired.iter().map(|c| c.name.as_str()).collect();
            report.push_str(&format!("\nUnpaired: {}\n", names.join(", ")));
        }

        report.push_str(&format!(
            "\nPaired {} of {} competitors (mean diff {:.2})\n",
            self.pairings.len() * 2,
            self.stats.total_competitors,
            self.mean_pairing_difference()
        ));
        report.push_str(&stats_report(&self.stats));
        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

/// Text summary of pool-wide eligibility
pub fn stats_report(stats: &PairingStats) -> String {
    format!(
        "Competitors with opponents: {}/{}\nPossible pairs: {}\nAverage score difference: {:.2}\n",
        stats.competitors_with_opponents,
        stats.total_competitors,
        stats.possible_pairs,
        stats.average_score_difference
    )
}

/// Leaderboard table
pub fn leaderboard_report(standings: &[Standing]) -> String {
    let mut report = String::new();
    report.push_str("=== Leaderboard ===\n");
    report.push_str(&format!(
        "{:<5} {:<24} {:>6} {:>5} {:>5} {:>6} {:>7}\n",
        "Rank", "Competitor", "Score", "W", "L", "Games", "Win %"
    ));
    report.push_str(&"-".repeat(64));
    report.push('\n');
    for (pos, s) in standings.iter().enumerate() {
        report.push_str(&format!(
            "{:<5} {:<24} {:>6} {:>5} {:>5} {:>6} {:>7.1}\n",
            pos + 1,
            s.competitor.name,
            s.competitor.score,
            s.wins,
            s.losses,
            s.total_matches,
            s.win_rate
        ));
    }
    report
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
