//! Round runner: generates one round from a store snapshot

use pairing_core::{
    generate_round, generate_round_sorted, generate_round_with, pairing_stats, unpaired, Margin,
    Pairing,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::report::RoundReport;
use crate::store::TournamentStore;

/// How competitors are visited when building a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundOrder {
    /// Uniformly shuffled visit order
    #[default]
    Shuffled,
    /// Highest score first, fully deterministic
    ByScore,
}

/// Configuration for a round
#[derive(Debug, Clone)]
pub struct RoundConfig {
    /// Maximum score difference between opponents
    pub margin: Margin,
    /// Shuffle seed (None = thread RNG)
    pub seed: Option<u64>,
    pub order: RoundOrder,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            margin: Margin::default(),
            seed: None,
            order: RoundOrder::Shuffled,
        }
    }
}

/// Runs round generation against a tournament store
pub struct RoundRunner {
    config: RoundConfig,
}

impl RoundRunner {
    pub fn new(config: RoundConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Generate a round from the store's current snapshot
    pub fn run(&self, store: &TournamentStore) -> RoundReport {
        let pool = store.competitors();
        let history = store.history();
        let margin = self.config.margin;

        let pairings = self.pairings(store);
        let left_out = unpaired(pool, &pairings).into_iter().cloned().collect();
        let stats = pairing_stats(pool, history, margin);

        tracing::info!(
            pairings = pairings.len(),
            competitors = pool.len(),
            %margin,
            "round generated"
        );

        RoundReport::new(margin, pairings, left_out, stats)
    }

    fn pairings(&self, store: &TournamentStore) -> Vec<Pairing> {
        let pool = store.competitors();
        let history = store.history();
        let margin = self.config.margin;

        match (self.config.order, self.config.seed) {
            (RoundOrder::ByScore, _) => generate_round_sorted(pool, history, margin),
            (RoundOrder::Shuffled, Some(seed)) => {
                let mut rng = StdRng::seed_from_u64(seed);
                generate_round_with(pool, history, margin, &mut rng)
            }
            (RoundOrder::Shuffled, None) => generate_round(pool, history, margin),
        }
    }
}

/// Quick utility to generate a single round
pub fn quick_round(store: &TournamentStore, margin: Margin, seed: Option<u64>) -> RoundReport {
    let config = RoundConfig {
        margin,
        seed,
        ..Default::default()
    };
    RoundRunner::new(config).run(store)
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod runner_tests;
