//! Error types for the pairing core
//!
//! Only programmer errors are reported here. Empty pools, competitors
//! without opponents and unknown ids in rank lookups are ordinary results.

use thiserror::Error;

use crate::types::CompetitorId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairingError {
    /// Margins are absolute score differences and cannot be negative
    #[error("Invalid margin {0}: must be a non-negative integer")]
    InvalidMargin(i64),

    /// A single-competitor query named an id missing from the pool
    #[error("Competitor {0} is not in the supplied pool")]
    CompetitorNotFound(CompetitorId),

    #[error("Competitor {0} cannot be paired with itself")]
    SelfPairing(CompetitorId),

    /// Winner must be one of the two players of the match
    #[error("Winner {winner} did not play in match {player_a} vs {player_b}")]
    InvalidResult {
        winner: CompetitorId,
        player_a: CompetitorId,
        player_b: CompetitorId,
    },
}

/// Convenience Result type for pairing operations
pub type Result<T> = std::result::Result<T, PairingError>;
