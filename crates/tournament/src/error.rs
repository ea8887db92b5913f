//! Error types for the tournament store and runner

use pairing_core::{CompetitorId, PairingError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TournamentError {
    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Pairing(#[from] PairingError),

    #[error("Unknown competitor {0}")]
    UnknownCompetitor(CompetitorId),

    #[error("Competitor name must not be empty")]
    EmptyName,

    #[error("A competitor named {0:?} already exists")]
    DuplicateName(String),

    /// Recording this match would break the repeat-play limit
    #[error("{a} and {b} have reached their head-to-head limit")]
    RepeatLimit { a: CompetitorId, b: CompetitorId },

    #[error("Competitor {0} has recorded matches and cannot be removed")]
    CompetitorHasHistory(CompetitorId),

    /// Loaded data breaks an invariant the store relies on
    #[error("Corrupt tournament data: {0}")]
    CorruptData(String),
}

pub type Result<T> = std::result::Result<T, TournamentError>;
