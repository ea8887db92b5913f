//! Pairing core for score-based tournaments
//!
//! This crate decides who may play whom and turns a competitor pool into
//! one round of disjoint pairings:
//! - Eligibility rule (margin and repeat-play limits, best-of-three decider)
//! - Opponent finder with a fixed tie-break ordering
//! - Greedy randomized round generation (plus a deterministic sorted variant)
//! - Leaderboard and pairing statistics
//!
//! Everything here is a pure function over snapshots handed in by the
//! caller. Storing competitors and recording results is the caller's job.
//!
//! # Usage
//!
//! ```rust
//! use pairing_core::{generate_round_sorted, Competitor, CompetitorId, Margin};
//!
//! let pool = vec![
//!     Competitor::new(CompetitorId(1), "Ada", 0),
//!     Competitor::new(CompetitorId(2), "Bo", 1),
//!     Competitor::new(CompetitorId(3), "Cy", 5),
//! ];
//!
//! let round = generate_round_sorted(&pool, &[], Margin::default());
//! assert_eq!(round.len(), 1);
//! assert_eq!(round[0].score_difference, 1);
//! ```

mod eligibility;
mod error;
mod leaderboard;
mod opponents;
mod round;
mod types;

pub use eligibility::*;
pub use error::*;
pub use leaderboard::*;
pub use opponents::*;
pub use round::*;
pub use types::*;
