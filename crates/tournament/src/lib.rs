//! Tournament runner for score-based pairing
//!
//! This crate provides the pieces around the pairing core:
//! - A JSON-backed roster and append-only match log
//! - Transactional match recording (+1 winner, -1 loser)
//! - Round generation from a store snapshot, with reports
//!
//! # Usage
//!
//! ```bash
//! # Register competitors
//! cargo run -p tournament -- add Alice
//! cargo run -p tournament -- add Bob --score 1
//!
//! # Generate a round and record a result
//! cargo run -p tournament -- round --margin 1 --seed 42
//! cargo run -p tournament -- record 1 2 --winner 2
//!
//! # Standings
//! cargo run -p tournament -- leaderboard
//! ```

mod config;
mod error;
mod report;
mod runner;
mod store;

pub use config::*;
pub use error::*;
pub use report::*;
pub use runner::*;
pub use store::*;
