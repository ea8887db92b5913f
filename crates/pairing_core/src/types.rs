//! Data model shared by every pairing operation

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

use crate::error::{PairingError, Result};

/// Identifier of a competitor, assigned by the roster owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetitorId(pub u64);

impl fmt::Display for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A participant with its current score.
///
/// Treated as an immutable snapshot while a round is being computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: CompetitorId,
    pub name: String,
    pub score: i64,
}

impl Competitor {
    pub fn new(id: CompetitorId, name: impl Into<String>, score: i64) -> Self {
        Self {
            id,
            name: name.into(),
            score,
        }
    }

    /// Absolute score difference to another competitor
    pub fn score_difference(&self, other: &Competitor) -> u64 {
        self.score.abs_diff(other.score)
    }
}

/// One entry of the append-only match log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: Uuid,
    pub player_a: CompetitorId,
    pub player_b: CompetitorId,
    pub winner: CompetitorId,
    pub loser: CompetitorId,
    pub timestamp: DateTime<Utc>,
}

impl MatchRecord {
    /// Build a record for a decided match; the loser is the other player.
    pub fn new(
        player_a: CompetitorId,
        player_b: CompetitorId,
        winner: CompetitorId,
        timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        if player_a == player_b {
            return Err(PairingError::SelfPairing(player_a));
        }
        let loser = if winner == player_a {
            player_b
        } else if winner == player_b {
            player_a
        } else {
            return Err(PairingError::InvalidResult {
                winner,
                player_a,
                player_b,
            });
        };

        Ok(Self {
            id: Uuid::new_v4(),
            player_a,
            player_b,
            winner,
            loser,
            timestamp,
        })
    }

    /// True if this match was played between `x` and `y`, in either seat
    pub fn involves(&self, x: CompetitorId, y: CompetitorId) -> bool {
        (self.player_a == x && self.player_b == y) || (self.player_a == y && self.player_b == x)
    }

    pub fn includes(&self, id: CompetitorId) -> bool {
        self.player_a == id || self.player_b == id
    }

    pub fn won_by(&self, id: CompetitorId) -> bool {
        self.winner == id
    }
}

/// A recommended match for the current round. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub player_a: Competitor,
    pub player_b: Competitor,
    pub score_difference: u64,
}

impl Pairing {
    pub fn new(player_a: Competitor, player_b: Competitor) -> Self {
        let score_difference = player_a.score_difference(&player_b);
        Self {
            player_a,
            player_b,
            score_difference,
        }
    }

    pub fn ids(&self) -> (CompetitorId, CompetitorId) {
        (self.player_a.id, self.player_b.id)
    }

    pub fn contains(&self, id: CompetitorId) -> bool {
        self.player_a.id == id || self.player_b.id == id
    }
}

/// Maximum allowed absolute score difference between two opponents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Margin(u64);

impl Margin {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// Check whether two competitors are within this margin of each other
    #[inline]
    pub fn allows(self, a: &Competitor, b: &Competitor) -> bool {
        a.score_difference(b) <= self.0
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<i64> for Margin {
    type Error = PairingError;

    fn try_from(value: i64) -> Result<Self> {
        u64::try_from(value)
            .map(Margin)
            .map_err(|_| PairingError::InvalidMargin(value))
    }
}

impl Serialize for Margin {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

/// Accepts any non-negative integer, signed or unsigned
struct MarginVisitor;

impl Visitor<'_> for MarginVisitor {
    type Value = Margin;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer margin")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Margin, E> {
        Ok(Margin(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Margin, E> {
        Margin::try_from(value).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Margin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_u64(MarginVisitor)
    }
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
