//! Player account data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum nickname length, inclusive.
pub const MIN_NICKNAME_LEN: usize = 2;

/// Maximum nickname length, inclusive.
pub const MAX_NICKNAME_LEN: usize = 10;

/// A registered player.
///
/// Identified by a unique nickname. Immutable after registration except for
/// the win/loss tallies, which no in-scope operation currently mutates.
/// Never deleted.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct User {
    pub nickname: String,
    /// Score this player needs to win a game by default.
    pub target: i32,
    pub wins: i32,
    pub losses: i32,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Fresh account with zeroed tallies.
    pub fn new(nickname: String, target: i32) -> Self {
        Self {
            nickname,
            target,
            wins: 0,
            losses: 0,
            created_at: Utc::now(),
        }
    }
}
