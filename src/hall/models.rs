//! Table lifecycle data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Table number type. Tables are fixed physical inventory, pre-provisioned,
/// never created or deleted at runtime.
pub type TableNo = i64;

/// Target score a caller gets when they don't supply one.
pub const DEFAULT_TARGET_SCORE: i32 = 25;

/// Ball color that makes its holder break first.
pub const WHITE_BALL: &str = "white";

/// Lifecycle status of a table.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    /// Empty table, all game fields zeroed.
    Available,
    /// Opened by player1; player2 may have requested to join.
    Waiting,
    /// Game in progress.
    Occupied,
}

impl TableStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Waiting => "waiting",
            Self::Occupied => "occupied",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(Self::Available),
            "waiting" => Some(Self::Waiting),
            "occupied" => Some(Self::Occupied),
            _ => None,
        }
    }
}

/// Whose turn it is, as a role rather than a nickname. Resolving the role to
/// a nickname happens only at the presentation boundary, so clearing a player
/// field can never desync the turn marker.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PlayerRole {
    #[serde(rename = "player1")]
    PlayerOne,
    #[serde(rename = "player2")]
    PlayerTwo,
}

impl PlayerRole {
    /// The opposing role.
    pub fn other(self) -> Self {
        match self {
            Self::PlayerOne => Self::PlayerTwo,
            Self::PlayerTwo => Self::PlayerOne,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlayerOne => "player1",
            Self::PlayerTwo => "player2",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "player1" => Some(Self::PlayerOne),
            "player2" => Some(Self::PlayerTwo),
            _ => None,
        }
    }
}

/// Live state of one table. This is also the snapshot returned to clients.
///
/// Invariant: `status == Available` implies every player/score/target/color
/// field is unset and `inning == 0`; the fields become meaningful only once
/// the table moves to `Waiting`/`Occupied`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Table {
    pub table_no: TableNo,
    pub status: TableStatus,
    pub player1: Option<String>,
    pub player2: Option<String>,
    pub score1: i32,
    pub score2: i32,
    pub target1: Option<i32>,
    pub target2: Option<i32>,
    pub color1: Option<String>,
    pub color2: Option<String>,
    pub current_turn: Option<PlayerRole>,
    pub inning: i32,
    pub start_time: Option<DateTime<Utc>>,
}

impl Table {
    /// The all-zero available state a table starts in and resets to.
    pub fn vacant(table_no: TableNo) -> Self {
        Self {
            table_no,
            status: TableStatus::Available,
            player1: None,
            player2: None,
            score1: 0,
            score2: 0,
            target1: None,
            target2: None,
            color1: None,
            color2: None,
            current_turn: None,
            inning: 0,
            start_time: None,
        }
    }

    /// Resolve a role to the nickname currently holding it.
    pub fn nickname_of(&self, role: PlayerRole) -> Option<&str> {
        match role {
            PlayerRole::PlayerOne => self.player1.as_deref(),
            PlayerRole::PlayerTwo => self.player2.as_deref(),
        }
    }

    /// Cumulative score of the given role's column.
    pub fn score_of(&self, role: PlayerRole) -> i32 {
        match role {
            PlayerRole::PlayerOne => self.score1,
            PlayerRole::PlayerTwo => self.score2,
        }
    }
}

/// Outcome of a `next_turn` call.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TurnOutcome {
    /// A win threshold was met; the table is left untouched until `end_game`.
    GameOver { winner: PlayerRole },
    /// Play continues with the other player.
    NextTurn { up_next: PlayerRole, inning: i32 },
}

/// Immutable ledger entry appended once per completed game.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameRecord {
    pub table_no: TableNo,
    pub player1: String,
    pub player2: String,
    pub score1: i32,
    pub score2: i32,
    pub winner: String,
    pub start_time: Option<DateTime<Utc>>,
}

/// Hall configuration settings.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct HallSettings {
    /// Serialize operations per table number. Off reproduces the source
    /// system's unguarded read-modify-write behavior.
    pub serialize_tables: bool,
    /// Target score used when register/create_room/approve_join omit one.
    pub default_target: i32,
}

impl Default for HallSettings {
    fn default() -> Self {
        Self::new(true, DEFAULT_TARGET_SCORE)
    }
}

impl HallSettings {
    #[must_use]
    pub const fn new(serialize_tables: bool, default_target: i32) -> Self {
        Self {
            serialize_tables,
            default_target,
        }
    }
}
