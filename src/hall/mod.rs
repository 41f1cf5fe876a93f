//! Table lifecycle: models, pure rules, and the state machine manager.

pub mod manager;
pub mod models;
pub mod rules;

pub use manager::TableManager;
pub use models::{
    DEFAULT_TARGET_SCORE, GameRecord, HallSettings, PlayerRole, Table, TableNo, TableStatus,
    TurnOutcome, WHITE_BALL,
};
