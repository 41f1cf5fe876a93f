//! # Pool Hall
//!
//! Shared billiard-table state for a pool hall scoreboard: players register,
//! open or join a table, play innings, and the table resets for the next
//! pair.
//!
//! The core is the table lifecycle state machine,
//! `available → waiting → occupied → available`, with the turn, score, and
//! win-condition rules of an active game. Everything is request/response and
//! poll-based; there is no push channel and no background task.
//!
//! ## Core Modules
//!
//! - [`hall`]: the table state machine, its models, and the pure turn/win rules
//! - [`users`]: player registration and lookup
//! - [`db`]: repository traits with PostgreSQL and in-memory backends
//! - [`errors`]: the unified error taxonomy
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use pool_hall::{HallSettings, TableManager};
//! use pool_hall::db::{MemoryGameRecordRepository, MemoryTableRepository};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> pool_hall::HallResult<()> {
//! let tables = Arc::new(MemoryTableRepository::with_tables(8));
//! let records = Arc::new(MemoryGameRecordRepository::new());
//! let hall = TableManager::new(tables, records, HallSettings::default());
//!
//! hall.create_room(5, "Kim", Some(25)).await?;
//! hall.join_room(5, "Lee").await?;
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod errors;
pub mod hall;
pub mod users;

pub use errors::{HallError, HallResult};
pub use hall::{
    DEFAULT_TARGET_SCORE, GameRecord, HallSettings, PlayerRole, Table, TableManager, TableNo,
    TableStatus, TurnOutcome,
};
pub use users::{User, UserManager};
