//! Player accounts: registration and lookup.

pub mod manager;
pub mod models;

pub use manager::UserManager;
pub use models::{MAX_NICKNAME_LEN, MIN_NICKNAME_LEN, User};
