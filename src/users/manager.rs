//! Registration and lookup over the user store.
//!
//! Thin by design: existence and uniqueness checks only. Nicknames written
//! into table seats are deliberately never validated against this store, so
//! a table may reference a nickname that never registered.

use log::info;
use std::sync::Arc;

use super::models::{MAX_NICKNAME_LEN, MIN_NICKNAME_LEN, User};
use crate::db::repository::UserRepository;
use crate::errors::{HallError, HallResult};

pub struct UserManager {
    users: Arc<dyn UserRepository>,
    default_target: i32,
}

impl UserManager {
    pub fn new(users: Arc<dyn UserRepository>, default_target: i32) -> Self {
        Self {
            users,
            default_target,
        }
    }

    /// Register a new player.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - nickname length outside [2, 10]
    /// * `DuplicateNickname` - nickname already registered
    pub async fn register(&self, nickname: &str, target: Option<i32>) -> HallResult<User> {
        let len = nickname.chars().count();
        if !(MIN_NICKNAME_LEN..=MAX_NICKNAME_LEN).contains(&len) {
            return Err(HallError::InvalidInput(format!(
                "nickname must be {MIN_NICKNAME_LEN}-{MAX_NICKNAME_LEN} characters"
            )));
        }
        let target = match target {
            Some(t) if t <= 0 => {
                return Err(HallError::InvalidInput(format!(
                    "target score must be positive, got {t}"
                )));
            }
            Some(t) => t,
            None => self.default_target,
        };

        if self.users.find_by_nickname(nickname).await?.is_some() {
            return Err(HallError::DuplicateNickname);
        }

        let user = User::new(nickname.to_string(), target);
        self.users.create_user(&user).await?;

        info!("registered {nickname} (target {target})");
        Ok(user)
    }

    /// Look up a player by nickname.
    ///
    /// # Errors
    ///
    /// * `NotFound` - nickname not registered
    pub async fn login(&self, nickname: &str) -> HallResult<User> {
        self.users
            .find_by_nickname(nickname)
            .await?
            .ok_or_else(|| HallError::NotFound(format!("nickname {nickname:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryUserRepository;
    use crate::hall::models::DEFAULT_TARGET_SCORE;

    fn manager() -> UserManager {
        UserManager::new(Arc::new(MemoryUserRepository::new()), DEFAULT_TARGET_SCORE)
    }

    #[tokio::test]
    async fn register_then_login() {
        let users = manager();
        let registered = users.register("Kim", Some(30)).await.unwrap();
        assert_eq!(registered.target, 30);
        assert_eq!((registered.wins, registered.losses), (0, 0));

        let found = users.login("Kim").await.unwrap();
        assert_eq!(found, registered);
    }

    #[tokio::test]
    async fn register_defaults_the_target() {
        let users = manager();
        let user = users.register("Lee", None).await.unwrap();
        assert_eq!(user.target, DEFAULT_TARGET_SCORE);
    }

    #[tokio::test]
    async fn nickname_length_is_bounded() {
        let users = manager();
        assert!(matches!(
            users.register("K", None).await,
            Err(HallError::InvalidInput(_))
        ));
        assert!(matches!(
            users.register("elevenchars", None).await,
            Err(HallError::InvalidInput(_))
        ));
        // Boundaries are inclusive.
        users.register("Ko", None).await.unwrap();
        users.register("abcdefghij", None).await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_nickname_is_rejected() {
        let users = manager();
        users.register("Kim", None).await.unwrap();
        assert!(matches!(
            users.register("Kim", Some(50)).await,
            Err(HallError::DuplicateNickname)
        ));
    }

    #[tokio::test]
    async fn login_unknown_nickname_is_not_found() {
        let users = manager();
        assert!(matches!(
            users.login("ghost").await,
            Err(HallError::NotFound(_))
        ));
    }
}
