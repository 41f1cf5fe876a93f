//! Integration tests for registration and lookup.

use std::sync::Arc;

use pool_hall::db::{MemoryGameRecordRepository, MemoryTableRepository, MemoryUserRepository};
use pool_hall::{
    DEFAULT_TARGET_SCORE, HallError, HallSettings, TableManager, TableStatus, UserManager,
};

fn user_manager() -> UserManager {
    UserManager::new(Arc::new(MemoryUserRepository::new()), DEFAULT_TARGET_SCORE)
}

#[tokio::test]
async fn register_login_round_trip() {
    let users = user_manager();

    let registered = users.register("Kim", Some(25)).await.unwrap();
    assert_eq!(registered.nickname, "Kim");
    assert_eq!(registered.target, 25);
    assert_eq!((registered.wins, registered.losses), (0, 0));

    let logged_in = users.login("Kim").await.unwrap();
    assert_eq!(logged_in, registered);
}

#[tokio::test]
async fn nickname_taxonomy() {
    let users = user_manager();

    // Too short, too long.
    assert!(matches!(
        users.register("a", None).await,
        Err(HallError::InvalidInput(_))
    ));
    assert!(matches!(
        users.register("toolongnick1", None).await,
        Err(HallError::InvalidInput(_))
    ));

    // Duplicate.
    users.register("Lee", None).await.unwrap();
    let err = users.register("Lee", None).await.unwrap_err();
    assert!(matches!(err, HallError::DuplicateNickname));
    assert_eq!(err.kind(), "duplicate_nickname");

    // Unknown login.
    let err = users.login("nobody").await.unwrap_err();
    assert!(matches!(err, HallError::NotFound(_)));
    assert_eq!(err.kind(), "not_found");
}

#[tokio::test]
async fn seats_accept_unregistered_nicknames() {
    // Nicknames are never validated for existence before being written into
    // a seat; the table store and user store are independent.
    let tables = Arc::new(MemoryTableRepository::with_tables(1));
    let records = Arc::new(MemoryGameRecordRepository::new());
    let hall = TableManager::new(tables, records, HallSettings::default());

    hall.create_room(1, "unregd", None).await.unwrap();
    let table = hall.game_state(1).await.unwrap();
    assert_eq!(table.status, TableStatus::Waiting);
    assert_eq!(table.player1.as_deref(), Some("unregd"));
}
