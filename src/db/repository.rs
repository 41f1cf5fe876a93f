//! Repository trait definitions for testability and dependency injection.
//!
//! The hall treats persistence as a keyed row store: user rows keyed by
//! nickname, table rows keyed by table number, and an append-only game
//! ledger. Managers depend on these traits, not on a concrete backend.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::errors::{HallError, HallResult};
use crate::hall::models::{GameRecord, PlayerRole, Table, TableNo, TableStatus};
use crate::users::models::User;

/// Player account store keyed by nickname.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user row. Uniqueness is checked by the caller first.
    async fn create_user(&self, user: &User) -> HallResult<()>;

    /// Find a user by nickname.
    async fn find_by_nickname(&self, nickname: &str) -> HallResult<Option<User>>;
}

/// Table store keyed by table number. Tables are pre-provisioned, fixed
/// inventory; there is no create or delete at runtime.
#[async_trait]
pub trait TableRepository: Send + Sync {
    /// Read one table row.
    async fn get_table(&self, table_no: TableNo) -> HallResult<Option<Table>>;

    /// Overwrite one table row. Fails with `NotFound` for a table number
    /// outside the provisioned inventory.
    async fn put_table(&self, table: &Table) -> HallResult<()>;

    /// All table rows ordered by table number.
    async fn list_tables(&self) -> HallResult<Vec<Table>>;
}

/// Append-only ledger of completed games. Rows are never updated or deleted.
#[async_trait]
pub trait GameRecordRepository: Send + Sync {
    async fn append_record(&self, record: &GameRecord) -> HallResult<()>;

    async fn records_for_table(&self, table_no: TableNo) -> HallResult<Vec<GameRecord>>;
}

/// PostgreSQL implementation of `UserRepository`.
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, user: &User) -> HallResult<()> {
        sqlx::query(
            "INSERT INTO users (nickname, target, wins, losses, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&user.nickname)
        .bind(user.target)
        .bind(user.wins)
        .bind(user.losses)
        .bind(user.created_at.naive_utc())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_nickname(&self, nickname: &str) -> HallResult<Option<User>> {
        let row = sqlx::query(
            "SELECT nickname, target, wins, losses, created_at
             FROM users WHERE nickname = $1",
        )
        .bind(nickname)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| User {
            nickname: r.get("nickname"),
            target: r.get("target"),
            wins: r.get("wins"),
            losses: r.get("losses"),
            created_at: r.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
        }))
    }
}

/// PostgreSQL implementation of `TableRepository`.
pub struct PgTableRepository {
    pool: PgPool,
}

impl PgTableRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn table_from_row(row: &PgRow) -> Result<Table, sqlx::Error> {
    let status: String = row.get("status");
    let status = TableStatus::parse(&status)
        .ok_or_else(|| sqlx::Error::Decode(format!("unknown table status {status:?}").into()))?;

    let current_turn = row
        .get::<Option<String>, _>("current_turn")
        .map(|turn| {
            PlayerRole::parse(&turn)
                .ok_or_else(|| sqlx::Error::Decode(format!("unknown turn role {turn:?}").into()))
        })
        .transpose()?;

    Ok(Table {
        table_no: row.get("table_no"),
        status,
        player1: row.get("player1"),
        player2: row.get("player2"),
        score1: row.get("score1"),
        score2: row.get("score2"),
        target1: row.get("target1"),
        target2: row.get("target2"),
        color1: row.get("color1"),
        color2: row.get("color2"),
        current_turn,
        inning: row.get("inning"),
        start_time: row
            .get::<Option<chrono::NaiveDateTime>, _>("start_time")
            .map(|dt| dt.and_utc()),
    })
}

const TABLE_COLUMNS: &str = "table_no, status, player1, player2, score1, score2, \
                             target1, target2, color1, color2, current_turn, inning, start_time";

#[async_trait]
impl TableRepository for PgTableRepository {
    async fn get_table(&self, table_no: TableNo) -> HallResult<Option<Table>> {
        let row = sqlx::query(&format!(
            "SELECT {TABLE_COLUMNS} FROM pool_tables WHERE table_no = $1"
        ))
        .bind(table_no)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| table_from_row(&r)).transpose().map_err(Into::into)
    }

    async fn put_table(&self, table: &Table) -> HallResult<()> {
        let result = sqlx::query(
            "UPDATE pool_tables
             SET status = $2, player1 = $3, player2 = $4, score1 = $5, score2 = $6,
                 target1 = $7, target2 = $8, color1 = $9, color2 = $10,
                 current_turn = $11, inning = $12, start_time = $13
             WHERE table_no = $1",
        )
        .bind(table.table_no)
        .bind(table.status.as_str())
        .bind(&table.player1)
        .bind(&table.player2)
        .bind(table.score1)
        .bind(table.score2)
        .bind(table.target1)
        .bind(table.target2)
        .bind(&table.color1)
        .bind(&table.color2)
        .bind(table.current_turn.map(PlayerRole::as_str))
        .bind(table.inning)
        .bind(table.start_time.map(|dt| dt.naive_utc()))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(HallError::NotFound(format!("table {}", table.table_no)));
        }
        Ok(())
    }

    async fn list_tables(&self) -> HallResult<Vec<Table>> {
        let rows = sqlx::query(&format!(
            "SELECT {TABLE_COLUMNS} FROM pool_tables ORDER BY table_no ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|r| table_from_row(r).map_err(Into::into))
            .collect()
    }
}

/// PostgreSQL implementation of `GameRecordRepository`.
pub struct PgGameRecordRepository {
    pool: PgPool,
}

impl PgGameRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameRecordRepository for PgGameRecordRepository {
    async fn append_record(&self, record: &GameRecord) -> HallResult<()> {
        sqlx::query(
            "INSERT INTO game_records
                 (table_no, player1, player2, score1, score2, winner, start_time)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(record.table_no)
        .bind(&record.player1)
        .bind(&record.player2)
        .bind(record.score1)
        .bind(record.score2)
        .bind(&record.winner)
        .bind(record.start_time.map(|dt| dt.naive_utc()))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn records_for_table(&self, table_no: TableNo) -> HallResult<Vec<GameRecord>> {
        let rows = sqlx::query(
            "SELECT table_no, player1, player2, score1, score2, winner, start_time
             FROM game_records WHERE table_no = $1 ORDER BY id ASC",
        )
        .bind(table_no)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| GameRecord {
                table_no: r.get("table_no"),
                player1: r.get("player1"),
                player2: r.get("player2"),
                score1: r.get("score1"),
                score2: r.get("score2"),
                winner: r.get("winner"),
                start_time: r
                    .get::<Option<chrono::NaiveDateTime>, _>("start_time")
                    .map(|dt| dt.and_utc()),
            })
            .collect())
    }
}
