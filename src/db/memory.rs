//! In-memory repository implementations.
//!
//! Back the managers without a database, for integration tests and local
//! development. Same contracts as the PostgreSQL implementations, including
//! `NotFound` on writes to an unprovisioned table.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use super::repository::{GameRecordRepository, TableRepository, UserRepository};
use crate::errors::{HallError, HallResult};
use crate::hall::models::{GameRecord, Table, TableNo};
use crate::users::models::User;

/// In-memory user store keyed by nickname.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create_user(&self, user: &User) -> HallResult<()> {
        self.users
            .write()
            .await
            .insert(user.nickname.clone(), user.clone());
        Ok(())
    }

    async fn find_by_nickname(&self, nickname: &str) -> HallResult<Option<User>> {
        Ok(self.users.read().await.get(nickname).cloned())
    }
}

/// In-memory table store over the fixed inventory.
#[derive(Default)]
pub struct MemoryTableRepository {
    tables: RwLock<BTreeMap<TableNo, Table>>,
}

impl MemoryTableRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision vacant tables numbered 1..=count, the fixed physical
    /// inventory of the hall.
    pub async fn provision(&self, count: i64) {
        let mut tables = self.tables.write().await;
        for table_no in 1..=count {
            tables.insert(table_no, Table::vacant(table_no));
        }
    }

    /// Provision tables numbered 1..=count on a fresh repository.
    pub fn with_tables(count: i64) -> Self {
        let tables = (1..=count)
            .map(|table_no| (table_no, Table::vacant(table_no)))
            .collect();
        Self {
            tables: RwLock::new(tables),
        }
    }
}

#[async_trait]
impl TableRepository for MemoryTableRepository {
    async fn get_table(&self, table_no: TableNo) -> HallResult<Option<Table>> {
        Ok(self.tables.read().await.get(&table_no).cloned())
    }

    async fn put_table(&self, table: &Table) -> HallResult<()> {
        let mut tables = self.tables.write().await;
        match tables.get_mut(&table.table_no) {
            Some(slot) => {
                *slot = table.clone();
                Ok(())
            }
            None => Err(HallError::NotFound(format!("table {}", table.table_no))),
        }
    }

    async fn list_tables(&self) -> HallResult<Vec<Table>> {
        Ok(self.tables.read().await.values().cloned().collect())
    }
}

/// In-memory append-only game ledger.
#[derive(Default)]
pub struct MemoryGameRecordRepository {
    records: RwLock<Vec<GameRecord>>,
}

impl MemoryGameRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of ledger rows across all tables.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl GameRecordRepository for MemoryGameRecordRepository {
    async fn append_record(&self, record: &GameRecord) -> HallResult<()> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn records_for_table(&self, table_no: TableNo) -> HallResult<Vec<GameRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.table_no == table_no)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_table_outside_inventory_is_not_found() {
        let repo = MemoryTableRepository::with_tables(2);
        let result = repo.put_table(&Table::vacant(3)).await;
        assert!(matches!(result, Err(HallError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_tables_is_ordered_by_table_no() {
        let repo = MemoryTableRepository::with_tables(5);
        let tables = repo.list_tables().await.unwrap();
        let numbers: Vec<_> = tables.iter().map(|t| t.table_no).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn ledger_filters_by_table() {
        let repo = MemoryGameRecordRepository::new();
        for table_no in [1, 2, 1] {
            repo.append_record(&GameRecord {
                table_no,
                player1: "Kim".to_string(),
                player2: "Lee".to_string(),
                score1: 10,
                score2: 20,
                winner: "Lee".to_string(),
                start_time: None,
            })
            .await
            .unwrap();
        }
        assert_eq!(repo.len().await, 3);
        assert_eq!(repo.records_for_table(1).await.unwrap().len(), 2);
        assert_eq!(repo.records_for_table(2).await.unwrap().len(), 1);
    }
}
