//! Table lifecycle state machine.
//!
//! Owns every transition of a table's lifecycle
//! (`available → waiting → occupied → available`, with `waiting` able to
//! short-circuit back via cancellation) and the turn/score/win logic inside
//! an active game. Invoked by transport handlers; all state lives in the
//! injected repositories.

use chrono::Utc;
use log::{debug, info};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::models::{
    GameRecord, HallSettings, PlayerRole, Table, TableNo, TableStatus, TurnOutcome, WHITE_BALL,
};
use super::rules::{advance_turn, winner_by_threshold};
use crate::db::repository::{GameRecordRepository, TableRepository};
use crate::errors::{HallError, HallResult};

/// Coordinator for the shared table state.
///
/// Every operation is a read-modify-write against the table store. With
/// `HallSettings::serialize_tables` on (the default) a per-table mutex is
/// held for the duration of the operation, so two requests against the same
/// table can't interleave; with it off, the original unguarded behavior is
/// preserved.
pub struct TableManager {
    tables: Arc<dyn TableRepository>,
    records: Arc<dyn GameRecordRepository>,
    settings: HallSettings,
    /// One lock per table number, created lazily.
    locks: Mutex<HashMap<TableNo, Arc<Mutex<()>>>>,
}

impl TableManager {
    pub fn new(
        tables: Arc<dyn TableRepository>,
        records: Arc<dyn GameRecordRepository>,
        settings: HallSettings,
    ) -> Self {
        Self {
            tables,
            records,
            settings,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Acquire this table's serialization guard, if configured.
    async fn guard(&self, table_no: TableNo) -> Option<OwnedMutexGuard<()>> {
        if !self.settings.serialize_tables {
            return None;
        }
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(table_no).or_default())
        };
        Some(lock.lock_owned().await)
    }

    async fn load(&self, table_no: TableNo) -> HallResult<Table> {
        self.tables
            .get_table(table_no)
            .await?
            .ok_or_else(|| HallError::NotFound(format!("table {table_no}")))
    }

    fn target_or_default(&self, target: Option<i32>) -> HallResult<i32> {
        match target {
            Some(t) if t <= 0 => Err(HallError::InvalidInput(format!(
                "target score must be positive, got {t}"
            ))),
            Some(t) => Ok(t),
            None => Ok(self.settings.default_target),
        }
    }

    /// Open a room on an available table. The opener becomes player1.
    pub async fn create_room(
        &self,
        table_no: TableNo,
        nickname: &str,
        target: Option<i32>,
    ) -> HallResult<()> {
        let target = self.target_or_default(target)?;
        let _guard = self.guard(table_no).await;
        let mut table = self.load(table_no).await?;

        if table.status != TableStatus::Available {
            return Err(HallError::InvalidState(format!(
                "table {table_no} is {}",
                table.status.as_str()
            )));
        }

        table.status = TableStatus::Waiting;
        table.player1 = Some(nickname.to_string());
        table.target1 = Some(target);
        self.tables.put_table(&table).await?;

        info!("table {table_no}: room opened by {nickname} (target {target})");
        Ok(())
    }

    /// Request to join a waiting room as player2.
    ///
    /// A join is a request, not an acceptance: status stays `Waiting` and a
    /// later join may overwrite player2 until the opener approves one.
    pub async fn join_room(&self, table_no: TableNo, nickname: &str) -> HallResult<()> {
        let _guard = self.guard(table_no).await;
        let mut table = self.load(table_no).await?;

        if table.status != TableStatus::Waiting {
            return Err(HallError::InvalidState(format!(
                "table {table_no} is {}",
                table.status.as_str()
            )));
        }
        if table.player1.as_deref() == Some(nickname) {
            return Err(HallError::InvalidInput(format!(
                "{nickname} already opened table {table_no}"
            )));
        }

        table.player2 = Some(nickname.to_string());
        self.tables.put_table(&table).await?;

        info!("table {table_no}: join requested by {nickname}");
        Ok(())
    }

    /// Accept the pending join request, fixing player2's target score.
    pub async fn approve_join(&self, table_no: TableNo, target: Option<i32>) -> HallResult<()> {
        let target = self.target_or_default(target)?;
        let _guard = self.guard(table_no).await;
        let mut table = self.load(table_no).await?;

        if table.status != TableStatus::Waiting || table.player2.is_none() {
            return Err(HallError::InvalidState(format!(
                "table {table_no} has no pending join request"
            )));
        }

        table.target2 = Some(target);
        self.tables.put_table(&table).await?;

        info!("table {table_no}: join approved (target {target})");
        Ok(())
    }

    /// Assign ball colors and begin the game. Sole entry into active play.
    ///
    /// Whoever breaks with the white ball goes first: color2 == "white"
    /// makes player2 the starter, anything else starts player1.
    pub async fn set_colors(
        &self,
        table_no: TableNo,
        color1: &str,
        color2: &str,
    ) -> HallResult<PlayerRole> {
        let _guard = self.guard(table_no).await;
        let mut table = self.load(table_no).await?;

        if table.status != TableStatus::Waiting
            || table.target1.is_none()
            || table.target2.is_none()
        {
            return Err(HallError::InvalidState(format!(
                "table {table_no} is not ready to start"
            )));
        }

        let starter = if color2 == WHITE_BALL {
            PlayerRole::PlayerTwo
        } else {
            PlayerRole::PlayerOne
        };

        table.status = TableStatus::Occupied;
        table.color1 = Some(color1.to_string());
        table.color2 = Some(color2.to_string());
        table.current_turn = Some(starter);
        table.inning = 1;
        table.start_time = Some(Utc::now());
        self.tables.put_table(&table).await?;

        info!(
            "table {table_no}: game started, {} breaks",
            starter.as_str()
        );
        Ok(starter)
    }

    /// Record the active player's cumulative score.
    ///
    /// This replaces the active column, it does not increment; the caller
    /// submits the running total. No bound check against the target is done
    /// here, overshoot is detected at the next turn change.
    pub async fn update_score(&self, table_no: TableNo, score: i32) -> HallResult<()> {
        if score < 0 {
            return Err(HallError::InvalidInput(format!(
                "score must be non-negative, got {score}"
            )));
        }
        let _guard = self.guard(table_no).await;
        let mut table = self.load(table_no).await?;

        let turn = table.current_turn.ok_or_else(|| {
            HallError::InvalidState(format!("table {table_no} has no game in progress"))
        })?;
        match turn {
            PlayerRole::PlayerOne => table.score1 = score,
            PlayerRole::PlayerTwo => table.score2 = score,
        }
        self.tables.put_table(&table).await?;

        debug!("table {table_no}: {} now at {score}", turn.as_str());
        Ok(())
    }

    /// End the current player's turn.
    ///
    /// Checks the win condition first (player1's threshold strictly before
    /// player2's); on a win the table is left untouched for `end_game`.
    /// Otherwise the turn flips, and the inning advances whenever play
    /// returns to player1.
    pub async fn next_turn(&self, table_no: TableNo) -> HallResult<TurnOutcome> {
        let _guard = self.guard(table_no).await;
        let mut table = self.load(table_no).await?;

        let turn = table.current_turn.ok_or_else(|| {
            HallError::InvalidState(format!("table {table_no} has no game in progress"))
        })?;

        if let Some(winner) = winner_by_threshold(&table) {
            debug!("table {table_no}: {} reached target", winner.as_str());
            return Ok(TurnOutcome::GameOver { winner });
        }

        let (next, inning) = advance_turn(turn, table.inning);
        table.current_turn = Some(next);
        table.inning = inning;
        self.tables.put_table(&table).await?;

        debug!(
            "table {table_no}: turn passes to {} (inning {inning})",
            next.as_str()
        );
        Ok(TurnOutcome::NextTurn {
            up_next: next,
            inning,
        })
    }

    /// Close out the game: append one immutable ledger record, then reset
    /// the table to the available zero state.
    ///
    /// Winner derivation is deliberately the source system's asymmetric
    /// check: player1 wins if score1 met target1, otherwise player2 is
    /// recorded as winner without re-checking score2's threshold.
    pub async fn end_game(&self, table_no: TableNo) -> HallResult<()> {
        let _guard = self.guard(table_no).await;
        let table = self.load(table_no).await?;

        if table.status != TableStatus::Occupied {
            return Err(HallError::InvalidState(format!(
                "table {table_no} has no game in progress"
            )));
        }
        let (player1, player2) = match (&table.player1, &table.player2) {
            (Some(p1), Some(p2)) => (p1.clone(), p2.clone()),
            _ => {
                return Err(HallError::InvalidState(format!(
                    "table {table_no} is occupied but missing players"
                )));
            }
        };

        let winner_role = match table.target1 {
            Some(t1) if table.score1 >= t1 => PlayerRole::PlayerOne,
            _ => PlayerRole::PlayerTwo,
        };
        let winner = match winner_role {
            PlayerRole::PlayerOne => player1.clone(),
            PlayerRole::PlayerTwo => player2.clone(),
        };

        self.records
            .append_record(&GameRecord {
                table_no,
                player1,
                player2,
                score1: table.score1,
                score2: table.score2,
                winner: winner.clone(),
                start_time: table.start_time,
            })
            .await?;
        self.tables.put_table(&Table::vacant(table_no)).await?;

        info!(
            "table {table_no}: game over, {winner} wins {}-{}",
            table.score1, table.score2
        );
        Ok(())
    }

    /// Reset the table to the available zero state, whatever its status.
    /// Callers are trusted to cancel only rooms that aren't mid-game;
    /// repeated calls are idempotent.
    pub async fn cancel_room(&self, table_no: TableNo) -> HallResult<()> {
        let _guard = self.guard(table_no).await;
        // Load first so an unknown table still reports NotFound.
        self.load(table_no).await?;
        self.tables.put_table(&Table::vacant(table_no)).await?;

        info!("table {table_no}: room cancelled");
        Ok(())
    }

    /// Full snapshot of one table.
    pub async fn game_state(&self, table_no: TableNo) -> HallResult<Table> {
        self.load(table_no).await
    }

    /// Snapshots of every table, ordered by table number.
    pub async fn list_tables(&self) -> HallResult<Vec<Table>> {
        self.tables.list_tables().await
    }
}
