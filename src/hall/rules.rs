//! Pure win-condition and turn-rotation rules.
//!
//! Kept free of storage so the turn/score logic can be tested exhaustively
//! on its own.

use super::models::{PlayerRole, Table};

/// Win check in strict order: player1's threshold first, then player2's.
/// If both thresholds are met in the same check, player1 is the winner.
/// An unset target never counts as met.
pub fn winner_by_threshold(table: &Table) -> Option<PlayerRole> {
    match (table.target1, table.target2) {
        (Some(t1), _) if table.score1 >= t1 => Some(PlayerRole::PlayerOne),
        (_, Some(t2)) if table.score2 >= t2 => Some(PlayerRole::PlayerTwo),
        _ => None,
    }
}

/// Flip the turn to the other player. The inning counts completed round
/// trips, so it increments only when play returns to player1.
pub fn advance_turn(turn: PlayerRole, inning: i32) -> (PlayerRole, i32) {
    let next = turn.other();
    let inning = if next == PlayerRole::PlayerOne {
        inning + 1
    } else {
        inning
    };
    (next, inning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hall::models::TableStatus;

    fn occupied_table(score1: i32, target1: i32, score2: i32, target2: i32) -> Table {
        let mut table = Table::vacant(1);
        table.status = TableStatus::Occupied;
        table.score1 = score1;
        table.score2 = score2;
        table.target1 = Some(target1);
        table.target2 = Some(target2);
        table
    }

    #[test]
    fn no_winner_below_both_thresholds() {
        let table = occupied_table(10, 25, 19, 20);
        assert_eq!(winner_by_threshold(&table), None);
    }

    #[test]
    fn player1_checked_strictly_before_player2() {
        // Both at threshold in the same check: player1 wins the tie-break.
        let table = occupied_table(25, 25, 20, 20);
        assert_eq!(winner_by_threshold(&table), Some(PlayerRole::PlayerOne));
    }

    #[test]
    fn overshoot_counts_as_met() {
        let table = occupied_table(3, 25, 31, 20);
        assert_eq!(winner_by_threshold(&table), Some(PlayerRole::PlayerTwo));
    }

    #[test]
    fn unset_targets_never_win() {
        let mut table = occupied_table(100, 25, 100, 20);
        table.target1 = None;
        table.target2 = None;
        assert_eq!(winner_by_threshold(&table), None);
    }

    #[test]
    fn inning_increments_only_on_return_to_player1() {
        let (turn, inning) = advance_turn(PlayerRole::PlayerOne, 1);
        assert_eq!((turn, inning), (PlayerRole::PlayerTwo, 1));
        let (turn, inning) = advance_turn(turn, inning);
        assert_eq!((turn, inning), (PlayerRole::PlayerOne, 2));
    }
}
