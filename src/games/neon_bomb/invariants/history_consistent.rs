//! History consistency invariant: the move log reproduces the board.

use super::super::{Action, Board, GameInProgress, Square};
use super::Invariant;

/// Invariant: Replaying the history onto an empty board yields the board.
///
/// With bombs, occupied-square counts no longer track history length, so
/// the log is replayed cell by cell instead.
pub struct HistoryConsistentInvariant;

impl Invariant<GameInProgress> for HistoryConsistentInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let mut board = Board::new();
        for mov in game.history() {
            match mov.action {
                Action::Place(pos) => board.set(pos, Square::Occupied(mov.player)),
                Action::Bomb(pos) => board.set(pos, Square::Empty),
            }
        }
        &board == game.board()
    }

    fn description() -> &'static str {
        "History reproduces the board"
    }
}
