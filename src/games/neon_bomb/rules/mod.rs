//! Game rules for Neon Bomb.
//!
//! Pure functions over a [`Board`](super::Board). Rules are kept apart from
//! board storage so contracts and the state machine can share them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{WIN_LINES, check_winner};

use super::{Board, Outcome};
use tracing::instrument;

/// Decides whether `board` is terminal: a line wins first, then a full
/// board draws.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Option<Outcome> {
    if let Some((player, line)) = check_winner(board) {
        return Some(Outcome::Winner { player, line });
    }
    if is_full(board) {
        return Some(Outcome::Draw);
    }
    None
}
