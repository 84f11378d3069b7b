//! Bomb budget invariant: bombs are neither lost nor invented.

use super::super::{GameInProgress, Player};
use super::Invariant;

/// Invariant: For each player, bombs in the history plus bombs remaining
/// equals the starting stock.
pub struct BombBudgetInvariant;

impl Invariant<GameInProgress> for BombBudgetInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let stock = game.bombs();
        [Player::X, Player::O].into_iter().all(|player| {
            let used = game
                .history()
                .iter()
                .filter(|m| m.player == player && m.action.is_bomb())
                .count();
            used + usize::from(stock.remaining(player)) == usize::from(stock.initial())
        })
    }

    fn description() -> &'static str {
        "Bombs used plus bombs left equals the starting stock"
    }
}
