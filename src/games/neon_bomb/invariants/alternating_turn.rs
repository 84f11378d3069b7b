//! Alternating turn invariant: a bomb uses up a turn just like a mark.

use super::super::GameInProgress;
use super::Invariant;

/// Invariant: Players alternate turns, whatever action they take.
pub struct AlternatingTurnInvariant;

impl Invariant<GameInProgress> for AlternatingTurnInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let history = game.history();

        if history.windows(2).any(|w| w[0].player == w[1].player) {
            return false;
        }

        match history.last() {
            Some(last) => game.to_move() == last.player.opponent(),
            None => true,
        }
    }

    fn description() -> &'static str {
        "Players alternate turns"
    }
}
