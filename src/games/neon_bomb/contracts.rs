//! Contract-based validation for Neon Bomb.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} action {Q}.

use super::action::{Action, Move, MoveError};
use super::invariants::{InvariantSet, NeonBombInvariants};
use super::typestate::GameInProgress;
use super::Square;
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: It must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects moves by the player who is not on turn.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        if mov.player != game.to_move() {
            Err(MoveError::WrongPlayer(mov.player))
        } else {
            Ok(())
        }
    }
}

/// Precondition for placements: the target square must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Rejects placements on occupied squares.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        let pos = mov.position();
        if !game.board().is_empty(pos) {
            Err(MoveError::SquareOccupied(pos))
        } else {
            Ok(())
        }
    }
}

/// Precondition for bombs: the mover must have a bomb left.
pub struct HasBombs;

impl HasBombs {
    /// Rejects bombs from an empty stock.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        if game.bombs().remaining(mov.player) == 0 {
            Err(MoveError::NoBombsLeft(mov.player))
        } else {
            Ok(())
        }
    }
}

/// Precondition for bombs: the target must hold the opponent's mark.
pub struct BombTarget;

impl BombTarget {
    /// Rejects bombs on empty squares and on the mover's own marks.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        let pos = mov.position();
        match game.board().get(pos) {
            Square::Empty => Err(MoveError::NothingToBomb(pos)),
            Square::Occupied(owner) if owner == mov.player => Err(MoveError::OwnMark(pos)),
            Square::Occupied(_) => Ok(()),
        }
    }
}

/// Composite precondition: turn order first, then the action's own rules.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        PlayersTurn::check(mov, game)?;
        match mov.action {
            Action::Place(_) => SquareIsEmpty::check(mov, game),
            Action::Bomb(_) => {
                HasBombs::check(mov, game)?;
                BombTarget::check(mov, game)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions: [`LegalMove`].
///
/// Postconditions:
/// - Players still alternate
/// - History reproduces the board
/// - Bombs used plus bombs left equals the starting stock
pub struct MoveContract;

impl Contract<GameInProgress, Move> for MoveContract {
    fn pre(game: &GameInProgress, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, game)
    }

    fn post(_before: &GameInProgress, after: &GameInProgress) -> Result<(), MoveError> {
        NeonBombInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::neon_bomb::{GameResult, GameSetup, Player, Position};

    fn in_progress(result: Result<GameResult, MoveError>) -> GameInProgress {
        match result.expect("legal move") {
            GameResult::InProgress(g) => g,
            GameResult::Finished(_) => panic!("game should continue"),
        }
    }

    #[test]
    fn test_precondition_empty_square() {
        let game = GameSetup::new().start(Player::X);
        assert!(LegalMove::check(&Move::place(Player::X, Position::Center), &game).is_ok());

        let game = in_progress(game.make_move(Move::place(Player::X, Position::Center)));
        assert_eq!(
            LegalMove::check(&Move::place(Player::O, Position::Center), &game),
            Err(MoveError::SquareOccupied(Position::Center))
        );
    }

    #[test]
    fn test_precondition_players_turn() {
        let game = GameSetup::new().start(Player::X);
        assert_eq!(
            LegalMove::check(&Move::place(Player::O, Position::Center), &game),
            Err(MoveError::WrongPlayer(Player::O))
        );
    }

    #[test]
    fn test_bomb_needs_opponent_mark() {
        let game = GameSetup::new().start(Player::X);
        assert_eq!(
            LegalMove::check(&Move::bomb(Player::X, Position::Center), &game),
            Err(MoveError::NothingToBomb(Position::Center))
        );

        let game = in_progress(game.make_move(Move::place(Player::X, Position::Center)));
        let game = in_progress(game.make_move(Move::place(Player::O, Position::TopLeft)));
        assert_eq!(
            LegalMove::check(&Move::bomb(Player::X, Position::Center), &game),
            Err(MoveError::OwnMark(Position::Center))
        );
        assert!(LegalMove::check(&Move::bomb(Player::X, Position::TopLeft), &game).is_ok());
    }

    #[test]
    fn test_bomb_needs_stock() {
        let game = GameSetup::with_bombs(0).start(Player::X);
        let game = in_progress(game.make_move(Move::place(Player::X, Position::Center)));
        let game = in_progress(game.make_move(Move::place(Player::O, Position::TopLeft)));
        assert_eq!(
            LegalMove::check(&Move::bomb(Player::X, Position::TopLeft), &game),
            Err(MoveError::NoBombsLeft(Player::X))
        );
    }

    #[test]
    fn test_postcondition_holds_after_bomb() {
        let before = GameSetup::new().start(Player::X);
        let game = in_progress(before.clone().make_move(Move::place(Player::X, Position::Center)));
        let game = in_progress(game.make_move(Move::place(Player::O, Position::TopLeft)));
        let after = in_progress(game.make_move(Move::bomb(Player::X, Position::TopLeft)));
        assert!(MoveContract::post(&before, &after).is_ok());
    }
}
