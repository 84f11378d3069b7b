//! First-class invariants for Neon Bomb.
//!
//! Invariants are logical properties that must hold throughout a game.
//! They are checked as postconditions in debug builds and tested on their own.

pub mod alternating_turn;
pub mod bomb_budget;
pub mod history_consistent;

pub use alternating_turn::AlternatingTurnInvariant;
pub use bomb_budget::BombBudgetInvariant;
pub use history_consistent::HistoryConsistentInvariant;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for 2- and 3-tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        collect(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        collect(violations)
    }
}

/// All Neon Bomb invariants as a composable set.
pub type NeonBombInvariants = (
    AlternatingTurnInvariant,
    HistoryConsistentInvariant,
    BombBudgetInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::neon_bomb::{
        GameInProgress, GameResult, GameSetup, Move, Player, Position, Square,
    };

    #[test]
    fn test_invariant_set_holds_for_empty_game() {
        let game = GameSetup::new().start(Player::X);
        assert!(NeonBombInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_bomb() {
        let moves = vec![
            Move::place(Player::X, Position::TopLeft),
            Move::place(Player::O, Position::Center),
            Move::bomb(Player::X, Position::Center),
            Move::place(Player::O, Position::Center),
        ];

        match GameInProgress::replay(2, &moves) {
            Ok(GameResult::InProgress(game)) => {
                assert!(NeonBombInvariants::check_all(&game).is_ok());
            }
            other => panic!("Expected in-progress game, got {:?}", other),
        }
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let game = GameSetup::new().start(Player::X);
        let Ok(GameResult::InProgress(mut game)) =
            game.make_move(Move::place(Player::X, Position::Center))
        else {
            panic!("Expected in-progress game");
        };

        game.board.set(Position::TopLeft, Square::Occupied(Player::O));

        let violations = NeonBombInvariants::check_all(&game).expect_err("corrupted board");
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            HistoryConsistentInvariant::description()
        );
    }

    #[test]
    fn test_two_invariants_as_set() {
        let game = GameSetup::new().start(Player::X);
        type TwoInvariants = (AlternatingTurnInvariant, BombBudgetInvariant);
        assert!(TwoInvariants::check_all(&game).is_ok());
    }
}
