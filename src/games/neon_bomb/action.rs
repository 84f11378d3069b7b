//! First-class action types for Neon Bomb.
//!
//! A turn is either a placement or a bomb. Moves are domain events:
//! they can be validated before they are applied and replayed later.

use super::{Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// What a player does with their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Put the mover's mark on an empty cell.
    Place(Position),
    /// Spend a bomb to clear an opponent's cell.
    Bomb(Position),
}

impl Action {
    /// The targeted cell.
    pub fn position(&self) -> Position {
        match self {
            Action::Place(pos) | Action::Bomb(pos) => *pos,
        }
    }

    /// True for a bomb.
    pub fn is_bomb(&self) -> bool {
        matches!(self, Action::Bomb(_))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Place(pos) => write!(f, "{}", pos.label()),
            Action::Bomb(pos) => write!(f, "bomb {}", pos.label()),
        }
    }
}

/// A player's action on a specific turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// What they do.
    pub action: Action,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(player: Player, action: Action) -> Self {
        Self { player, action }
    }

    /// Shorthand for a placement.
    pub fn place(player: Player, position: Position) -> Self {
        Self::new(player, Action::Place(position))
    }

    /// Shorthand for a bomb.
    pub fn bomb(player: Player, position: Position) -> Self {
        Self::new(player, Action::Bomb(position))
    }

    /// Returns the player making this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the targeted cell.
    pub fn position(&self) -> Position {
        self.action.position()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.action)
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// A bomb was aimed at an empty square.
    #[display("Nothing to bomb at {}", _0)]
    NothingToBomb(Position),

    /// A bomb was aimed at the mover's own mark.
    #[display("Cannot bomb your own mark at {}", _0)]
    OwnMark(Position),

    /// The mover has used all their bombs.
    #[display("Player {} has no bombs left", _0)]
    NoBombsLeft(Player),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// It's not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(Player),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
