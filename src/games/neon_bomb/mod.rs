//! Neon Bomb: tic-tac-toe where each player can spend bombs to clear an
//! opponent's cell.

mod action;
mod contracts;
mod invariants;
mod phases;
mod position;
pub mod rules;
mod types;
mod typestate;
mod wrapper;

pub use action::{Action, Move, MoveError};
pub use contracts::{
    BombTarget, Contract, HasBombs, LegalMove, MoveContract, PlayersTurn, SquareIsEmpty,
};
pub use invariants::{
    AlternatingTurnInvariant, BombBudgetInvariant, HistoryConsistentInvariant, Invariant,
    InvariantSet, InvariantViolation, NeonBombInvariants,
};
pub use phases::Outcome;
pub use position::Position;
pub use types::{Board, BombStock, DEFAULT_BOMBS, Player, Square};
pub use typestate::{GameFinished, GameInProgress, GameResult, GameSetup};
pub use wrapper::AnyGame;
