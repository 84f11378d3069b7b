//! Serializable game wrapper for typestate phases.

use super::action::{Move, MoveError};
use super::phases::Outcome;
use super::position::Position;
use super::types::{Board, BombStock, Player};
use super::typestate::{GameFinished, GameInProgress, GameResult, GameSetup};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// A game in either phase, for holders that outlive a single transition
/// (the orchestrator, the UI).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnyGame {
    /// Game in progress.
    InProgress(GameInProgress),
    /// Game finished.
    Finished(GameFinished),
}

impl From<GameInProgress> for AnyGame {
    fn from(game: GameInProgress) -> Self {
        AnyGame::InProgress(game)
    }
}

impl From<GameFinished> for AnyGame {
    fn from(game: GameFinished) -> Self {
        AnyGame::Finished(game)
    }
}

impl From<GameResult> for AnyGame {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::InProgress(g) => g.into(),
            GameResult::Finished(g) => g.into(),
        }
    }
}

impl AnyGame {
    /// A fresh game, X to move, each player holding `bombs`.
    #[instrument]
    pub fn new(bombs: u8) -> Self {
        GameSetup::with_bombs(bombs).start(Player::X).into()
    }

    /// Returns the board for any game phase.
    pub fn board(&self) -> &Board {
        match self {
            AnyGame::InProgress(g) => g.board(),
            AnyGame::Finished(g) => g.board(),
        }
    }

    /// Returns the bomb stock for any game phase.
    pub fn bombs(&self) -> &BombStock {
        match self {
            AnyGame::InProgress(g) => g.bombs(),
            AnyGame::Finished(g) => g.bombs(),
        }
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        match self {
            AnyGame::InProgress(g) => g.history(),
            AnyGame::Finished(g) => g.history(),
        }
    }

    /// Returns true if the game is over.
    pub fn is_over(&self) -> bool {
        matches!(self, AnyGame::Finished(_))
    }

    /// Returns the current player to move, if game is in progress.
    pub fn to_move(&self) -> Option<Player> {
        match self {
            AnyGame::InProgress(g) => Some(g.to_move()),
            AnyGame::Finished(_) => None,
        }
    }

    /// Returns the outcome, if the game is over.
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            AnyGame::InProgress(_) => None,
            AnyGame::Finished(g) => Some(g.outcome()),
        }
    }

    /// Returns the winner, if the game is won.
    pub fn winner(&self) -> Option<Player> {
        self.outcome().and_then(Outcome::winner)
    }

    /// Returns the winning line, if the game is won.
    pub fn winning_line(&self) -> Option<[Position; 3]> {
        self.outcome().and_then(Outcome::line)
    }

    /// Returns the in-progress phase, if any.
    pub fn in_progress(&self) -> Option<&GameInProgress> {
        match self {
            AnyGame::InProgress(g) => Some(g),
            AnyGame::Finished(_) => None,
        }
    }

    /// Returns a status string for display.
    pub fn status_string(&self) -> String {
        match self {
            AnyGame::InProgress(g) => format!("In progress. Player {} to move.", g.to_move()),
            AnyGame::Finished(g) => match g.outcome() {
                Outcome::Winner { player, .. } => format!("Game over. Player {} wins!", player),
                Outcome::Draw => "Game over. Draw!".to_string(),
            },
        }
    }

    /// Applies a move, returning the next game.
    #[instrument(skip(self))]
    pub fn apply(self, action: Move) -> Result<Self, MoveError> {
        match self {
            AnyGame::InProgress(game) => game.make_move(action).map(Into::into),
            AnyGame::Finished(_) => {
                warn!(%action, "Move rejected: game is over");
                Err(MoveError::GameOver)
            }
        }
    }
}
