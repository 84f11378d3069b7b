//! Phase-specific typestate structs for Neon Bomb.
//!
//! Each phase is its own type. A `GameFinished` always has an outcome,
//! and only a `GameInProgress` accepts moves.

use super::action::{Action, Move, MoveError};
use super::contracts::{Contract, MoveContract};
use super::phases::Outcome;
use super::types::DEFAULT_BOMBS;
use super::{Board, BombStock, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game in setup phase - empty board, full bomb stock.
#[derive(Debug, Clone)]
pub struct GameSetup {
    board: Board,
    bombs: BombStock,
}

impl GameSetup {
    /// Creates a new game with the default bomb stock.
    #[instrument]
    pub fn new() -> Self {
        Self::with_bombs(DEFAULT_BOMBS)
    }

    /// Creates a new game where each player holds `bombs` bombs.
    #[instrument]
    pub fn with_bombs(bombs: u8) -> Self {
        Self {
            board: Board::new(),
            bombs: BombStock::new(bombs),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the bomb stock.
    pub fn bombs(&self) -> &BombStock {
        &self.bombs
    }

    /// Starts the game with the first player (consumes setup, returns in-progress).
    #[instrument(skip(self))]
    pub fn start(self, first_player: Player) -> GameInProgress {
        GameInProgress {
            board: self.board,
            history: Vec::new(),
            to_move: first_player,
            bombs: self.bombs,
        }
    }
}

impl Default for GameSetup {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Game in progress - can accept moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInProgress {
    pub(super) board: Board,
    pub(super) history: Vec<Move>,
    pub(super) to_move: Player,
    pub(super) bombs: BombStock,
}

impl GameInProgress {
    /// Makes a move, consuming self and transitioning to next state.
    ///
    /// Preconditions are always checked. Postconditions are checked in
    /// debug builds only.
    #[instrument(skip(self), fields(to_move = ?self.to_move))]
    pub fn make_move(self, action: Move) -> Result<GameResult, MoveError> {
        MoveContract::pre(&self, &action)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let mut game = self;
        match action.action {
            Action::Place(pos) => game.board.set(pos, Square::Occupied(action.player)),
            Action::Bomb(pos) => {
                game.bombs.spend(action.player)?;
                game.board.set(pos, Square::Empty);
                debug!(
                    position = %pos,
                    remaining = game.bombs.remaining(action.player),
                    "Bomb detonated"
                );
            }
        }
        game.history.push(action);

        if let Some(outcome) = super::rules::evaluate(&game.board) {
            info!(%outcome, moves = game.history.len(), "Game finished");
            return Ok(GameResult::Finished(GameFinished {
                board: game.board,
                history: game.history,
                bombs: game.bombs,
                outcome,
            }));
        }

        game.to_move = game.to_move.opponent();

        #[cfg(debug_assertions)]
        MoveContract::post(&before, &game)?;

        Ok(GameResult::InProgress(game))
    }

    /// Validates a move without applying it.
    #[instrument(skip(self))]
    pub fn check(&self, action: &Move) -> Result<(), MoveError> {
        MoveContract::pre(self, action)
    }

    /// Returns the current player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the bomb stock.
    pub fn bombs(&self) -> &BombStock {
        &self.bombs
    }

    /// Returns the empty cells.
    #[instrument(skip(self))]
    pub fn valid_moves(&self) -> Vec<Position> {
        Position::valid_moves(&self.board)
    }

    /// Cells the player to move could bomb right now.
    #[instrument(skip(self))]
    pub fn bomb_targets(&self) -> Vec<Position> {
        if self.bombs.remaining(self.to_move) == 0 {
            return Vec::new();
        }
        let target = Square::Occupied(self.to_move.opponent());
        Position::ALL
            .into_iter()
            .filter(|pos| self.board.get(*pos) == target)
            .collect()
    }

    /// Replays moves from a fresh game with X to move first.
    #[instrument(skip(moves), fields(move_count = moves.len()))]
    pub fn replay(initial_bombs: u8, moves: &[Move]) -> Result<GameResult, MoveError> {
        let mut game = GameSetup::with_bombs(initial_bombs).start(Player::X);

        for (i, action) in moves.iter().enumerate() {
            match game.make_move(*action)? {
                GameResult::InProgress(g) => game = g,
                GameResult::Finished(g) if i + 1 == moves.len() => {
                    return Ok(GameResult::Finished(g));
                }
                GameResult::Finished(_) => return Err(MoveError::GameOver),
            }
        }

        Ok(GameResult::InProgress(game))
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Game finished - outcome determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameFinished {
    board: Board,
    history: Vec<Move>,
    bombs: BombStock,
    outcome: Outcome,
}

impl GameFinished {
    /// Returns the outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns the winning line, if the game was won.
    pub fn winning_line(&self) -> Option<[Position; 3]> {
        self.outcome.line()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the bomb stock at the end of the game.
    pub fn bombs(&self) -> &BombStock {
        &self.bombs
    }

    /// Restarts the game with the same starting bomb stock.
    #[instrument(skip(self))]
    pub fn restart(self) -> GameSetup {
        GameSetup::with_bombs(self.bombs.initial())
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// Result of making a move.
#[derive(Debug)]
pub enum GameResult {
    /// Game continues.
    InProgress(GameInProgress),
    /// Game finished.
    Finished(GameFinished),
}
