//! Neon Bomb library - tic-tac-toe with bombs against a language model
//!
//! Each player holds a small stock of bombs. Spending one clears a cell
//! held by the opponent and uses up the turn. The human plays X; O is
//! played by a [`MoveAdvisor`], normally a hosted language model.
//!
//! # Architecture
//!
//! - **Games**: typestate game core with contracts and invariants
//! - **Advisor**: prompt, reply parsing and resolution of the AI's move
//! - **LLM client**: Gemini, OpenAI and Anthropic behind one API
//! - **TUI**: orchestrator, players and the ratatui front end
//!
//! # Example
//!
//! ```
//! use neon_bomb::{AnyGame, Move, Player, Position};
//!
//! let game = AnyGame::new(2)
//!     .apply(Move::place(Player::X, Position::Center))
//!     .unwrap()
//!     .apply(Move::place(Player::O, Position::TopLeft))
//!     .unwrap()
//!     .apply(Move::bomb(Player::X, Position::TopLeft))
//!     .unwrap();
//! assert_eq!(game.bombs().remaining(Player::X), 1);
//! assert!(game.board().is_empty(Position::TopLeft));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod advisor;
mod cli;
mod game_config;
mod games;
mod llm_client;
mod tui;

pub mod banter;

// Crate-level exports - CLI
pub use cli::{Cli, Command, parse_board};

// Crate-level exports - Configuration
pub use game_config::{ConfigError, GameConfig};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - Move advice
pub use advisor::{
    AdviceRequest, AdvisorError, FirstEmptyAdvisor, LlmAdvisor, MoveAdvisor, Suggestion,
    USER_MESSAGE, parse_reply, resolve, resolve_request, response_schema, suggest_or_fallback,
    system_instruction,
};

// Crate-level exports - Terminal UI
pub use tui::{
    AdvisorPlayer, App, EXPLOSION_FLASH, GameEvent, HumanPlayer, Orchestrator, Player as Seat,
    Turn, digit_cell, init_file_logging, move_cursor, run_tui,
};

// Crate-level exports - Game types
pub use games::neon_bomb::{
    Action, AlternatingTurnInvariant, AnyGame, Board, BombBudgetInvariant, BombStock, BombTarget,
    Contract, DEFAULT_BOMBS, GameFinished, GameInProgress, GameResult, GameSetup, HasBombs,
    HistoryConsistentInvariant, Invariant, InvariantSet, InvariantViolation, LegalMove, Move,
    MoveContract, MoveError, NeonBombInvariants, Outcome, Player, PlayersTurn, Position,
    Square, SquareIsEmpty, rules,
};
