//! Command-line interface for neon_bomb.

use crate::games::neon_bomb::{Board, Player, Square};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Neon Bomb - tic-tac-toe with bombs against a language model
#[derive(Parser, Debug)]
#[command(name = "neon_bomb")]
#[command(about = "Tic-tac-toe with bombs against a language model", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal as X
    Play {
        /// Path to game config
        #[arg(short, long, default_value = "neon_bomb.toml")]
        config: PathBuf,

        /// Play against the first-empty-cell opponent, no network
        #[arg(long)]
        offline: bool,

        /// Bombs each player starts with
        #[arg(long)]
        bombs: Option<u8>,

        /// Where to write the log
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Ask the opponent for one move and print it as JSON
    Suggest {
        /// Board as nine cells (X, O, or . for empty), optionally comma-separated
        #[arg(long, value_parser = parse_board)]
        board: Board,

        /// Mark the opponent plays
        #[arg(long, default_value = "O")]
        player: Player,

        /// Bombs the mover holds
        #[arg(long, default_value_t = 2)]
        own_bombs: u8,

        /// Bombs the other side holds
        #[arg(long, default_value_t = 2)]
        opponent_bombs: u8,

        /// Forbid bomb answers
        #[arg(long)]
        no_bombs: bool,

        /// Use the offline opponent
        #[arg(long)]
        offline: bool,

        /// Path to game config
        #[arg(short, long, default_value = "neon_bomb.toml")]
        config: PathBuf,
    },
}

/// Parses a board such as `X.O......` or `X, 1, O, 3, 4, 5, 6, 7, 8`.
///
/// `.`, `-`, `_` and digits mark empty cells.
pub fn parse_board(text: &str) -> Result<Board, String> {
    let tokens: Vec<String> = if text.contains(',') {
        text.split(',').map(|t| t.trim().to_string()).collect()
    } else {
        text.chars()
            .filter(|c| !c.is_whitespace())
            .map(String::from)
            .collect()
    };

    if tokens.len() != 9 {
        return Err(format!("expected 9 cells, got {}", tokens.len()));
    }

    let mut squares = [Square::Empty; 9];
    for (square, token) in squares.iter_mut().zip(&tokens) {
        *square = match token.as_str() {
            "X" | "x" => Square::Occupied(Player::X),
            "O" | "o" => Square::Occupied(Player::O),
            "." | "-" | "_" => Square::Empty,
            t if t.chars().all(|c| c.is_ascii_digit()) && !t.is_empty() => Square::Empty,
            t => return Err(format!("unknown cell {:?}", t)),
        };
    }
    Ok(Board::from_squares(squares))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::neon_bomb::Position;

    #[test]
    fn test_compact_board() {
        let board = parse_board("X.O\n...\n..x").expect("parse");
        assert_eq!(board.get(Position::TopLeft), Square::Occupied(Player::X));
        assert_eq!(board.get(Position::TopRight), Square::Occupied(Player::O));
        assert_eq!(board.get(Position::BottomRight), Square::Occupied(Player::X));
        assert_eq!(board.count(Player::X), 2);
    }

    #[test]
    fn test_prompt_style_board_round_trips() {
        let board = parse_board("X, 1, 2, 3, O, 5, 6, 7, 8").expect("parse");
        assert_eq!(board.prompt_cells(), "X, 1, 2, 3, O, 5, 6, 7, 8");
    }

    #[test]
    fn test_bad_boards() {
        assert!(parse_board("XO").is_err());
        assert!(parse_board("XOZ......").is_err());
    }

    #[test]
    fn test_cli_parses_suggest() {
        let cli = Cli::try_parse_from([
            "neon_bomb", "suggest", "--board", "X........", "--own-bombs", "1", "--no-bombs",
        ])
        .expect("parse");
        match cli.command {
            Command::Suggest {
                player,
                own_bombs,
                no_bombs,
                ..
            } => {
                assert_eq!(player, Player::O);
                assert_eq!(own_bombs, 1);
                assert!(no_bombs);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
