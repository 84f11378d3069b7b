//! Core domain types for Neon Bomb.

use super::action::MoveError;
use super::position::Position;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Bombs each player starts with unless configured otherwise.
pub const DEFAULT_BOMBS: u8 = 2;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Player X (the human, goes first).
    X,
    /// Player O (the AI seat).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Single-letter mark.
    pub fn mark(self) -> &'static str {
        match self {
            Player::X => "X",
            Player::O => "O",
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mark())
    }
}

impl std::str::FromStr for Player {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            other => Err(format!("Unknown player '{}', expected X or O", other)),
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// 3x3 board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Builds a board from nine squares in row-major order.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// First empty cell in index order.
    pub fn first_empty(&self) -> Option<Position> {
        Position::ALL.into_iter().find(|pos| self.is_empty(*pos))
    }

    /// Checks if the board is full.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Number of cells holding `player`'s mark.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their 1-based number, matching the keypad.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(player) => player.mark().to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }

    /// Comma-separated cells as sent to the model: the mark, or the
    /// 0-based index when the cell is empty.
    pub fn prompt_cells(&self) -> String {
        self.squares
            .iter()
            .enumerate()
            .map(|(i, square)| match square {
                Square::Empty => i.to_string(),
                Square::Occupied(player) => player.mark().to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-player bomb counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BombStock {
    initial: u8,
    x: u8,
    o: u8,
}

impl BombStock {
    /// Gives both players `initial` bombs.
    #[instrument]
    pub fn new(initial: u8) -> Self {
        Self {
            initial,
            x: initial,
            o: initial,
        }
    }

    /// Bombs each player started with.
    pub fn initial(&self) -> u8 {
        self.initial
    }

    /// Bombs `player` still holds.
    pub fn remaining(&self, player: Player) -> u8 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Bombs `player` has used.
    pub fn spent(&self, player: Player) -> u8 {
        self.initial.saturating_sub(self.remaining(player))
    }

    /// Uses one of `player`'s bombs.
    #[instrument(skip(self))]
    pub fn spend(&mut self, player: Player) -> Result<(), MoveError> {
        let slot = match player {
            Player::X => &mut self.x,
            Player::O => &mut self.o,
        };
        if *slot == 0 {
            warn!(?player, "No bombs left");
            return Err(MoveError::NoBombsLeft(player));
        }
        *slot -= 1;
        Ok(())
    }
}

impl Default for BombStock {
    fn default() -> Self {
        Self::new(DEFAULT_BOMBS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_cells_shows_indices_for_empty() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::X));
        board.set(Position::Center, Square::Occupied(Player::O));
        assert_eq!(board.prompt_cells(), "X, 1, 2, 3, O, 5, 6, 7, 8");
    }

    #[test]
    fn test_display_uses_keypad_numbers() {
        let mut board = Board::new();
        board.set(Position::BottomRight, Square::Occupied(Player::O));
        assert_eq!(board.display(), "1|2|3\n-+-+-\n4|5|6\n-+-+-\n7|8|O");
    }

    #[test]
    fn test_first_empty_skips_occupied() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::X));
        board.set(Position::TopCenter, Square::Occupied(Player::O));
        assert_eq!(board.first_empty(), Some(Position::TopRight));
    }

    #[test]
    fn test_spend_until_empty() {
        let mut stock = BombStock::new(1);
        assert_eq!(stock.remaining(Player::O), 1);
        stock.spend(Player::O).expect("one bomb available");
        assert_eq!(stock.remaining(Player::O), 0);
        assert_eq!(stock.spent(Player::O), 1);
        assert_eq!(stock.remaining(Player::X), 1);
        assert_eq!(stock.spend(Player::O), Err(MoveError::NoBombsLeft(Player::O)));
    }

    #[test]
    fn test_player_from_str() {
        assert_eq!("x".parse::<Player>(), Ok(Player::X));
        assert_eq!("O".parse::<Player>(), Ok(Player::O));
        assert!("Z".parse::<Player>().is_err());
    }
}
