//! Fixed lines the opponent says outside of its own commentary.

use crate::games::neon_bomb::{Outcome, Player};

/// Shown when a fresh session starts.
pub const OPENING_LINE: &str = "Your move, human. Don't take all day.";

/// Shown after the board is reset.
pub const RESET_LINE: &str = "New game? I'll go easy on you... maybe.";

/// Reaction to the human spending a bomb.
pub const BOMB_REACTION: &str = "A BOMB? That's desperate!";

/// Commentary attached to the fallback move when the model call fails.
pub const GLITCH_LINE: &str = "My circuits glitched, but I still play!";

/// Commentary used when the model returns an empty body.
pub const THINKING_LINE: &str = "I am thinking...";

/// Commentary of the offline opponent.
pub const OFFLINE_LINE: &str = "No network, no problem. First free square is mine.";

/// Headline of the game-over panel.
pub fn headline(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Winner { player, .. } => format!("{} WINS!", player),
        Outcome::Draw => "DRAW!".to_string(),
    }
}

/// One-line verdict under the headline.
pub fn verdict(outcome: &Outcome) -> &'static str {
    match outcome.winner() {
        Some(Player::X) => "Humanity lives to play another day.",
        Some(Player::O) => "Better luck next time, fleshy creature.",
        None => "A perfect match of wits.",
    }
}
