//! Player trait and implementations.

mod advisor;
mod human;

pub use advisor::AdvisorPlayer;
pub use human::HumanPlayer;

use crate::games::neon_bomb::{Action, GameInProgress};
use anyhow::Result;

/// One turn's worth of output from a seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// What the seat does.
    pub action: Action,
    /// Optional line for the speech bubble.
    pub commentary: Option<String>,
}

impl Turn {
    /// A turn with no commentary.
    pub fn silent(action: Action) -> Self {
        Self {
            action,
            commentary: None,
        }
    }
}

/// Trait for seats that can take turns.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Takes a turn in `game`, whose `to_move` is this seat.
    async fn take_turn(&mut self, game: &GameInProgress) -> Result<Turn>;

    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// Whether the UI should show a thinking indicator for this seat.
    fn is_ai(&self) -> bool {
        false
    }
}
