//! Human player that gets input from the keyboard.

use super::{Player, Turn};
use crate::games::neon_bomb::{Action, GameInProgress};
use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Human player fed by the UI's key handling.
pub struct HumanPlayer {
    name: String,
    input_rx: mpsc::UnboundedReceiver<Action>,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input_rx: mpsc::UnboundedReceiver<Action>) -> Self {
        Self {
            name: name.into(),
            input_rx,
        }
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    #[instrument(skip(self, _game), fields(name = %self.name))]
    async fn take_turn(&mut self, _game: &GameInProgress) -> Result<Turn> {
        match self.input_rx.recv().await {
            Some(action) => {
                debug!(%action, "Received human action");
                Ok(Turn::silent(action))
            }
            None => anyhow::bail!("Input channel closed"),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
