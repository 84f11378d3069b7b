//! AI seat driven by a [`MoveAdvisor`].

use super::{Player, Turn};
use crate::advisor::{AdviceRequest, MoveAdvisor, resolve, suggest_or_fallback};
use crate::games::neon_bomb::GameInProgress;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// Plays whatever the advisor suggests, after a short pause.
pub struct AdvisorPlayer {
    name: String,
    advisor: Arc<dyn MoveAdvisor>,
    delay: Duration,
    allow_bombs: bool,
}

impl AdvisorPlayer {
    /// Creates an AI seat.
    pub fn new(
        name: impl Into<String>,
        advisor: Arc<dyn MoveAdvisor>,
        delay: Duration,
        allow_bombs: bool,
    ) -> Self {
        Self {
            name: name.into(),
            advisor,
            delay,
            allow_bombs,
        }
    }
}

#[async_trait::async_trait]
impl Player for AdvisorPlayer {
    #[instrument(skip(self, game), fields(name = %self.name, advisor = self.advisor.name()))]
    async fn take_turn(&mut self, game: &GameInProgress) -> Result<Turn> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let request = AdviceRequest::for_game(game, self.allow_bombs);
        let suggestion = suggest_or_fallback(self.advisor.as_ref(), &request).await;
        let action = resolve(&suggestion, game, self.allow_bombs)
            .ok_or_else(|| anyhow::anyhow!("No empty cell left for {}", self.name))?;

        info!(%action, commentary = %suggestion.commentary, "AI chose action");
        Ok(Turn {
            action,
            commentary: Some(suggestion.commentary),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_ai(&self) -> bool {
        true
    }
}
