//! Game orchestration between players.

use super::players::Player;
use crate::games::neon_bomb::{AnyGame, Move, Outcome, Player as Mark};
use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// An AI seat started working on its move.
    AiThinking {
        /// Name of the thinking seat.
        name: String,
    },
    /// A human action broke the rules and was not applied.
    Rejected {
        /// Why it was refused.
        reason: String,
    },
    /// A move was applied.
    MoveApplied {
        /// Name of the seat that moved.
        name: String,
        /// The move itself.
        mv: Move,
        /// Game after the move.
        game: AnyGame,
        /// What the seat said, if anything.
        commentary: Option<String>,
    },
    /// Game ended.
    GameOver {
        /// How it ended.
        outcome: Outcome,
        /// Final game.
        game: AnyGame,
    },
}

/// Orchestrates gameplay between two players.
pub struct Orchestrator {
    game: AnyGame,
    player_x: Box<dyn Player>,
    player_o: Box<dyn Player>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates an orchestrator for a fresh game with `initial_bombs` each.
    pub fn new(
        initial_bombs: u8,
        player_x: Box<dyn Player>,
        player_o: Box<dyn Player>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            game: AnyGame::new(initial_bombs),
            player_x,
            player_o,
            event_tx,
        }
    }

    /// Current game.
    pub fn game(&self) -> &AnyGame {
        &self.game
    }

    /// Runs the game loop until someone wins or the board fills.
    ///
    /// Rule-breaking actions from a human seat are reported and retried;
    /// from an AI seat they abort the loop.
    #[instrument(skip(self), fields(x = self.player_x.name(), o = self.player_o.name()))]
    pub async fn run(&mut self) -> Result<Outcome> {
        info!("Starting game orchestration");

        loop {
            let game = match &self.game {
                AnyGame::Finished(finished) => {
                    let outcome = *finished.outcome();
                    info!(%outcome, "Game over");
                    self.event_tx.send(GameEvent::GameOver {
                        outcome,
                        game: self.game.clone(),
                    })?;
                    return Ok(outcome);
                }
                AnyGame::InProgress(game) => game.clone(),
            };

            let mark = game.to_move();
            let player = match mark {
                Mark::X => &mut self.player_x,
                Mark::O => &mut self.player_o,
            };
            let name = player.name().to_string();
            let is_ai = player.is_ai();

            if is_ai {
                self.event_tx.send(GameEvent::AiThinking { name: name.clone() })?;
            }

            debug!(player = %name, %mark, "Waiting for turn");
            let turn = player.take_turn(&game).await?;
            let mv = Move::new(mark, turn.action);

            if let Err(e) = game.check(&mv) {
                if is_ai {
                    anyhow::bail!("{} produced an illegal move {}: {}", name, mv, e);
                }
                warn!(error = %e, %mv, "Rejected human move");
                self.event_tx.send(GameEvent::Rejected {
                    reason: e.to_string(),
                })?;
                continue;
            }

            self.game = game.make_move(mv)?.into();
            info!(player = %name, %mv, "Move applied");

            self.event_tx.send(GameEvent::MoveApplied {
                name,
                mv,
                game: self.game.clone(),
                commentary: turn.commentary,
            })?;
        }
    }
}
