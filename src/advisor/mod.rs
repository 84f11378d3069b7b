//! Move advice for the AI seat.
//!
//! An advisor is an opaque function from board and bomb counts to a
//! suggested cell, an optional bomb flag, and a line of commentary. The
//! suggestion is only advice: [`resolve`] turns it into a legal action, and
//! [`suggest_or_fallback`] replaces a failed call with the first empty cell.

mod first_empty;
mod llm;
mod prompt;
mod reply;
mod resolve;

pub use first_empty::FirstEmptyAdvisor;
pub use llm::LlmAdvisor;
pub use prompt::{USER_MESSAGE, response_schema, system_instruction};
pub use reply::parse_reply;
pub use resolve::{resolve, resolve_request};

use crate::banter::GLITCH_LINE;
use crate::games::neon_bomb::{Board, GameInProgress, Player, Position};
use crate::llm_client::LlmError;
use derive_more::{Display, Error};
use derive_new::new;
use serde::Serialize;
use tracing::{debug, instrument, warn};

/// What the AI seat sees when asked for a move.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct AdviceRequest {
    /// Current board.
    pub board: Board,
    /// The mark the advisor plays.
    pub player: Player,
    /// Bombs the advisor still holds.
    pub own_bombs: u8,
    /// Bombs the opponent still holds.
    pub opponent_bombs: u8,
    /// Whether a bomb decision may be returned.
    pub allow_bombs: bool,
}

impl AdviceRequest {
    /// Builds the request for whoever is to move in `game`.
    #[instrument(skip(game))]
    pub fn for_game(game: &GameInProgress, allow_bombs: bool) -> Self {
        let player = game.to_move();
        Self::new(
            game.board().clone(),
            player,
            game.bombs().remaining(player),
            game.bombs().remaining(player.opponent()),
            allow_bombs,
        )
    }

    /// True when a bomb answer is both allowed and affordable.
    pub fn may_bomb(&self) -> bool {
        self.allow_bombs && self.own_bombs > 0
    }
}

/// An advisor's answer, before it is checked against the rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Suggested cell; `None` when the answer named no usable cell.
    pub cell: Option<Position>,
    /// Whether the advisor wants to bomb `cell`.
    pub bomb: bool,
    /// Flavor text.
    pub commentary: String,
}

impl Suggestion {
    /// The first empty cell with the glitch line.
    #[instrument(skip(board))]
    pub fn fallback(board: &Board) -> Self {
        Self {
            cell: board.first_empty(),
            bomb: false,
            commentary: GLITCH_LINE.to_string(),
        }
    }
}

/// Why an advisor could not answer.
#[derive(Debug, Clone, Display, Error)]
pub enum AdvisorError {
    /// The model call failed.
    #[display("{}", _0)]
    Llm(LlmError),

    /// The model answered with something that is not a move.
    #[display("Malformed advisor reply: {}", _0)]
    Malformed(#[error(not(source))] String),
}

impl From<LlmError> for AdvisorError {
    fn from(err: LlmError) -> Self {
        Self::Llm(err)
    }
}

/// Source of move suggestions for the AI seat.
#[async_trait::async_trait]
pub trait MoveAdvisor: Send + Sync {
    /// Suggests a move for `request.player`.
    async fn suggest(&self, request: &AdviceRequest) -> Result<Suggestion, AdvisorError>;

    /// Display name.
    fn name(&self) -> &str;
}

/// Asks `advisor`, falling back to the first empty cell on any error.
#[instrument(skip(advisor, request), fields(advisor = advisor.name(), player = ?request.player))]
pub async fn suggest_or_fallback(advisor: &dyn MoveAdvisor, request: &AdviceRequest) -> Suggestion {
    match advisor.suggest(request).await {
        Ok(suggestion) => {
            debug!(?suggestion, "Advisor answered");
            suggestion
        }
        Err(e) => {
            warn!(error = %e, "Advisor failed, using first empty cell");
            Suggestion::fallback(&request.board)
        }
    }
}
