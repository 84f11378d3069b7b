//! Advisor backed by a hosted language model.

use super::{AdviceRequest, AdvisorError, MoveAdvisor, Suggestion, prompt, reply};
use crate::llm_client::LlmClient;
use tracing::{debug, info, instrument};

/// Asks a language model for the next move.
#[derive(Debug, Clone)]
pub struct LlmAdvisor {
    name: String,
    client: LlmClient,
}

impl LlmAdvisor {
    /// Creates an advisor that speaks through `client`.
    #[instrument(skip(client), fields(name = %name.as_ref()))]
    pub fn new(name: impl AsRef<str>, client: LlmClient) -> Self {
        info!("Creating LLM advisor");
        Self {
            name: name.as_ref().to_string(),
            client,
        }
    }
}

#[async_trait::async_trait]
impl MoveAdvisor for LlmAdvisor {
    #[instrument(skip(self, request), fields(advisor = %self.name, player = ?request.player))]
    async fn suggest(&self, request: &AdviceRequest) -> Result<Suggestion, AdvisorError> {
        let system = prompt::system_instruction(request);
        let schema = prompt::response_schema(request.may_bomb());

        debug!(board = %request.board.prompt_cells(), "Requesting move");
        let text = self
            .client
            .generate_json(&system, prompt::USER_MESSAGE, &schema)
            .await?;
        debug!(reply = %text, "Model replied");

        let mut suggestion = reply::parse_reply(&text)?;
        if suggestion.bomb && !request.may_bomb() {
            debug!("Dropping bomb flag the request did not allow");
            suggestion.bomb = false;
        }
        Ok(suggestion)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
