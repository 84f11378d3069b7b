//! Offline advisor: always the first empty cell.

use super::{AdviceRequest, AdvisorError, MoveAdvisor, Suggestion};
use crate::banter::OFFLINE_LINE;
use tracing::debug;

/// Advisor that picks the first free square and never bombs.
#[derive(Debug, Clone)]
pub struct FirstEmptyAdvisor {
    name: String,
}

impl FirstEmptyAdvisor {
    /// Creates a new offline advisor.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait::async_trait]
impl MoveAdvisor for FirstEmptyAdvisor {
    async fn suggest(&self, request: &AdviceRequest) -> Result<Suggestion, AdvisorError> {
        let cell = request.board.first_empty();
        debug!(advisor = %self.name, ?cell, "Offline advisor chose cell");
        Ok(Suggestion {
            cell,
            bomb: false,
            commentary: OFFLINE_LINE.to_string(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
