//! Itinerary request pipeline
//!
//! One submission flows one way through four stages:
//! validate → build prompts → dispatch generation calls → aggregate.
//! There is no retry and no loop back; any failure ends the submission.

use std::sync::Arc;

use tracing::{debug, info};

mod aggregator;
mod dispatcher;
mod error;
mod validator;

pub use aggregator::{
    FLIGHTS_AND_HOTELS, REAL_TIME_UPDATES, ResultBundle, Section, SectionKind, TRAVEL_CHALLENGES, aggregate,
};
pub use dispatcher::{GenerationResult, Stage, dispatch};
pub use error::{ErrorKind, PipelineError, ValidationError};
pub use validator::validate;

use crate::domain::TripDraft;
use crate::llm::GenerationClient;
use crate::prompts::PromptLoader;

/// Request/response boundary for one trip submission
pub struct Pipeline {
    prompts: PromptLoader,
    client: Arc<dyn GenerationClient>,
}

impl Pipeline {
    pub fn new(prompts: PromptLoader, client: Arc<dyn GenerationClient>) -> Self {
        Self { prompts, client }
    }

    /// Run one submission end to end
    ///
    /// Call once per logical submission; nothing is cached between calls.
    pub async fn handle_submit(&self, draft: TripDraft) -> Result<ResultBundle, PipelineError> {
        debug!(destination = %draft.destination, "handle_submit: called");
        let request = validate(draft).map_err(PipelineError::Validation)?;

        let prompts = self
            .prompts
            .build_prompts(&request)
            .map_err(|e| PipelineError::Prompt { source: e.into() })?;

        let generated = dispatch(&prompts, self.client.as_ref()).await?;

        info!(destination = %request.destination(), "handle_submit: itinerary ready");
        Ok(aggregate(request.destination(), generated))
    }
}
