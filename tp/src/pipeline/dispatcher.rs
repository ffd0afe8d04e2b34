//! Generation dispatch
//!
//! Sends the prompts of one submission to the generation client, one after
//! another, itinerary first.

use std::fmt;

use tracing::{debug, info, warn};

use super::PipelineError;
use crate::llm::GenerationClient;
use crate::prompts::PromptSet;

/// One generation call of a submission, in dispatch order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Itinerary,
    Budget,
    Packing,
    Recommendation,
}

impl Stage {
    /// Dispatch order
    pub const ALL: [Stage; 4] = [Stage::Itinerary, Stage::Budget, Stage::Packing, Stage::Recommendation];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Itinerary => "itinerary",
            Stage::Budget => "budget",
            Stage::Packing => "packing",
            Stage::Recommendation => "recommendation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Texts returned by the four generation calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub itinerary_text: String,
    pub budget_text: String,
    pub packing_text: String,
    pub recommendation_text: String,
}

/// Issue the four generation calls in order
///
/// The itinerary call goes first; if it fails nothing else is sent. Any later
/// failure also ends the submission, since every call is awaited in turn.
pub async fn dispatch(prompts: &PromptSet, client: &dyn GenerationClient) -> Result<GenerationResult, PipelineError> {
    debug!(primary_template = prompts.primary_template, "dispatch: called");

    let itinerary_text = generate(client, Stage::Itinerary, &prompts.primary).await?;
    let budget_text = generate(client, Stage::Budget, &prompts.budget).await?;
    let packing_text = generate(client, Stage::Packing, &prompts.packing).await?;
    let recommendation_text = generate(client, Stage::Recommendation, &prompts.recommendation).await?;

    info!("Generated itinerary, budget, packing list and recommendations");
    Ok(GenerationResult {
        itinerary_text,
        budget_text,
        packing_text,
        recommendation_text,
    })
}

async fn generate(client: &dyn GenerationClient, stage: Stage, prompt: &str) -> Result<String, PipelineError> {
    debug!(%stage, prompt_len = prompt.len(), "generate: called");
    match client.generate_content(prompt).await {
        Ok(text) => {
            debug!(%stage, text_len = text.len(), "generate: success");
            Ok(text)
        }
        Err(source) => {
            warn!(%stage, error = %source, "generate: generation failed");
            Err(PipelineError::Generation { stage, source })
        }
    }
}
