//! Generation client module
//!
//! Provides the text generation capability the pipeline dispatches to.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod gemini;
mod openai;

pub use client::GenerationClient;
pub use error::LlmError;
pub use gemini::GeminiClient;
pub use openai::OpenAIClient;

use crate::config::LlmConfig;

/// Providers `create_client` accepts, in help order
pub const SUPPORTED_PROVIDERS: &[&str] = &["gemini", "openai"];

/// Create a generation client based on the provider specified in config
///
/// Supports "gemini" and "openai" providers.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn GenerationClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.to_lowercase().as_str() {
        "gemini" | "google" => {
            debug!("create_client: creating Gemini client");
            Ok(Arc::new(GeminiClient::from_config(config)?))
        }
        "openai" => {
            debug!("create_client: creating OpenAI client");
            Ok(Arc::new(OpenAIClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::Config(format!(
                "Unknown LLM provider: '{}'. Supported: gemini, openai",
                other
            )))
        }
    }
}
