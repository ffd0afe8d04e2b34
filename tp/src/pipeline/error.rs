//! Pipeline error types

use thiserror::Error;

use super::Stage;
use crate::llm::LlmError;

/// Coarse classification of everything that can stop a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingDestination,
    MissingPreferences,
    InvalidDuration,
    GenerationFailure,
    PromptTemplate,
}

/// One rejected form field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a destination.")]
    MissingDestination,

    #[error("Please enter your preferences.")]
    MissingPreferences,

    #[error("Trip duration must be between {min} and {max} days (got {days}).")]
    InvalidDuration { days: u32, min: u32, max: u32 },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::MissingDestination => ErrorKind::MissingDestination,
            ValidationError::MissingPreferences => ErrorKind::MissingPreferences,
            ValidationError::InvalidDuration { .. } => ErrorKind::InvalidDuration,
        }
    }
}

/// Why a submission produced no result bundle
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    #[error("Failed to build prompts: {source}")]
    Prompt {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("An error occurred: {source}. Please check your API key and try again.")]
    Generation {
        stage: Stage,
        #[source]
        source: LlmError,
    },
}

impl PipelineError {
    /// Every error kind this failure stands for (several for validation)
    pub fn kinds(&self) -> Vec<ErrorKind> {
        match self {
            PipelineError::Validation(errors) => errors.iter().map(ValidationError::kind).collect(),
            PipelineError::Prompt { .. } => vec![ErrorKind::PromptTemplate],
            PipelineError::Generation { .. } => vec![ErrorKind::GenerationFailure],
        }
    }

    /// Validation errors, if this was a rejected submission
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            PipelineError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}
