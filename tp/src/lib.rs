//! TripPlanner - travel itinerary generation
//!
//! Turns a validated trip request into four generation prompts, sends them to
//! a text generation service and assembles the answers plus fixed advice into
//! one result bundle that is then presented, mapped, exported, saved and
//! optionally emailed.
//!
//! # Modules
//!
//! - [`domain`] - Trip draft, validated request and form options
//! - [`pipeline`] - Validate, build prompts, dispatch, aggregate
//! - [`prompts`] - Handlebars prompt templates with override directories
//! - [`llm`] - Generation client trait with Gemini and OpenAI implementations
//! - [`sinks`] - Terminal, map, PDF, history and email outputs
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod pipeline;
pub mod prompts;
pub mod sinks;

// Re-export commonly used types
pub use config::{Config, EmailConfig, LlmConfig, StorageConfig};
pub use domain::{
    AccommodationTier, BudgetTier, Language, Purpose, TripDraft, TripRequest, WalkingTolerance,
};
pub use llm::{GeminiClient, GenerationClient, LlmError, OpenAIClient, create_client};
pub use pipeline::{
    ErrorKind, GenerationResult, Pipeline, PipelineError, ResultBundle, Section, SectionKind, ValidationError,
};
pub use prompts::{PromptLoader, PromptSet};
pub use sinks::{
    Delivery, DeliveryReport, EmailSink, ExportSink, HistorySink, JsonlHistory, MapSink, PdfExporter,
    PresentationSink, SinkError, SmtpMailer, TerminalMap, TerminalPresenter,
};
