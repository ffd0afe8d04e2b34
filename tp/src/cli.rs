//! CLI command definitions and subcommands

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::config::{LlmConfig, StorageConfig, user_config_path};
use crate::domain::{AccommodationTier, BudgetTier, DEFAULT_DURATION_DAYS, Language, Purpose, TripDraft, WalkingTolerance};
use crate::llm::SUPPORTED_PROVIDERS;

/// TripPlanner - travel itinerary generator
#[derive(Parser)]
#[command(
    name = "tp",
    about = "Plan a trip itinerary with a generative text service",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate an itinerary for a trip
    Plan(PlanArgs),

    /// List previously generated itineraries
    History {
        /// Number of most recent entries to show
        #[arg(short = 'n', long, default_value = "10")]
        lines: usize,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Trip form fields and delivery options for `tp plan`
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Where to travel
    #[arg(short, long, default_value = "")]
    pub destination: String,

    /// Trip length in days (1-14)
    #[arg(long, default_value_t = DEFAULT_DURATION_DAYS)]
    pub days: u32,

    /// Budget (low, moderate, high)
    #[arg(short, long, default_value = "low")]
    pub budget: BudgetTier,

    /// Purpose (leisure, business, adventure)
    #[arg(long, default_value = "leisure")]
    pub purpose: Purpose,

    /// Preference tag; repeat or separate with commas
    #[arg(short, long = "preference", value_delimiter = ',')]
    pub preferences: Vec<String>,

    /// Language (english, french, spanish, german)
    #[arg(long, default_value = "english")]
    pub language: Language,

    /// Dietary preferences
    #[arg(long, default_value = "")]
    pub dietary: String,

    /// Specific interests
    #[arg(long, default_value = "")]
    pub interests: String,

    /// Walking tolerance (low, moderate, high)
    #[arg(long, default_value = "low")]
    pub walking: WalkingTolerance,

    /// Accommodation (budget, mid-range, luxury)
    #[arg(long, default_value = "budget")]
    pub accommodation: AccommodationTier,

    /// Famous-to-offbeat ratio when preferences ask for a mix (e.g. 70-30)
    #[arg(long)]
    pub mix_ratio: Option<String>,

    /// PDF file to export the itinerary to (defaults to the configured path)
    #[arg(long, conflicts_with = "no_pdf")]
    pub pdf: Option<PathBuf>,

    /// Skip PDF export
    #[arg(long)]
    pub no_pdf: bool,

    /// Do not append the itinerary to the history file
    #[arg(long)]
    pub no_history: bool,

    /// Email the itinerary to this address
    #[arg(long)]
    pub email: Option<String>,

    /// Never prompt; a missing mix ratio is left empty
    #[arg(long)]
    pub no_input: bool,

    /// Rate your experience (1-5)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rating: Option<u8>,

    /// Any additional feedback
    #[arg(long)]
    pub feedback: Option<String>,
}

/// Rating used when only a comment is given
pub const DEFAULT_RATING: u8 = 3;

/// Feedback left alongside a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub rating: u8,
    pub comment: String,
}

impl PlanArgs {
    /// Form fields as an unvalidated draft
    pub fn to_draft(&self) -> TripDraft {
        debug!(destination = %self.destination, "PlanArgs::to_draft: called");
        TripDraft {
            destination: self.destination.clone(),
            duration_days: self.days,
            budget: self.budget,
            purpose: self.purpose,
            preferences: self.preferences.clone(),
            language: self.language,
            dietary: self.dietary.clone(),
            interests: self.interests.clone(),
            walking_tolerance: self.walking,
            accommodation: self.accommodation,
            mix_ratio: self.mix_ratio.clone(),
        }
    }

    /// Feedback, when a rating or a comment was given
    pub fn feedback(&self) -> Option<Feedback> {
        if self.rating.is_none() && self.feedback.is_none() {
            return None;
        }
        Some(Feedback {
            rating: self.rating.unwrap_or(DEFAULT_RATING),
            comment: self.feedback.clone().unwrap_or_default().trim().to_string(),
        })
    }
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripplanner")
        .join("logs")
        .join("tripplanner.log");
    debug!(?path, "get_log_path: returning path");
    path
}

fn env_is_set(name: &str) -> bool {
    std::env::var(name).map(|v| !v.trim().is_empty()).unwrap_or(false)
}

/// Generate the after_help text with API key status and file locations
pub fn generate_after_help() -> String {
    debug!("generate_after_help: called");
    let mut help = String::new();

    help.push_str("API Keys:\n");
    for provider in SUPPORTED_PROVIDERS {
        let llm = LlmConfig::for_provider(provider);
        let name = llm.api_key_env.as_str();
        let icon = if env_is_set(name) {
            debug!(name, "generate_after_help: key set");
            "\u{2705}"
        } else {
            debug!(name, "generate_after_help: key missing");
            "\u{274C}"
        };
        help.push_str(&format!("  {} {:<16} ({})\n", icon, name, provider));
    }

    help.push('\n');
    help.push_str("Files:\n");
    match user_config_path() {
        Some(path) => {
            let icon = if path.exists() { "\u{2705}" } else { "\u{274C}" };
            help.push_str(&format!("  {} config:  {}\n", icon, path.display()));
        }
        None => help.push_str("  \u{274C} config:  no config directory\n"),
    }
    help.push_str(&format!("     history: {}\n", StorageConfig::default().history_path.display()));

    help.push('\n');
    help.push_str(&format!("Logs are written to: {}\n", get_log_path().display()));

    debug!("generate_after_help: returning help text");
    help
}

/// Output format for the history command
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => {
                debug!(%s, "OutputFormat::from_str: unknown format");
                Err(format!("Unknown format: {}. Use: text or json", s))
            }
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
