//! Prompt Loader
//!
//! Loads prompt templates from override directories or falls back to embedded
//! defaults, and renders the four prompts of one submission.

use std::path::{Path, PathBuf};

use eyre::{Context, Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;
use crate::domain::TripRequest;

/// Template used for the primary prompt when preferences are explicit
pub const ITINERARY_TEMPLATE: &str = "itinerary";

/// Template used for the primary prompt when the user asked for a mix
pub const ITINERARY_MIX_TEMPLATE: &str = "itinerary-mix";

pub const BUDGET_TEMPLATE: &str = "budget";
pub const PACKING_TEMPLATE: &str = "packing";
pub const RECOMMENDATION_TEMPLATE: &str = "recommendation";

/// Separator used when listing preference tags in a prompt
const PREFERENCE_SEPARATOR: &str = ", ";

/// Context for rendering prompt templates
///
/// Built from trip parameters only, so no template can see generated text.
#[derive(Debug, Clone, Serialize)]
pub struct PromptContext {
    pub destination: String,
    pub duration_days: u32,
    /// Lowercase budget tier ("moderate")
    pub budget: String,
    /// Lowercase trip purpose ("leisure")
    pub purpose: String,
    /// Preference tags joined in the order given
    pub preferences: String,
    pub mix_ratio: Option<String>,
    pub dietary: String,
    pub interests: String,
    pub walking_tolerance: String,
    pub accommodation: String,
    /// Not used by the embedded templates; available to overrides
    pub language: String,
}

impl PromptContext {
    /// Create a context from a validated trip request
    pub fn from_request(request: &TripRequest) -> Self {
        debug!(destination = %request.destination(), "PromptContext::from_request: called");
        Self {
            destination: request.destination().to_string(),
            duration_days: request.duration_days(),
            budget: request.budget().label().to_lowercase(),
            purpose: request.purpose().label().to_lowercase(),
            preferences: request.preferences().join(PREFERENCE_SEPARATOR),
            mix_ratio: request.mix_ratio().map(str::to_string),
            dietary: request.dietary().to_string(),
            interests: request.interests().to_string(),
            walking_tolerance: request.walking_tolerance().label().to_string(),
            accommodation: request.accommodation().label().to_string(),
            language: request.language().label().to_string(),
        }
    }
}

/// The four prompts sent for one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSet {
    /// Which itinerary template produced `primary`
    pub primary_template: &'static str,
    pub primary: String,
    pub budget: String,
    pub packing: String,
    pub recommendation: String,
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// Project override directory (e.g., `.tripplanner/prompts/`)
    project_dir: Option<PathBuf>,
    /// User override directory (e.g., `~/.config/tripplanner/prompts/`)
    user_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new prompt loader rooted at a project directory
    ///
    /// # Arguments
    /// * `project_root` - Directory searched for `.tripplanner/prompts/`
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        let project_dir = project_root.as_ref().join(".tripplanner").join("prompts");
        let user_dir = dirs::config_dir().map(|d| d.join("tripplanner").join("prompts"));
        Self::with_dirs(Some(project_dir), user_dir)
    }

    /// Create a loader with explicit override directories
    ///
    /// Directories that do not exist are ignored.
    pub fn with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        let project_dir = project_dir.filter(|d| d.is_dir());
        let user_dir = user_dir.filter(|d| d.is_dir());
        debug!(?project_dir, ?user_dir, "PromptLoader::with_dirs: resolved override directories");

        Self {
            hbs: Self::engine(),
            project_dir,
            user_dir,
        }
    }

    /// Create a loader that only uses embedded prompts (for testing)
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self {
            hbs: Self::engine(),
            project_dir: None,
            user_dir: None,
        }
    }

    fn engine() -> Handlebars<'static> {
        let mut hbs = Handlebars::new();
        // Prompts are plain text; HTML escaping would mangle "&" and quotes
        hbs.register_escape_fn(handlebars::no_escape);
        hbs
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. Project override: `.tripplanner/prompts/{name}.pmt`
    /// 2. User override: `~/.config/tripplanner/prompts/{name}.pmt`
    /// 3. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");
        for dir in [&self.project_dir, &self.user_dir].into_iter().flatten() {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found override");
                return std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read prompt {}", path.display()));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "PromptLoader::load_template: found in embedded");
            return Ok(content.to_string());
        }

        debug!(%name, "PromptLoader::load_template: not found anywhere");
        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render(&self, template_name: &str, context: &PromptContext) -> Result<String> {
        debug!(%template_name, destination = %context.destination, "PromptLoader::render: called");
        let template = self.load_template(template_name)?;

        self.hbs
            .render_template(&template, context)
            .map(|rendered| rendered.trim().to_string())
            .with_context(|| format!("Failed to render template {}", template_name))
    }

    /// Render every prompt for one trip request
    ///
    /// The primary template is chosen by the presence of a mix ratio; the
    /// budget, packing and recommendation prompts depend on the request alone.
    pub fn build_prompts(&self, request: &TripRequest) -> Result<PromptSet> {
        let context = PromptContext::from_request(request);
        let primary_template = if context.mix_ratio.is_some() {
            ITINERARY_MIX_TEMPLATE
        } else {
            ITINERARY_TEMPLATE
        };
        info!(
            "Building prompts for {} ({} days, template '{}')",
            context.destination, context.duration_days, primary_template
        );

        Ok(PromptSet {
            primary_template,
            primary: self.render(primary_template, &context)?,
            budget: self.render(BUDGET_TEMPLATE, &context)?,
            packing: self.render(PACKING_TEMPLATE, &context)?,
            recommendation: self.render(RECOMMENDATION_TEMPLATE, &context)?,
        })
    }
}
