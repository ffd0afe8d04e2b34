//! Prompt Template System
//!
//! Renders the `.pmt` (prompt template) files that turn a trip request into
//! generation prompts.
//!
//! Template loading chain:
//! 1. `.tripplanner/prompts/{name}.pmt` (project override)
//! 2. `~/.config/tripplanner/prompts/{name}.pmt` (user override)
//! 3. Embedded fallback in code
//!
//! Templates use Handlebars syntax for variable substitution.

pub mod embedded;
mod loader;

pub use loader::{
    BUDGET_TEMPLATE, ITINERARY_MIX_TEMPLATE, ITINERARY_TEMPLATE, PACKING_TEMPLATE, PromptContext, PromptLoader,
    PromptSet, RECOMMENDATION_TEMPLATE,
};
