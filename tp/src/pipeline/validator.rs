//! Input validation for trip drafts

use tracing::debug;

use super::ValidationError;
use crate::domain::{MAX_DURATION_DAYS, MIN_DURATION_DAYS, TripDraft, TripRequest};

/// Turn a draft into a trip request, or report every rejected field
///
/// Blank preference tags are dropped and duplicates collapse to their first
/// occurrence; the mix ratio is kept only when a tag asks for a mix.
pub fn validate(draft: TripDraft) -> Result<TripRequest, Vec<ValidationError>> {
    debug!(destination = %draft.destination, days = draft.duration_days, "validate: called");
    let mut errors = Vec::new();

    let destination = draft.destination.trim().to_string();
    if destination.is_empty() {
        errors.push(ValidationError::MissingDestination);
    }

    let mut preferences: Vec<String> = Vec::new();
    for tag in &draft.preferences {
        let tag = tag.trim();
        if !tag.is_empty() && !preferences.iter().any(|p| p == tag) {
            preferences.push(tag.to_string());
        }
    }
    if preferences.is_empty() {
        errors.push(ValidationError::MissingPreferences);
    }

    if !(MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&draft.duration_days) {
        errors.push(ValidationError::InvalidDuration {
            days: draft.duration_days,
            min: MIN_DURATION_DAYS,
            max: MAX_DURATION_DAYS,
        });
    }

    if !errors.is_empty() {
        debug!(?errors, "validate: rejected");
        return Err(errors);
    }

    Ok(TripRequest::from_checked(draft, destination, preferences))
}
