//! Trip request types
//!
//! A [`TripDraft`] is the raw form input for one submission. Only
//! [`crate::pipeline::validate`] turns a draft into a [`TripRequest`], which is
//! immutable afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Shortest trip the planner accepts, in days
pub const MIN_DURATION_DAYS: u32 = 1;

/// Longest trip the planner accepts, in days
pub const MAX_DURATION_DAYS: u32 = 14;

/// Default trip length used by the form
pub const DEFAULT_DURATION_DAYS: u32 = 5;

/// Markers in the preference tags that mean "a mix of famous and offbeat places"
pub const AMBIGUITY_MARKERS: [&str; 2] = ["mix", "both"];

/// Error parsing one of the trip option enums from user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {field}: '{value}'. Use one of: {expected}")]
pub struct ParseEnumError {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Declares a closed set of form options with a display label and
/// case-insensitive parsing (labels plus any extra aliases).
macro_rules! trip_option {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal, $expected:literal {
            $($variant:ident => $label:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// All options in form order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Label as shown on the form
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                debug!(%s, option = stringify!($name), "from_str: called");
                let lowered = s.trim().to_lowercase();
                $(
                    if lowered == $label.to_lowercase() $(|| lowered == $alias)* {
                        return Ok($name::$variant);
                    }
                )+
                Err(ParseEnumError {
                    field: $field,
                    value: s.to_string(),
                    expected: $expected,
                })
            }
        }
    };
}

trip_option! {
    /// Overall spending level for the trip
    BudgetTier, "budget", "low, moderate, high" {
        Low => "Low",
        Moderate => "Moderate" | "medium",
        High => "High",
    }
}

trip_option! {
    /// Why the user is travelling
    Purpose, "purpose", "leisure, business, adventure" {
        Leisure => "Leisure",
        Business => "Business",
        Adventure => "Adventure",
    }
}

trip_option! {
    /// Language the user selected on the form
    Language, "language", "english, french, spanish, german" {
        English => "English" | "en",
        French => "French" | "fr",
        Spanish => "Spanish" | "es",
        German => "German" | "de",
    }
}

trip_option! {
    /// How much walking the traveller is comfortable with
    WalkingTolerance, "walking tolerance", "low, moderate, high" {
        Low => "Low",
        Moderate => "Moderate" | "medium",
        High => "High",
    }
}

trip_option! {
    /// Accommodation class the traveller prefers
    AccommodationTier, "accommodation", "budget, mid-range, luxury" {
        Budget => "Budget",
        MidRange => "Mid-range" | "midrange" | "mid_range" | "mid",
        Luxury => "Luxury",
    }
}

/// Unvalidated trip parameters exactly as the user entered them
///
/// Defaults mirror the form's initial widget values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDraft {
    pub destination: String,
    pub duration_days: u32,
    pub budget: BudgetTier,
    pub purpose: Purpose,
    pub preferences: Vec<String>,
    pub language: Language,
    pub dietary: String,
    pub interests: String,
    pub walking_tolerance: WalkingTolerance,
    pub accommodation: AccommodationTier,
    /// Ratio the user typed when asked to clarify a mixed preference
    pub mix_ratio: Option<String>,
}

impl Default for TripDraft {
    fn default() -> Self {
        Self {
            destination: String::new(),
            duration_days: DEFAULT_DURATION_DAYS,
            budget: BudgetTier::Low,
            purpose: Purpose::Leisure,
            preferences: Vec::new(),
            language: Language::English,
            dietary: String::new(),
            interests: String::new(),
            walking_tolerance: WalkingTolerance::Low,
            accommodation: AccommodationTier::Budget,
            mix_ratio: None,
        }
    }
}

impl TripDraft {
    /// Start a draft for a destination with every other field at its form default
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            ..Default::default()
        }
    }

    /// Replace the preference tags
    pub fn with_preferences<I, S>(mut self, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferences = preferences.into_iter().map(Into::into).collect();
        self
    }

    /// Set the mixed-preference ratio (e.g. "70-30")
    pub fn with_mix_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.mix_ratio = Some(ratio.into());
        self
    }

    /// Whether the preference tags ask for a mix that needs a ratio
    pub fn wants_mix(&self) -> bool {
        has_ambiguity_marker(&self.preferences)
    }
}

/// True when any tag contains "mix" or "both", ignoring case
pub fn has_ambiguity_marker(preferences: &[String]) -> bool {
    preferences.iter().any(|p| {
        let lowered = p.to_lowercase();
        AMBIGUITY_MARKERS.iter().any(|m| lowered.contains(m))
    })
}

/// Validated trip parameters for one submission
///
/// Fields are private so a request can only come out of validation;
/// `mix_ratio` is `Some` exactly when the preferences carry an ambiguity marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripRequest {
    destination: String,
    duration_days: u32,
    budget: BudgetTier,
    purpose: Purpose,
    preferences: Vec<String>,
    language: Language,
    dietary: String,
    interests: String,
    walking_tolerance: WalkingTolerance,
    accommodation: AccommodationTier,
    mix_ratio: Option<String>,
}

impl TripRequest {
    /// Assemble a request from already-checked parts
    pub(crate) fn from_checked(draft: TripDraft, destination: String, preferences: Vec<String>) -> Self {
        let mix_ratio = if has_ambiguity_marker(&preferences) {
            Some(draft.mix_ratio.map(|r| r.trim().to_string()).unwrap_or_default())
        } else {
            None
        };
        debug!(%destination, ?mix_ratio, "TripRequest::from_checked: called");
        Self {
            destination,
            duration_days: draft.duration_days,
            budget: draft.budget,
            purpose: draft.purpose,
            preferences,
            language: draft.language,
            dietary: draft.dietary.trim().to_string(),
            interests: draft.interests.trim().to_string(),
            walking_tolerance: draft.walking_tolerance,
            accommodation: draft.accommodation,
            mix_ratio,
        }
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    pub fn budget(&self) -> BudgetTier {
        self.budget
    }

    pub fn purpose(&self) -> Purpose {
        self.purpose
    }

    /// Preference tags in the order the user gave them
    pub fn preferences(&self) -> &[String] {
        &self.preferences
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn dietary(&self) -> &str {
        &self.dietary
    }

    pub fn interests(&self) -> &str {
        &self.interests
    }

    pub fn walking_tolerance(&self) -> WalkingTolerance {
        self.walking_tolerance
    }

    pub fn accommodation(&self) -> AccommodationTier {
        self.accommodation
    }

    /// Famous-to-offbeat ratio; empty when the user left it blank
    pub fn mix_ratio(&self) -> Option<&str> {
        self.mix_ratio.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_tier_from_str() {
        assert_eq!("low".parse::<BudgetTier>(), Ok(BudgetTier::Low));
        assert_eq!("Moderate".parse::<BudgetTier>(), Ok(BudgetTier::Moderate));
        assert_eq!(" HIGH ".parse::<BudgetTier>(), Ok(BudgetTier::High));
        assert!("cheap".parse::<BudgetTier>().is_err());
    }

    #[test]
    fn test_accommodation_aliases() {
        assert_eq!("mid-range".parse::<AccommodationTier>(), Ok(AccommodationTier::MidRange));
        assert_eq!("midrange".parse::<AccommodationTier>(), Ok(AccommodationTier::MidRange));
        assert_eq!(AccommodationTier::MidRange.to_string(), "Mid-range");
    }

    #[test]
    fn test_parse_error_message() {
        let err = "klingon".parse::<Language>().unwrap_err();
        assert_eq!(err.field, "language");
        assert!(err.to_string().contains("english, french, spanish, german"));
    }

    #[test]
    fn test_all_in_form_order() {
        assert_eq!(Purpose::ALL, &[Purpose::Leisure, Purpose::Business, Purpose::Adventure]);
        assert_eq!(WalkingTolerance::ALL.len(), 3);
    }

    #[test]
    fn test_draft_defaults_match_form() {
        let draft = TripDraft::default();
        assert_eq!(draft.duration_days, 5);
        assert_eq!(draft.budget, BudgetTier::Low);
        assert_eq!(draft.accommodation, AccommodationTier::Budget);
        assert!(draft.preferences.is_empty());
        assert!(draft.mix_ratio.is_none());
    }

    #[test]
    fn test_ambiguity_marker_detection() {
        assert!(has_ambiguity_marker(&["A Mix of both".to_string()]));
        assert!(has_ambiguity_marker(&["History".to_string(), "BOTH".to_string()]));
        assert!(!has_ambiguity_marker(&["History".to_string(), "Food".to_string()]));
        assert!(TripDraft::new("Rome").with_preferences(["mixed"]).wants_mix());
    }
}
