//! Domain types for trip planning

mod trip;

pub use trip::{
    AMBIGUITY_MARKERS, AccommodationTier, BudgetTier, DEFAULT_DURATION_DAYS, Language, MAX_DURATION_DAYS,
    MIN_DURATION_DAYS, ParseEnumError, Purpose, TripDraft, TripRequest, WalkingTolerance, has_ambiguity_marker,
};
