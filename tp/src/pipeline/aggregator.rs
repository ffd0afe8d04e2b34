//! Result aggregation
//!
//! Combines the generated texts with the fixed supplementary sections into
//! the bundle handed to the presentation and export sinks. Generated text is
//! passed through untouched.

use tracing::debug;

use super::GenerationResult;

pub const FLIGHTS_AND_HOTELS: &str = "Here are some recommended flights and hotels for your trip:\n\
- Flight: $500 round trip from New York to Paris\n\
- Hotel: $100 per night at a mid-range hotel in Paris";

pub const REAL_TIME_UPDATES: &str = "Here are some real-time updates for your destination:\n\
- The Louvre Museum is open until 9 PM today.\n\
- There's a special event at the Eiffel Tower this weekend.";

pub const TRAVEL_CHALLENGES: &str = "Complete these challenges during your trip:\n\
- Visit 5 museums in Paris\n\
- Try 3 local dishes\n\
\n\
Points and Rewards: Earn points for completing challenges and redeem them for discounts or perks.";

/// What a section holds and where its text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Itinerary,
    Budget,
    FlightsAndHotels,
    Packing,
    Recommendations,
    RealTimeUpdates,
    Challenges,
}

impl SectionKind {
    /// Heading shown above the section
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Itinerary => "Your Personalized Travel Itinerary",
            SectionKind::Budget => "Budget Breakdown",
            SectionKind::FlightsAndHotels => "Flight and Hotel Recommendations",
            SectionKind::Packing => "Packing List",
            SectionKind::Recommendations => "Personalized Recommendations",
            SectionKind::RealTimeUpdates => "Real-Time Updates",
            SectionKind::Challenges => "Travel Challenges",
        }
    }

    /// Static sections are compile-time text, not model output
    pub fn is_static(&self) -> bool {
        matches!(
            self,
            SectionKind::FlightsAndHotels | SectionKind::RealTimeUpdates | SectionKind::Challenges
        )
    }
}

/// One titled block of the presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub body: String,
}

impl Section {
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }
}

/// Everything produced for one submission, in presentation order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultBundle {
    destination: String,
    sections: Vec<Section>,
}

impl ResultBundle {
    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Body of the first section of a kind
    pub fn section(&self, kind: SectionKind) -> Option<&str> {
        self.sections.iter().find(|s| s.kind == kind).map(|s| s.body.as_str())
    }

    /// Generated itinerary text (what gets exported, logged and mailed)
    pub fn itinerary(&self) -> &str {
        self.section(SectionKind::Itinerary).unwrap_or_default()
    }

    pub fn static_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.kind.is_static())
    }

    pub fn generated_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| !s.kind.is_static())
    }
}

/// Build the ordered bundle from the generated texts
pub fn aggregate(destination: &str, generated: GenerationResult) -> ResultBundle {
    debug!(%destination, "aggregate: called");
    let GenerationResult {
        itinerary_text,
        budget_text,
        packing_text,
        recommendation_text,
    } = generated;

    let sections = vec![
        Section {
            kind: SectionKind::Itinerary,
            body: itinerary_text,
        },
        Section {
            kind: SectionKind::Budget,
            body: budget_text,
        },
        Section {
            kind: SectionKind::FlightsAndHotels,
            body: FLIGHTS_AND_HOTELS.to_string(),
        },
        Section {
            kind: SectionKind::Packing,
            body: packing_text,
        },
        Section {
            kind: SectionKind::Recommendations,
            body: recommendation_text,
        },
        Section {
            kind: SectionKind::RealTimeUpdates,
            body: REAL_TIME_UPDATES.to_string(),
        },
        Section {
            kind: SectionKind::Challenges,
            body: TRAVEL_CHALLENGES.to_string(),
        },
    ];

    ResultBundle {
        destination: destination.to_string(),
        sections,
    }
}
