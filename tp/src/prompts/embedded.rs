//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Primary itinerary prompt listing explicit preferences
pub const ITINERARY: &str = include_str!("../../prompts/itinerary.pmt");

/// Primary itinerary prompt stating a famous-to-offbeat mix ratio
pub const ITINERARY_MIX: &str = include_str!("../../prompts/itinerary-mix.pmt");

/// Budget breakdown prompt
pub const BUDGET: &str = include_str!("../../prompts/budget.pmt");

/// Packing list prompt
pub const PACKING: &str = include_str!("../../prompts/packing.pmt");

/// Similar destinations / activities prompt
pub const RECOMMENDATION: &str = include_str!("../../prompts/recommendation.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "itinerary" => Some(ITINERARY),
        "itinerary-mix" => Some(ITINERARY_MIX),
        "budget" => Some(BUDGET),
        "packing" => Some(PACKING),
        "recommendation" => Some(RECOMMENDATION),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_embedded_itinerary_variants() {
        let explicit = get_embedded("itinerary").unwrap();
        assert!(explicit.contains("{{preferences}}"));
        assert!(!explicit.contains("{{mix_ratio}}"));

        let mix = get_embedded("itinerary-mix").unwrap();
        assert!(mix.contains("{{mix_ratio}}"));
        assert!(!mix.contains("{{preferences}}"));

        for template in [explicit, mix] {
            assert!(template.contains("day-by-day itinerary"));
            assert!(template.contains("{{walking_tolerance}}"));
            assert!(template.contains("{{accommodation}}"));
        }
    }

    #[test]
    fn test_dependent_templates_have_no_itinerary_slot() {
        for name in ["budget", "packing", "recommendation"] {
            let template = get_embedded(name).unwrap();
            assert!(!template.contains("{{itinerary"), "{name} must not reference generated text");
        }
    }

    #[test]
    fn test_get_embedded_unknown() {
        assert!(get_embedded("unknown-template").is_none());
    }
}
