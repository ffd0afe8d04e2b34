//! Destination map
//!
//! Only a small fixed set of destinations has coordinates; anything else
//! simply gets no map.

use colored::Colorize;
use tracing::debug;

use super::MapSink;

/// A destination the planner can center a map on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    /// Label of the single marker placed on the map
    pub marker: &'static str,
}

impl Location {
    /// OpenStreetMap link centered on the location with a marker
    pub fn osm_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map={zoom}/{lat}/{lon}",
            lat = self.latitude,
            lon = self.longitude,
            zoom = self.zoom
        )
    }
}

pub const KNOWN_LOCATIONS: &[Location] = &[Location {
    name: "Paris",
    latitude: 48.8566,
    longitude: 2.3522,
    zoom: 12,
    marker: "Eiffel Tower",
}];

/// Look up a destination by name, ignoring case and surrounding whitespace
pub fn known_location(destination: &str) -> Option<&'static Location> {
    let wanted = destination.trim();
    let found = KNOWN_LOCATIONS.iter().find(|l| l.name.eq_ignore_ascii_case(wanted));
    debug!(%destination, found = found.is_some(), "known_location: called");
    found
}

/// Prints the map center, marker and a link to an online map
#[derive(Debug, Default)]
pub struct TerminalMap;

impl TerminalMap {
    pub fn render(&self, location: &Location) -> String {
        format!(
            "{}\n  Center: {:.4}, {:.4} (zoom {})\n  Marker: {}\n  {}\n",
            "Map of Key Locations".bold().cyan(),
            location.latitude,
            location.longitude,
            location.zoom,
            location.marker,
            location.osm_url()
        )
    }
}

impl MapSink for TerminalMap {
    fn show(&self, location: &Location) {
        println!("{}", self.render(location));
    }
}
