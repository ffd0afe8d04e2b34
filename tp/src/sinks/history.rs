//! Append-only itinerary history
//!
//! One JSON object per line: `{"timestamp": ..., "itinerary": "..."}`.
//! Older files stored a bare JSON string per line; those still read back,
//! just without a timestamp.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{HistorySink, SinkError};

/// One saved itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub itinerary: String,
}

impl HistoryEntry {
    pub fn now(itinerary: impl Into<String>) -> Self {
        Self {
            timestamp: Some(Utc::now()),
            itinerary: itinerary.into(),
        }
    }

    fn parse_line(line: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str::<HistoryEntry>(line) {
            Ok(entry) => Ok(entry),
            Err(e) => match serde_json::from_str::<String>(line) {
                Ok(itinerary) => Ok(Self {
                    timestamp: None,
                    itinerary,
                }),
                Err(_) => Err(e),
            },
        }
    }
}

/// History stored as JSON lines in a single file
#[derive(Debug, Clone)]
pub struct JsonlHistory {
    path: PathBuf,
}

impl JsonlHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistorySink for JsonlHistory {
    fn append(&self, text: &str) -> Result<(), SinkError> {
        debug!(path = %self.path.display(), "JsonlHistory::append: called");
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_string(&HistoryEntry::now(text))?;
        line.push('\n');

        // Single write so concurrent appenders never interleave within a line
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Read every entry in a history file, oldest first
///
/// A missing file is an empty history. Lines that fail to parse are skipped.
pub fn read_history(path: &Path) -> Result<Vec<HistoryEntry>, SinkError> {
    debug!(path = %path.display(), "read_history: called");
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut entries = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match HistoryEntry::parse_line(line) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!(line = index + 1, error = %e, "read_history: skipping malformed line"),
        }
    }
    Ok(entries)
}
