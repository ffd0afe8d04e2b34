//! Output sinks
//!
//! One-way collaborators that consume a finished result bundle: terminal
//! presentation, the destination map, PDF export, the history log and email.
//! [`Delivery`] runs them after a successful submission; a failing export,
//! history or email sink is logged and reported but never stops the others.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

mod email;
mod history;
mod map;
mod pdf;
mod terminal;

pub use email::SmtpMailer;
pub use history::{HistoryEntry, JsonlHistory, read_history};
pub use map::{KNOWN_LOCATIONS, Location, TerminalMap, known_location};
pub use pdf::PdfExporter;
pub use terminal::{SHARE_LINKS, TerminalPresenter};

use crate::pipeline::ResultBundle;

/// Errors raised by the side-effecting sinks
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Invalid email address '{address}': {reason}")]
    Address { address: String, reason: String },

    #[error("Email error: {0}")]
    Email(String),
}

/// Shows a result bundle to the user
pub trait PresentationSink: Send + Sync {
    fn present(&self, bundle: &ResultBundle);
}

/// Shows a map for a destination the planner knows coordinates for
pub trait MapSink: Send + Sync {
    fn show(&self, location: &Location);
}

/// Writes text to a document file
pub trait ExportSink: Send + Sync {
    fn export(&self, text: &str, filename: &Path) -> Result<(), SinkError>;
}

/// Appends text to the persistent history
pub trait HistorySink: Send + Sync {
    fn append(&self, text: &str) -> Result<(), SinkError>;
}

/// Sends text to a recipient by email
#[async_trait]
pub trait EmailSink: Send + Sync {
    async fn send(&self, text: &str, recipient: &str) -> Result<(), SinkError>;
}

/// Which side-effecting sink failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkName {
    Export,
    History,
    Email,
}

impl fmt::Display for SinkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkName::Export => write!(f, "PDF export"),
            SinkName::History => write!(f, "history"),
            SinkName::Email => write!(f, "email"),
        }
    }
}

/// A sink that failed during delivery
#[derive(Debug)]
pub struct SinkFailure {
    pub sink: SinkName,
    pub error: SinkError,
}

/// Outcome of delivering one bundle
#[derive(Debug, Default)]
pub struct DeliveryReport {
    pub map_shown: bool,
    pub exported: Option<PathBuf>,
    pub history_saved: bool,
    pub emailed: Option<String>,
    pub failures: Vec<SinkFailure>,
}

impl DeliveryReport {
    /// The email failure, which callers surface to the user
    pub fn email_failure(&self) -> Option<&SinkError> {
        self.failures.iter().find(|f| f.sink == SinkName::Email).map(|f| &f.error)
    }

    fn record(&mut self, sink: SinkName, error: SinkError) {
        warn!(%sink, %error, "sink failed");
        self.failures.push(SinkFailure { sink, error });
    }
}

/// The sinks a bundle is delivered to
///
/// Presentation and map always run; export, history and email only when
/// configured.
pub struct Delivery {
    presenter: Arc<dyn PresentationSink>,
    map: Arc<dyn MapSink>,
    export: Option<(Arc<dyn ExportSink>, PathBuf)>,
    history: Option<Arc<dyn HistorySink>>,
    email: Option<(Arc<dyn EmailSink>, String)>,
}

impl Delivery {
    pub fn new(presenter: Arc<dyn PresentationSink>, map: Arc<dyn MapSink>) -> Self {
        Self {
            presenter,
            map,
            export: None,
            history: None,
            email: None,
        }
    }

    pub fn with_export(mut self, sink: Arc<dyn ExportSink>, filename: impl Into<PathBuf>) -> Self {
        self.export = Some((sink, filename.into()));
        self
    }

    pub fn with_history(mut self, sink: Arc<dyn HistorySink>) -> Self {
        self.history = Some(sink);
        self
    }

    pub fn with_email(mut self, sink: Arc<dyn EmailSink>, recipient: impl Into<String>) -> Self {
        self.email = Some((sink, recipient.into()));
        self
    }

    /// Hand the bundle to every sink
    ///
    /// Export, history and email receive the itinerary text.
    pub async fn deliver(&self, bundle: &ResultBundle) -> DeliveryReport {
        debug!(destination = %bundle.destination(), "Delivery::deliver: called");
        let mut report = DeliveryReport::default();

        self.presenter.present(bundle);

        match known_location(bundle.destination()) {
            Some(location) => {
                self.map.show(location);
                report.map_shown = true;
            }
            None => debug!(destination = %bundle.destination(), "Delivery::deliver: no map for destination"),
        }

        let itinerary = bundle.itinerary();

        if let Some((sink, filename)) = &self.export {
            match sink.export(itinerary, filename) {
                Ok(()) => {
                    info!(path = %filename.display(), "Itinerary saved as PDF");
                    report.exported = Some(filename.clone());
                }
                Err(e) => report.record(SinkName::Export, e),
            }
        }

        if let Some(sink) = &self.history {
            match sink.append(itinerary) {
                Ok(()) => report.history_saved = true,
                Err(e) => report.record(SinkName::History, e),
            }
        }

        if let Some((sink, recipient)) = &self.email {
            match sink.send(itinerary, recipient).await {
                Ok(()) => {
                    info!(%recipient, "Itinerary emailed");
                    report.emailed = Some(recipient.clone());
                }
                Err(e) => report.record(SinkName::Email, e),
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{GenerationResult, aggregate};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn push(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl PresentationSink for Recorder {
        fn present(&self, bundle: &ResultBundle) {
            self.push(format!("present:{}", bundle.destination()));
        }
    }

    impl MapSink for Recorder {
        fn show(&self, location: &Location) {
            self.push(format!("map:{},{}", location.latitude, location.longitude));
        }
    }

    struct FailingExport;

    impl ExportSink for FailingExport {
        fn export(&self, _text: &str, _filename: &Path) -> Result<(), SinkError> {
            Err(SinkError::Pdf("disk full".to_string()))
        }
    }

    impl HistorySink for Recorder {
        fn append(&self, text: &str) -> Result<(), SinkError> {
            self.push(format!("history:{text}"));
            Ok(())
        }
    }

    #[async_trait]
    impl EmailSink for Recorder {
        async fn send(&self, text: &str, recipient: &str) -> Result<(), SinkError> {
            self.push(format!("email:{recipient}:{text}"));
            Ok(())
        }
    }

    struct FailingHistory;

    impl HistorySink for FailingHistory {
        fn append(&self, _text: &str) -> Result<(), SinkError> {
            Err(SinkError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "history file is read-only",
            )))
        }
    }

    struct FailingEmail;

    #[async_trait]
    impl EmailSink for FailingEmail {
        async fn send(&self, _text: &str, recipient: &str) -> Result<(), SinkError> {
            Err(SinkError::Address {
                address: recipient.to_string(),
                reason: "missing domain".to_string(),
            })
        }
    }

    fn bundle(destination: &str) -> ResultBundle {
        aggregate(
            destination,
            GenerationResult {
                itinerary_text: "the plan".to_string(),
                budget_text: "b".to_string(),
                packing_text: "p".to_string(),
                recommendation_text: "r".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_failing_export_does_not_stop_history_or_email() {
        let recorder = Arc::new(Recorder::default());
        let delivery = Delivery::new(recorder.clone(), recorder.clone())
            .with_export(Arc::new(FailingExport), "out.pdf")
            .with_history(recorder.clone())
            .with_email(recorder.clone(), "me@example.com");

        let report = delivery.deliver(&bundle("Paris")).await;

        assert_eq!(
            recorder.calls(),
            vec![
                "present:Paris",
                "map:48.8566,2.3522",
                "history:the plan",
                "email:me@example.com:the plan",
            ]
        );
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].sink, SinkName::Export);
        assert!(report.exported.is_none());
        assert!(report.history_saved);
        assert_eq!(report.emailed.as_deref(), Some("me@example.com"));
        assert!(report.email_failure().is_none());
    }

    #[tokio::test]
    async fn test_failing_history_does_not_stop_email() {
        let recorder = Arc::new(Recorder::default());
        let delivery = Delivery::new(recorder.clone(), recorder.clone())
            .with_history(Arc::new(FailingHistory))
            .with_email(recorder.clone(), "me@example.com");

        let report = delivery.deliver(&bundle("Paris")).await;

        assert_eq!(
            recorder.calls(),
            vec!["present:Paris", "map:48.8566,2.3522", "email:me@example.com:the plan"]
        );
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].sink, SinkName::History);
        assert!(!report.history_saved);
        assert_eq!(report.emailed.as_deref(), Some("me@example.com"));
    }

    #[tokio::test]
    async fn test_every_side_effect_failing_is_reported_separately() {
        let recorder = Arc::new(Recorder::default());
        let delivery = Delivery::new(recorder.clone(), recorder.clone())
            .with_export(Arc::new(FailingExport), "out.pdf")
            .with_history(Arc::new(FailingHistory))
            .with_email(Arc::new(FailingEmail), "nobody");

        let report = delivery.deliver(&bundle("Paris")).await;

        let failed: Vec<SinkName> = report.failures.iter().map(|f| f.sink).collect();
        assert_eq!(failed, vec![SinkName::Export, SinkName::History, SinkName::Email]);
        assert!(report.email_failure().is_some());
    }

    #[tokio::test]
    async fn test_email_failure_is_reported() {
        let recorder = Arc::new(Recorder::default());
        let delivery =
            Delivery::new(recorder.clone(), recorder.clone()).with_email(Arc::new(FailingEmail), "not-an-address");

        let report = delivery.deliver(&bundle("Paris")).await;

        assert!(report.email_failure().is_some());
        assert!(report.emailed.is_none());
    }

    #[tokio::test]
    async fn test_unknown_destination_shows_no_map() {
        let recorder = Arc::new(Recorder::default());
        let delivery = Delivery::new(recorder.clone(), recorder.clone());

        let report = delivery.deliver(&bundle("Reykjavik")).await;

        assert!(!report.map_shown);
        assert_eq!(recorder.calls(), vec!["present:Reykjavik"]);
        assert!(report.failures.is_empty());
    }
}
