//! End-to-end tests for the submission pipeline
//!
//! A stub generation client stands in for the remote service and recording
//! sinks capture what delivery hands them.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tripplanner::domain::{AccommodationTier, BudgetTier, Language, Purpose, TripDraft, WalkingTolerance};
use tripplanner::llm::{GenerationClient, LlmError};
use tripplanner::pipeline::{ErrorKind, Pipeline, SectionKind, TRAVEL_CHALLENGES};
use tripplanner::prompts::PromptLoader;
use tripplanner::sinks::{
    Delivery, EmailSink, ExportSink, HistorySink, JsonlHistory, Location, MapSink, PresentationSink, SinkError,
    read_history,
};
use tripplanner::ResultBundle;

/// Replies with a fixed string per call, or fails every call
struct StubClient {
    replies: Vec<&'static str>,
    fail: bool,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl StubClient {
    fn replying(replies: Vec<&'static str>) -> Self {
        Self {
            replies,
            fail: false,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::replying(Vec::new())
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationClient for StubClient {
    async fn generate_content(&self, prompt: &str) -> Result<String, LlmError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(LlmError::ApiError {
                status: 403,
                message: "API key not valid".to_string(),
            });
        }
        self.replies
            .get(index)
            .map(|s| s.to_string())
            .ok_or_else(|| LlmError::InvalidResponse("no more replies".to_string()))
    }
}

/// Records every sink call in order
#[derive(Default)]
struct Recorder {
    presented: Mutex<Vec<String>>,
    locations: Mutex<Vec<(f64, f64)>>,
    exported: Mutex<Vec<String>>,
    history: Mutex<Vec<String>>,
    emailed: Mutex<Vec<String>>,
}

impl PresentationSink for Recorder {
    fn present(&self, bundle: &ResultBundle) {
        self.presented.lock().unwrap().push(bundle.destination().to_string());
    }
}

impl MapSink for Recorder {
    fn show(&self, location: &Location) {
        self.locations.lock().unwrap().push((location.latitude, location.longitude));
    }
}

impl ExportSink for Recorder {
    fn export(&self, text: &str, _filename: &Path) -> Result<(), SinkError> {
        self.exported.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

impl HistorySink for Recorder {
    fn append(&self, text: &str) -> Result<(), SinkError> {
        self.history.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[async_trait]
impl EmailSink for Recorder {
    async fn send(&self, text: &str, _recipient: &str) -> Result<(), SinkError> {
        self.emailed.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

fn paris_draft() -> TripDraft {
    TripDraft {
        destination: "Paris".to_string(),
        duration_days: 5,
        budget: BudgetTier::Moderate,
        purpose: Purpose::Leisure,
        preferences: vec!["History".to_string()],
        language: Language::English,
        walking_tolerance: WalkingTolerance::Moderate,
        accommodation: AccommodationTier::MidRange,
        ..Default::default()
    }
}

fn full_delivery(recorder: &Arc<Recorder>) -> Delivery {
    Delivery::new(recorder.clone(), recorder.clone())
        .with_export(recorder.clone(), "itinerary.pdf")
        .with_history(recorder.clone())
        .with_email(recorder.clone(), "me@example.com")
}

// =============================================================================
// Submission Tests
// =============================================================================

#[tokio::test]
async fn test_paris_end_to_end() {
    let client = Arc::new(StubClient::replying(vec!["ITIN", "BUDGET", "PACKING", "RECS"]));
    let pipeline = Pipeline::new(PromptLoader::embedded_only(), client.clone());

    let bundle = pipeline.handle_submit(paris_draft()).await.expect("submission should succeed");

    let generated: Vec<&str> = bundle.generated_sections().map(|s| s.body.as_str()).collect();
    assert_eq!(generated, vec!["ITIN", "BUDGET", "PACKING", "RECS"]);
    assert_eq!(bundle.static_sections().count(), 3);
    assert_eq!(bundle.sections().len(), 7);
    assert_eq!(bundle.section(SectionKind::Challenges), Some(TRAVEL_CHALLENGES));
    assert_eq!(client.calls(), 4);

    let prompts = client.prompts.lock().unwrap().clone();
    assert!(prompts[0].contains("5-day travel itinerary for Paris with a moderate budget"));
    assert!(prompts[0].contains("Accommodation preference: Mid-range"));
    for dependent in &prompts[1..] {
        assert!(!dependent.contains("ITIN"));
    }

    let recorder = Arc::new(Recorder::default());
    let report = full_delivery(&recorder).deliver(&bundle).await;

    assert!(report.failures.is_empty());
    assert!(report.map_shown);
    assert_eq!(*recorder.presented.lock().unwrap(), vec!["Paris"]);
    assert_eq!(*recorder.locations.lock().unwrap(), vec![(48.8566, 2.3522)]);
    assert_eq!(*recorder.exported.lock().unwrap(), vec!["ITIN"]);
    assert_eq!(*recorder.history.lock().unwrap(), vec!["ITIN"]);
    assert_eq!(*recorder.emailed.lock().unwrap(), vec!["ITIN"]);
}

#[tokio::test]
async fn test_primary_failure_produces_no_bundle() {
    let client = Arc::new(StubClient::failing());
    let pipeline = Pipeline::new(PromptLoader::embedded_only(), client.clone());

    let err = pipeline.handle_submit(paris_draft()).await.unwrap_err();

    assert_eq!(err.kinds(), vec![ErrorKind::GenerationFailure]);
    assert_eq!(client.calls(), 1);
    let message = err.to_string();
    assert!(message.starts_with("An error occurred: "));
    assert!(message.contains("API key not valid"));
    assert!(message.ends_with("Please check your API key and try again."));
}

#[tokio::test]
async fn test_missing_destination_dispatches_nothing() {
    let client = Arc::new(StubClient::replying(vec!["a", "b", "c", "d"]));
    let pipeline = Pipeline::new(PromptLoader::embedded_only(), client.clone());

    let draft = TripDraft {
        destination: "   ".to_string(),
        ..paris_draft()
    };
    let err = pipeline.handle_submit(draft).await.unwrap_err();

    assert_eq!(err.kinds(), vec![ErrorKind::MissingDestination]);
    assert_eq!(err.to_string(), "Please enter a destination.");
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_mix_ratio_reaches_primary_prompt() {
    let client = Arc::new(StubClient::replying(vec!["a", "b", "c", "d"]));
    let pipeline = Pipeline::new(PromptLoader::embedded_only(), client.clone());

    let draft = paris_draft()
        .with_preferences(["Mix of famous and hidden", "Food"])
        .with_mix_ratio("70-30");
    pipeline.handle_submit(draft).await.unwrap();

    let primary = client.prompts.lock().unwrap()[0].clone();
    assert!(primary.contains("a mix of 70-30 famous and offbeat places"));
    assert!(!primary.contains("Mix of famous and hidden, Food"));
}

// =============================================================================
// Delivery Tests
// =============================================================================

#[tokio::test]
async fn test_history_file_receives_itinerary() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let history_path = temp_dir.path().join("history.jsonl");

    let client = Arc::new(StubClient::replying(vec!["Day 1: Louvre", "b", "c", "d"]));
    let pipeline = Pipeline::new(PromptLoader::embedded_only(), client);
    let bundle = pipeline.handle_submit(paris_draft()).await.unwrap();

    let recorder = Arc::new(Recorder::default());
    let report = Delivery::new(recorder.clone(), recorder.clone())
        .with_history(Arc::new(JsonlHistory::new(&history_path)))
        .deliver(&bundle)
        .await;

    assert!(report.history_saved);
    let entries = read_history(&history_path).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].itinerary, "Day 1: Louvre");
}
