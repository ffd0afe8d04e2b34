//! GenerationClient trait definition

use async_trait::async_trait;

use super::LlmError;

/// Stateless text generation capability
///
/// Every call is independent: the planner never carries conversation state
/// between the itinerary prompt and the prompts that follow it.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Send one prompt and wait for the complete generated text
    async fn generate_content(&self, prompt: &str) -> Result<String, LlmError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::debug;

    /// Mock generation client for unit tests
    ///
    /// Replies are handed out in call order; an `Err` entry fails that call.
    pub struct MockGenerationClient {
        replies: Vec<Result<String, String>>,
        prompts: Mutex<Vec<String>>,
        call_count: AtomicUsize,
    }

    impl MockGenerationClient {
        pub fn new(replies: Vec<Result<String, String>>) -> Self {
            debug!(reply_count = %replies.len(), "MockGenerationClient::new: called");
            Self {
                replies,
                prompts: Mutex::new(Vec::new()),
                call_count: AtomicUsize::new(0),
            }
        }

        /// Mock that answers every call successfully with the given texts
        pub fn with_texts(texts: &[&str]) -> Self {
            Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        /// Prompts received so far, in call order
        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationClient for MockGenerationClient {
        async fn generate_content(&self, prompt: &str) -> Result<String, LlmError> {
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            debug!(%idx, "MockGenerationClient::generate_content: called");
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.replies.get(idx) {
                Some(Ok(text)) => Ok(text.clone()),
                Some(Err(message)) => Err(LlmError::ApiError {
                    status: 500,
                    message: message.clone(),
                }),
                None => Err(LlmError::InvalidResponse("No more mock responses".to_string())),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_client_returns_replies_in_order() {
            let client = MockGenerationClient::with_texts(&["Response 1", "Response 2"]);

            assert_eq!(client.generate_content("first").await.unwrap(), "Response 1");
            assert_eq!(client.generate_content("second").await.unwrap(), "Response 2");
            assert_eq!(client.call_count(), 2);
            assert_eq!(client.prompts(), vec!["first".to_string(), "second".to_string()]);
        }

        #[tokio::test]
        async fn test_mock_client_errors_when_exhausted() {
            let client = MockGenerationClient::new(vec![]);
            assert!(client.generate_content("anything").await.is_err());
        }

        #[tokio::test]
        async fn test_mock_client_scripted_failure() {
            let client = MockGenerationClient::new(vec![Err("quota exceeded".to_string())]);
            let err = client.generate_content("plan").await.unwrap_err();
            assert!(err.to_string().contains("quota exceeded"));
        }
    }
}
