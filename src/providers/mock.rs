/*!
 * Mock translator implementations for testing.
 *
 * - `MockTranslator::echo()` - Returns the input text unchanged
 * - `MockTranslator::failing()` - Always fails with an API error
 * - `MockTranslator::fail_on_call(n)` - Fails only on the n-th call
 * - `MockTranslator::intermittent(n)` - Fails on every n-th call
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Returns the text unchanged
    Echo,
    /// Always fails with an error
    Failing,
    /// Fails on the given 1-based call only
    FailOnCall { call: usize },
    /// Fails on every Nth call
    Intermittent { fail_every: usize },
}

/// Mock translator for exercising the pipeline without a server
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Call counter shared between clones
    call_count: Arc<AtomicUsize>,
    /// Texts received, in call order
    requests: Arc<Mutex<Vec<String>>>,
    /// Custom translation function used on successful calls
    custom_response: Option<fn(&str) -> String>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn fail_on_call(call: usize) -> Self {
        Self::new(MockBehavior::FailOnCall { call })
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every: fail_every.max(1) })
    }

    /// Set a custom translation function for successful calls
    pub fn with_custom_response(mut self, generator: fn(&str) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of translate calls made so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Texts received so far, in call order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn should_fail(&self, call: usize) -> bool {
        match self.behavior {
            MockBehavior::Echo => false,
            MockBehavior::Failing => true,
            MockBehavior::FailOnCall { call: failing } => call == failing,
            MockBehavior::Intermittent { fail_every } => call % fail_every == 0,
        }
    }
}

impl Clone for MockTranslator {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            call_count: Arc::clone(&self.call_count),
            requests: Arc::clone(&self.requests),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        _source_language: &str,
        _target_language: &str,
        text: &str,
    ) -> Result<String, ProviderError> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(text.to_string());
        }

        if self.should_fail(call) {
            return Err(ProviderError::ApiError {
                status_code: 500,
                message: format!("Simulated failure on call {}", call),
            });
        }

        Ok(match self.custom_response {
            Some(generator) => generator(text),
            None => text.to_string(),
        })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError("Simulated connection failure".to_string())),
            _ => Ok(()),
        }
    }
}
