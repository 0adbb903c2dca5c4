//! Voice input and output capabilities.
//!
//! A terminal has no speech engine, so the shipped implementations either do
//! nothing or return a canned transcript.

use std::time::Duration;

use async_trait::async_trait;

/// Transcript returned by [`MockRecognizer`].
pub const MOCK_TRANSCRIPT: &str = "What can you tell me about quantum computing?";

/// Notice shown when voice is switched on and a recogniser exists.
pub const RECOGNITION_PLACEHOLDER: &str = "Voice recognition would be initialized here";

/// Reads replies aloud.
pub trait SpeechSynthesizer: Send + Sync {
    fn is_available(&self) -> bool;
    fn speak(&self, text: &str);
    /// Stops anything currently being spoken.
    fn cancel(&self);
}

/// Turns one spoken utterance into text.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    fn is_available(&self) -> bool;
    async fn listen(&self) -> Option<String>;
}

/// Missing capability. Every call is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpeech;

impl SpeechSynthesizer for NoSpeech {
    fn is_available(&self) -> bool {
        false
    }

    fn speak(&self, _text: &str) {}

    fn cancel(&self) {}
}

#[async_trait]
impl SpeechRecognizer for NoSpeech {
    fn is_available(&self) -> bool {
        false
    }

    async fn listen(&self) -> Option<String> {
        None
    }
}

/// Recogniser that "hears" [`MOCK_TRANSCRIPT`] after a delay.
#[derive(Debug, Clone)]
pub struct MockRecognizer {
    delay: Duration,
}

impl MockRecognizer {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(3000);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockRecognizer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl SpeechRecognizer for MockRecognizer {
    fn is_available(&self) -> bool {
        true
    }

    async fn listen(&self) -> Option<String> {
        tokio::time::sleep(self.delay).await;
        Some(MOCK_TRANSCRIPT.to_string())
    }
}
