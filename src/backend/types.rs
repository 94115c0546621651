//! Backend request/response types.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when communicating with the TTS service.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No text to send to the TTS service")]
    EmptyText,

    #[error("Missing API key: set {0}")]
    MissingApiKey(&'static str),
}

/// Request for speech synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizeRequest {
    pub text: String,
    /// Language code (Google) or voice id (ElevenLabs).
    pub voice: String,
    pub slow: bool,
}

impl SynthesizeRequest {
    /// Create a new synthesis request.
    pub fn new(text: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: voice.into(),
            slow: false,
        }
    }

    /// Set slow reading speed.
    pub fn with_slow(mut self, slow: bool) -> Self {
        self.slow = slow;
        self
    }
}

/// JSON body of an ElevenLabs text-to-speech call.
#[derive(Debug, Clone, Serialize)]
pub struct ElevenLabsRequest<'a> {
    pub text: &'a str,
    pub model_id: &'a str,
    pub voice_settings: VoiceSettings,
}

/// Voice tuning sent with every ElevenLabs request.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
        }
    }
}
