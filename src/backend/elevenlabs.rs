//! ElevenLabs text-to-speech client.

use std::time::Duration;

use reqwest::header::ACCEPT;
use tracing::debug;

use crate::text::truncate_chars;

use super::Backend;
use super::types::{BackendError, ElevenLabsRequest, SynthesizeRequest, VoiceSettings};

pub const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";
pub const DEFAULT_VOICE_ID: &str = "EXAVITQu4vr4xnSDxMaL";
pub const MAX_TEXT_CHARS: usize = 1000;

const API_URL: &str = "https://api.elevenlabs.io/v1";
const MODEL_ID: &str = "eleven_monolingual_v1";
const TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the ElevenLabs API.
pub struct ElevenLabsBackend {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl ElevenLabsBackend {
    /// Create a client with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, BackendError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(BackendError::MissingApiKey(API_KEY_ENV));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            base_url: API_URL.to_string(),
            api_key,
            client,
        })
    }

    /// Create a client with the key from `ELEVENLABS_API_KEY`.
    pub fn from_env() -> Result<Self, BackendError> {
        let api_key =
            std::env::var(API_KEY_ENV).map_err(|_| BackendError::MissingApiKey(API_KEY_ENV))?;
        Self::new(api_key)
    }

    /// Point the client at another API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Get the base URL for this backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the synthesis endpoint for a voice.
    pub fn speech_url(&self, voice: &str) -> String {
        format!("{}/text-to-speech/{}", self.base_url, voice_id(voice))
    }
}

/// Map the CLI voice argument to an ElevenLabs voice id.
pub(super) fn voice_id(voice: &str) -> &str {
    match voice.trim() {
        "" | "default" => DEFAULT_VOICE_ID,
        id => id,
    }
}

impl Backend for ElevenLabsBackend {
    fn synthesize(&self, request: &SynthesizeRequest) -> Result<Vec<u8>, BackendError> {
        let text = truncate_chars(request.text.trim(), MAX_TEXT_CHARS);
        if text.is_empty() {
            return Err(BackendError::EmptyText);
        }

        let url = self.speech_url(&request.voice);
        debug!(%url, chars = text.chars().count(), "requesting speech");

        let body = ElevenLabsRequest {
            text,
            model_id: MODEL_ID,
            voice_settings: VoiceSettings::default(),
        };

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .header(ACCEPT, "audio/mpeg")
            .json(&body)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(BackendError::RequestFailed(format!(
                "Status: {status}: {detail}"
            )));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}
