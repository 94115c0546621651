//! Google Translate text-to-speech client.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{REFERER, USER_AGENT};
use serde_json::{Value, json};
use tracing::debug;

use crate::text::{GOOGLE_MAX_CHARS, chunk};

use super::Backend;
use super::types::{BackendError, SynthesizeRequest};

/// RPC id of the translate web UI's speech endpoint.
pub const GOOGLE_TTS_RPC: &str = "jQ1olc";

const BROWSER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/47.0.2526.106 Safari/537.36";

/// HTTP client for the Google Translate TTS endpoint.
pub struct GoogleBackend {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl GoogleBackend {
    /// Create a client for `translate.google.<tld>`.
    pub fn new(tld: &str) -> Self {
        Self::with_base_url(format!("https://translate.google.{tld}"))
    }

    /// Create a client for an explicit host, e.g. a proxy or a local server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Get the base URL for this backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Synthesize one chunk of at most [`GOOGLE_MAX_CHARS`] characters.
    fn synthesize_chunk(&self, text: &str, lang: &str, slow: bool) -> Result<Vec<u8>, BackendError> {
        let url = format!("{}/_/TranslateWebserverUi/data/batchexecute", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(REFERER, "http://translate.google.com/")
            .header(USER_AGENT, BROWSER_AGENT)
            .form(&[("f.req", package_rpc(text, lang, slow))])
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BackendError::RequestFailed(format!(
                "Status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        decode_audio(&body)
    }
}

impl Backend for GoogleBackend {
    fn synthesize(&self, request: &SynthesizeRequest) -> Result<Vec<u8>, BackendError> {
        let chunks = chunk(&request.text, GOOGLE_MAX_CHARS);
        if chunks.is_empty() {
            return Err(BackendError::EmptyText);
        }

        let lang = request.voice.trim();
        let mut audio = Vec::new();

        for (idx, part) in chunks.iter().enumerate() {
            debug!(chunk = idx + 1, total = chunks.len(), text = %part, "requesting chunk");
            audio.extend(self.synthesize_chunk(part, lang, request.slow)?);
        }

        Ok(audio)
    }
}

/// Build the `f.req` form value for one chunk.
///
/// The inner parameter list is itself JSON-encoded into a string inside the
/// outer envelope.
pub(super) fn package_rpc(text: &str, lang: &str, slow: bool) -> String {
    let speed = if slow { Value::Bool(true) } else { Value::Null };
    let parameter = json!([text, lang, speed, "null"]).to_string();

    json!([[[GOOGLE_TTS_RPC, parameter, null, "generic"]]]).to_string()
}

/// Extract the MP3 bytes from a batchexecute response body.
pub(super) fn decode_audio(body: &str) -> Result<Vec<u8>, BackendError> {
    for line in body.lines().filter(|l| l.contains(GOOGLE_TTS_RPC)) {
        let Ok(Value::Array(entries)) = serde_json::from_str::<Value>(line) else {
            continue;
        };

        for entry in &entries {
            if entry.get(1).and_then(Value::as_str) != Some(GOOGLE_TTS_RPC) {
                continue;
            }

            let payload = entry.get(2).and_then(Value::as_str).ok_or_else(|| {
                BackendError::InvalidResponse("Service returned no audio payload".to_string())
            })?;

            let inner: Value = serde_json::from_str(payload)
                .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

            let encoded = inner.get(0).and_then(Value::as_str).ok_or_else(|| {
                BackendError::InvalidResponse("Audio payload is not a string".to_string())
            })?;

            return STANDARD
                .decode(encoded)
                .map_err(|e| BackendError::InvalidResponse(e.to_string()));
        }
    }

    Err(BackendError::InvalidResponse(
        "No audio data in response".to_string(),
    ))
}
