//! Backend communication with the text-to-speech services.
//!
//! Provides the [`Backend`] trait and HTTP implementations for Google
//! Translate TTS and ElevenLabs.

mod elevenlabs;
mod google;
mod types;

pub use elevenlabs::{API_KEY_ENV, DEFAULT_VOICE_ID, ElevenLabsBackend, MAX_TEXT_CHARS};
pub use google::{GOOGLE_TTS_RPC, GoogleBackend};
pub use types::{BackendError, ElevenLabsRequest, SynthesizeRequest, VoiceSettings};

use crate::cli::Provider;

/// Trait for TTS service communication.
///
/// This trait abstracts the HTTP communication with the TTS service,
/// allowing for mock implementations in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Backend: Send + Sync {
    /// Synthesize speech from text.
    ///
    /// # Returns
    /// Encoded audio data (MP3 for both supported services)
    fn synthesize(&self, request: &SynthesizeRequest) -> Result<Vec<u8>, BackendError>;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn synthesize(&self, request: &SynthesizeRequest) -> Result<Vec<u8>, BackendError> {
        (**self).synthesize(request)
    }
}

/// Create a backend for the specified provider.
///
/// `tld` only applies to Google. ElevenLabs reads its key from the
/// environment and fails here if it is absent.
pub fn create_backend(provider: Provider, tld: &str) -> Result<Box<dyn Backend>, BackendError> {
    match provider {
        Provider::Google => Ok(Box::new(GoogleBackend::new(tld))),
        Provider::ElevenLabs => Ok(Box::new(ElevenLabsBackend::from_env()?)),
    }
}
