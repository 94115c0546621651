//! TTS Engine implementation.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::backend::{Backend, BackendError, SynthesizeRequest};
use crate::output::{AudioStore, SavedAudio, StoreError};
use crate::text::sanitize;

/// Errors that can occur during TTS operations.
#[derive(Error, Debug)]
pub enum TTSError {
    #[error("Synthesis failed: {0}")]
    Backend(#[from] BackendError),

    #[error("Output error: {0}")]
    Store(#[from] StoreError),

    #[error("Service returned no audio")]
    EmptyAudio,
}

/// One text-to-file conversion as requested on the command line.
#[derive(Debug, Clone, Copy)]
pub struct SpeechJob<'a> {
    pub text: &'a str,
    pub voice: &'a str,
    pub filename: &'a str,
    pub slow: bool,
    /// Prune output files older than this before writing.
    pub max_age: Option<Duration>,
}

/// Outcome of [`TTSEngine::run`].
#[derive(Debug)]
pub struct JobReport {
    pub saved: SavedAudio,
    pub pruned: Vec<PathBuf>,
}

/// The main TTS engine that drives synthesis and storage.
pub struct TTSEngine<B: Backend> {
    backend: B,
    store: AudioStore,
}

impl<B: Backend> TTSEngine<B> {
    /// Create a new TTS engine.
    pub fn new(backend: B, store: AudioStore) -> Self {
        Self { backend, store }
    }

    /// Synthesize speech from text without saving it.
    pub fn synthesize(&self, text: &str, voice: &str, slow: bool) -> Result<Vec<u8>, TTSError> {
        let text = sanitize(text);
        if text.is_empty() {
            return Err(BackendError::EmptyText.into());
        }

        debug!(chars = text.chars().count(), voice, slow, "synthesizing");
        let request = SynthesizeRequest::new(text, voice).with_slow(slow);
        let audio = self.backend.synthesize(&request)?;

        if audio.is_empty() {
            return Err(TTSError::EmptyAudio);
        }

        Ok(audio)
    }

    /// Synthesize `text` and write it to `<output_dir>/<filename>`.
    ///
    /// The filename is checked before the directory is touched. The output
    /// directory is prepared before synthesis, so a failed request can leave
    /// an empty directory behind but never a partial file.
    pub fn convert(
        &self,
        text: &str,
        voice: &str,
        filename: &str,
        slow: bool,
    ) -> Result<SavedAudio, TTSError> {
        AudioStore::validate_filename(filename)?;
        self.store.ensure_dir()?;

        let audio = self.synthesize(text, voice, slow)?;
        let saved = self.store.save(filename, &audio)?;

        info!(path = %saved.path.display(), bytes = saved.size, "audio saved");
        Ok(saved)
    }

    /// Run a full job: validate, prune stale files, convert.
    ///
    /// Nothing is pruned when the filename is rejected.
    pub fn run(&self, job: &SpeechJob<'_>) -> Result<JobReport, TTSError> {
        AudioStore::validate_filename(job.filename)?;

        let pruned = match job.max_age {
            Some(max_age) => self.prune(max_age)?,
            None => Vec::new(),
        };
        let saved = self.convert(job.text, job.voice, job.filename, job.slow)?;

        Ok(JobReport { saved, pruned })
    }

    /// Delete output files older than `max_age`.
    pub fn prune(&self, max_age: Duration) -> Result<Vec<PathBuf>, TTSError> {
        Ok(self.store.prune_older_than(max_age)?)
    }
}
