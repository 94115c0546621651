//! CLI argument definitions and validation.

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::document::{self, DocumentError, MAX_FILE_SIZE};
use crate::output::DEFAULT_OUTPUT_DIR;

/// Convert text to a synthesized speech audio file.
#[derive(Parser, Debug)]
#[command(name = "tts-save")]
#[command(about = "Convert text to speech and save the audio to a local directory")]
#[command(version)]
pub struct Args {
    /// Text to synthesize (or a path to a .txt, .pdf or .docx file with --from-file)
    pub text: String,

    /// Voice to use: a language code for "google", a voice id for "elevenlabs"
    pub voice: String,

    /// Output file name, written inside the output directory
    pub filename: String,

    /// Directory the audio file is written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// TTS service to use: "google" or "elevenlabs"
    #[arg(short, long, value_enum, default_value = "google")]
    pub provider: Provider,

    /// Top-level domain of the Google Translate host
    #[arg(long, default_value = "com")]
    pub tld: String,

    /// Read more slowly (Google only)
    #[arg(long)]
    pub slow: bool,

    /// Treat TEXT as a path to a text, PDF or DOCX file (at most 5 MB)
    #[arg(long)]
    pub from_file: bool,

    /// Delete files in the output directory older than this many seconds
    #[arg(long, value_name = "SECS")]
    pub max_age: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Text-to-speech service selection.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Provider {
    /// Google Translate TTS (no account needed)
    #[default]
    #[value(name = "google")]
    Google,

    /// ElevenLabs (requires ELEVENLABS_API_KEY)
    #[value(name = "elevenlabs")]
    ElevenLabs,
}

impl Provider {
    /// Returns the CLI argument string for this provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::ElevenLabs => "elevenlabs",
        }
    }

    /// Returns the human-readable name of the provider.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Google => "Google Translate TTS",
            Provider::ElevenLabs => "ElevenLabs",
        }
    }
}

/// Errors that can occur when validating arguments.
#[derive(Error, Debug)]
pub enum ArgsError {
    #[error("Text cannot be empty")]
    EmptyText,

    #[error("Voice cannot be empty")]
    EmptyVoice,

    #[error("Failed to read text file {path}: {source}")]
    TextFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File too large: {path} is {size} bytes, limit is {limit}")]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl Args {
    /// Check the positional arguments that the output store does not cover.
    ///
    /// The filename is validated by [`crate::output::AudioStore`] before
    /// anything touches the filesystem.
    pub fn validate(&self) -> Result<(), ArgsError> {
        if !self.from_file && self.text.trim().is_empty() {
            return Err(ArgsError::EmptyText);
        }

        if self.voice.trim().is_empty() {
            return Err(ArgsError::EmptyVoice);
        }

        Ok(())
    }

    /// Resolve the text to synthesize, reading it from disk with `--from-file`.
    pub fn resolve_text(&self) -> Result<String, ArgsError> {
        let text = if self.from_file {
            read_text_file(Path::new(&self.text))?
        } else {
            self.text.clone()
        };

        if text.trim().is_empty() {
            return Err(ArgsError::EmptyText);
        }

        Ok(text)
    }
}

fn read_text_file(path: &Path) -> Result<String, ArgsError> {
    let metadata = std::fs::metadata(path).map_err(|source| ArgsError::TextFile {
        path: path.to_path_buf(),
        source,
    })?;

    if metadata.len() > MAX_FILE_SIZE {
        return Err(ArgsError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: MAX_FILE_SIZE,
        });
    }

    Ok(document::extract_text(path)?)
}
