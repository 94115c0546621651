//! TTS Engine orchestrator.
//!
//! This module provides the main engine that coordinates between
//! the text preparation, the Backend, and the AudioStore.

mod tts;

pub use tts::{JobReport, SpeechJob, TTSEngine, TTSError};
