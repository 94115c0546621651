//! tts-save: convert text to a synthesized speech audio file.
//!
//! This crate sends text to a cloud text-to-speech service (Google Translate
//! TTS or ElevenLabs) and stores the returned audio in a local directory.

pub mod backend;
pub mod cli;
pub mod document;
pub mod engine;
pub mod output;
pub mod text;
