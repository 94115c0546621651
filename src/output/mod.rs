//! Output directory management.
//!
//! This module prepares the directory synthesized audio is written to,
//! guards output filenames, and prunes stale files.

mod store;

pub use store::{AudioStore, DEFAULT_OUTPUT_DIR, SavedAudio, StoreError};
