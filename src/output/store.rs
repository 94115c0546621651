//! Audio file storage in the output directory.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use thiserror::Error;
use tracing::{debug, info, warn};

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "audios";

/// Errors that can occur while preparing the directory or writing audio.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Output path exists and is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A written audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedAudio {
    pub path: PathBuf,
    pub size: u64,
}

/// Manages the directory synthesized audio is written to.
pub struct AudioStore {
    output_dir: PathBuf,
}

impl AudioStore {
    /// Create a store writing to `audios` in the working directory.
    pub fn new() -> Self {
        Self::with_dir(PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    /// Create a store with a custom directory.
    pub fn with_dir(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Get the output directory path.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Validate an output filename.
    ///
    /// The name must be a single path component so the file always lands
    /// inside the output directory.
    pub fn validate_filename(name: &str) -> Result<(), StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidFilename(
                "Filename cannot be empty".to_string(),
            ));
        }

        if name == "." || name == ".." {
            return Err(StoreError::InvalidFilename(format!(
                "'{name}' is not a file name"
            )));
        }

        // Prevent path traversal
        if name.contains('/') || name.contains('\\') || name.contains('\0') {
            return Err(StoreError::InvalidFilename(format!(
                "'{name}' cannot contain path separators"
            )));
        }

        Ok(())
    }

    /// Get the file path for an output filename.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        Self::validate_filename(name)?;
        Ok(self.output_dir.join(name))
    }

    /// Make sure the output directory exists.
    ///
    /// An existing directory is left as is. Returns `true` if it was created.
    pub fn ensure_dir(&self) -> Result<bool, StoreError> {
        if self.output_dir.exists() {
            if !self.output_dir.is_dir() {
                return Err(StoreError::NotADirectory(self.output_dir.clone()));
            }
            return Ok(false);
        }

        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| StoreError::io(&self.output_dir, e))?;
        info!(dir = %self.output_dir.display(), "created output directory");

        Ok(true)
    }

    /// Write audio to `<output_dir>/<name>`, replacing any existing file.
    ///
    /// The directory must already exist; call [`AudioStore::ensure_dir`] first.
    pub fn save(&self, name: &str, audio: &[u8]) -> Result<SavedAudio, StoreError> {
        let path = self.path_for(name)?;

        std::fs::write(&path, audio).map_err(|e| StoreError::io(&path, e))?;
        debug!(path = %path.display(), bytes = audio.len(), "wrote audio");

        Ok(SavedAudio {
            path,
            size: audio.len() as u64,
        })
    }

    /// Delete regular files older than `max_age` from the output directory.
    ///
    /// Returns the removed paths. A missing directory has nothing to prune.
    pub fn prune_older_than(&self, max_age: Duration) -> Result<Vec<PathBuf>, StoreError> {
        if !self.output_dir.is_dir() {
            return Ok(Vec::new());
        }

        let now = SystemTime::now();
        let mut removed = Vec::new();

        let entries =
            std::fs::read_dir(&self.output_dir).map_err(|e| StoreError::io(&self.output_dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.output_dir, e))?;
            let path = entry.path();
            let metadata = entry.metadata().map_err(|e| StoreError::io(&path, e))?;

            if !metadata.is_file() {
                continue;
            }

            let Ok(modified) = metadata.modified() else {
                warn!(path = %path.display(), "no modification time, skipping");
                continue;
            };

            // Files stamped in the future count as fresh
            let age = now.duration_since(modified).unwrap_or_default();
            if age > max_age {
                std::fs::remove_file(&path).map_err(|e| StoreError::io(&path, e))?;
                info!(path = %path.display(), age_secs = age.as_secs(), "deleted stale audio");
                removed.push(path);
            }
        }

        Ok(removed)
    }
}

impl Default for AudioStore {
    fn default() -> Self {
        Self::new()
    }
}
