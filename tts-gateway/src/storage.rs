//! Per-request audio files.
//!
//! Every synthesis writes to a freshly named `audio_<uuid>.<ext>` file inside
//! the configured output directory. The file is owned by an [`AudioFile`]
//! guard: dropping the guard deletes the file, so anything that fails midway
//! cleans up after itself. On success the file is read back and either
//! deleted or, when retention is enabled, kept in place.

use std::path::{Path, PathBuf};

use tempfile::TempPath;
use tracing::{debug, info, warn};
use tts_gateway_common::config::AudioConfig;
use tts_gateway_common::error::Error;
use uuid::Uuid;

use crate::handler::SynthesizedAudio;

/// Allocates and finalizes per-request audio files.
#[derive(Debug, Clone)]
pub struct AudioStore {
    dir: PathBuf,
    retain: bool,
}

/// A not-yet-finalized audio file, deleted when dropped.
#[derive(Debug)]
pub struct AudioFile {
    path: TempPath,
}

impl AudioStore {
    /// Create a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>, retain: bool) -> Self {
        Self {
            dir: dir.into(),
            retain,
        }
    }

    /// Create a store from the audio configuration.
    pub fn from_config(config: &AudioConfig) -> Self {
        Self::new(&config.output_dir, config.retain_files)
    }

    /// Reserve a unique path with the given extension.
    ///
    /// The file itself is not created; the caller (or a subprocess) writes it.
    pub async fn allocate(&self, extension: &str) -> Result<AudioFile, Error> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self
            .dir
            .join(format!("audio_{}.{}", Uuid::new_v4().simple(), extension));
        debug!(path = %path.display(), "Allocated audio file");

        Ok(AudioFile {
            path: TempPath::from_path(path),
        })
    }

    /// Read the finished file and release or retain it.
    pub async fn finish(
        &self,
        file: AudioFile,
        mime_type: &'static str,
        file_name: &'static str,
    ) -> Result<SynthesizedAudio, Error> {
        let data = tokio::fs::read(file.path()).await?;

        let retained_path = if self.retain {
            match file.path.keep() {
                Ok(path) => {
                    info!(path = %path.display(), bytes = data.len(), "Retained audio file");
                    Some(path)
                }
                Err(e) => {
                    warn!(error = %e, "Failed to retain audio file");
                    None
                }
            }
        } else {
            // Dropping the guard removes the file
            drop(file);
            None
        };

        Ok(SynthesizedAudio {
            data,
            mime_type,
            file_name,
            retained_path,
        })
    }
}

impl AudioFile {
    /// Path of the file on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
