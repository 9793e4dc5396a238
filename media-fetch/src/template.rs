use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// yt-dlp's extension placeholder.
pub const EXT_PLACEHOLDER: &str = "%(ext)s";

/// Containers yt-dlp may produce for a merged video download, in probe order.
pub const VIDEO_EXTENSIONS: &[&str] = &["mkv", "mp4", "webm", "avi", "mov", "flv"];

/// Containers yt-dlp may produce for an audio-only download, in probe order.
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "webm", "m4a", "opus", "ogg", "mp3", "aac", "flac", "wav", "mp4", "mka"
];

/// Per-call output naming: `<kind>_<token>.<ext>` inside one directory.
///
/// The token is a UUIDv7, time-ordered with random low bits, so calls in the
/// same clock tick or from other processes never share a stem.
#[derive(Debug, Clone)]
pub struct OutputTemplate {
    dir: PathBuf,
    stem: String
}

impl OutputTemplate {
    pub fn new(dir: impl Into<PathBuf>, kind: &str) -> Self {
        Self {
            dir: dir.into(),
            stem: format!("{kind}_{}", uuid7::uuid7())
        }
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Path passed to yt-dlp's `-o`.
    pub fn template(&self) -> PathBuf {
        self.dir.join(format!("{}.{EXT_PLACEHOLDER}", self.stem))
    }

    pub fn with_extension(&self, ext: &str) -> PathBuf {
        self.dir.join(format!("{}.{ext}", self.stem))
    }

    /// Returns the first candidate that exists on disk with its extension.
    pub async fn probe(&self, candidates: &[&'static str]) -> Option<(PathBuf, &'static str)> {
        for &ext in candidates {
            let candidate = self.with_extension(ext);
            if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
                tracing::debug!(path = %candidate.display(), "found downloaded file");
                return Some((candidate, ext));
            }
        }
        None
    }

    /// Like [`probe`](Self::probe) but fails with `OutputNotFound`.
    pub async fn find_downloaded(&self, candidates: &[&'static str]) -> Result<(PathBuf, &'static str)> {
        self.probe(candidates)
            .await
            .ok_or_else(|| Error::OutputNotFound {
                template: self.template()
            })
    }
}

/// Deletes an intermediate file. Failures are logged, never returned.
pub async fn remove_intermediate(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(path = %path.display(), error = %e, "failed to remove intermediate file");
    }
}

pub fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source
    })
}
