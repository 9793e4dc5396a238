use std::path::PathBuf;
use std::time::Duration;

/// Failure of a single external tool invocation.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to execute {binary}: {source}")]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error
    },

    #[error("{binary} exited with code {code}: {stderr}")]
    Exited {
        binary: PathBuf,
        code: i32,
        stderr: String
    },

    #[error("{binary} timed out after {timeout:?}")]
    TimedOut { binary: PathBuf, timeout: Duration },

    #[error("{binary} was cancelled")]
    Cancelled { binary: PathBuf }
}

impl ProcessError {
    pub fn binary(&self) -> &PathBuf {
        match self {
            ProcessError::Spawn { binary, .. }
            | ProcessError::Exited { binary, .. }
            | ProcessError::TimedOut { binary, .. }
            | ProcessError::Cancelled { binary } => binary
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("fetch failed: {0}")]
    FetchFailed(#[source] ProcessError),

    #[error("conversion failed: {0}")]
    ConvertFailed(#[source] ProcessError),

    #[error("could not find downloaded file for template {template}")]
    OutputNotFound { template: PathBuf },

    #[error("invalid URL: {0:?}")]
    InvalidUrl(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error
    }
}

impl Error {
    /// The underlying process failure, if this error came from a tool run.
    pub fn process_error(&self) -> Option<&ProcessError> {
        match self {
            Error::FetchFailed(e) | Error::ConvertFailed(e) => Some(e),
            _ => None
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.process_error(), Some(ProcessError::Cancelled { .. }))
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self.process_error(), Some(ProcessError::TimedOut { .. }))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
