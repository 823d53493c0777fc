use derive_new::new;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal comparison errors.
///
/// Anything here aborts the run before (or instead of) traversal; per-file
/// failures are reported as [`IoWarning`]s and never interrupt a run.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("invalid comparison root {}: {reason}", path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("a comparison is already running")]
    AlreadyRunning,

    #[error("comparison task failed: {0}")]
    Background(String),
}

impl CompareError {
    pub fn invalid_root(path: &std::path::Path, reason: impl ToString) -> Self {
        CompareError::InvalidRoot {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// A single file's read, hash or decode failed.
///
/// Recoverable: the file is surfaced to the caller as a warning and excluded
/// from further processing while the rest of the run continues.
#[derive(Debug, Clone, PartialEq, Eq, Error, new)]
#[error("{}: {message}", path.display())]
pub struct IoWarning {
    pub path: PathBuf,
    pub message: String,
}
