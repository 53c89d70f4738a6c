//! Store error types.

use std::path::PathBuf;

/// Errors from the flights file store.
///
/// Malformed *lines* are not errors: load is best-effort and skips them
/// with a log. These variants cover whole-file failures only.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The flights file could not be read.
    #[error("failed to read flights file {path}: {source}")]
    Read {
        /// Path to the flights file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The flights file could not be written.
    #[error("failed to write flights file {path}: {source}")]
    Write {
        /// Path to the flights file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}
