//! Error types for the packaging pipeline.
//!
//! All fatal conditions surface through [`Error`]; phases never retry or
//! degrade silently. Missing or empty asset trees are not errors and are
//! handled by the emitters themselves.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for packaging operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for all packaging operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors without path context.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// IO errors annotated with the action and path that failed.
    #[error("{action} {}: {source}", path.display())]
    Fs {
        /// What the pipeline was doing, e.g. "reading asset".
        action: String,
        /// Path the action was applied to.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// JSON parse or serialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Zip archive construction errors.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Directory traversal errors.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Path prefix stripping errors during traversal.
    #[error("path prefix error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// A required bundle artifact was absent when the rewrite phase began.
    #[error("{artifact} not found in {}", dir.display())]
    MissingArtifact {
        /// File name of the missing artifact (e.g. "manifest.json").
        artifact: String,
        /// Output directory that was searched.
        dir: PathBuf,
    },

    /// A pipeline step was invoked out of phase order.
    #[error("pipeline is at phase {actual}, step requires phase {expected}")]
    PhaseOrder {
        /// Phase the step must be entered from.
        expected: &'static str,
        /// Phase the pipeline is actually at.
        actual: &'static str,
    },

    /// Generic errors with a formatted message.
    #[error("{0}")]
    Generic(String),

    /// Generic errors from anyhow.
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Extension trait for attaching a plain message to `Option` and `Result`.
pub trait Context<T> {
    /// Converts `None` / `Err` into [`Error::Generic`] with `message`.
    fn context(self, message: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, message: &str) -> Result<T> {
        self.ok_or_else(|| Error::Generic(message.to_string()))
    }
}

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, message: &str) -> Result<T> {
        self.map_err(|err| Error::Generic(format!("{message}: {}", err.into())))
    }
}

/// Extension trait for attaching filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wraps an IO error with the action being performed and the path involved.
    fn fs_context(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Fs {
            action: action.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns early with an [`Error::Generic`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::error::Error::Generic(format!($($arg)*)))
    };
}
