// src/error.rs
// =============================================================================
// Typed errors for everything below main.rs.
//
// Every failure in this tool falls into one of four kinds:
// - Configuration: a required flag or the GITHUB_TOKEN is missing/invalid
// - NotFound: the --path scope does not exist in the repository tree
// - Transport: any network or HTTP failure (listing or download)
// - Filesystem: creating directories, creating files, or writing to them
//
// Two wrapper variants carry extra context without changing the kind:
// - Task: names the file whose download failed
// - Combined: a primary error plus an error from cleaning up afterwards
//
// Rust concepts:
// - thiserror: derives Display and std::error::Error for our enum
// - Box<Error>: lets an enum variant contain the enum itself (recursion)
// =============================================================================

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

// Shorthand used by every module in the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Configuration(String),

    #[error("can not find {path} in repo")]
    NotFound { path: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("failed to {action} {}: {source}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path}: {source}")]
    Task {
        path: String,
        #[source]
        source: Box<Error>,
    },

    #[error("{primary} (and then: {cleanup})")]
    Combined {
        primary: Box<Error>,
        cleanup: Box<Error>,
    },
}

/// The four failure kinds, with the wrapper variants looked through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    NotFound,
    Transport,
    Filesystem,
}

impl Error {
    pub fn filesystem(action: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Filesystem {
            action,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wraps this error with the relative path of the task that failed.
    pub fn for_task(self, path: impl Into<String>) -> Self {
        Self::Task {
            path: path.into(),
            source: Box::new(self),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Filesystem { .. } => ErrorKind::Filesystem,
            Self::Task { source, .. } => source.kind(),
            // The primary error is what the user was trying to do
            Self::Combined { primary, .. } => primary.kind(),
        }
    }
}

// Merges the result of an operation with the result of cleaning up after it
//
// Neither error is dropped:
//   Ok + Ok     -> the operation's value
//   Ok + Err    -> the cleanup error
//   Err + Ok    -> the operation's error
//   Err + Err   -> Error::Combined holding both
pub fn combine<T>(primary: Result<T>, cleanup: Result<()>) -> Result<T> {
    match (primary, cleanup) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(cleanup)) => Err(cleanup),
        (Err(primary), Ok(())) => Err(primary),
        (Err(primary), Err(cleanup)) => Err(Error::Combined {
            primary: Box::new(primary),
            cleanup: Box::new(cleanup),
        }),
    }
}
