//! Crate-level error type
//!
//! Scheduling itself only fails with [`SchedulerError`]. Everything that
//! feeds the engine from outside (cadence and item documents on disk, the
//! reference time given on the command line) fails with [`Error`], which
//! keeps the offending path or value so the message points at the input to
//! fix.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use crate::scheduler::error::SchedulerError;

/// Which input document an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Cadence,
    Items,
}

impl InputKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cadence => "cadence",
            Self::Items => "items",
        }
    }
}

/// Errors from loading engine inputs
#[derive(Error, Debug)]
pub enum Error {
    /// Domain error from the scheduler, including cadence validation
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    /// Input file could not be read
    #[error("Failed to read {} file: {}", .kind.label(), .path.display())]
    Read {
        kind: InputKind,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input file is not the expected JSON shape
    #[error("Failed to parse {} file: {}", .kind.label(), .path.display())]
    Parse {
        kind: InputKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reference time is not an accepted timestamp
    #[error("Invalid reference time '{value}'")]
    InvalidTimestamp { value: String },
}

impl Error {
    pub fn read(kind: InputKind, path: &Path, source: io::Error) -> Self {
        Self::Read {
            kind,
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn parse(kind: InputKind, path: &Path, source: serde_json::Error) -> Self {
        Self::Parse {
            kind,
            path: path.to_path_buf(),
            source,
        }
    }

    /// True when the input was readable but describes an unusable cadence
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Scheduler(e) if e.is_configuration_error())
    }
}

/// Result type alias using the crate Error type
pub type Result<T> = std::result::Result<T, Error>;
