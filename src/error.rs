//! Error types.
//!
//! Recoverable failures are returned as [`TestSetFailed`]. Misuse of the
//! orchestrator (building the registry twice, running a named set before
//! the registry exists) panics instead, those are programming errors and
//! nothing downstream can handle them.

use std::path::PathBuf;

/// A test set could not be set up or executed.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TestSetFailed {
    #[error("Unable to find test set '{name}' in suite")]
    UnknownTestSet { name: String },

    #[error("Duplicate test set '{name}'")]
    DuplicateTestSet { name: String },

    #[error("Engine failed running {classes:?} into {report_directory}: {message}")]
    Engine {
        classes: Vec<String>,
        report_directory: PathBuf,
        message: String,
    },

    #[error("suite completion could not be reported")]
    Report(#[from] ReportError),
}

impl TestSetFailed {
    /// Convenience for engines reporting a setup failure for a batch.
    pub fn engine(
        classes: impl IntoIterator<Item = impl Into<String>>,
        report_directory: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self::Engine {
            classes: classes.into_iter().map(Into::into).collect(),
            report_directory: report_directory.into(),
            message: message.into(),
        }
    }
}

/// A reporter could not accept an event.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("report stream closed")]
    Closed,

    #[error("could not write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// A selection pattern could not be compiled.
#[derive(Debug, thiserror::Error)]
#[error("invalid {kind} pattern '{pattern}'")]
pub struct SelectionError {
    pub kind: &'static str,
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}
