//! Reporter collaborators.
//!
//! The orchestrator never formats anything. It emits suite lifecycle events
//! to a [`RunListener`] and routes captured console output to a
//! [`ConsoleOutputReceiver`]. Engines use the same reporter for their per
//! test entries. Reporters are shared between the orchestrator, the output
//! capture and the engine, so every method takes `&self`.

use std::{borrow::Cow, sync::Arc};

use crate::error::ReportError;

/// A report event, either for a whole suite or a single test.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportEntry {
    /// The reporting source, the suite type for suite events.
    pub source: Cow<'static, str>,
    pub name: Cow<'static, str>,
}

impl ReportEntry {
    pub fn new(source: impl Into<Cow<'static, str>>, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TestStatus {
    Succeeded,
    Failed { message: String },
    Skipped { reason: Option<String> },
}

pub trait RunListener {
    fn test_set_starting(&self, entry: &ReportEntry) -> Result<(), ReportError>;

    fn test_set_completed(&self, entry: &ReportEntry) -> Result<(), ReportError>;

    /// Called by engines once per executed test.
    fn test_reported(&self, entry: &ReportEntry, status: &TestStatus) -> Result<(), ReportError> {
        let _ = (entry, status);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

pub trait ConsoleOutputReceiver {
    fn write_test_output(&self, output: &[u8], stream: OutputStream);
}

/// A listener that also accepts captured console output.
pub trait Reporter: RunListener + ConsoleOutputReceiver {}

impl<T> Reporter for T where T: RunListener + ConsoleOutputReceiver {}

/// Creates one reporter per dispatched batch.
pub trait ReporterFactory {
    type Reporter: Reporter + 'static;

    fn create_reporter(&self) -> Arc<Self::Reporter>;
}

impl<F, R> ReporterFactory for F
where
    F: Fn() -> Arc<R>,
    R: Reporter + 'static,
{
    type Reporter = R;

    fn create_reporter(&self) -> Arc<Self::Reporter> {
        self()
    }
}
