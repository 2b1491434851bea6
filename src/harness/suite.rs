//! Suite lifecycle events.
//!
//! Every dispatched batch is bracketed by a suite-starting and a
//! suite-completed event. Starting is best effort: a reporter that cannot
//! take the event must not keep tests from running. Completion is not, a
//! failure there means the result stream is broken and is returned.

use crate::{
    error::ReportError,
    options::OptionSet,
    report::{ReportEntry, RunListener},
};

/// A suite that can name itself in report events.
pub trait NameableSuite {
    /// The reporting source, usually the suite type.
    fn suite_type(&self) -> &str;

    fn suite_name(&self) -> &str;
}

/// The suite as seen by one dispatch, named by that dispatch's options.
#[derive(Debug, Clone, Copy)]
pub struct SuiteRun<'a> {
    suite_type: &'a str,
    options: &'a OptionSet,
}

impl<'a> SuiteRun<'a> {
    pub fn new(suite_type: &'a str, options: &'a OptionSet) -> Self {
        Self {
            suite_type,
            options,
        }
    }
}

impl NameableSuite for SuiteRun<'_> {
    fn suite_type(&self) -> &str {
        self.suite_type
    }

    fn suite_name(&self) -> &str {
        self.options.suite_name()
    }
}

fn suite_entry(suite: &dyn NameableSuite) -> ReportEntry {
    ReportEntry::new(suite.suite_type().to_owned(), suite.suite_name().to_owned())
}

pub fn start_suite(reporter: &dyn RunListener, suite: &dyn NameableSuite) {
    let entry = suite_entry(suite);
    if let Err(err) = reporter.test_set_starting(&entry) {
        tracing::warn!(suite = %entry.name, error = %err, "could not report suite start");
    }
}

pub fn finish_suite(reporter: &dyn RunListener, suite: &dyn NameableSuite) -> Result<(), ReportError> {
    reporter.test_set_completed(&suite_entry(suite))
}
