use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{class::TestClass, classify::FrameworkClassifier, tests_to_run::TestsToRun};

pub const NATIVE_RESULTS_DIR: &str = "native-results";
pub const FOREIGN_RESULTS_DIR: &str = "foreign-results";

/// How one `execute` call dispatches its classes. Decided once per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// One batch per class, in source order, for sources that cannot be sized.
    LazyStreamed,
    EagerSingle,
    /// All classes under one suite, split by engine.
    EagerMulti,
}

impl ExecutionStrategy {
    /// `None` for an empty eager source, there is nothing to dispatch.
    pub fn select(tests: &TestsToRun) -> Option<Self> {
        if !tests.allow_eager_reading() {
            Some(Self::LazyStreamed)
        } else if tests.contains_at_least(2) {
            Some(Self::EagerMulti)
        } else if tests.contains_at_least(1) {
            Some(Self::EagerSingle)
        } else {
            None
        }
    }
}

/// Classes split by the engine that runs them, relative order kept.
#[derive(Debug, Default)]
pub(crate) struct Partition {
    pub(crate) native: Vec<Arc<TestClass>>,
    pub(crate) foreign: Vec<Arc<TestClass>>,
}

impl Partition {
    pub(crate) fn split(
        classes: impl IntoIterator<Item = Arc<TestClass>>,
        classifier: &FrameworkClassifier,
    ) -> Self {
        let (foreign, native) = classes
            .into_iter()
            .partition(|class| classifier.is_foreign(class));
        Self { native, foreign }
    }

    /// Both engines write reports, so each gets its own directory.
    pub(crate) fn needs_split_reports(&self) -> bool {
        !self.native.is_empty() && !self.foreign.is_empty()
    }

    /// `(native, foreign)` report directories below `reports`.
    pub(crate) fn report_directories(&self, reports: &Path) -> (PathBuf, PathBuf) {
        match self.needs_split_reports() {
            true => (
                reports.join(NATIVE_RESULTS_DIR),
                reports.join(FOREIGN_RESULTS_DIR),
            ),
            false => (reports.to_path_buf(), reports.to_path_buf()),
        }
    }
}
