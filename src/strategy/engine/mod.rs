//! The execution engine seam.
//!
//! Engines do the actual test running. The orchestrator hands them one
//! [`ExecutionBatch`] at a time, sequentially, together with the batch
//! reporter and the suite the batch belongs to. An engine owns the reporter
//! exclusively for the duration of its call.

use std::{path::Path, sync::Arc};

use crate::{
    class::TestClass, error::TestSetFailed, filter::SelectionPredicate, options::OptionSet,
    report::Reporter, suite::NameableSuite,
};

/// Classes sharing one execution path, and where and how to run them.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct ExecutionBatch<'a> {
    pub classes: &'a [Arc<TestClass>],
    pub source_directory: &'a Path,
    pub options: &'a OptionSet,
    pub report_directory: &'a Path,
    /// Engines consult this per test to drop unselected methods.
    pub selection: &'a SelectionPredicate,
}

impl ExecutionBatch<'_> {
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|class| &*class.name)
    }
}

pub trait ExecutionEngine {
    /// Run every class of `batch` to completion.
    ///
    /// Setup problems are returned as [`TestSetFailed`], test failures are
    /// reported through `reporter` and are not errors.
    fn run(
        &self,
        batch: ExecutionBatch<'_>,
        reporter: &dyn Reporter,
        suite: &dyn NameableSuite,
    ) -> Result<(), TestSetFailed>;
}

impl<E: ExecutionEngine + ?Sized> ExecutionEngine for Arc<E> {
    fn run(
        &self,
        batch: ExecutionBatch<'_>,
        reporter: &dyn Reporter,
        suite: &dyn NameableSuite,
    ) -> Result<(), TestSetFailed> {
        E::run(self, batch, reporter, suite)
    }
}
