//! The classes handed to the orchestrator for one run.
//!
//! Scanners either hand over a fully materialized list ([`TestsToRun::Eager`])
//! or stream classes while they are still being discovered
//! ([`TestsToRun::Lazy`]). Only eager sources can be sized, which is what the
//! orchestrator uses to pick an execution strategy.

use std::{fmt::Debug, sync::Arc};

use crossbeam_channel::Receiver;

use crate::class::TestClass;

pub type LazyClasses = Box<dyn Iterator<Item = Arc<TestClass>> + Send>;

pub enum TestsToRun {
    Eager(Vec<Arc<TestClass>>),
    Lazy(LazyClasses),
}

impl TestsToRun {
    pub fn eager(classes: impl IntoIterator<Item = impl Into<Arc<TestClass>>>) -> Self {
        Self::Eager(classes.into_iter().map(Into::into).collect())
    }

    pub fn lazy<I>(classes: I) -> Self
    where
        I: IntoIterator<Item = Arc<TestClass>>,
        I::IntoIter: Send + 'static,
    {
        Self::Lazy(Box::new(classes.into_iter()))
    }

    /// Stream classes from a scanner running elsewhere.
    ///
    /// Iteration ends once every sender is dropped.
    pub fn from_channel(receiver: Receiver<Arc<TestClass>>) -> Self {
        Self::Lazy(Box::new(receiver.into_iter()))
    }

    pub fn allow_eager_reading(&self) -> bool {
        matches!(self, Self::Eager(_))
    }

    /// Whether the source holds at least `n` classes.
    ///
    /// Lazy sources cannot answer this without consuming themselves and
    /// always return `false`.
    pub fn contains_at_least(&self, n: usize) -> bool {
        match self {
            Self::Eager(classes) => classes.len() >= n,
            Self::Lazy(_) => false,
        }
    }
}

impl Debug for TestsToRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eager(classes) => f.debug_tuple("Eager").field(classes).finish(),
            Self::Lazy(_) => write!(f, "Lazy(...)"),
        }
    }
}

impl IntoIterator for TestsToRun {
    type Item = Arc<TestClass>;
    type IntoIter = LazyClasses;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            Self::Eager(classes) => Box::new(classes.into_iter()),
            Self::Lazy(classes) => classes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eager_sources_are_sized() {
        let tests = TestsToRun::eager([TestClass::new("A"), TestClass::new("B")]);

        assert!(tests.allow_eager_reading());
        assert!(tests.contains_at_least(2));
        assert!(!tests.contains_at_least(3));
    }

    #[test]
    fn channel_sources_are_lazy_and_keep_order() {
        let (tx, rx) = crossbeam_channel::unbounded();
        for name in ["A", "B", "C"] {
            tx.send(Arc::new(TestClass::new(name))).unwrap();
        }
        drop(tx);

        let tests = TestsToRun::from_channel(rx);
        assert!(!tests.allow_eager_reading());
        assert!(!tests.contains_at_least(1));

        let names: Vec<_> = tests.into_iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }
}
