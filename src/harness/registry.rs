//! Named test sets.
//!
//! The registry turns the scanner's raw classes into one [`TestSet`] per
//! concrete class, keyed and sorted by name, so a single set can later be
//! executed by name. It is built at most once per suite.

use std::{collections::BTreeMap, sync::Arc};

use crate::{class::TestClass, error::TestSetFailed, order::RunOrderCalculator};

/// Decides which scanned classes are candidates at all.
pub trait ClassFilter {
    fn accept(&self, class: &TestClass) -> bool;
}

impl<F> ClassFilter for F
where
    F: Fn(&TestClass) -> bool,
{
    fn accept(&self, class: &TestClass) -> bool {
        self(class)
    }
}

#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct NonAbstractClassFilter;

impl ClassFilter for NonAbstractClassFilter {
    fn accept(&self, class: &TestClass) -> bool {
        !class.is_abstract
    }
}

/// The scanner's output, before filtering and ordering.
pub trait ScanResult {
    fn apply_filter(&self, filter: &dyn ClassFilter) -> Vec<Arc<TestClass>>;
}

impl ScanResult for [Arc<TestClass>] {
    fn apply_filter(&self, filter: &dyn ClassFilter) -> Vec<Arc<TestClass>> {
        self.iter()
            .filter(|class| filter.accept(class))
            .cloned()
            .collect()
    }
}

impl ScanResult for Vec<Arc<TestClass>> {
    fn apply_filter(&self, filter: &dyn ClassFilter) -> Vec<Arc<TestClass>> {
        self.as_slice().apply_filter(filter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSet {
    name: String,
    class: Arc<TestClass>,
}

impl TestSet {
    pub fn new(class: Arc<TestClass>) -> Self {
        Self {
            name: class.name.clone().into_owned(),
            class,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn test_class(&self) -> &Arc<TestClass> {
        &self.class
    }
}

pub type TestSets = BTreeMap<String, TestSet>;

#[derive(Debug, Default)]
pub struct TestSetRegistry {
    sets: Option<TestSets>,
}

impl TestSetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter, order and name the scanned classes.
    ///
    /// A duplicate name fails the whole build and leaves the registry unbuilt.
    ///
    /// # Panics
    ///
    /// If the registry was already built.
    pub fn build<S, O>(&mut self, scan: &S, order: &O) -> Result<&TestSets, TestSetFailed>
    where
        S: ScanResult + ?Sized,
        O: RunOrderCalculator + ?Sized,
    {
        assert!(self.sets.is_none(), "test sets can't be located twice");

        let scanned = scan.apply_filter(&NonAbstractClassFilter);
        let ordered = order.order_test_classes(scanned);

        let mut sets = TestSets::new();
        for class in ordered {
            let set = TestSet::new(class);
            if sets.contains_key(set.name()) {
                return Err(TestSetFailed::DuplicateTestSet {
                    name: set.name().to_owned(),
                });
            }
            sets.insert(set.name().to_owned(), set);
        }

        tracing::debug!(count = sets.len(), "located test sets");
        Ok(self.sets.insert(sets))
    }

    pub fn is_built(&self) -> bool {
        self.sets.is_some()
    }

    pub fn sets(&self) -> Option<&TestSets> {
        self.sets.as_ref()
    }
}
