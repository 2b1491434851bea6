//! Run ordering.
//!
//! The registry asks a [`RunOrderCalculator`] to reorder scanned classes
//! before it names them. Ordering policy lives outside this crate, plug one in
//! through the trait or a closure.

use std::sync::Arc;

use crate::class::TestClass;

mod no;
pub use no::*;

pub trait RunOrderCalculator {
    fn order_test_classes(&self, classes: Vec<Arc<TestClass>>) -> Vec<Arc<TestClass>>;
}

impl<F> RunOrderCalculator for F
where
    F: Fn(Vec<Arc<TestClass>>) -> Vec<Arc<TestClass>>,
{
    fn order_test_classes(&self, classes: Vec<Arc<TestClass>>) -> Vec<Arc<TestClass>> {
        self(classes)
    }
}
