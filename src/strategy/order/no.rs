use std::sync::Arc;

use crate::{class::TestClass, order::RunOrderCalculator};

/// Keeps classes in the order the scanner found them.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct ScanOrder;

impl RunOrderCalculator for ScanOrder {
    fn order_test_classes(&self, classes: Vec<Arc<TestClass>>) -> Vec<Arc<TestClass>> {
        classes
    }
}
