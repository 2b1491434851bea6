//! Classification and dispatch of discovered test classes.
//!
//! A [`DirectoryTestSuite`] takes classes produced by an external scanner,
//! decides per class which execution engine owns it, groups them into
//! reporting batches and brackets each batch with suite lifecycle events.
//! Engines receive a [`SelectionPredicate`](filter::SelectionPredicate) so
//! they can drop individual test methods themselves.

pub mod capture;
pub mod class;
pub mod error;
pub mod options;
pub mod report;
pub mod tests_to_run;

mod strategy;
pub use strategy::*;

mod harness;
pub use harness::*;

#[cfg(test)]
pub(crate) mod test_support;
