use crate::{class::TypeHandle, classify::TypeProbe};

/// A [`TypeProbe`] for environments without any foreign framework.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct NoTypes;

impl TypeProbe for NoTypes {
    fn resolve(&self, _: &str) -> Option<TypeHandle> {
        None
    }
}
