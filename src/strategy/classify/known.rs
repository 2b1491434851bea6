use std::{borrow::Cow, collections::BTreeSet};

use crate::{
    class::TypeHandle,
    classify::{LEGACY_MARKER, RUN_CONFIGURATION_ANNOTATION, TEST_ANNOTATION, TypeProbe},
};

/// A [`TypeProbe`] backed by a fixed set of type names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownTypes(BTreeSet<Cow<'static, str>>);

impl KnownTypes {
    pub fn new(names: impl IntoIterator<Item = impl Into<Cow<'static, str>>>) -> Self {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// An environment where every default marker is present.
    pub fn all_markers() -> Self {
        Self::new([LEGACY_MARKER, RUN_CONFIGURATION_ANNOTATION, TEST_ANNOTATION])
    }

    pub fn with_type(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.0.insert(name.into());
        self
    }
}

impl TypeProbe for KnownTypes {
    fn resolve(&self, name: &str) -> Option<TypeHandle> {
        self.0.get(name).map(|name| TypeHandle::new(name.clone()))
    }
}
