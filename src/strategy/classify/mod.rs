//! Framework classification.
//!
//! Every class is run by one of two engines: the native one, or the foreign
//! framework engine for classes written against the legacy marker supertype
//! or the annotation based API. Which markers exist depends on the
//! environment, so they are probed once through a [`TypeProbe`] when the
//! [`FrameworkClassifier`] is built. A marker that cannot be resolved simply
//! disables its branch of the classification.
//!
//! Implement [`TypeProbe`] to describe which marker types are present.

use serde::{Deserialize, Serialize};

use crate::class::{TestClass, TypeHandle};

mod known;
pub use known::*;

mod no;
pub use no::*;

pub const LEGACY_MARKER: &str = "junit.framework.Test";
pub const RUN_CONFIGURATION_ANNOTATION: &str = "org.junit.runner.RunWith";
pub const TEST_ANNOTATION: &str = "org.junit.Test";

/// The engine family a class belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameworkTag {
    Native,
    MarkerInterfaceLegacy,
    AnnotationBased,
}

impl FrameworkTag {
    pub fn is_foreign(self) -> bool {
        !matches!(self, FrameworkTag::Native)
    }
}

/// Resolves type names in the running environment.
pub trait TypeProbe {
    fn resolve(&self, name: &str) -> Option<TypeHandle>;
}

impl<F> TypeProbe for F
where
    F: Fn(&str) -> Option<TypeHandle>,
{
    fn resolve(&self, name: &str) -> Option<TypeHandle> {
        self(name)
    }
}

/// Names of the three probed marker types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerNames {
    pub legacy_supertype: String,
    pub run_configuration_annotation: String,
    pub test_annotation: String,
}

impl Default for MarkerNames {
    fn default() -> Self {
        Self {
            legacy_supertype: LEGACY_MARKER.to_owned(),
            run_configuration_annotation: RUN_CONFIGURATION_ANNOTATION.to_owned(),
            test_annotation: TEST_ANNOTATION.to_owned(),
        }
    }
}

/// Classifies classes against markers resolved once at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameworkClassifier {
    legacy_supertype: Option<TypeHandle>,
    run_configuration: Option<TypeHandle>,
    test_annotation: Option<TypeHandle>,
}

impl FrameworkClassifier {
    pub fn probe<P: TypeProbe + ?Sized>(probe: &P, markers: &MarkerNames) -> Self {
        let resolve = |name: &str| {
            let handle = probe.resolve(name);
            if handle.is_none() {
                tracing::debug!(marker = name, "marker type not present, branch disabled");
            }
            handle
        };

        Self {
            legacy_supertype: resolve(&markers.legacy_supertype),
            run_configuration: resolve(&markers.run_configuration_annotation),
            test_annotation: resolve(&markers.test_annotation),
        }
    }

    /// Annotation checks come before the supertype check, so a class that
    /// qualifies for both is [`FrameworkTag::AnnotationBased`].
    pub fn classify(&self, class: &TestClass) -> FrameworkTag {
        if self.is_annotation_based(class) {
            return FrameworkTag::AnnotationBased;
        }
        if self.is_legacy(class) {
            return FrameworkTag::MarkerInterfaceLegacy;
        }
        FrameworkTag::Native
    }

    pub fn is_foreign(&self, class: &TestClass) -> bool {
        self.classify(class).is_foreign()
    }

    fn is_annotation_based(&self, class: &TestClass) -> bool {
        let run_configured = self
            .run_configuration
            .as_ref()
            .is_some_and(|handle| class.has_annotation(handle));

        run_configured
            || self
                .test_annotation
                .as_ref()
                .is_some_and(|handle| class.has_method_annotated(handle))
    }

    fn is_legacy(&self, class: &TestClass) -> bool {
        self.legacy_supertype
            .as_ref()
            .is_some_and(|handle| class.is_subtype_of(handle))
    }
}
