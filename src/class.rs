//! Descriptors for discovered test classes.
//!
//! A [`TestClass`] carries everything the orchestrator needs to know about a
//! scanned class: its name, whether it is abstract, which types it can be
//! assigned to and which annotations it and its callable members carry.
//! Scanners build these once; the orchestrator only ever borrows them.

use std::borrow::Cow;

/// Suffix of compiled test artifacts, appended to the slash separated class path.
pub const TEST_ARTIFACT_SUFFIX: &str = ".class";

/// A resolved type, either a supertype or an annotation type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeHandle {
    pub name: Cow<'static, str>,
}

impl TypeHandle {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&'static str> for TypeHandle {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: Cow<'static, str>,
    pub annotations: Vec<Cow<'static, str>>,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<Cow<'static, str>>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn has_annotation(&self, handle: &TypeHandle) -> bool {
        self.annotations.iter().any(|a| *a == handle.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct TestClass {
    /// Fully qualified, dot separated name.
    pub name: Cow<'static, str>,
    pub is_abstract: bool,
    /// Every type this class is assignable to, transitively.
    pub supertypes: Vec<Cow<'static, str>>,
    pub annotations: Vec<Cow<'static, str>>,
    pub methods: Vec<MethodDescriptor>,
}

impl TestClass {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_abstract(self, is_abstract: bool) -> Self {
        Self {
            is_abstract,
            ..self
        }
    }

    pub fn with_supertype(mut self, supertype: impl Into<Cow<'static, str>>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<Cow<'static, str>>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    pub fn is_subtype_of(&self, handle: &TypeHandle) -> bool {
        self.name == handle.name || self.supertypes.iter().any(|s| *s == handle.name)
    }

    pub fn has_annotation(&self, handle: &TypeHandle) -> bool {
        self.annotations.iter().any(|a| *a == handle.name)
    }

    /// Whether any callable member carries `handle`.
    pub fn has_method_annotated(&self, handle: &TypeHandle) -> bool {
        self.methods.iter().any(|m| m.has_annotation(handle))
    }

    /// The compiled artifact name, e.g. `com/acme/FooTest.class`.
    pub fn file_name(&self) -> String {
        artifact_name(&self.name)
    }
}

pub fn artifact_name(class_name: &str) -> String {
    let mut file = class_name.replace('.', "/");
    file.push_str(TEST_ARTIFACT_SUFFIX);
    file
}
