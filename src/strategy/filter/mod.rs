//! Test selection.
//!
//! A selection request narrows a run down to matching classes and, within
//! them, matching methods. The orchestrator does not filter anything itself,
//! it hands a [`SelectionPredicate`] to every engine call and the engine asks
//! it per test descriptor.
//!
//! Class patterns are matched against compiled artifact names
//! (`com/acme/FooTest.class`), not source names. Both class and method
//! patterns accept globs (`*`, `**`, `?`) or a full regular expression
//! written as `%regex[...]`.

use std::fmt::{self, Display};

use crate::{class::artifact_name, error::SelectionError};

mod pattern;
use pattern::Pattern;

/// Blank patterns are treated as absent.
fn given(pattern: Option<&str>) -> Option<&str> {
    pattern.filter(|p| !p.trim().is_empty())
}

/// A class pattern and a method pattern, either of which may be absent.
///
/// An absent pattern matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TestSelectionRequest {
    class_pattern: Option<Pattern>,
    method_pattern: Option<Pattern>,
}

impl TestSelectionRequest {
    pub fn new(
        class_pattern: Option<&str>,
        method_pattern: Option<&str>,
    ) -> Result<Self, SelectionError> {
        Ok(Self {
            class_pattern: given(class_pattern).map(Pattern::class).transpose()?,
            method_pattern: given(method_pattern).map(Pattern::method).transpose()?,
        })
    }

    /// Select everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Parse a `Class#method` request. Empty halves count as absent.
    pub fn parse(request: &str) -> Result<Self, SelectionError> {
        let (class, method) = match request.split_once('#') {
            Some((class, method)) => (class, Some(method)),
            None => (request, None),
        };
        let non_empty = |s: &str| -> Option<String> {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_owned())
        };
        Self::new(
            non_empty(class).as_deref(),
            method.and_then(non_empty).as_deref(),
        )
    }

    pub fn class_pattern(&self) -> Option<&str> {
        self.class_pattern.as_ref().map(Pattern::as_str)
    }

    pub fn method_pattern(&self) -> Option<&str> {
        self.method_pattern.as_ref().map(Pattern::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.class_pattern.is_none() && self.method_pattern.is_none()
    }

    /// Match an artifact name (`com/acme/FooTest.class`) and a method name.
    ///
    /// A missing candidate side is not held against the request, a class
    /// level descriptor without a method still runs if its class matches.
    pub fn should_run(&self, class_file: Option<&str>, method_name: Option<&str>) -> bool {
        let class_matches = match (&self.class_pattern, class_file) {
            (Some(pattern), Some(class_file)) => pattern.is_match(class_file),
            _ => true,
        };
        let method_matches = match (&self.method_pattern, method_name) {
            (Some(pattern), Some(method_name)) => pattern.is_match(method_name),
            _ => true,
        };
        class_matches && method_matches
    }

    /// `classPattern#methodPattern`, or `*` if both are absent.
    pub fn describe(&self) -> String {
        let mut description = self.class_pattern().unwrap_or_default().to_owned();
        if let Some(method) = self.method_pattern() {
            description.push('#');
            description.push_str(method);
        }
        match description.is_empty() {
            true => "*".to_owned(),
            false => description,
        }
    }
}

impl Display for TestSelectionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Decides per test descriptor whether an engine should run it.
///
/// Two predicates are equal iff their requests are, engines rely on that to
/// deduplicate filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SelectionPredicate {
    request: TestSelectionRequest,
}

impl SelectionPredicate {
    pub fn new(request: TestSelectionRequest) -> Self {
        Self { request }
    }

    pub fn request(&self) -> &TestSelectionRequest {
        &self.request
    }

    /// `class_name` is the dotted class name, `method_name` absent for class
    /// level descriptors. A descriptor with neither (a suite container) always
    /// runs.
    pub fn should_run(&self, class_name: Option<&str>, method_name: Option<&str>) -> bool {
        if class_name.is_none() && method_name.is_none() {
            return true;
        }
        let class_file = class_name.map(artifact_name);
        self.request.should_run(class_file.as_deref(), method_name)
    }

    pub fn describe(&self) -> String {
        self.request.describe()
    }
}

impl From<TestSelectionRequest> for SelectionPredicate {
    fn from(request: TestSelectionRequest) -> Self {
        Self::new(request)
    }
}

impl Display for SelectionPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.request, f)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::hash_map::DefaultHasher,
        hash::{Hash, Hasher},
    };

    use super::*;

    fn predicate(class: Option<&str>, method: Option<&str>) -> SelectionPredicate {
        TestSelectionRequest::new(class, method).unwrap().into()
    }

    fn hash_of(value: &impl Hash) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn empty_request_runs_everything() {
        let all = SelectionPredicate::default();

        assert!(all.should_run(Some("com.acme.FooTest"), Some("works")));
        assert!(all.should_run(Some("com.acme.FooTest"), None));
        assert!(all.should_run(None, Some("works")));
    }

    #[test]
    fn container_descriptors_always_run() {
        let narrow = predicate(Some("NothingMatches"), Some("nope"));
        assert!(narrow.should_run(None, None));
    }

    #[test]
    fn class_and_method_patterns_are_combined() {
        let p = predicate(Some("com.acme.Foo*"), Some("login*"));

        assert!(p.should_run(Some("com.acme.FooTest"), Some("loginWorks")));
        assert!(!p.should_run(Some("com.acme.FooTest"), Some("logout")));
        assert!(!p.should_run(Some("com.acme.BarTest"), Some("loginWorks")));
        assert!(p.should_run(Some("com.acme.FooTest"), None));
    }

    #[test]
    fn class_pattern_matches_artifact_name() {
        let p = predicate(Some("%regex[com/acme/.*Test\\.class]"), None);

        assert!(p.should_run(Some("com.acme.FooTest"), Some("any")));
        assert!(!p.should_run(Some("org.acme.FooTest"), Some("any")));
    }

    #[test]
    fn describe_formats() {
        assert_eq!(predicate(None, None).describe(), "*");
        assert_eq!(predicate(Some("FooTest"), None).describe(), "FooTest");
        assert_eq!(predicate(Some("FooTest"), Some("bar*")).describe(), "FooTest#bar*");
        assert_eq!(predicate(None, Some("bar")).describe(), "#bar");
        assert_eq!(predicate(Some("FooTest"), Some("bar")).to_string(), "FooTest#bar");
    }

    #[test]
    fn blank_patterns_count_as_absent() {
        let request = TestSelectionRequest::new(Some(""), Some(" ")).unwrap();
        assert_eq!(request, TestSelectionRequest::all());
        assert_eq!(request.describe(), "*");

        let p = predicate(Some(""), None);
        assert_eq!(p, SelectionPredicate::default());
        assert!(p.should_run(Some("com.acme.FooTest"), Some("works")));
    }

    #[test]
    fn parse_splits_class_and_method() {
        let request = TestSelectionRequest::parse("FooTest#bar*").unwrap();
        assert_eq!(request.class_pattern(), Some("FooTest"));
        assert_eq!(request.method_pattern(), Some("bar*"));

        let request = TestSelectionRequest::parse("#bar").unwrap();
        assert_eq!(request.class_pattern(), None);
        assert_eq!(request.method_pattern(), Some("bar"));

        assert!(TestSelectionRequest::parse("").unwrap().is_empty());
    }

    #[test]
    fn equality_follows_request() {
        let a = predicate(Some("FooTest"), Some("bar"));
        let b = predicate(Some("FooTest"), Some("bar"));
        let c = predicate(Some("FooTest"), None);

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, c);
        assert_ne!(predicate(None, None), c);
    }
}
