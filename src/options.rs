//! Configuration handed to the orchestrator and threaded to each engine call.

use std::{collections::BTreeMap, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::classify::MarkerNames;

/// Suite name used when neither the configuration nor the dispatch provides one.
pub const DEFAULT_SUITE_NAME: &str = "TestSuite";

/// Engine options for one dispatched batch.
///
/// Values are never mutated in place once an orchestrator holds them; per
/// call adjustments go through [`OptionSet::with_suite_name`] on a copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionSet {
    pub suite_name: Option<String>,
    /// Asks the engine to run the batch in foreign framework mode.
    pub foreign_framework: bool,
    /// Engine specific options passed through untouched.
    pub extra: BTreeMap<String, String>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suite_name(self, suite_name: impl Into<String>) -> Self {
        Self {
            suite_name: Some(suite_name.into()),
            ..self
        }
    }

    pub fn with_foreign_framework(self, foreign_framework: bool) -> Self {
        Self {
            foreign_framework,
            ..self
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn suite_name(&self) -> &str {
        self.suite_name.as_deref().unwrap_or(DEFAULT_SUITE_NAME)
    }

    /// Copy of these options with foreign framework mode switched on.
    pub fn foreign(&self) -> Self {
        self.clone().with_foreign_framework(true)
    }
}

/// Everything a [`DirectoryTestSuite`](crate::DirectoryTestSuite) is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    pub test_source_directory: PathBuf,
    pub reports_directory: PathBuf,
    pub options: OptionSet,
    pub markers: MarkerNames,
}

impl SuiteConfig {
    pub fn new(
        test_source_directory: impl Into<PathBuf>,
        reports_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            test_source_directory: test_source_directory.into(),
            reports_directory: reports_directory.into(),
            ..Default::default()
        }
    }

    pub fn with_options(self, options: OptionSet) -> Self {
        Self { options, ..self }
    }

    pub fn with_markers(self, markers: MarkerNames) -> Self {
        Self { markers, ..self }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn suite_name_falls_back_to_placeholder() {
        assert_eq!(OptionSet::new().suite_name(), DEFAULT_SUITE_NAME);
        assert_eq!(OptionSet::new().with_suite_name("Smoke").suite_name(), "Smoke");
    }

    #[test]
    fn foreign_copy_leaves_base_options_untouched() {
        let options = OptionSet::new().with_extra("parallel", "methods");
        let foreign = options.foreign();

        assert!(!options.foreign_framework);
        assert!(foreign.foreign_framework);
        assert_eq!(foreign.extra, options.extra);
    }

    #[test]
    fn partial_config_deserializes_with_defaults() {
        let config: SuiteConfig = serde_json::from_str(
            r#"{
                "reports_directory": "target/reports",
                "options": { "suite_name": "Nightly", "extra": { "threads": "4" } }
            }"#,
        )
        .unwrap();

        assert_eq!(config.reports_directory, PathBuf::from("target/reports"));
        assert_eq!(config.test_source_directory, PathBuf::new());
        assert_eq!(config.options.suite_name(), "Nightly");
        assert!(!config.options.foreign_framework);
        assert_eq!(config.options.extra["threads"], "4");
        assert_eq!(config.markers, MarkerNames::default());
    }
}
