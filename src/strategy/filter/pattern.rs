use std::hash::{Hash, Hasher};

use regex::Regex;

use crate::{class::TEST_ARTIFACT_SUFFIX, error::SelectionError};

const REGEX_PREFIX: &str = "%regex[";
const REGEX_SUFFIX: &str = "]";
const SOURCE_SUFFIX: &str = ".java";

/// A compiled selection pattern.
///
/// Compares and hashes by the pattern as written.
#[derive(Debug, Clone)]
pub(crate) struct Pattern {
    raw: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern matched against artifact names like `com/acme/FooTest.class`.
    pub(crate) fn class(raw: &str) -> Result<Self, SelectionError> {
        let body = match regex_body(raw) {
            Some(body) => body.to_owned(),
            None => glob_to_regex(&normalize_class_glob(raw), Some('/')),
        };
        Self::compile("class", raw, &body)
    }

    pub(crate) fn method(raw: &str) -> Result<Self, SelectionError> {
        let body = match regex_body(raw) {
            Some(body) => body.to_owned(),
            None => glob_to_regex(raw, None),
        };
        Self::compile("method", raw, &body)
    }

    fn compile(kind: &'static str, raw: &str, body: &str) -> Result<Self, SelectionError> {
        let regex = Regex::new(&format!("^(?:{body})$")).map_err(|source| SelectionError {
            kind,
            pattern: raw.to_owned(),
            source,
        })?;
        Ok(Self {
            raw: raw.to_owned(),
            regex,
        })
    }

    pub(crate) fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

fn regex_body(raw: &str) -> Option<&str> {
    raw.strip_prefix(REGEX_PREFIX)?.strip_suffix(REGEX_SUFFIX)
}

/// `com.acme.Foo*` becomes `com/acme/Foo*.class`, a bare `FooTest` becomes
/// `**/FooTest.class`.
fn normalize_class_glob(raw: &str) -> String {
    let stem = raw
        .strip_suffix(SOURCE_SUFFIX)
        .or_else(|| raw.strip_suffix(TEST_ARTIFACT_SUFFIX))
        .unwrap_or(raw);

    let mut glob = stem.replace('.', "/");
    if !glob.contains('/') {
        glob.insert_str(0, "**/");
    }
    glob.push_str(TEST_ARTIFACT_SUFFIX);
    glob
}

fn glob_to_regex(glob: &str, separator: Option<char>) -> String {
    let (any_segment, any_char) = match separator {
        Some(sep) => {
            let sep = regex::escape(&sep.to_string());
            (format!("[^{sep}]*"), format!("[^{sep}]"))
        }
        None => (".*".to_owned(), ".".to_owned()),
    };

    let mut out = String::with_capacity(glob.len() * 2);
    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                match (separator, chars.peek()) {
                    (Some(sep), Some(next)) if *next == sep => {
                        chars.next();
                        out.push_str(&format!("(?:.*{})?", regex::escape(&sep.to_string())));
                    }
                    _ => out.push_str(".*"),
                }
            }
            '*' => out.push_str(&any_segment),
            '?' => out.push_str(&any_char),
            c => out.push_str(&regex::escape(&c.to_string())),
        }
    }
    out
}
