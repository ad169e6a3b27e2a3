//! Path-to-namespace name transformation.
//!
//! Relative file paths are mapped onto namespace segments by convention:
//! `foo_bar/baz-qux.js` becomes `["fooBar", "BazQux"]`. Snake and kebab
//! separators collapse into camelCase, and only the final segment (the
//! exported symbol) gets its first letter capitalized.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{LoaderError, Result};

static SEGMENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z][a-z0-9_-]*$").expect("segment pattern should compile")
});
static SEPARATOR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[_-][a-zA-Z]").expect("separator pattern should compile"));
static HUMP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-/_.](\w)").expect("hump pattern should compile"));

/// Ordered, non-empty namespace segments derived from a relative file path.
///
/// The transformation is deterministic and depends only on the input string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespacePath(Vec<String>);

impl NamespacePath {
    /// Transform a `/`-separated path, relative to its scan root, into
    /// namespace segments.
    ///
    /// The trailing extension is stripped, every segment is validated
    /// against `[a-z][a-z0-9_-]*` (case-insensitive) and camelized, and the
    /// final segment is capitalized. A segment that fails validation aborts
    /// the transformation.
    pub fn from_relative(path: &str) -> Result<Self> {
        let stem = match path.rfind('.') {
            Some(index) => &path[..index],
            None => path,
        };
        let raw: Vec<&str> = stem.split('/').collect();
        let count = raw.len();

        let mut segments = Vec::with_capacity(count);
        for (index, source) in raw.iter().enumerate() {
            if !SEGMENT_PATTERN.is_match(source) {
                return Err(LoaderError::InvalidSegment {
                    segment: (*source).to_string(),
                    path: path.to_string(),
                });
            }
            // foo_bar => fooBar, baz-qux => bazQux
            let mut segment = SEPARATOR_PATTERN
                .replace_all(source, |captures: &regex::Captures| {
                    captures[0][1..].to_ascii_uppercase()
                })
                .into_owned();
            if index == count - 1 {
                segment = capitalize(&segment);
            }
            segments.push(segment);
        }

        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// Collapse `-`, `_`, `/` and `.` separators into UpperCamelCase.
///
/// `watch-status.list` becomes `WatchStatusList`.
pub fn to_upper_camel(name: &str) -> String {
    let collapsed = HUMP_PATTERN.replace_all(name, |captures: &regex::Captures| {
        captures[1].to_ascii_uppercase()
    });
    capitalize(&collapsed)
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(path: &str) -> Vec<String> {
        NamespacePath::from_relative(path)
            .expect("path should transform")
            .segments()
            .to_vec()
    }

    #[test]
    fn camelizes_snake_and_kebab_segments() {
        assert_eq!(segments("foo_bar/baz-qux.js"), vec!["fooBar", "BazQux"]);
    }

    #[test]
    fn transformation_is_deterministic() {
        let first = NamespacePath::from_relative("foo_bar/baz-qux.js").unwrap();
        let second = NamespacePath::from_relative("foo_bar/baz-qux.js").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn capitalizes_sole_segment_of_root_level_file() {
        assert_eq!(segments("bar.js"), vec!["Bar"]);
    }

    #[test]
    fn only_final_segment_is_capitalized() {
        assert_eq!(
            segments("segA/segB-seg/fileName.ext"),
            vec!["segA", "segBSeg", "FileName"]
        );
    }

    #[test]
    fn accepts_camel_and_pascal_case_sources() {
        assert_eq!(segments("fooBar.js"), vec!["FooBar"]);
        assert_eq!(segments("FooBar.js"), vec!["FooBar"]);
    }

    #[test]
    fn rejects_segment_starting_with_digit() {
        let err = NamespacePath::from_relative("1abc/file.js").unwrap_err();
        match err {
            LoaderError::InvalidSegment { segment, path } => {
                assert_eq!(segment, "1abc");
                assert_eq!(path, "1abc/file.js");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn display_joins_segments_with_dots() {
        let path = NamespacePath::from_relative("group/repository.js").unwrap();
        assert_eq!(path.to_string(), "group.Repository");
    }

    #[test]
    fn to_upper_camel_collapses_all_separators() {
        assert_eq!(to_upper_camel("watch-status.list"), "WatchStatusList");
        assert_eq!(to_upper_camel("foo_bar/baz"), "FooBarBaz");
        assert_eq!(to_upper_camel("plain"), "Plain");
    }
}
