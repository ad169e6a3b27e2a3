//! Filesystem scanning.
//!
//! Walks one or more base directories and keeps the relative paths of
//! regular files matching a glob pattern set. Scanning is synchronous and
//! permissive: missing base directories yield zero matches, and anything
//! that is not a regular file is skipped.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{LoaderError, Result};

/// One file kept by a scan: the base directory it was found under and its
/// `/`-separated path relative to that directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMatch {
    pub base: PathBuf,
    pub relative: String,
}

/// Synchronous glob scanner over a list of base directories.
#[derive(Debug, Clone)]
pub struct FileScanner {
    directories: Vec<PathBuf>,
    patterns: Vec<String>,
}

impl FileScanner {
    pub fn new<D, P>(directories: D, patterns: P) -> Self
    where
        D: IntoIterator,
        D::Item: Into<PathBuf>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            directories: directories.into_iter().map(Into::into).collect(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Enumerate matching regular files under every base directory.
    ///
    /// Results are grouped by directory in the order the directories were
    /// given; within one directory, matches are sorted by relative path.
    /// Symlinks are resolved when deciding whether an entry is a regular
    /// file, so a symlink to a file counts and a symlink to anything else
    /// does not.
    pub fn scan(&self) -> Result<Vec<ScanMatch>> {
        let patterns = self.build_globset()?;
        let mut matches = Vec::new();

        for dir in &self.directories {
            if !dir.is_dir() {
                debug!(directory = %dir.display(), "scan directory missing, skipping");
                continue;
            }

            let mut found = Vec::new();
            for entry in WalkDir::new(dir) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        warn!(directory = %dir.display(), error = %err, "skipping unreadable entry");
                        continue;
                    }
                };
                let Some(relative) = relative_slash_path(entry.path(), dir) else {
                    continue;
                };
                if !patterns.is_match(Path::new(&relative)) {
                    continue;
                }
                // stat follows symlinks, so only regular files survive
                match std::fs::metadata(entry.path()) {
                    Ok(metadata) if metadata.is_file() => found.push(relative),
                    Ok(_) => debug!(path = %entry.path().display(), "not a regular file, skipping"),
                    Err(err) => {
                        debug!(path = %entry.path().display(), error = %err, "stat failed, skipping")
                    }
                }
            }

            found.sort();
            matches.extend(found.into_iter().map(|relative| ScanMatch {
                base: dir.clone(),
                relative,
            }));
        }

        Ok(matches)
    }

    fn build_globset(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.patterns {
            let glob = Glob::new(pattern).map_err(|source| LoaderError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|source| LoaderError::Pattern {
            pattern: self.patterns.join(", "),
            source,
        })
    }
}

/// Path of `entry` relative to `base`, joined with `/` regardless of
/// platform. `None` for the base directory itself.
fn relative_slash_path(entry: &Path, base: &Path) -> Option<String> {
    let relative = entry.strip_prefix(base).ok()?;
    if relative.as_os_str().is_empty() {
        return None;
    }
    let segments: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(path, b"").expect("write file");
    }

    #[test]
    fn finds_nested_files_matching_pattern() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(&dir.path().join("group/repository.js"));
        touch(&dir.path().join("top.js"));
        touch(&dir.path().join("notes.txt"));

        let scanner = FileScanner::new([dir.path()], ["**/*.js"]);
        let matches = scanner.scan().expect("scan");
        let relatives: Vec<&str> = matches.iter().map(|m| m.relative.as_str()).collect();

        assert_eq!(relatives, vec!["group/repository.js", "top.js"]);
    }

    #[test]
    fn directory_matching_the_pattern_is_excluded() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("decoy.js")).expect("create dir");
        touch(&dir.path().join("real.js"));

        let scanner = FileScanner::new([dir.path()], ["**/*.js"]);
        let matches = scanner.scan().expect("scan");
        let relatives: Vec<&str> = matches.iter().map(|m| m.relative.as_str()).collect();

        assert_eq!(relatives, vec!["real.js"]);
    }

    #[test]
    fn missing_directory_yields_zero_matches() {
        let scanner = FileScanner::new(["/nonexistent/arbor-scan-root"], ["**/*.js"]);
        assert!(scanner.scan().expect("scan").is_empty());
    }

    #[test]
    fn multiple_directories_keep_directory_order() {
        let first = tempfile::tempdir().expect("tempdir");
        let second = tempfile::tempdir().expect("tempdir");
        touch(&first.path().join("zz.js"));
        touch(&second.path().join("aa.js"));

        let scanner = FileScanner::new([first.path(), second.path()], ["**/*.js"]);
        let matches = scanner.scan().expect("scan");

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].base, first.path());
        assert_eq!(matches[0].relative, "zz.js");
        assert_eq!(matches[1].base, second.path());
        assert_eq!(matches[1].relative, "aa.js");
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scanner = FileScanner::new([dir.path()], ["{unclosed"]);
        assert!(matches!(
            scanner.scan(),
            Err(LoaderError::Pattern { .. })
        ));
    }
}
