//! Exact-path exclusion filtering.
//!
//! Exclusions are normalized once at construction and compared by string
//! equality against the normalized relative path of each visited node. There
//! is no glob or prefix matching: excluding `sub` prunes the `sub` directory
//! node (and so everything below it), while `sub/c.txt` only matches that one
//! file.

use std::collections::HashSet;
use std::path::Component;
use std::path::Path;

/// Decides whether a path relative to the source root is excluded.
///
/// # Examples
///
/// ```
/// use dirzip_core::PathFilter;
/// use std::path::Path;
///
/// let filter = PathFilter::new(["./sub//c.txt", "build/"]);
/// assert!(filter.is_excluded(Path::new("sub/c.txt")));
/// assert!(filter.is_excluded(Path::new("build")));
/// assert!(!filter.is_excluded(Path::new("sub")));
/// assert!(!filter.is_excluded(Path::new("build/out.o")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    excluded: HashSet<String>,
}

impl PathFilter {
    /// Builds a filter from raw exclusion strings.
    pub fn new<I, S>(exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let excluded = exclusions
            .into_iter()
            .map(|raw| normalize_exclusion(raw.as_ref()))
            .filter(|normalized| !normalized.is_empty())
            .collect();
        Self { excluded }
    }

    /// Returns `true` if `relative` exactly matches a normalized exclusion.
    #[must_use]
    pub fn is_excluded(&self, relative: &Path) -> bool {
        if self.excluded.is_empty() {
            return false;
        }
        relative_key(relative).is_some_and(|key| self.excluded.contains(&key))
    }

    /// Number of distinct normalized exclusions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.excluded.len()
    }

    /// Returns `true` if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.excluded.is_empty()
    }
}

/// Normalizes a user-supplied exclusion.
///
/// Backslashes become `/`, empty and `.` segments are dropped, `..` folds
/// into its parent, and trailing separators are removed. Absolute entries
/// keep a leading `/`, and entries escaping the root keep their leading
/// `..`, so neither can ever equal a relative path found by the walk.
///
/// # Examples
///
/// ```
/// use dirzip_core::filter::normalize_exclusion;
///
/// assert_eq!(normalize_exclusion("sub\\c.txt"), "sub/c.txt");
/// assert_eq!(normalize_exclusion("./a/../b/"), "b");
/// assert_eq!(normalize_exclusion("../outside"), "../outside");
/// assert_eq!(normalize_exclusion("/etc/passwd"), "/etc/passwd");
/// ```
#[must_use]
pub fn normalize_exclusion(raw: &str) -> String {
    let canonical = raw.replace('\\', "/");
    let absolute = canonical.starts_with('/') || has_drive_prefix(&canonical);

    let mut segments: Vec<&str> = Vec::new();
    for segment in canonical.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if absolute && !canonical.starts_with('/') {
        // Drive-letter paths already carry their root in the first segment
        joined
    } else if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Builds the `/`-joined comparison key for a relative path.
///
/// Returns `None` for paths that cannot match any string exclusion.
fn relative_key(relative: &Path) -> Option<String> {
    let mut key = String::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                if !key.is_empty() {
                    key.push('/');
                }
                key.push_str(part.to_str()?);
            }
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(key)
}

/// `C:` only names a drive on Windows; elsewhere it is an ordinary name.
#[cfg(windows)]
fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

#[cfg(not(windows))]
fn has_drive_prefix(_path: &str) -> bool {
    false
}
