//! In-archive entry naming.
//!
//! Zip entry names always use `/` separators regardless of the host, so names
//! are assembled from path components rather than from the platform string.

use crate::ArchiveError;
use crate::Result;
use std::path::Component;
use std::path::Path;

/// Returns the last component of `source_root` for use as the entry prefix.
///
/// # Errors
///
/// Returns an error if the path has no final component (e.g. `/`) or the
/// component is not valid UTF-8.
///
/// # Examples
///
/// ```
/// use dirzip_core::naming::base_directory_name;
/// use std::path::Path;
///
/// assert_eq!(base_directory_name(Path::new("/home/dev/project")).unwrap(), "project");
/// ```
pub fn base_directory_name(source_root: &Path) -> Result<String> {
    let name = source_root
        .file_name()
        .ok_or_else(|| ArchiveError::MissingBaseName {
            path: source_root.to_path_buf(),
        })?;

    name.to_str()
        .map(str::to_string)
        .ok_or_else(|| ArchiveError::NonUtf8Path {
            path: source_root.to_path_buf(),
        })
}

/// Computes the archive entry name for a file at `relative` (relative to the
/// source root), optionally prefixed with the base directory name.
///
/// # Errors
///
/// Returns an error if any component is not valid UTF-8. Names are never
/// converted lossily, so the walk stops at the first such file.
///
/// # Examples
///
/// ```
/// use dirzip_core::naming::archive_entry_name;
/// use std::path::Path;
///
/// let relative = Path::new("sub").join("b.txt");
/// assert_eq!(archive_entry_name(&relative, None).unwrap(), "sub/b.txt");
/// assert_eq!(
///     archive_entry_name(&relative, Some("project")).unwrap(),
///     "project/sub/b.txt"
/// );
/// ```
pub fn archive_entry_name(relative: &Path, base_directory: Option<&str>) -> Result<String> {
    let mut name = String::new();

    if let Some(base) = base_directory {
        name.push_str(base);
    }

    for component in relative.components() {
        let Component::Normal(part) = component else {
            continue;
        };
        let part = part.to_str().ok_or_else(|| ArchiveError::NonUtf8Path {
            path: relative.to_path_buf(),
        })?;
        if !name.is_empty() {
            name.push('/');
        }
        name.push_str(part);
    }

    Ok(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_base_directory_name() {
        assert_eq!(base_directory_name(Path::new("/a/b/project")).unwrap(), "project");
        assert_eq!(base_directory_name(Path::new("relative")).unwrap(), "relative");
    }

    #[cfg(unix)]
    #[test]
    fn test_base_directory_name_root() {
        assert!(matches!(
            base_directory_name(Path::new("/")).unwrap_err(),
            ArchiveError::MissingBaseName { .. }
        ));
    }

    #[test]
    fn test_archive_entry_name_flattened() {
        assert_eq!(archive_entry_name(Path::new("a.txt"), None).unwrap(), "a.txt");

        let nested: PathBuf = ["x", "y", "z.rs"].iter().collect();
        assert_eq!(archive_entry_name(&nested, None).unwrap(), "x/y/z.rs");
    }

    #[test]
    fn test_archive_entry_name_with_base() {
        assert_eq!(
            archive_entry_name(Path::new("a.txt"), Some("project")).unwrap(),
            "project/a.txt"
        );
    }

    #[test]
    fn test_archive_entry_name_skips_dot_components() {
        assert_eq!(
            archive_entry_name(Path::new("./sub/./b.txt"), None).unwrap(),
            "sub/b.txt"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_archive_entry_name_non_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let bad = Path::new(OsStr::from_bytes(b"dir/\xff.txt"));
        assert!(matches!(
            archive_entry_name(bad, None).unwrap_err(),
            ArchiveError::NonUtf8Path { .. }
        ));
    }
}
