//! Error conversion utilities for CLI.
//!
//! Converts dirzip-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use dirzip_core::ArchiveError;
use std::path::Path;

/// Converts `ArchiveError` to user-friendly anyhow error with context
pub fn convert_archive_error(err: ArchiveError, source_dir: &Path) -> anyhow::Error {
    match err {
        ArchiveError::SourceNotFound { path } => {
            anyhow!(
                "Source directory not found: {}\n\
                 HINT: Relative paths are resolved against the current directory.",
                path.display()
            )
        }
        ArchiveError::SourceNotDirectory { path } => {
            anyhow!(
                "Source is not a directory: {}\n\
                 HINT: Pass the directory that contains the file instead.",
                path.display()
            )
        }
        ArchiveError::MissingBaseName { path } => {
            anyhow!(
                "Cannot use --include-base-dir with '{}': it has no directory name\n\
                 HINT: Drop --include-base-dir or point SOURCE at a named directory.",
                path.display()
            )
        }
        ArchiveError::ReadEntry { path, source } => {
            anyhow!(
                "Cannot read '{}' while archiving '{}': {}\n\
                 HINT: Fix its permissions or leave it out with --exclude.",
                path.display(),
                source_dir.display(),
                source
            )
        }
        ArchiveError::Traversal { path, source } => {
            let hint = if source.loop_ancestor().is_some() {
                "HINT: A symbolic link points back to one of its parents. \
                 Drop --follow-symlinks or exclude the link."
            } else {
                "HINT: Check directory permissions or leave the path out with --exclude."
            };
            anyhow!("Failed to traverse '{}': {}\n{}", path.display(), source, hint)
        }
        ArchiveError::NonUtf8Path { path } => {
            anyhow!(
                "Path is not valid UTF-8: {}\n\
                 HINT: Entry names must be UTF-8. Rename the file or exclude it.",
                path.display()
            )
        }
        _ => anyhow::Error::from(err)
            .context(format!("Error archiving '{}'", source_dir.display())),
    }
}

/// Adds context to a library result about the directory being archived
pub fn add_source_context<T>(
    result: Result<T, ArchiveError>,
    source_dir: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, source_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_source_not_found() {
        let err = ArchiveError::SourceNotFound {
            path: PathBuf::from("/no/such/dir"),
        };
        let msg = format!("{:?}", convert_archive_error(err, Path::new("dir")));
        assert!(msg.contains("not found"));
        assert!(msg.contains("/no/such/dir"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_read_entry_mentions_exclude() {
        let err = ArchiveError::ReadEntry {
            path: PathBuf::from("project/secret.key"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = format!("{:?}", convert_archive_error(err, Path::new("project")));
        assert!(msg.contains("secret.key"));
        assert!(msg.contains("--exclude"));
    }

    #[test]
    fn test_convert_other_errors_keep_context() {
        let err = ArchiveError::InvalidCompressionLevel { level: 12 };
        let msg = format!("{:?}", convert_archive_error(err, Path::new("project")));
        assert!(msg.contains("Error archiving 'project'"));
        assert!(msg.contains("invalid compression level 12"));
    }
}
