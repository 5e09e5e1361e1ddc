//! Error types for directory archiving operations.

use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while building an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Source directory does not exist.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The missing source path.
        path: PathBuf,
    },

    /// Source path exists but is not a directory.
    #[error("source is not a directory: {path}")]
    SourceNotDirectory {
        /// The offending source path.
        path: PathBuf,
    },

    /// Base directory mode was requested for a root without a final
    /// component (e.g. `/`).
    #[error("cannot derive a base directory name from {path}")]
    MissingBaseName {
        /// The source root.
        path: PathBuf,
    },

    /// Reading or stat-ing a node during traversal failed.
    #[error("failed to traverse {path}: {source}")]
    Traversal {
        /// Node that could not be read.
        path: PathBuf,
        /// Underlying walk error.
        #[source]
        source: walkdir::Error,
    },

    /// Opening or reading a file queued for the archive failed.
    #[error("cannot read {path}: {source}")]
    ReadEntry {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Path cannot be represented as a portable archive entry name.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// The zip writer reported an error.
    #[error("archive writer error: {0}")]
    Writer(#[from] zip::result::ZipError),

    /// Archive creation was requested without a destination path.
    #[error("no destination archive configured")]
    MissingDestination,

    /// Compression level outside 1-9.
    #[error("invalid compression level {level}, must be 1-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// The background task running the job panicked or was cancelled.
    #[error("archive task failed: {0}")]
    TaskFailed(String),
}

impl ArchiveError {
    /// Returns `true` for the "missing file" warning class.
    ///
    /// A file that vanished between discovery and the writer opening it is
    /// logged and skipped rather than failing the job.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirzip_core::ArchiveError;
    /// use std::io;
    /// use std::path::PathBuf;
    ///
    /// let err = ArchiveError::ReadEntry {
    ///     path: PathBuf::from("gone.txt"),
    ///     source: io::Error::from(io::ErrorKind::NotFound),
    /// };
    /// assert!(err.is_missing_file());
    ///
    /// let err = ArchiveError::ReadEntry {
    ///     path: PathBuf::from("locked.txt"),
    ///     source: io::Error::from(io::ErrorKind::PermissionDenied),
    /// };
    /// assert!(!err.is_missing_file());
    /// ```
    #[must_use]
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::ReadEntry { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }

    /// Returns the filesystem path this error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::SourceNotFound { path }
            | Self::SourceNotDirectory { path }
            | Self::MissingBaseName { path }
            | Self::Traversal { path, .. }
            | Self::ReadEntry { path, .. }
            | Self::NonUtf8Path { path } => Some(path),
            _ => None,
        }
    }
}
