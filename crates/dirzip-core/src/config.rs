//! Configuration for directory archiving jobs.

use crate::ArchiveError;
use crate::Result;
use crate::naming;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Configuration for one archiving operation.
///
/// # Examples
///
/// ```
/// use dirzip_core::ArchiveConfig;
///
/// let config = ArchiveConfig::new("./project", "dist/project.zip")
///     .with_include_base_directory(true)
///     .with_excluded_paths(vec!["node_modules".to_string(), "dist".to_string()]);
///
/// assert!(config.include_base_directory);
/// assert_eq!(config.excluded_paths.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// Directory whose contents are archived.
    pub source_dir: PathBuf,

    /// Archive file to create. An existing file at this path is replaced.
    ///
    /// Only a dry run may leave this unset. Default: `None`.
    pub destination: Option<PathBuf>,

    /// Nest every entry under the source directory's own name.
    ///
    /// Default: `false` (entries unzip into the current directory).
    pub include_base_directory: bool,

    /// Paths relative to `source_dir` that are left out.
    ///
    /// Matching is exact after normalization; excluding a directory prunes
    /// everything below it. Default: empty.
    pub excluded_paths: Vec<String>,

    /// Deflate level (1-9).
    ///
    /// Default: `Some(9)`.
    pub compression_level: Option<u8>,

    /// Resolve symbolic links instead of skipping them.
    ///
    /// Default: `false`.
    pub follow_symlinks: bool,

    /// Store Unix permission bits in entries.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            destination: None,
            include_base_directory: false,
            excluded_paths: Vec::new(),
            compression_level: Some(9),
            follow_symlinks: false,
            preserve_permissions: true,
        }
    }
}

impl ArchiveConfig {
    /// Creates a configuration for archiving `source_dir` into `destination`.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            destination: Some(destination.into()),
            ..Self::default()
        }
    }

    /// Creates a configuration with no destination, for listing only.
    #[must_use]
    pub fn for_source(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            ..Self::default()
        }
    }

    /// Sets the archive file to create.
    #[must_use]
    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Sets whether entries are nested under the base directory name.
    #[must_use]
    pub fn with_include_base_directory(mut self, include: bool) -> Self {
        self.include_base_directory = include;
        self
    }

    /// Sets the excluded relative paths.
    #[must_use]
    pub fn with_excluded_paths(mut self, paths: Vec<String>) -> Self {
        self.excluded_paths = paths;
        self
    }

    /// Sets the compression level.
    ///
    /// # Panics
    ///
    /// Panics if the compression level is not in the range 1-9.
    /// Use `validate()` for non-panicking validation.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        assert!((1..=9).contains(&level), "compression level must be 1-9");
        self.compression_level = Some(level);
        self
    }

    /// Sets whether symbolic links are followed.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Sets whether permissions are preserved.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is set but not in range 1-9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && !(1..=9).contains(&level)
        {
            return Err(ArchiveError::InvalidCompressionLevel { level });
        }
        Ok(())
    }
}

/// A resolved, immutable archiving job.
///
/// Both paths are absolute and lexically normalized so that relative-path
/// comparisons during traversal are unambiguous.
#[derive(Debug, Clone)]
pub struct ArchiveJob {
    source_root: PathBuf,
    destination: Option<PathBuf>,
    include_base_directory: bool,
    base_directory: Option<String>,
    compression_level: Option<u8>,
    follow_symlinks: bool,
    preserve_permissions: bool,
}

impl ArchiveJob {
    /// Resolves a configuration into a job.
    ///
    /// Does not touch the filesystem beyond reading the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The current directory cannot be determined
    /// - Base directory mode is on and the source root has no usable name
    pub fn new(config: &ArchiveConfig) -> Result<Self> {
        config.validate()?;

        let source_root = resolve_path(&config.source_dir)?;
        let destination = config
            .destination
            .as_deref()
            .map(resolve_path)
            .transpose()?;

        let base_directory = if config.include_base_directory {
            Some(naming::base_directory_name(&source_root)?)
        } else {
            None
        };

        Ok(Self {
            source_root,
            destination,
            include_base_directory: config.include_base_directory,
            base_directory,
            compression_level: config.compression_level,
            follow_symlinks: config.follow_symlinks,
            preserve_permissions: config.preserve_permissions,
        })
    }

    /// Absolute path of the directory being archived.
    #[must_use]
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Absolute path of the archive file, if one was configured.
    #[must_use]
    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    /// Whether entries are nested under the base directory name.
    #[must_use]
    pub fn include_base_directory(&self) -> bool {
        self.include_base_directory
    }

    /// Prefix applied to entry names, present only in base directory mode.
    #[must_use]
    pub fn base_directory(&self) -> Option<&str> {
        self.base_directory.as_deref()
    }

    /// Deflate level used by the zip writer.
    #[must_use]
    pub fn compression_level(&self) -> Option<u8> {
        self.compression_level
    }

    /// Whether symbolic links are resolved during traversal.
    #[must_use]
    pub fn follow_symlinks(&self) -> bool {
        self.follow_symlinks
    }

    /// Whether Unix permission bits are stored.
    #[must_use]
    pub fn preserve_permissions(&self) -> bool {
        self.preserve_permissions
    }
}

/// Makes `path` absolute and removes `.` and `..` components lexically.
///
/// Symbolic links are not resolved, so `a/link/..` becomes `a`.
///
/// # Examples
///
/// ```
/// use dirzip_core::config::resolve_path;
/// use std::path::Path;
///
/// # #[cfg(unix)]
/// assert_eq!(
///     resolve_path(Path::new("/srv/app/./build/../src")).unwrap(),
///     Path::new("/srv/app/src")
/// );
/// ```
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut normalized = PathBuf::new();

    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping at the root is a no-op, matching `/..` == `/`
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    Ok(normalized)
}
