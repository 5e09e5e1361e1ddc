//! High-level public API for directory archiving.

use crate::ArchiveConfig;
use crate::DirArchiver;
use crate::Result;
use crate::report::ArchiveObserver;
use crate::report::ArchiveReport;
use crate::walker::PlannedEntry;

/// Archives `config.source_dir` into `config.destination`.
///
/// Any existing file at the destination is replaced.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The source is missing or not a directory
/// - Any node cannot be read during traversal
/// - The archive writer fails
///
/// # Examples
///
/// ```no_run
/// use dirzip_core::ArchiveConfig;
/// use dirzip_core::create_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ArchiveConfig::new("my-plugin", "dist/my-plugin.zip")
///     .with_include_base_directory(true)
///     .with_excluded_paths(vec![".git".into(), "dist".into()]);
/// let report = create_archive(&config)?;
/// println!("Created {} of {}", report.destination.display(), report.human_size());
/// # Ok(())
/// # }
/// ```
pub fn create_archive(config: &ArchiveConfig) -> Result<ArchiveReport> {
    DirArchiver::new(config)?.create_archive()
}

/// Archives with progress and warning events sent to `observer`.
pub fn create_archive_with_observer(
    config: &ArchiveConfig,
    observer: &mut dyn ArchiveObserver,
) -> Result<ArchiveReport> {
    DirArchiver::new(config)?.create_archive_with_observer(observer)
}

/// Lists the entries `create_archive` would write, without writing.
pub fn plan_archive(config: &ArchiveConfig) -> Result<Vec<PlannedEntry>> {
    DirArchiver::new(config)?.plan()
}

/// Archives on the tokio blocking pool, resolving once the file is flushed.
///
/// # Errors
///
/// Same as [`create_archive`], plus [`crate::ArchiveError::TaskFailed`] if
/// the blocking task panics or is cancelled.
///
/// # Examples
///
/// ```no_run
/// use dirzip_core::ArchiveConfig;
/// use dirzip_core::create_archive_async;
///
/// # async fn run() -> Result<(), dirzip_core::ArchiveError> {
/// let report = create_archive_async(ArchiveConfig::new("site", "site.zip")).await?;
/// println!("{}", report.human_size());
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "async")]
pub async fn create_archive_async(config: ArchiveConfig) -> Result<ArchiveReport> {
    let archiver = DirArchiver::new(&config)?;
    tokio::task::spawn_blocking(move || archiver.create_archive())
        .await
        .map_err(|e| crate::ArchiveError::TaskFailed(e.to_string()))?
}
