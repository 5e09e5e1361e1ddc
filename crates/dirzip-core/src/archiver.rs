//! Archive job orchestration.
//!
//! Sequences the writer lifecycle around the walk: remove any previous
//! archive, open the writer, attach the warning observer, stream entries,
//! finalize, then report the flushed size.

use crate::ArchiveConfig;
use crate::ArchiveError;
use crate::ArchiveJob;
use crate::PathFilter;
use crate::Result;
use crate::report::ArchiveObserver;
use crate::report::ArchiveReport;
use crate::report::NoopObserver;
use crate::sink::ArchiveSink;
use crate::sink::ZipSink;
use crate::walker::PlannedEntry;
use crate::walker::TreeWalker;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;
use tracing::debug;
use tracing::info;
use tracing::warn;

/// Builds a ZIP archive from a directory tree.
///
/// # Examples
///
/// ```no_run
/// use dirzip_core::ArchiveConfig;
/// use dirzip_core::DirArchiver;
///
/// let config = ArchiveConfig::new("./site", "dist/site.zip")
///     .with_include_base_directory(true)
///     .with_excluded_paths(vec!["node_modules".to_string()]);
///
/// let report = DirArchiver::new(&config)?.create_archive()?;
/// println!("Created {} of {}", report.destination.display(), report.human_size());
/// # Ok::<(), dirzip_core::ArchiveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DirArchiver {
    job: ArchiveJob,
    filter: PathFilter,
}

impl DirArchiver {
    /// Resolves the configuration into a job and builds its filter.
    pub fn new(config: &ArchiveConfig) -> Result<Self> {
        Ok(Self {
            job: ArchiveJob::new(config)?,
            filter: PathFilter::new(&config.excluded_paths),
        })
    }

    /// The resolved job.
    #[must_use]
    pub fn job(&self) -> &ArchiveJob {
        &self.job
    }

    /// Writes the archive to the job's destination.
    ///
    /// # Errors
    ///
    /// Returns the first traversal error, writer error, or non-missing-file
    /// read error. The partially written destination is removed.
    pub fn create_archive(&self) -> Result<ArchiveReport> {
        self.create_archive_with_observer(&mut NoopObserver)
    }

    /// Writes the archive, forwarding events to `observer`.
    pub fn create_archive_with_observer(
        &self,
        observer: &mut dyn ArchiveObserver,
    ) -> Result<ArchiveReport> {
        self.check_source()?;

        let destination = self
            .job
            .destination()
            .ok_or(ArchiveError::MissingDestination)?;
        remove_existing(destination)?;

        let sink = ZipSink::create(
            destination,
            self.job.compression_level(),
            self.job.preserve_permissions(),
        )?;
        debug!(destination = %destination.display(), "opened archive writer");

        let result = self.write_to(sink, observer);
        if result.is_err()
            && let Err(err) = fs::remove_file(destination)
            && err.kind() != io::ErrorKind::NotFound
        {
            warn!(destination = %destination.display(), error = %err, "could not remove partial archive");
        }
        result
    }

    /// Streams the job into an arbitrary sink and finalizes it.
    ///
    /// The destination file is neither removed nor created here; the report
    /// still names it.
    pub fn write_to<S: ArchiveSink>(
        &self,
        sink: S,
        observer: &mut dyn ArchiveObserver,
    ) -> Result<ArchiveReport> {
        let start = Instant::now();
        info!(
            source = %self.job.source_root().display(),
            destination = ?self.job.destination(),
            "archiving"
        );

        let mut observed = ObservedSink::new(sink, observer);
        let summary = TreeWalker::new(&self.job, &self.filter).run(&mut observed)?;
        let (sink, mut report) = observed.into_parts();

        report.archive_size = sink.finish()?;
        report.destination = self
            .job
            .destination()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        report.directories = summary.directories;
        report.symlinks_skipped = summary.symlinks_skipped;
        report.special_files_skipped = summary.special_skipped;
        report.duration = start.elapsed();

        info!(
            "Created {} of {}",
            report.destination.display(),
            report.human_size()
        );
        observer.on_complete(&report);

        Ok(report)
    }

    /// Lists the entries the archive would contain, without writing.
    pub fn plan(&self) -> Result<Vec<PlannedEntry>> {
        self.check_source()?;
        TreeWalker::new(&self.job, &self.filter).plan()
    }

    fn check_source(&self) -> Result<()> {
        let root = self.job.source_root();
        match fs::metadata(root) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(ArchiveError::SourceNotDirectory {
                path: root.to_path_buf(),
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(ArchiveError::SourceNotFound {
                    path: root.to_path_buf(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Archives are replaced, never appended to.
fn remove_existing(destination: &Path) -> Result<()> {
    match fs::remove_file(destination) {
        Ok(()) => {
            debug!(destination = %destination.display(), "removed previous archive");
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Sink wrapper that classifies writer warnings before they reach the walk.
///
/// Missing-file warnings are logged, recorded and swallowed; every other
/// error passes through and aborts the job.
struct ObservedSink<'o, S> {
    inner: S,
    observer: &'o mut dyn ArchiveObserver,
    report: ArchiveReport,
}

impl<'o, S: ArchiveSink> ObservedSink<'o, S> {
    fn new(inner: S, observer: &'o mut dyn ArchiveObserver) -> Self {
        Self {
            inner,
            observer,
            report: ArchiveReport::new(),
        }
    }

    fn into_parts(self) -> (S, ArchiveReport) {
        (self.inner, self.report)
    }
}

impl<S: ArchiveSink> ArchiveSink for ObservedSink<'_, S> {
    fn append_file(&mut self, source: &Path, entry_name: &str) -> Result<u64> {
        match self.inner.append_file(source, entry_name) {
            Ok(bytes) => {
                self.report.files_added += 1;
                self.report.bytes_read += bytes;
                self.observer.on_entry_added(entry_name, bytes);
                Ok(bytes)
            }
            Err(err) if err.is_missing_file() => {
                warn!("{err}");
                self.observer.on_warning(&err);
                self.report.files_missing += 1;
                self.report.add_warning(err.to_string());
                Ok(0)
            }
            Err(err) => Err(err),
        }
    }

    fn finish(self) -> Result<u64> {
        self.inner.finish()
    }
}
