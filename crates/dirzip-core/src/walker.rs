//! Directory tree walking with exact-path exclusion.
//!
//! The walk is depth-first and pre-order. Children of each directory are
//! visited in byte-wise file-name order so archive contents and entry order
//! are reproducible across runs and platforms. `walkdir` keeps its own stack,
//! so deep nesting does not grow the call stack.

use crate::ArchiveError;
use crate::ArchiveJob;
use crate::PathFilter;
use crate::Result;
use crate::naming;
use crate::sink::ArchiveSink;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::trace;
use walkdir::DirEntry;
use walkdir::WalkDir;

/// Walks the source tree of an [`ArchiveJob`], pruning excluded nodes.
///
/// # Examples
///
/// ```no_run
/// use dirzip_core::ArchiveConfig;
/// use dirzip_core::ArchiveJob;
/// use dirzip_core::PathFilter;
/// use dirzip_core::walker::TreeWalker;
///
/// let config = ArchiveConfig::new("./project", "project.zip");
/// let job = ArchiveJob::new(&config)?;
/// let filter = PathFilter::new(&config.excluded_paths);
///
/// for entry in TreeWalker::new(&job, &filter).plan()? {
///     println!("{}", entry.entry_name);
/// }
/// # Ok::<(), dirzip_core::ArchiveError>(())
/// ```
pub struct TreeWalker<'a> {
    job: &'a ArchiveJob,
    filter: &'a PathFilter,
}

impl<'a> TreeWalker<'a> {
    /// Creates a walker borrowing the job and its filter.
    #[must_use]
    pub fn new(job: &'a ArchiveJob, filter: &'a PathFilter) -> Self {
        Self { job, filter }
    }

    /// Returns an iterator over every non-excluded node below the source root.
    ///
    /// Excluded directories are not descended into. The root itself is not
    /// yielded.
    ///
    /// # Errors
    ///
    /// Yields an error if a directory cannot be read, a node cannot be
    /// stat-ed, or (when following links) a link cycle is found.
    pub fn walk(&self) -> impl Iterator<Item = Result<TraversalEntry>> + '_ {
        let root = self.job.source_root();

        WalkDir::new(root)
            .min_depth(1)
            .follow_links(self.job.follow_symlinks())
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !self.is_excluded(entry))
            .map(move |entry| match entry {
                Ok(entry) => Ok(TraversalEntry::from_dir_entry(&entry, root)),
                Err(err) => Err(traversal_error(err, root)),
            })
    }

    /// Streams every included file into `sink` as it is discovered.
    ///
    /// The first error from the walk or the sink aborts the run.
    pub fn run<S: ArchiveSink>(&self, sink: &mut S) -> Result<WalkSummary> {
        self.visit_files(|entry| {
            trace!(entry = %entry.entry_name, "appending");
            sink.append_file(&entry.source, &entry.entry_name)?;
            Ok(())
        })
    }

    /// Collects the entries a run would write, without writing anything.
    pub fn plan(&self) -> Result<Vec<PlannedEntry>> {
        let mut entries = Vec::new();
        self.visit_files(|entry| {
            entries.push(entry);
            Ok(())
        })?;
        Ok(entries)
    }

    fn visit_files<F>(&self, mut on_file: F) -> Result<WalkSummary>
    where
        F: FnMut(PlannedEntry) -> Result<()>,
    {
        let mut summary = WalkSummary::default();

        for entry in self.walk() {
            let entry = entry?;
            match entry.kind {
                NodeKind::File => {
                    if self.job.destination() == Some(entry.absolute_path.as_path()) {
                        debug!(path = %entry.absolute_path.display(), "skipping destination archive");
                        continue;
                    }
                    let entry_name =
                        naming::archive_entry_name(&entry.relative_path, self.job.base_directory())?;
                    on_file(PlannedEntry {
                        source: entry.absolute_path,
                        relative_path: entry.relative_path,
                        entry_name,
                    })?;
                    summary.files += 1;
                }
                NodeKind::Directory => summary.directories += 1,
                NodeKind::Symlink => {
                    debug!(path = %entry.relative_path.display(), "skipping symbolic link");
                    summary.symlinks_skipped += 1;
                }
                NodeKind::Other => {
                    debug!(path = %entry.relative_path.display(), "skipping special file");
                    summary.special_skipped += 1;
                }
            }
        }

        Ok(summary)
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        let Ok(relative) = entry.path().strip_prefix(self.job.source_root()) else {
            return false;
        };
        let excluded = self.filter.is_excluded(relative);
        if excluded {
            debug!(path = %relative.display(), "excluded");
        }
        excluded
    }
}

/// Classification of a visited filesystem node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Regular file, becomes an archive entry.
    File,
    /// Directory, recursed into.
    Directory,
    /// Symbolic link that is not followed.
    Symlink,
    /// Socket, FIFO, device or anything else.
    Other,
}

/// One visited node, relative to the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalEntry {
    /// Full filesystem path.
    pub absolute_path: PathBuf,
    /// Path relative to the source root.
    pub relative_path: PathBuf,
    /// Node classification.
    pub kind: NodeKind,
}

impl TraversalEntry {
    fn from_dir_entry(entry: &DirEntry, root: &Path) -> Self {
        let absolute_path = entry.path().to_path_buf();
        let relative_path = absolute_path
            .strip_prefix(root)
            .map_or_else(|_| PathBuf::from(entry.file_name()), Path::to_path_buf);

        // With `follow_links` set, walkdir reports the target's type here
        let file_type = entry.file_type();
        let kind = if file_type.is_symlink() {
            NodeKind::Symlink
        } else if file_type.is_dir() {
            NodeKind::Directory
        } else if file_type.is_file() {
            NodeKind::File
        } else {
            NodeKind::Other
        };

        Self {
            absolute_path,
            relative_path,
            kind,
        }
    }
}

/// A file selected for the archive together with its entry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    /// Absolute source path.
    pub source: PathBuf,
    /// Path relative to the source root.
    pub relative_path: PathBuf,
    /// `/`-separated name inside the archive.
    pub entry_name: String,
}

/// Counts gathered during one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Files handed to the sink.
    pub files: usize,
    /// Directories descended into.
    pub directories: usize,
    /// Symbolic links left out.
    pub symlinks_skipped: usize,
    /// Special files left out.
    pub special_skipped: usize,
}

fn traversal_error(err: walkdir::Error, root: &Path) -> ArchiveError {
    let path = err.path().unwrap_or(root).to_path_buf();
    ArchiveError::Traversal { path, source: err }
}
