//! Archive job reporting and observation.

use crate::ArchiveError;
use std::path::PathBuf;
use std::time::Duration;

/// Report of a completed archiving job.
///
/// # Examples
///
/// ```
/// use dirzip_core::ArchiveReport;
///
/// let mut report = ArchiveReport::default();
/// report.archive_size = 2_500_000;
/// assert_eq!(report.human_size(), "2.5 MB");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveReport {
    /// Absolute path of the written archive.
    pub destination: PathBuf,

    /// Number of files written as entries.
    pub files_added: usize,

    /// Files that disappeared before they could be read.
    pub files_missing: usize,

    /// Directories walked below the source root, excluded ones not counted.
    pub directories: usize,

    /// Symbolic links left out because links are not followed.
    pub symlinks_skipped: usize,

    /// Sockets, FIFOs and devices left out.
    pub special_files_skipped: usize,

    /// Total uncompressed bytes read from source files.
    pub bytes_read: u64,

    /// Size of the finished archive in bytes.
    pub archive_size: u64,

    /// Wall-clock duration of the job.
    pub duration: Duration,

    /// Non-fatal warnings raised by the writer.
    pub warnings: Vec<String>,
}

impl ArchiveReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were recorded.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Archive size formatted with [`format_size`].
    #[must_use]
    pub fn human_size(&self) -> String {
        format_size(self.archive_size)
    }

    /// Returns the compression ratio (bytes read / archive size).
    ///
    /// Returns 0.0 if either side is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.archive_size == 0 || self.bytes_read == 0 {
            return 0.0;
        }
        self.bytes_read as f64 / self.archive_size as f64
    }
}

/// Formats a byte count with base-1000 units rounded to two decimals.
///
/// Counts exactly on a unit boundary (1000, 1000000, 1000000000) are
/// reported as raw bytes.
///
/// # Examples
///
/// ```
/// use dirzip_core::format_size;
///
/// assert_eq!(format_size(999), "999 bytes");
/// assert_eq!(format_size(1_000), "1000 bytes");
/// assert_eq!(format_size(1_500), "1.5 KB");
/// assert_eq!(format_size(2_500_000), "2.5 MB");
/// assert_eq!(format_size(3_000_000_000), "3 GB");
/// ```
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1_000;
    const MB: u64 = 1_000_000;
    const GB: u64 = 1_000_000_000;

    if bytes > KB && bytes < MB {
        format!("{} KB", round_hundredths(bytes as f64 / KB as f64))
    } else if bytes > MB && bytes < GB {
        format!("{} MB", round_hundredths(bytes as f64 / MB as f64))
    } else if bytes > GB {
        format!("{} GB", round_hundredths(bytes as f64 / GB as f64))
    } else {
        format!("{bytes} bytes")
    }
}

fn round_hundredths(value: f64) -> f64 {
    ((value + f64::EPSILON) * 100.0).round() / 100.0
}

/// Observer for archive job events.
///
/// Registered before the first entry is written so that every writer warning
/// reaches it.
pub trait ArchiveObserver {
    /// Called after a file has been streamed into the archive.
    ///
    /// # Arguments
    ///
    /// * `entry_name` - Name of the entry inside the archive
    /// * `bytes` - Uncompressed bytes read from the source file
    fn on_entry_added(&mut self, entry_name: &str, bytes: u64);

    /// Called for each non-fatal writer warning (a file that went missing).
    fn on_warning(&mut self, warning: &ArchiveError);

    /// Called once after the archive is finalized and flushed.
    fn on_complete(&mut self, report: &ArchiveReport);
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ArchiveObserver for NoopObserver {
    fn on_entry_added(&mut self, _entry_name: &str, _bytes: u64) {}

    fn on_warning(&mut self, _warning: &ArchiveError) {}

    fn on_complete(&mut self, _report: &ArchiveReport) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0 bytes");
        assert_eq!(format_size(1), "1 bytes");
        assert_eq!(format_size(999), "999 bytes");
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(1_500), "1.5 KB");
        assert_eq!(format_size(1_234), "1.23 KB");
        assert_eq!(format_size(2_500_000), "2.5 MB");
        assert_eq!(format_size(3_000_000_000), "3 GB");
        assert_eq!(format_size(12_340_000_000), "12.34 GB");
    }

    #[test]
    fn test_format_size_boundaries_report_raw_bytes() {
        assert_eq!(format_size(1_000), "1000 bytes");
        assert_eq!(format_size(1_000_000), "1000000 bytes");
        assert_eq!(format_size(1_000_000_000), "1000000000 bytes");
    }

    #[test]
    fn test_format_size_just_past_boundary() {
        assert_eq!(format_size(1_001), "1 KB");
        assert_eq!(format_size(1_000_001), "1 MB");
    }

    #[test]
    fn test_report_warnings() {
        let mut report = ArchiveReport::new();
        assert!(!report.has_warnings());
        report.add_warning("missing file");
        assert!(report.has_warnings());
        assert_eq!(report.warnings, vec!["missing file".to_string()]);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_compression_ratio() {
        let mut report = ArchiveReport::new();
        assert_eq!(report.compression_ratio(), 0.0);

        report.bytes_read = 1_000;
        report.archive_size = 250;
        assert_eq!(report.compression_ratio(), 4.0);
    }

    #[test]
    fn test_noop_observer() {
        let mut observer = NoopObserver;
        observer.on_entry_added("a.txt", 1);
        observer.on_warning(&ArchiveError::TaskFailed("x".into()));
        observer.on_complete(&ArchiveReport::new());
    }
}
