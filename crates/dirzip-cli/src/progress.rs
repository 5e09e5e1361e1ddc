//! Spinner shown while an archive is being written.

use console::Term;
use dirzip_core::ArchiveError;
use dirzip_core::ArchiveObserver;
use dirzip_core::ArchiveReport;
use dirzip_core::format_size;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::time::Duration;

/// CLI spinner implementing `ArchiveObserver`.
///
/// The total entry count is unknown while streaming, so this shows a
/// spinner with the running file count and bytes read instead of a bar.
/// Cleans up on drop.
pub struct CliProgress {
    bar: ProgressBar,
    files: u64,
    bytes_read: u64,
}

impl CliProgress {
    /// Creates a spinner with a leading `message` (e.g. "Archiving").
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {prefix} {pos} files ({msg})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_prefix(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self {
            bar,
            files: 0,
            bytes_read: 0,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ArchiveObserver for CliProgress {
    fn on_entry_added(&mut self, entry_name: &str, bytes: u64) {
        self.files += 1;
        self.bytes_read += bytes;
        self.bar.set_position(self.files);
        self.bar
            .set_message(format!("{}, {entry_name}", format_size(self.bytes_read)));
    }

    fn on_warning(&mut self, warning: &ArchiveError) {
        self.bar.println(format!("warning: {warning}"));
    }

    fn on_complete(&mut self, _report: &ArchiveReport) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observer_counts_entries() {
        let mut progress = CliProgress::new("Testing");

        progress.on_entry_added("a.txt", 1024);
        progress.on_entry_added("sub/b.txt", 476);

        assert_eq!(progress.files, 2);
        assert_eq!(progress.bytes_read, 1500);
        assert_eq!(progress.bar.position(), 2);
    }
}
