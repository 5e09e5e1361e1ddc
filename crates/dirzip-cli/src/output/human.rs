//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use dirzip_core::ArchiveReport;
use dirzip_core::PlannedEntry;
use dirzip_core::format_size;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (i, c) in s.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }

    fn write_heading(&self, marker_text: &str) -> Result<()> {
        if self.use_colors {
            self.term
                .write_line(&format!("{} {marker_text}", style("✓").green().bold()))?;
        } else {
            self.term.write_line(marker_text)?;
        }
        Ok(())
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_creation_result(&self, report: &ArchiveReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.write_heading(&format!(
            "Created {} of {}",
            report.destination.display(),
            report.human_size()
        ))?;

        if self.verbose {
            self.term.write_line("")?;
            self.term.write_line(&format!(
                "  Files added:      {}",
                Self::format_number(report.files_added)
            ))?;
            self.term.write_line(&format!(
                "  Directories:      {}",
                Self::format_number(report.directories)
            ))?;
            self.term.write_line(&format!(
                "  Bytes read:       {}",
                format_size(report.bytes_read)
            ))?;
            if report.bytes_read > 0 {
                self.term.write_line(&format!(
                    "  Ratio:            {:.2}:1",
                    report.compression_ratio()
                ))?;
            }
            if report.symlinks_skipped > 0 {
                self.term.write_line(&format!(
                    "  Symlinks skipped: {}",
                    report.symlinks_skipped
                ))?;
            }
            if report.special_files_skipped > 0 {
                self.term.write_line(&format!(
                    "  Special skipped:  {}",
                    report.special_files_skipped
                ))?;
            }
            self.term
                .write_line(&format!("  Duration:         {:?}", report.duration))?;
        }

        if report.has_warnings() {
            self.term.write_line("")?;
            if self.use_colors {
                self.term
                    .write_line(&format!("{}", style("Warnings:").yellow().bold()))?;
            } else {
                self.term.write_line("Warnings:")?;
            }
            for warning in &report.warnings {
                self.term.write_line(&format!("  - {warning}"))?;
            }
        }

        Ok(())
    }

    fn format_plan(&self, entries: &[PlannedEntry]) -> Result<()> {
        for entry in entries {
            if self.verbose {
                self.term.write_line(&format!(
                    "{}  <- {}",
                    entry.entry_name,
                    entry.source.display()
                ))?;
            } else {
                self.term.write_line(&entry.entry_name)?;
            }
        }

        if !self.quiet {
            let summary = format!("{} entries", Self::format_number(entries.len()));
            if self.use_colors {
                self.term.write_line(&format!("{}", style(summary).dim()))?;
            } else {
                self.term.write_line(&summary)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(HumanFormatter::format_number(0), "0");
        assert_eq!(HumanFormatter::format_number(999), "999");
        assert_eq!(HumanFormatter::format_number(1000), "1,000");
        assert_eq!(HumanFormatter::format_number(1_234_567), "1,234,567");
    }
}
