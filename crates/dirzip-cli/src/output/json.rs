//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use dirzip_core::ArchiveReport;
use dirzip_core::PlannedEntry;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

#[derive(Serialize)]
struct CreationOutput {
    destination: String,
    files_added: usize,
    files_missing: usize,
    directories: usize,
    symlinks_skipped: usize,
    special_files_skipped: usize,
    bytes_read: u64,
    archive_size: u64,
    archive_size_human: String,
    compression_ratio: f64,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl From<&ArchiveReport> for CreationOutput {
    fn from(report: &ArchiveReport) -> Self {
        Self {
            destination: report.destination.display().to_string(),
            files_added: report.files_added,
            files_missing: report.files_missing,
            directories: report.directories,
            symlinks_skipped: report.symlinks_skipped,
            special_files_skipped: report.special_files_skipped,
            bytes_read: report.bytes_read,
            archive_size: report.archive_size,
            archive_size_human: report.human_size(),
            compression_ratio: report.compression_ratio(),
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        }
    }
}

#[derive(Serialize)]
struct PlanOutput {
    total_entries: usize,
    entries: Vec<PlanEntry>,
}

#[derive(Serialize)]
struct PlanEntry {
    name: String,
    source: String,
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_creation_result(&self, report: &ArchiveReport) -> Result<()> {
        Self::output(&JsonOutput::success("create", CreationOutput::from(report)))
    }

    fn format_plan(&self, entries: &[PlannedEntry]) -> Result<()> {
        let data = PlanOutput {
            total_entries: entries.len(),
            entries: entries
                .iter()
                .map(|e| PlanEntry {
                    name: e.entry_name.clone(),
                    source: e.source.display().to_string(),
                })
                .collect(),
        };
        Self::output(&JsonOutput::success("list", data))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_creation_output_envelope() {
        let mut report = ArchiveReport::new();
        report.destination = PathBuf::from("/tmp/out.zip");
        report.files_added = 3;
        report.directories = 1;
        report.archive_size = 1500;
        report.add_warning("gone.txt disappeared");

        let output = JsonOutput::success("create", CreationOutput::from(&report));
        let value: serde_json::Value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["operation"], "create");
        assert_eq!(value["status"], "success");
        assert!(value.get("error").is_none());
        assert_eq!(value["data"]["files_added"], 3);
        assert_eq!(value["data"]["directories"], 1);
        assert_eq!(value["data"]["special_files_skipped"], 0);
        assert_eq!(value["data"]["archive_size_human"], "1.5 KB");
        assert_eq!(value["data"]["warnings"][0], "gone.txt disappeared");
    }
}
