//! Output formatter trait for CLI results.

use anyhow::Result;
use dirzip_core::ArchiveReport;
use dirzip_core::PlannedEntry;
use serde::Serialize;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the result of `create`
    fn format_creation_result(&self, report: &ArchiveReport) -> Result<()>;

    /// Format the entry list of `list`
    fn format_plan(&self, entries: &[PlannedEntry]) -> Result<()>;
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}
