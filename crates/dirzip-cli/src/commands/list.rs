//! List command implementation

use crate::cli::ListArgs;
use crate::error::add_source_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use dirzip_core::plan_archive;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let entries = add_source_context(plan_archive(&args.to_config()), &args.source)?;
    formatter.format_plan(&entries)
}
