//! Create command implementation

use crate::cli::CreateArgs;
use crate::error::add_source_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use dirzip_core::NoopObserver;
use dirzip_core::create_archive_with_observer;

pub fn execute(args: &CreateArgs, formatter: &dyn OutputFormatter, quiet: bool) -> Result<()> {
    let config = args.to_config();

    let report = if !quiet && CliProgress::should_show() {
        let mut progress = CliProgress::new("Archiving");
        create_archive_with_observer(&config, &mut progress)
    } else {
        create_archive_with_observer(&config, &mut NoopObserver)
    };
    let report = add_source_context(report, &args.source)?;

    formatter.format_creation_result(&report)
}
