//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use dirzip_core::ArchiveConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dirzip")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a ZIP archive from a directory
    Create(CreateArgs),
    /// List the entries an archive would contain without writing it
    List(ListArgs),
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by `create` and `list`.
#[derive(clap::Args)]
pub struct SelectionArgs {
    /// Nest entries under the source directory's own name
    #[arg(short = 'b', long)]
    pub include_base_dir: bool,

    /// Path to leave out, relative to SOURCE (exact match, can be repeated)
    #[arg(long = "exclude", short = 'x', value_name = "PATH")]
    pub exclude: Vec<String>,

    /// Follow symbolic links
    #[arg(long)]
    pub follow_symlinks: bool,
}

#[derive(clap::Args)]
pub struct CreateArgs {
    /// Directory to archive
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Output archive file path (replaced if it exists)
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Compression level (1-9)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub compression_level: Option<u8>,

    /// Do not store Unix permissions in entries
    #[arg(long)]
    pub no_permissions: bool,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Directory to inspect
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Archive path `create` would write; left out of the listing if inside SOURCE
    #[arg(short = 'd', long, value_name = "ARCHIVE")]
    pub destination: Option<PathBuf>,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

impl CreateArgs {
    /// Builds the library configuration from the parsed flags.
    pub fn to_config(&self) -> ArchiveConfig {
        let mut config = self
            .selection
            .apply(ArchiveConfig::new(&self.source, &self.destination))
            .with_preserve_permissions(!self.no_permissions);
        if let Some(level) = self.compression_level {
            config = config.with_compression_level(level);
        }
        config
    }
}

impl ListArgs {
    /// Builds a configuration for a dry run; the destination is never opened.
    pub fn to_config(&self) -> ArchiveConfig {
        let config = ArchiveConfig {
            destination: self.destination.clone(),
            ..ArchiveConfig::for_source(&self.source)
        };
        self.selection.apply(config)
    }
}

impl SelectionArgs {
    fn apply(&self, config: ArchiveConfig) -> ArchiveConfig {
        config
            .with_include_base_directory(self.include_base_dir)
            .with_excluded_paths(self.exclude.clone())
            .with_follow_symlinks(self.follow_symlinks)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_create_args_to_config() {
        let cli = Cli::try_parse_from([
            "dirzip", "create", "src", "out.zip", "-b", "-x", "target", "-x", "sub/c.txt", "-l",
            "3", "--no-permissions",
        ])
        .unwrap();

        let Commands::Create(args) = cli.command else {
            panic!("expected create");
        };
        let config = args.to_config();
        assert_eq!(config.source_dir, PathBuf::from("src"));
        assert_eq!(config.destination, Some(PathBuf::from("out.zip")));
        assert!(config.include_base_directory);
        assert_eq!(config.excluded_paths, vec!["target", "sub/c.txt"]);
        assert_eq!(config.compression_level, Some(3));
        assert!(!config.preserve_permissions);
        assert!(!config.follow_symlinks);
    }

    #[test]
    fn test_create_defaults_keep_library_defaults() {
        let cli = Cli::try_parse_from(["dirzip", "create", "src", "out.zip"]).unwrap();
        let Commands::Create(args) = cli.command else {
            panic!("expected create");
        };
        let config = args.to_config();
        assert_eq!(config.compression_level, Some(9));
        assert!(config.preserve_permissions);
    }

    #[test]
    fn test_list_destination_is_optional() {
        let cli = Cli::try_parse_from(["dirzip", "list", "src", "-x", "target"]).unwrap();
        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };
        let config = args.to_config();
        assert_eq!(config.source_dir, PathBuf::from("src"));
        assert!(config.destination.is_none());
        assert_eq!(config.excluded_paths, vec!["target"]);

        let cli = Cli::try_parse_from(["dirzip", "list", "src", "-d", "src/out.zip"]).unwrap();
        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(
            args.to_config().destination,
            Some(PathBuf::from("src/out.zip"))
        );
    }

    #[test]
    fn test_compression_level_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["dirzip", "create", "src", "out.zip", "-l", "0"]).is_err());
        assert!(Cli::try_parse_from(["dirzip", "create", "src", "out.zip", "-l", "10"]).is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["dirzip", "-v", "-q", "list", "src"]).is_err());
    }
}
