//! Deterministic ZIP archiving of directory trees.
//!
//! `dirzip-core` walks a source directory, skips paths listed as exact
//! exclusions, and streams every remaining regular file into a ZIP archive.
//! Entries are named relative to the source root, optionally nested under the
//! root's own directory name, and always use `/` separators.
//!
//! # Limitations
//!
//! Entry names must be UTF-8. A file or directory whose name is not valid
//! UTF-8 fails the whole job with [`ArchiveError::NonUtf8Path`] instead of
//! being renamed lossily. Exclusions are strings, so such a node cannot be
//! excluded either; rename it before archiving the tree.
//!
//! # Examples
//!
//! ```no_run
//! use dirzip_core::ArchiveConfig;
//! use dirzip_core::create_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ArchiveConfig::new("./project", "project.zip")
//!     .with_excluded_paths(vec!["target".into(), "sub/secret.txt".into()]);
//! let report = create_archive(&config)?;
//! println!("Created {} of {}", report.destination.display(), report.human_size());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archiver;
pub mod config;
pub mod error;
pub mod filter;
pub mod naming;
pub mod report;
pub mod sink;
pub mod walker;

// Re-export main API types
pub use api::create_archive;
#[cfg(feature = "async")]
pub use api::create_archive_async;
pub use api::create_archive_with_observer;
pub use api::plan_archive;
pub use archiver::DirArchiver;
pub use config::ArchiveConfig;
pub use config::ArchiveJob;
pub use error::ArchiveError;
pub use error::Result;
pub use filter::PathFilter;
pub use report::ArchiveObserver;
pub use report::ArchiveReport;
pub use report::NoopObserver;
pub use report::format_size;
pub use sink::ArchiveSink;
pub use sink::ZipSink;
pub use walker::PlannedEntry;
pub use walker::TreeWalker;
