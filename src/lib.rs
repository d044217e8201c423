//! foldsort - sort the files of a folder into category subfolders
//!
//! Files directly inside a folder are classified by extension, moved into
//! `<folder>/<Category>/` with collision-safe renaming, and the run is
//! summarized in plain-text reports. The organize and report calls block;
//! [`worker`] runs them on a background thread for interactive callers.

pub mod cli;
pub mod config;
pub mod error;
pub mod file_category;
pub mod file_organizer;
pub mod output;
pub mod report;
pub mod scanner;
pub mod worker;

pub use config::{CompiledFilters, Config, ConfigError, FilterRules, OrganizeMode};
pub use error::{MoveError, OrganizeError, ReportError, ReportWriteFailure, ScanError};
pub use file_category::{Category, ClassificationTable, Classifier};
pub use file_organizer::{
    CancelToken, OrganizeObserver, OrganizeResult, Organizer, move_file, unique_path,
};
pub use report::{ReportGenerator, format_size, generate_reports};

pub use cli::{CliOptions, OrganizeCommand, run_cli};

/// Organizes `folder` with the built-in classification table, failing fast.
///
/// Shorthand for `Organizer::default().organize(folder)`.
pub fn organize(folder: &std::path::Path) -> Result<OrganizeResult, OrganizeError> {
    Organizer::default().organize(folder)
}
