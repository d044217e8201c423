//! Text reports describing an organize run.
//!
//! Three kinds of artifact are produced, all plain UTF-8 and overwritten on
//! every run:
//! - `<category>/summary.txt` for each category that received files
//! - `MASTER_SUMMARY.txt` in the base folder
//! - `DETAILED_REPORT.txt` in the base folder
//!
//! Each write is independent. A failed artifact does not stop the others.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::error::{ReportError, ReportWriteFailure};
use crate::file_category::Category;
use crate::file_organizer::OrganizeResult;

pub const CATEGORY_SUMMARY_FILE: &str = "summary.txt";
pub const MASTER_SUMMARY_FILE: &str = "MASTER_SUMMARY.txt";
pub const DETAILED_REPORT_FILE: &str = "DETAILED_REPORT.txt";

/// Width of the filename column in category listings.
pub const NAME_COLUMN_WIDTH: usize = 40;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count with binary prefixes and one decimal place.
///
/// # Examples
///
/// ```
/// use foldsort::report::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(1536), "1.5 KB");
/// assert_eq!(format_size(1024 * 1024), "1.0 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", SIZE_UNITS[unit])
}

fn fit_name(name: &str) -> String {
    if name.chars().count() <= NAME_COLUMN_WIDTH {
        return name.to_string();
    }
    let kept: String = name.chars().take(NAME_COLUMN_WIDTH - 3).collect();
    format!("{kept}...")
}

/// Writes the report artifacts for one organize run.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    base: PathBuf,
    timestamp: DateTime<Local>,
}

impl ReportGenerator {
    /// A generator for `base`, stamped with the current local time.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            timestamp: Local::now(),
        }
    }

    /// Uses a fixed generation time instead of the current one.
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    fn stamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    fn file_size(&self, category: Category, name: &str) -> Option<u64> {
        fs::metadata(self.base.join(category.name()).join(name))
            .map(|m| m.len())
            .ok()
    }

    fn category_size(&self, category: Category, files: &[String]) -> u64 {
        files
            .iter()
            .filter_map(|name| self.file_size(category, name))
            .sum()
    }

    /// Renders the listing for one category.
    pub fn render_category_summary(&self, category: Category, files: &[String]) -> String {
        let rule = "=".repeat(50);
        let mut out = String::new();
        out.push_str(&format!("{category} - File Summary\n"));
        out.push_str(&format!("{rule}\n"));
        out.push_str(&format!("Generated on: {}\n", self.stamp()));
        out.push_str(&format!("Total files: {}\n", files.len()));
        out.push_str(&format!("{rule}\n\n"));

        for (index, name) in files.iter().enumerate() {
            let size = self
                .file_size(category, name)
                .map(format_size)
                .unwrap_or_else(|| "Unknown".to_string());
            out.push_str(&format!(
                "{:>3}. {:<width$} ({size})\n",
                index + 1,
                fit_name(name),
                width = NAME_COLUMN_WIDTH
            ));
        }

        out.push_str(&format!("\n{rule}\n"));
        out.push_str("End of summary\n");
        out
    }

    /// Renders the master summary.
    pub fn render_master_summary(&self, result: &OrganizeResult) -> String {
        let rule = "=".repeat(60);
        let mut out = String::new();
        out.push_str("MASTER SUMMARY - Folder Organization Report\n");
        out.push_str(&format!("{rule}\n"));
        out.push_str(&format!("Generated on: {}\n", self.stamp()));
        out.push_str(&format!("Base folder: {}\n", self.base.display()));
        out.push_str(&format!("Total files organized: {}\n", result.total_files()));
        out.push_str(&format!(
            "Categories created: {}\n",
            result.non_empty_categories().count()
        ));
        out.push_str(&format!("{rule}\n\n"));

        out.push_str("Category Breakdown:\n");
        out.push_str(&format!("{}\n", "-".repeat(30)));
        for (category, files) in result.iter().filter(|(_, f)| !f.is_empty()) {
            out.push_str(&format!("{category}: {} files\n", files.len()));
        }

        if !result.failures().is_empty() {
            out.push_str("\nNot moved:\n");
            for failure in result.failures() {
                out.push_str(&format!("{}: {}\n", failure.filename, failure.reason));
            }
        }

        out.push_str(&format!("\n{rule}\n"));
        out.push_str("End of master summary\n");
        out
    }

    /// Renders the detailed size report.
    pub fn render_detailed_report(&self, result: &OrganizeResult) -> String {
        let stats: Vec<(Category, usize, u64)> = result
            .iter()
            .filter(|(_, files)| !files.is_empty())
            .map(|(category, files)| (category, files.len(), self.category_size(category, files)))
            .collect();
        let total_files: usize = stats.iter().map(|(_, count, _)| count).sum();
        let total_size: u64 = stats.iter().map(|(_, _, size)| size).sum();

        let rule = "=".repeat(60);
        let mut out = String::new();
        out.push_str("DETAILED ORGANIZATION REPORT\n");
        out.push_str(&format!("{rule}\n"));
        out.push_str(&format!("Generated on: {}\n", self.stamp()));
        out.push_str(&format!("Base folder: {}\n\n", self.base.display()));

        out.push_str("SUMMARY STATISTICS:\n");
        out.push_str(&format!("Total files: {total_files}\n"));
        out.push_str(&format!("Total size: {}\n", format_size(total_size)));
        out.push_str(&format!("Categories: {}\n\n", stats.len()));

        out.push_str("CATEGORY DETAILS:\n");
        out.push_str(&format!("{}\n", "-".repeat(40)));
        for (category, count, size) in &stats {
            out.push_str(&format!("{category}:\n"));
            out.push_str(&format!("   Files: {count}\n"));
            out.push_str(&format!("   Size: {}\n\n", format_size(*size)));
        }

        out.push_str(&format!("{rule}\n"));
        out.push_str("End of detailed report\n");
        out
    }

    fn write(&self, target: PathBuf, content: &str) -> Result<PathBuf, ReportWriteFailure> {
        match fs::write(&target, content) {
            Ok(()) => Ok(target),
            Err(e) => {
                warn!(target = %target.display(), error = %e, "report write failed");
                Err(ReportWriteFailure {
                    target,
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Writes one listing per non-empty category.
    pub fn write_category_summaries(
        &self,
        result: &OrganizeResult,
    ) -> Vec<Result<PathBuf, ReportWriteFailure>> {
        result
            .iter()
            .filter(|(_, files)| !files.is_empty())
            .map(|(category, files)| {
                let target = self.base.join(category.name()).join(CATEGORY_SUMMARY_FILE);
                self.write(target, &self.render_category_summary(category, files))
            })
            .collect()
    }

    pub fn write_master_summary(
        &self,
        result: &OrganizeResult,
    ) -> Result<PathBuf, ReportWriteFailure> {
        self.write(
            self.base.join(MASTER_SUMMARY_FILE),
            &self.render_master_summary(result),
        )
    }

    pub fn write_detailed_report(
        &self,
        result: &OrganizeResult,
    ) -> Result<PathBuf, ReportWriteFailure> {
        self.write(
            self.base.join(DETAILED_REPORT_FILE),
            &self.render_detailed_report(result),
        )
    }

    /// Writes every artifact, attempting all of them even when some fail.
    pub fn generate(&self, result: &OrganizeResult) -> Result<Vec<PathBuf>, ReportError> {
        let mut outcomes = self.write_category_summaries(result);
        outcomes.push(self.write_master_summary(result));
        outcomes.push(self.write_detailed_report(result));

        let mut written = Vec::new();
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(path) => written.push(path),
                Err(failure) => failures.push(failure),
            }
        }

        info!(written = written.len(), failed = failures.len(), "reports generated");
        if failures.is_empty() {
            Ok(written)
        } else {
            Err(ReportError { written, failures })
        }
    }
}

/// Writes all reports for `result` under `folder`.
///
/// # Examples
///
/// ```no_run
/// use foldsort::{generate_reports, Organizer};
/// use std::path::Path;
///
/// let folder = Path::new("/home/user/Downloads");
/// let result = Organizer::default().organize(folder)?;
/// if let Err(e) = generate_reports(folder, &result) {
///     for failure in &e.failures {
///         eprintln!("{failure}");
///     }
/// }
/// # Ok::<(), foldsort::OrganizeError>(())
/// ```
pub fn generate_reports(
    folder: &Path,
    result: &OrganizeResult,
) -> Result<Vec<PathBuf>, ReportError> {
    ReportGenerator::new(folder).generate(result)
}
