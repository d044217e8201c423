//! Terminal output for the command-line front end.
//!
//! Colored status lines, the per-file progress bar and the closing summary
//! table all go through [`OutputFormatter`] so the styling lives in one place.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::file_organizer::{OrganizeResult, PlannedMove};

/// Writes styled CLI output.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// ```no_run
    /// use foldsort::output::OutputFormatter;
    /// OutputFormatter::success("Folder organized");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red to stderr.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use foldsort::output::OutputFormatter;
    /// OutputFormatter::warning("Report generation is disabled for this run");
    /// ```
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a bold section header preceded by a blank line.
    ///
    /// # Arguments
    ///
    /// * `header` - The header text
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates a progress bar sized for `total` files.
    ///
    /// # Arguments
    ///
    /// * `total` - Number of files the run will process
    ///
    /// # Example
    ///
    /// ```no_run
    /// use foldsort::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(12);
    /// pb.inc(1);
    /// pb.finish_and_clear();
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb
    }

    /// Renders the per-category counts of a run as a table.
    ///
    /// Only categories that received files are listed, in category order.
    pub fn render_summary_table(result: &OrganizeResult) -> String {
        let rows: Vec<(&str, usize)> = result
            .iter()
            .filter(|(_, files)| !files.is_empty())
            .map(|(category, files)| (category.name(), files.len()))
            .collect();

        let width = rows
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max("Category".len());

        let plural = |n: usize| if n == 1 { "file" } else { "files" };
        let mut out = String::new();
        out.push_str(&format!("{:<width$} | Files\n", "Category"));
        out.push_str(&format!("{}\n", "-".repeat(width + 10)));
        for (name, count) in &rows {
            out.push_str(&format!("{name:<width$} | {count} {}\n", plural(*count)));
        }
        out.push_str(&format!("{}\n", "-".repeat(width + 10)));
        let total = result.total_files();
        out.push_str(&format!("{:<width$} | {total} {}\n", "Total", plural(total)));
        out
    }

    /// Prints a "SUMMARY" header followed by [`Self::render_summary_table`].
    pub fn summary_table(result: &OrganizeResult) {
        Self::header("SUMMARY");
        print!("{}", Self::render_summary_table(result));
    }

    /// Prints where each file would go, one ` - name → Category/` line per file.
    ///
    /// # Arguments
    ///
    /// * `plan` - The moves computed by a dry run
    pub fn dry_run_plan(plan: &[PlannedMove]) {
        for planned in plan {
            println!(
                " - {} {} {}/",
                planned.filename,
                "→".dimmed(),
                planned.category.name().cyan()
            );
        }
    }

    /// Prints a yellow message prefixed with `[DRY RUN]`.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use foldsort::output::OutputFormatter;
    /// OutputFormatter::dry_run_notice("No files found to organize.");
    /// ```
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }
}
