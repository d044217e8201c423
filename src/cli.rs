//! Command-line front end.
//!
//! Loads configuration, runs the organizer on a worker thread while drawing a
//! progress bar, writes the reports and prints the outcome. Any organize,
//! per-file or report failure is returned as an error so the binary can exit
//! non-zero.

use anyhow::{Context, Result, anyhow, bail};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{Config, OrganizeMode};
use crate::file_category::Classifier;
use crate::file_organizer::{OrganizeResult, Organizer, PlannedMove};
use crate::output::OutputFormatter;
use crate::worker::{WorkerEvent, spawn_organize};

/// What the CLI should do with the folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizeCommand {
    /// Move files and write reports.
    Organize,
    /// Show where files would go without moving anything.
    DryRun,
}

/// Overrides and presentation switches layered over the configuration.
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    /// Explicit configuration file.
    pub config: Option<PathBuf>,
    /// Continue past files that cannot be moved.
    pub best_effort: bool,
    /// Skip report generation.
    pub no_reports: bool,
    /// Print the result as JSON instead of a table.
    pub json: bool,
    /// Draw a progress bar while organizing.
    pub progress: bool,
}

/// What a successful CLI run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliOutcome {
    Organized(OrganizeResult),
    Planned(Vec<PlannedMove>),
}

/// Runs `command` on `dir_path` with default options.
///
/// # Examples
///
/// ```no_run
/// use foldsort::cli::{run_cli, OrganizeCommand};
/// use std::path::Path;
///
/// if let Err(e) = run_cli(OrganizeCommand::Organize, Path::new("/home/user/Downloads")) {
///     eprintln!("Error: {e:#}");
/// }
/// ```
pub fn run_cli(command: OrganizeCommand, dir_path: &Path) -> Result<CliOutcome> {
    run_cli_with_options(command, dir_path, &CliOptions::default())
}

/// Runs `command` on `dir_path`.
pub fn run_cli_with_options(
    command: OrganizeCommand,
    dir_path: &Path,
    options: &CliOptions,
) -> Result<CliOutcome> {
    let config = Config::load(options.config.as_deref()).context("loading configuration")?;
    let organizer = build_organizer(&config, options)?;

    match command {
        OrganizeCommand::DryRun => dry_run(&organizer, dir_path, options),
        OrganizeCommand::Organize => {
            let reports = config.organize.reports && !options.no_reports;
            organize(organizer, dir_path, reports, options)
        }
    }
}

fn build_organizer(config: &Config, options: &CliOptions) -> Result<Organizer> {
    let filters = config
        .filters
        .compile()
        .context("compiling filter rules")?;
    let mode = if options.best_effort {
        OrganizeMode::BestEffort
    } else {
        config.organize.mode
    };
    debug!(?mode, reports = config.organize.reports, "configuration loaded");

    Ok(Organizer::new(Classifier::default())
        .with_filters(filters)
        .with_mode(mode))
}

fn dry_run(organizer: &Organizer, base_path: &Path, options: &CliOptions) -> Result<CliOutcome> {
    let plan = organizer
        .plan(base_path)
        .with_context(|| format!("analyzing {}", base_path.display()))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else if plan.is_empty() {
        OutputFormatter::dry_run_notice("No files found to organize.");
    } else {
        OutputFormatter::dry_run_notice(&format!(
            "{} file(s) in {} would be organized as follows:",
            plan.len(),
            base_path.display()
        ));
        OutputFormatter::dry_run_plan(&plan);
        OutputFormatter::success("Dry run complete. No files were modified.");
    }

    Ok(CliOutcome::Planned(plan))
}

fn organize(
    organizer: Organizer,
    base_path: &Path,
    reports: bool,
    options: &CliOptions,
) -> Result<CliOutcome> {
    let chatty = !options.json;
    if chatty {
        OutputFormatter::info(&format!("Organizing contents of: {}", base_path.display()));
        if !reports {
            OutputFormatter::warning("Report generation is disabled for this run");
        }
    }

    let mode = organizer.mode();
    let handle = spawn_organize(organizer, base_path.to_path_buf(), reports);
    let mut progress = None;
    let mut report_failure = None;
    let mut outcome = None;

    for event in handle.events().iter() {
        match event {
            WorkerEvent::Scanned { total } => {
                if options.progress && chatty {
                    progress = Some(OutputFormatter::create_progress_bar(total as u64));
                }
            }
            WorkerEvent::Moved {
                filename,
                category,
                final_name,
            } => {
                if let Some(pb) = &progress {
                    pb.set_message(format!("{filename} → {category}/{final_name}"));
                    pb.inc(1);
                }
            }
            WorkerEvent::Failed { filename, reason } => {
                if let Some(pb) = &progress {
                    pb.inc(1);
                }
                if let Some(message) = inline_failure(mode, &filename, &reason) {
                    OutputFormatter::error(&message);
                }
            }
            WorkerEvent::Skipped { .. } => {
                if let Some(pb) = &progress {
                    pb.inc(1);
                }
            }
            WorkerEvent::ReportsWritten(paths) => {
                if chatty {
                    OutputFormatter::success(&format!("{} report file(s) written", paths.len()));
                }
            }
            WorkerEvent::ReportsFailed(err) => {
                for failure in &err.failures {
                    OutputFormatter::error(&failure.to_string());
                }
                report_failure = Some(err);
            }
            WorkerEvent::Finished(result) => outcome = Some(result),
        }
    }
    handle.join();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let result = outcome
        .ok_or_else(|| anyhow!("organizer worker stopped without a result"))?
        .with_context(|| format!("organizing {}", base_path.display()))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        OutputFormatter::summary_table(&result);
    }

    if !result.failures().is_empty() {
        bail!(
            "{} file(s) could not be moved",
            result.failures().len()
        );
    }
    if let Some(err) = report_failure {
        return Err(err).context("writing reports");
    }

    if chatty {
        OutputFormatter::success("Organization complete!");
    }
    Ok(CliOutcome::Organized(result))
}

/// Message printed as soon as a file fails to move.
///
/// A fail-fast run ends with that same failure as its error, so only
/// best-effort runs print it here.
fn inline_failure(mode: OrganizeMode, filename: &str, reason: &str) -> Option<String> {
    match mode {
        OrganizeMode::FailFast => None,
        OrganizeMode::BestEffort => Some(format!("{filename}: {reason}")),
    }
}
