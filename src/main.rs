use clap::Parser;
use foldsort::cli::{CliOptions, OrganizeCommand, run_cli_with_options};
use foldsort::output::OutputFormatter;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Sort the files of a folder into category subfolders and write summaries.
#[derive(Parser)]
#[command(name = "foldsort", version, about, long_about = None)]
struct Args {
    /// Folder whose files should be organized
    folder: PathBuf,

    /// Show where files would go without moving anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Keep going when a file cannot be moved
    #[arg(short, long)]
    best_effort: bool,

    /// Do not write summary and report files
    #[arg(long)]
    no_reports: bool,

    /// Configuration file (defaults to .foldsortrc.toml or ~/.config/foldsort/config.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.verbose {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let command = if args.dry_run {
        OrganizeCommand::DryRun
    } else {
        OrganizeCommand::Organize
    };
    let options = CliOptions {
        config: args.config,
        best_effort: args.best_effort,
        no_reports: args.no_reports,
        json: args.json,
        progress: !args.json,
    };

    match run_cli_with_options(command, &args.folder, &options) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            OutputFormatter::error(&format!("Error: {e:#}"));
            ExitCode::FAILURE
        }
    }
}
