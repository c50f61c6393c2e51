//! ProjectSleuth — finds importable projects in a directory tree.
//!
//! Thin binary entry point. All scanning logic lives in the
//! `projectsleuth-core` crate.

mod output;

use anyhow::Context;
use clap::Parser;
use output::Format;
use projectsleuth_core::fs::OsFileSystem;
use projectsleuth_core::import::plan_import;
use projectsleuth_core::model::DEFAULT_MARKER_FILE;
use projectsleuth_core::{scan, CancelToken, ScanRequest};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "projectsleuth", version, about)]
struct Cli {
    /// Directory to scan, typically a fresh clone.
    root: PathBuf,

    /// File name that marks a directory as a project.
    #[arg(long, default_value = DEFAULT_MARKER_FILE)]
    marker: String,

    /// Directory name never to enter. Repeatable.
    #[arg(long = "exclude", value_name = "NAME")]
    excludes: Vec<String>,

    /// Do not exclude the workspace metadata folder.
    #[arg(long)]
    no_default_excludes: bool,

    /// Workspace location; projects directly under it are named after
    /// their directory.
    #[arg(long, value_name = "DIR")]
    default_root: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log every directory visited.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise structured logging. Stdout is reserved for the report.
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let mut request = ScanRequest::new(&cli.root).with_marker(cli.marker);
    if cli.no_default_excludes {
        request = request.with_excluded(std::iter::empty::<String>());
    }
    for name in cli.excludes {
        request = request.exclude(name);
    }

    // Nothing cancels this token, so the report is always complete.
    let report = scan(&request, &CancelToken::new()).into_result()?;

    let plan = plan_import(
        request.root_path(),
        &report,
        cli.default_root.as_deref(),
        &OsFileSystem,
    );

    let stdout = std::io::stdout();
    output::write_report(stdout.lock(), cli.format, request.root_path(), &report, &plan)
        .context("failed to write report")?;

    Ok(())
}
