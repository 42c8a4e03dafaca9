use std::path::PathBuf;

use clap::{Parser, Subcommand};
use habits_analysis::dataset::DEFAULT_DATA_PATH;

use self::{dashboard::DashboardArg, report::ReportArg};

mod dashboard;
mod report;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Path to the student habits CSV file
    #[arg(long, global = true, default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,
    /// Write log records to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Explore the analyses in an interactive terminal dashboard
    Dashboard(#[clap(flatten)] DashboardArg),
    /// Render the report as Markdown or JSON
    Report(#[clap(flatten)] ReportArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args
        .mode
        .unwrap_or_else(|| Mode::Dashboard(DashboardArg::default()));
    let interactive = matches!(mode, Mode::Dashboard(_));
    crate::logging::init(args.log_file.as_deref(), interactive)?;

    match mode {
        Mode::Dashboard(arg) => dashboard::run(&args.data, &arg)?,
        Mode::Report(arg) => report::run(&args.data, &arg)?,
    }
    Ok(())
}
