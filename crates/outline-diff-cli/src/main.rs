//! Outline CLI
//!
//! Command-line demo for the outline diff data source

use clap::{Parser, Subcommand};
use outline_diff_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "outline")]
#[command(about = "Outline - diff-driven tree view updates", long_about = None)]
struct Cli {
    /// Log human-readable debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log JSON events to stderr
    #[arg(long, global = true, conflicts_with = "verbose")]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print an outline file as an indented tree
    Show(commands::show::ShowArgs),
    /// Print an outline file as `parent / item` lines
    Export(commands::export::ExportArgs),
    /// Print the edit script between two outline files
    Diff(commands::diff::DiffArgs),
    /// Replay the edit script on a simulated tree and report kept view state
    Reconcile(commands::reconcile::ReconcileArgs),
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        init(Profile::Development);
    } else if cli.json_logs {
        init(Profile::Production);
    }
    tracing::debug!(command = ?cli.command, "dispatching");

    let result = match cli.command {
        Commands::Show(args) => commands::show::execute(args),
        Commands::Export(args) => commands::export::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Reconcile(args) => commands::reconcile::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
