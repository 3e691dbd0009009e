//! Diff command
//!
//! Usage: outline diff <OLD> <NEW> [--json]

use clap::Args;
use std::path::PathBuf;

use outline_diff_core::diff::{compute_edits, render_human_summary};
use outline_diff_core::errors::ExError;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Outline currently displayed
    pub old: PathBuf,

    /// Outline to display next
    pub new: PathBuf,

    /// Print the script as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let old = super::load_outline(&args.old)?;
    let new = super::load_outline(&args.new)?;

    let script = compute_edits(&old, &new);

    if args.json {
        println!("{}", script.to_json().map_err(ExError::from)?);
    } else {
        print!("{}", render_human_summary(&script));
    }
    Ok(())
}
