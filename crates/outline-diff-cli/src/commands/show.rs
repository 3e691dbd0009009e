//! Show command
//!
//! Usage: outline show <FILE>

use clap::Args;
use std::path::PathBuf;

use outline_diff_core::text::render_tree;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Outline text file
    pub file: PathBuf,
}

/// Execute show command
pub fn execute(args: ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = super::load_outline(&args.file)?;
    print!("{}", render_tree(&snapshot));
    Ok(())
}
