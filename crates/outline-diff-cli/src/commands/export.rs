//! Export command
//!
//! Usage: outline export <FILE> [--output <FILE>]

use clap::Args;
use std::path::PathBuf;

use outline_diff_core::text::export_text;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Outline text file
    pub file: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute export command
pub fn execute(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = super::load_outline(&args.file)?;
    let text = export_text(&snapshot);

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, format!("{}\n", text))?;
        println!("✓ Exported {} rows to {}", snapshot.len(), output_path.display());
    } else {
        println!("{}", text);
    }
    Ok(())
}
