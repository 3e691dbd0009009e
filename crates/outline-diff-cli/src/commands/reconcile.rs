//! Reconcile command
//!
//! Usage: outline reconcile <OLD> <NEW> [--select <TITLE>]...
//!
//! Shows OLD in a simulated tree with every row expanded, applies the edit
//! script for NEW, then prints the resulting rows with their view state.

use clap::Args;
use std::path::PathBuf;

use outline_diff_core::{ApplyOutcome, OutlineDataSource, SimulatedTree};

#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// Outline currently displayed
    pub old: PathBuf,

    /// Outline to display next
    pub new: PathBuf,

    /// Select a row before applying the update (repeatable)
    #[arg(short, long = "select", value_name = "TITLE")]
    pub selected: Vec<String>,
}

/// Execute reconcile command
pub fn execute(args: ReconcileArgs) -> Result<(), Box<dyn std::error::Error>> {
    let old = super::load_outline(&args.old)?;
    let new = super::load_outline(&args.new)?;

    let source = OutlineDataSource::new();
    let mut control = SimulatedTree::new();
    source.apply_snapshot(old, &mut control);
    control.expand_all();
    for title in &args.selected {
        control.select(title)?;
    }
    let expanded_before = control.expanded_count();

    match source.apply_snapshot(new, &mut control) {
        ApplyOutcome::Unchanged => println!("No changes"),
        ApplyOutcome::Edited(script) => println!(
            "Applied {} edits ({} inserts, {} deletes, {} moves, {} reloads)",
            script.len(),
            script.inserts(),
            script.deletes(),
            script.moves(),
            script.reloads()
        ),
        ApplyOutcome::Reloaded { error, .. } => println!("Full reload: {}", error),
    }
    println!(
        "Expanded rows kept: {}/{}",
        control.expanded_count(),
        expanded_before
    );
    println!(
        "Selected rows kept: {}/{}",
        control.selected_ids().count(),
        args.selected.len()
    );

    for (id, depth) in control.shape().rows() {
        let has_children = control
            .shape()
            .children_of(Some(&id))
            .is_some_and(|kids| !kids.is_empty());
        let marker = match (has_children, control.is_expanded(&id)) {
            (false, _) => ' ',
            (true, true) => '-',
            (true, false) => '+',
        };
        let selected = if control.is_selected(&id) { " *" } else { "" };
        println!("{}{} {}{}", "  ".repeat(depth), marker, id, selected);
    }
    Ok(())
}
