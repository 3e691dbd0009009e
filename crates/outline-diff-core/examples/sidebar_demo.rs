//! Sidebar Demonstration
//!
//! Walks through the flows of a two-pane outline sidebar backed by a diffable
//! data source.
//!
//! Key concepts illustrated:
//! 1. Filling the sidebar from text
//! 2. Appending contents under the selected item
//! 3. Removing the selected item
//! 4. Expansion and selection surviving incremental updates
#![allow(clippy::unwrap_used, clippy::expect_used)]

use outline_diff_core::diff::render_human_summary;
use outline_diff_core::text::{export_text, fill_item, parse_outline};
use outline_diff_core::{ApplyOutcome, OutlineDataSource, SimulatedTree};

fn report(outcome: &ApplyOutcome<String>) {
    match outcome {
        ApplyOutcome::Unchanged => println!("(no changes)\n"),
        ApplyOutcome::Edited(script) => println!("{}", render_human_summary(script)),
        ApplyOutcome::Reloaded { error, .. } => println!("full reload: {}\n", error),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Outline Sidebar Demo ===\n");

    let source = OutlineDataSource::new();
    let mut sidebar = SimulatedTree::new();

    // ===== Part 1: Fill Sidebar =====
    println!("## Part 1: Fill Sidebar\n");
    let filled = parse_outline("Mail\n  Inbox\n  Sent\nMail / Drafts\nNotes\n  Ideas")?;
    report(&source.apply_snapshot(filled, &mut sidebar));

    sidebar.expand_all();
    sidebar.select(&"Sent".to_string())?;
    println!("✓ Expanded {} rows, selected 'Sent'\n", sidebar.expanded_count());

    // ===== Part 2: Append Item Contents =====
    println!("## Part 2: Append Item Contents\n");
    let appended = fill_item(&source.snapshot(), Some(&"Sent".to_string()), "2024\n2025")?;
    report(&source.apply_snapshot(appended, &mut sidebar));
    assert!(sidebar.is_expanded(&"Mail".to_string()));
    println!("✓ 'Mail' is still expanded\n");

    // ===== Part 3: Move Notes to the top =====
    println!("## Part 3: Reorder\n");
    let reordered = source.snapshot().move_item(&"Notes".to_string(), None, 0)?;
    report(&source.apply_snapshot(reordered, &mut sidebar));
    assert!(sidebar.is_expanded(&"Notes".to_string()));
    println!("✓ 'Notes' moved with its expansion state\n");

    // ===== Part 4: Remove Selected Item =====
    println!("## Part 4: Remove Selected Item\n");
    let removed = source.snapshot().delete_items(&["Sent".to_string()]);
    report(&source.apply_snapshot(removed, &mut sidebar));
    assert_eq!(sidebar.selected_ids().count(), 0);

    // ===== Part 5: Copy From Sidebar =====
    println!("## Part 5: Copy From Sidebar\n");
    println!("{}\n", export_text(&source.snapshot()));

    sidebar.collapse_all();
    println!("✓ Collapsed all rows ({} expanded)", sidebar.expanded_count());
    Ok(())
}
