#![allow(clippy::unwrap_used, clippy::expect_used)]

/// Data source and simulated tree working together
mod common;

use std::thread;

use common::{id, outline, roots};
use outline_diff_core::text::fill_item;
use outline_diff_core::{
    ApplyOutcome, DiffOptions, EditScript, OutlineDataSource, SimulatedTree, TextItem,
    TreeControl, TreeShape,
};

#[test]
fn test_fill_then_append_preserves_expansion() {
    // GIVEN a sidebar filled from text with every row expanded
    let source = OutlineDataSource::new();
    let mut control = SimulatedTree::new();
    source.apply_snapshot(outline("Mail\n  Inbox\n  Sent\nNotes"), &mut control);
    control.expand_all();
    control.select(&id("Sent")).unwrap();

    // WHEN appending contents under the selected item
    let next = fill_item(&source.snapshot(), Some(&id("Sent")), "2024\n2025").unwrap();
    let outcome = source.apply_snapshot(next, &mut control);

    // THEN only inserts were applied and view state is intact
    let script = outcome.script().unwrap();
    assert_eq!(script.inserts(), 2);
    assert_eq!(script.len(), 2);
    assert!(control.is_expanded(&id("Mail")));
    assert!(control.is_selected(&id("Sent")));
    assert_eq!(control.full_reloads(), 0);
}

#[test]
fn test_remove_selected_item_drops_its_state() {
    let source = OutlineDataSource::new();
    let mut control = SimulatedTree::new();
    source.apply_snapshot(outline("A\n  A1\nB"), &mut control);
    control.expand_all();
    control.select(&id("A1")).unwrap();

    let next = source.snapshot().delete_items(&[id("A")]);
    source.apply_snapshot(next, &mut control);

    assert!(!control.is_expanded(&id("A")));
    assert!(!control.is_selected(&id("A1")));
    assert_eq!(control.selected_ids().count(), 0);
    assert!(control.matches(&roots(&["B"])));
}

#[test]
fn test_collapse_all_then_expand_all() {
    let mut control = SimulatedTree::from_snapshot(&outline("A\n  B\n    C\nD"));
    control.expand_all();
    assert_eq!(control.expanded_count(), 2);
    control.collapse_all();
    assert_eq!(control.expanded_count(), 0);
}

/// Control that accepts scripts but has drifted from the data source
struct DriftedTree {
    inner: SimulatedTree<String>,
}

impl TreeControl<String> for DriftedTree {
    fn apply_edits(&mut self, script: &EditScript<String>) -> outline_diff_core::Result<()> {
        self.inner.apply_edits(script)
    }

    fn reload_all(&mut self, shape: &TreeShape<String>) {
        self.inner.reload_all(shape);
    }
}

#[test]
fn test_drifted_control_is_reloaded() {
    // GIVEN a data source whose control shows something else
    let source = OutlineDataSource::new();
    let mut control = DriftedTree {
        inner: SimulatedTree::from_snapshot(&roots(&["X"])),
    };

    // WHEN applying a snapshot whose script cannot match
    let outcome = source.apply_snapshot(roots(&["X"]), &mut control);

    // THEN the control was reloaded and agrees with the baseline
    assert!(outcome.is_reload());
    assert_eq!(control.inner.full_reloads(), 1);
    assert!(control.inner.matches(&source.snapshot()));

    // AND the next update is incremental again
    let outcome = source.apply_snapshot(roots(&["X", "Y"]), &mut control);
    assert!(matches!(outcome, ApplyOutcome::Edited(_)));
}

#[test]
fn test_readers_see_committed_baselines() {
    let source = OutlineDataSource::<TextItem>::with_options(DiffOptions::default());
    let reader = source.clone();

    let handle = thread::spawn(move || {
        let mut control = SimulatedTree::new();
        for n in 1..=20 {
            let titles: Vec<String> = (0..n).map(|i| format!("row{}", i)).collect();
            let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
            source.apply_snapshot(roots(&refs), &mut control);
        }
        control
    });

    // Every observed baseline is a complete, valid snapshot.
    for _ in 0..20 {
        let seen = reader.snapshot();
        outline_diff_core::validate_forest(&seen).unwrap();
    }

    let control = handle.join().unwrap();
    assert_eq!(reader.snapshot().len(), 20);
    assert!(control.matches(&reader.snapshot()));
}
