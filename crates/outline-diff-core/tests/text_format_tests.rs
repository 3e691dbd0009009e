#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::id;
use outline_diff_core::text::{export_text, fill_item, parse_outline, render_tree};
use outline_diff_core::OutlineError;

#[test]
fn test_blank_lines_are_ignored() {
    let s = parse_outline("\nA\n\n   \nB\n").unwrap();
    assert_eq!(s.root_ids(), [id("A"), id("B")]);
}

#[test]
fn test_slash_path_resolves_existing_parent_anywhere() {
    // GIVEN Deep nested under Top
    let s = parse_outline("Top\n  Deep\nDeep / Leaf").unwrap();

    // THEN Leaf lands under the existing Deep, not a new root
    assert_eq!(s.parent_of(&id("Leaf")).unwrap(), Some(&id("Deep")));
    assert_eq!(s.root_ids(), [id("Top")]);
}

#[test]
fn test_indented_first_line_is_rejected() {
    let err = parse_outline("  A").unwrap_err();
    assert!(matches!(err, OutlineError::InvalidText { line: 1, .. }));
}

#[test]
fn test_empty_segment_is_rejected() {
    let err = parse_outline("A\nA /  / B").unwrap_err();
    assert!(matches!(err, OutlineError::InvalidText { line: 2, .. }));
}

#[test]
fn test_export_then_parse_round_trip() {
    let original = parse_outline("Projects\n  Rust\n    crates\n  Go\nInbox").unwrap();
    let text = export_text(&original);
    assert_eq!(
        text,
        "Projects\nProjects / Rust\nRust / crates\nProjects / Go\nInbox"
    );
    assert_eq!(parse_outline(&text).unwrap(), original);
}

#[test]
fn test_fill_item_appends_after_existing_children() {
    let base = parse_outline("Box\n  one").unwrap();
    let filled = fill_item(&base, Some(&id("Box")), "two\nthree").unwrap();
    assert_eq!(
        filled.children_of(Some(&id("Box"))).unwrap(),
        [id("one"), id("two"), id("three")]
    );
    assert_eq!(render_tree(&filled), "Box\n  one\n  two\n  three\n");
}

#[test]
fn test_failed_fill_keeps_input() {
    let base = parse_outline("Box").unwrap();
    assert!(fill_item(&base, None, "new\nBox").is_err());
    assert_eq!(base.len(), 1);
}
