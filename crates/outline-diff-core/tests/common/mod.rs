use outline_diff_core::text::parse_outline;
use outline_diff_core::{compute_edits, EditScript, SimulatedTree, Snapshot, TextItem, TreeControl};
use proptest::prelude::*;
use proptest::sample::Index;

/// Owned identity for a title
#[allow(dead_code)]
pub fn id(title: &str) -> String {
    title.to_string()
}

/// Snapshot with the given titles as roots, in order
#[allow(dead_code)]
pub fn roots(titles: &[&str]) -> Snapshot<TextItem> {
    Snapshot::new()
        .append_items(titles.iter().map(|t| TextItem::new(*t)).collect(), None)
        .expect("Should build roots")
}

/// Snapshot from outline text (indented or `parent / child` lines)
#[allow(dead_code)]
pub fn outline(text: &str) -> Snapshot<TextItem> {
    parse_outline(text).expect("Should parse outline text")
}

/// Diff `old` -> `new`, replay the script on a control showing `old`, and
/// check the control ends up showing `new`
#[allow(dead_code)]
pub fn assert_reconciles(old: &Snapshot<TextItem>, new: &Snapshot<TextItem>) -> EditScript<String> {
    let script = compute_edits(old, new);
    let mut control = SimulatedTree::from_snapshot(old);
    control
        .apply_edits(&script)
        .unwrap_or_else(|e| panic!("script {:?} failed: {}", script, e));
    assert!(
        control.matches(new),
        "control shape {:?} differs from target after {:?}",
        control.shape().rows(),
        script
    );
    script
}

/// Shared title pool so that independently generated forests overlap
#[allow(dead_code)]
pub const POOL: [&str; 12] = [
    "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india", "juliet",
    "kilo", "lima",
];

/// Random forest over a prefix of a shuffled [`POOL`]
///
/// Each row picks an earlier row as its parent (or is a root), so the result
/// is always a valid forest. Some rows carry a reload mark.
#[allow(dead_code)]
pub fn arb_snapshot() -> impl Strategy<Value = Snapshot<TextItem>> {
    (
        Just(POOL.to_vec()).prop_shuffle(),
        0..=POOL.len(),
        prop::collection::vec(prop::option::weighted(0.7, any::<Index>()), POOL.len()),
        prop::collection::vec(prop::bool::weighted(0.2), POOL.len()),
    )
        .prop_map(|(titles, count, parents, reloads)| {
            build_forest(&titles[..count], &parents, &reloads)
        })
}

/// Random forest without reload marks
#[allow(dead_code)]
pub fn arb_plain_snapshot() -> impl Strategy<Value = Snapshot<TextItem>> {
    (
        Just(POOL.to_vec()).prop_shuffle(),
        0..=POOL.len(),
        prop::collection::vec(prop::option::weighted(0.7, any::<Index>()), POOL.len()),
    )
        .prop_map(|(titles, count, parents)| {
            build_forest(&titles[..count], &parents, &[])
        })
}

fn build_forest(titles: &[&str], parents: &[Option<Index>], reloads: &[bool]) -> Snapshot<TextItem> {
    let mut snapshot = Snapshot::new();
    for (i, title) in titles.iter().enumerate() {
        let parent = match parents[i] {
            Some(ix) if i > 0 => Some(id(titles[ix.index(i)])),
            _ => None,
        };
        snapshot = snapshot
            .append_items(vec![TextItem::new(*title)], parent.as_ref())
            .expect("Should append generated row");
    }
    let marked: Vec<String> = titles
        .iter()
        .zip(reloads)
        .filter(|(_, r)| **r)
        .map(|(t, _)| id(t))
        .collect();
    snapshot
        .reload_items(&marked)
        .expect("Should mark generated rows")
}
