use crate::model::TextItem;
use crate::snapshot::Snapshot;
use crate::text::parse::PATH_SEPARATOR;

/// Flat projection: one line per row, `parent / item` or just `item` for
/// roots, in pre-order
///
/// Parsing the result with [`parse_outline`](crate::text::parse_outline)
/// rebuilds the same structure as long as no title contains
/// [`PATH_SEPARATOR`].
pub fn export_text(snapshot: &Snapshot<TextItem>) -> String {
    snapshot
        .enumerate_items()
        .map(|entry| match entry.parent {
            Some(parent) => format!("{}{}{}", parent.title, PATH_SEPARATOR, entry.item.title),
            None => entry.item.title.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Indented projection, two spaces per level
pub fn render_tree(snapshot: &Snapshot<TextItem>) -> String {
    let mut out = String::new();
    for entry in snapshot.enumerate_items() {
        out.push_str(&"  ".repeat(entry.depth));
        out.push_str(&entry.item.title);
        out.push('\n');
    }
    out
}
