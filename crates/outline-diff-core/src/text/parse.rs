use std::time::Instant;

use crate::errors::{OutlineError, Result};
use crate::logging_facility::elapsed_ms;
use crate::model::TextItem;
use crate::ops::snapshot_ops;
use crate::snapshot::Snapshot;
use crate::{log_op_end, log_op_error, log_op_start};

/// Separator between a parent title and a child title on one line
///
/// Parsed text never yields a title containing the separator, but the
/// builder accepts any title. Such titles are split into several segments
/// when exported text is parsed again, so the round trip only holds for
/// titles without it.
pub const PATH_SEPARATOR: &str = " / ";

/// Parse outline text into a fresh snapshot
///
/// # Errors
///
/// `InvalidText` for malformed indentation, empty titles or repeated titles.
pub fn parse_outline(text: &str) -> Result<Snapshot<TextItem>> {
    fill_item(&Snapshot::new(), None, text)
}

/// Return a copy of `snapshot` with the rows described by `text` added under
/// `parent` (or as roots)
///
/// Line rules:
///
/// - blank lines are ignored
/// - `A / B` puts `B` under `A`; `A` is resolved by title anywhere in the
///   snapshot and created under the current parent when unknown
/// - a line without a separator is a plain row
/// - each level of indentation (two spaces or one tab) nests the line under
///   the closest preceding line with less indentation
///
/// On error the input snapshot is unchanged.
///
/// # Errors
///
/// `InvalidParent` if `parent` is absent. `InvalidText` (with the 1-based
/// line number) for odd indentation, an indented first line, an empty title
/// or a title that is already present.
pub fn fill_item(
    snapshot: &Snapshot<TextItem>,
    parent: Option<&String>,
    text: &str,
) -> Result<Snapshot<TextItem>> {
    log_op_start!("fill_item", item_count = snapshot.len());
    let start = Instant::now();

    let result = fill_impl(snapshot, parent, text);

    match &result {
        Ok(next) => {
            log_op_end!("fill_item", duration_ms = elapsed_ms(start), item_count = next.len());
        }
        Err(e) => {
            log_op_error!("fill_item", e.clone(), duration_ms = elapsed_ms(start));
        }
    }
    result
}

fn fill_impl(
    snapshot: &Snapshot<TextItem>,
    parent: Option<&String>,
    text: &str,
) -> Result<Snapshot<TextItem>> {
    if let Some(p) = parent {
        if !snapshot.contains(p) {
            return Err(OutlineError::InvalidParent {
                parent_id: crate::errors::describe_id(p),
            });
        }
    }

    let mut working = snapshot.clone();
    // (indent level, title) of the lines that can still take children
    let mut open: Vec<(usize, String)> = Vec::new();

    for (n, raw) in text.lines().enumerate() {
        let line = n + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let (level, content) = split_indent(raw).map_err(|reason| invalid(line, reason))?;

        while open.last().is_some_and(|(l, _)| *l >= level) {
            open.pop();
        }
        if level > 0 && open.is_empty() {
            return Err(invalid(line, "indented line has no parent line".to_string()));
        }
        let mut current = open.last().map(|(_, t)| t.clone()).or_else(|| parent.cloned());

        let segments: Vec<&str> = content.split(PATH_SEPARATOR).map(str::trim).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(invalid(line, "empty title".to_string()));
        }
        let Some((leaf, path)) = segments.split_last() else {
            continue;
        };

        for title in path {
            let title = (*title).to_string();
            if !working.contains(&title) {
                add_row(&mut working, &title, current.as_ref(), line)?;
            }
            current = Some(title);
        }
        let leaf = (*leaf).to_string();
        add_row(&mut working, &leaf, current.as_ref(), line)?;
        open.push((level, leaf));
    }

    Ok(working)
}

fn add_row(
    working: &mut Snapshot<TextItem>,
    title: &str,
    parent: Option<&String>,
    line: usize,
) -> Result<()> {
    snapshot_ops::append_items(working, vec![TextItem::new(title)], parent)
        .map_err(|e| invalid(line, e.to_string()))
}

fn invalid(line: usize, reason: String) -> OutlineError {
    OutlineError::InvalidText { line, reason }
}

/// Indentation level and the remaining content of a line
fn split_indent(raw: &str) -> std::result::Result<(usize, &str), String> {
    let mut level = 0;
    let mut spaces = 0;
    for (i, c) in raw.char_indices() {
        match c {
            ' ' => {
                spaces += 1;
                if spaces == 2 {
                    level += 1;
                    spaces = 0;
                }
            }
            '\t' if spaces == 0 => level += 1,
            '\t' => return Err("tab after an odd number of spaces".to_string()),
            _ => {
                if spaces != 0 {
                    return Err("indentation must be two spaces or a tab per level".to_string());
                }
                return Ok((level, raw[i..].trim_end()));
            }
        }
    }
    Ok((level, ""))
}
