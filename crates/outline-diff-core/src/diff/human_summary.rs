//! Human-readable summary renderer for edit scripts.

use std::fmt::Debug;

use crate::diff::model::{EditOperation, EditScript};
use crate::errors::{describe_id, describe_parent};

/// Render a human-readable Markdown/text summary of an [`EditScript`].
///
/// Meant for review output such as the `outline diff` command. It is
/// informational only; the structured script is the source of truth.
pub fn render_human_summary<I: Debug>(script: &EditScript<I>) -> String {
    let mut out = String::new();

    out.push_str("## Edit Script\n\n");
    out.push_str(&format!(
        "**Operations**: {}  \n**Inserts**: {} | **Deletes**: {} | **Moves**: {} | **Reloads**: {}\n\n",
        script.len(),
        script.inserts(),
        script.deletes(),
        script.moves(),
        script.reloads(),
    ));

    if script.is_empty() {
        out.push_str("_No changes._\n");
        return out;
    }

    out.push_str("### Steps\n\n");
    for (n, op) in script.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", n + 1, describe_operation(op)));
    }
    out
}

fn describe_operation<I: Debug>(op: &EditOperation<I>) -> String {
    match op {
        EditOperation::Insert { id, parent, index } => format!(
            "insert `{}` under `{}` at {}",
            describe_id(id),
            describe_parent(parent.as_ref()),
            index
        ),
        EditOperation::Delete { id } => format!("delete `{}`", describe_id(id)),
        EditOperation::Move {
            id,
            from_parent,
            from_index,
            to_parent,
            to_index,
        } => format!(
            "move `{}` from `{}`[{}] to `{}`[{}]",
            describe_id(id),
            describe_parent(from_parent.as_ref()),
            from_index,
            describe_parent(to_parent.as_ref()),
            to_index
        ),
        EditOperation::Reload { id } => format!("reload `{}`", describe_id(id)),
    }
}
