//! Functional-boundary apply function
//!
//! `apply()` is the canonical entry point for command-driven snapshot edits.
//!
//! ## Atomicity Contract
//!
//! - **All-or-nothing**: either the command succeeds and a new valid snapshot
//!   is returned, or it fails and the caller's snapshot is untouched
//! - **No panics**: invalid input returns typed errors
//! - **Validated**: structural commands are checked against the forest
//!   invariants before the new snapshot is handed back
//!
//! ## Example
//!
//! ```
//! use outline_diff_core::{apply, Snapshot, SnapshotCommand, TextItem};
//!
//! let base: Snapshot<TextItem> = Snapshot::new();
//! let cmd = SnapshotCommand::AppendItems {
//!     items: vec![TextItem::new("Parent 1")],
//!     parent: None,
//! };
//!
//! let next = apply(&base, cmd).unwrap();
//! assert_eq!(next.len(), 1);
//! assert!(base.is_empty());
//! ```

use std::time::Instant;

use crate::commands::SnapshotCommand;
use crate::errors::Result;
use crate::logging_facility::elapsed_ms;
use crate::model::OutlineItem;
use crate::ops::snapshot_ops;
use crate::rules::validation;
use crate::snapshot::Snapshot;
use crate::{log_op_end, log_op_error, log_op_start};

/// Apply a command to a snapshot, returning the edited copy
///
/// # Errors
///
/// Returns the builder error for the command (`InvalidParent`,
/// `UnknownSibling`, `UnknownIdentity`, `CycleDetected`,
/// `DuplicateIdentity`, `IndexOutOfBounds`), or `ForestInvariant` if the
/// result fails validation. The input snapshot is never modified.
pub fn apply<T>(snapshot: &Snapshot<T>, cmd: SnapshotCommand<T>) -> Result<Snapshot<T>>
where
    T: OutlineItem + Clone,
{
    let op = cmd.op_name();
    log_op_start!(op, item_count = snapshot.len());
    let start = Instant::now();

    let result = apply_impl(snapshot.clone(), cmd);

    match &result {
        Ok(next) => {
            log_op_end!(op, duration_ms = elapsed_ms(start), item_count = next.len());
        }
        Err(e) => {
            log_op_error!(op, e.clone(), duration_ms = elapsed_ms(start));
        }
    }
    result
}

fn apply_impl<T>(mut state: Snapshot<T>, cmd: SnapshotCommand<T>) -> Result<Snapshot<T>>
where
    T: OutlineItem + Clone,
{
    let structural = cmd.is_structural();
    match cmd {
        SnapshotCommand::AppendItems { items, parent } => {
            snapshot_ops::append_items(&mut state, items, parent.as_ref())?;
        }
        SnapshotCommand::InsertItems {
            items,
            sibling,
            position,
        } => {
            snapshot_ops::insert_items(&mut state, items, &sibling, position)?;
        }
        SnapshotCommand::DeleteItems { ids } => {
            snapshot_ops::delete_items(&mut state, &ids);
        }
        SnapshotCommand::MoveItem {
            id,
            to_parent,
            to_index,
        } => {
            snapshot_ops::move_item(&mut state, &id, to_parent.as_ref(), to_index)?;
        }
        SnapshotCommand::ReloadItems { ids } => {
            snapshot_ops::reload_items(&mut state, &ids)?;
        }
        SnapshotCommand::ReplaceItems { items } => {
            snapshot_ops::replace_items(&mut state, items)?;
        }
    }

    if structural {
        validation::validate_forest(&state)?;
    }
    Ok(state)
}

/// Apply a sequence of commands, stopping at the first failure
///
/// # Errors
///
/// Returns the first command's error; the caller keeps `snapshot` as it was.
pub fn apply_all<T, I>(snapshot: &Snapshot<T>, cmds: I) -> Result<Snapshot<T>>
where
    T: OutlineItem + Clone,
    I: IntoIterator<Item = SnapshotCommand<T>>,
{
    let mut state = snapshot.clone();
    for cmd in cmds {
        state = apply(&state, cmd)?;
    }
    Ok(state)
}
