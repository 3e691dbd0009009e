//! Snapshot edit commands
//!
//! A command inventory for the functional-boundary `apply()` entry point.
//! UI code that records user edits (menu actions, text panels) can queue
//! these and replay them against a baseline snapshot.

use crate::model::OutlineItem;
use crate::ops::InsertPosition;

/// One builder edit against a snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotCommand<T: OutlineItem> {
    /// Append items as trailing children of `parent` (roots when `None`)
    AppendItems {
        items: Vec<T>,
        parent: Option<T::Id>,
    },

    /// Insert items next to an existing sibling
    InsertItems {
        items: Vec<T>,
        sibling: T::Id,
        position: InsertPosition,
    },

    /// Delete items and their descendants; unknown ids are skipped
    DeleteItems { ids: Vec<T::Id> },

    /// Relocate a subtree
    MoveItem {
        id: T::Id,
        to_parent: Option<T::Id>,
        to_index: usize,
    },

    /// Force a reload edit for unchanged rows
    ReloadItems { ids: Vec<T::Id> },

    /// Swap in new payloads for existing identities
    ReplaceItems { items: Vec<T> },
}

impl<T: OutlineItem> SnapshotCommand<T> {
    /// Stable operation name used in log events
    pub fn op_name(&self) -> &'static str {
        match self {
            SnapshotCommand::AppendItems { .. } => "append_items",
            SnapshotCommand::InsertItems { .. } => "insert_items",
            SnapshotCommand::DeleteItems { .. } => "delete_items",
            SnapshotCommand::MoveItem { .. } => "move_item",
            SnapshotCommand::ReloadItems { .. } => "reload_items",
            SnapshotCommand::ReplaceItems { .. } => "replace_items",
        }
    }

    /// Whether the command can change parent/child structure
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            SnapshotCommand::ReloadItems { .. } | SnapshotCommand::ReplaceItems { .. }
        )
    }
}
