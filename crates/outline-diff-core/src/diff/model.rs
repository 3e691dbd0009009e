//! Edit script types.
//!
//! Indices in every operation are sequential: each one refers to the tree as
//! it stands after all earlier operations in the script have been applied.
//! A `parent` of `None` is the absolute root.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// One structural or content edit for a tree control
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOperation<I> {
    /// Insert a new, childless row at `index` under `parent`
    Insert {
        id: I,
        parent: Option<I>,
        index: usize,
    },
    /// Remove a row together with whatever subtree it currently has
    Delete { id: I },
    /// Relocate a row and its subtree; atomic for view-state purposes
    Move {
        id: I,
        from_parent: Option<I>,
        from_index: usize,
        to_parent: Option<I>,
        to_index: usize,
    },
    /// Refresh a row's content in place
    Reload { id: I },
}

impl<I> EditOperation<I> {
    /// Identity the operation targets
    pub fn id(&self) -> &I {
        match self {
            EditOperation::Insert { id, .. }
            | EditOperation::Delete { id }
            | EditOperation::Move { id, .. }
            | EditOperation::Reload { id } => id,
        }
    }

    pub fn kind(&self) -> EditKind {
        match self {
            EditOperation::Insert { .. } => EditKind::Insert,
            EditOperation::Delete { .. } => EditKind::Delete,
            EditOperation::Move { .. } => EditKind::Move,
            EditOperation::Reload { .. } => EditKind::Reload,
        }
    }
}

/// Discriminant of [`EditOperation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    Insert,
    Delete,
    Move,
    Reload,
}

/// Ordered edit script transforming one rendered tree into another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditScript<I> {
    ops: Vec<EditOperation<I>>,
}

impl<I> Default for EditScript<I> {
    fn default() -> Self {
        Self { ops: Vec::new() }
    }
}

impl<I> EditScript<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, op: EditOperation<I>) {
        self.ops.push(op);
    }

    pub fn operations(&self) -> &[EditOperation<I>] {
        &self.ops
    }

    pub fn into_operations(self) -> Vec<EditOperation<I>> {
        self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditOperation<I>> {
        self.ops.iter()
    }

    /// Number of operations of one kind
    pub fn count(&self, kind: EditKind) -> usize {
        self.ops.iter().filter(|op| op.kind() == kind).count()
    }

    pub fn inserts(&self) -> usize {
        self.count(EditKind::Insert)
    }

    pub fn deletes(&self) -> usize {
        self.count(EditKind::Delete)
    }

    pub fn moves(&self) -> usize {
        self.count(EditKind::Move)
    }

    pub fn reloads(&self) -> usize {
        self.count(EditKind::Reload)
    }

    /// True if the script changes structure (anything but reloads)
    pub fn has_structural_changes(&self) -> bool {
        self.ops.iter().any(|op| op.kind() != EditKind::Reload)
    }
}

impl<I: Serialize> EditScript<I> {
    /// Pretty-printed JSON array of tagged operations
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if an identity fails to serialize.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<I: DeserializeOwned> EditScript<I> {
    /// Read a script previously written by [`EditScript::to_json`]
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the input is not a JSON array of operations.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<I> From<Vec<EditOperation<I>>> for EditScript<I> {
    fn from(ops: Vec<EditOperation<I>>) -> Self {
        Self { ops }
    }
}

impl<I> IntoIterator for EditScript<I> {
    type Item = EditOperation<I>;
    type IntoIter = std::vec::IntoIter<EditOperation<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a, I> IntoIterator for &'a EditScript<I> {
    type Item = &'a EditOperation<I>;
    type IntoIter = std::slice::Iter<'a, EditOperation<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

/// Tuning knobs for the diff engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOptions {
    /// Emit `Reload` when an item's payload differs between snapshots, not
    /// only when its revision was bumped with `reload_items`
    pub content_reloads: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            content_reloads: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_counters() {
        let script: EditScript<&str> = vec![
            EditOperation::Insert {
                id: "b",
                parent: None,
                index: 1,
            },
            EditOperation::Reload { id: "a" },
        ]
        .into();
        assert_eq!(script.inserts(), 1);
        assert_eq!(script.reloads(), 1);
        assert_eq!(script.moves(), 0);
        assert!(script.has_structural_changes());
    }

    #[test]
    fn test_operation_json_shape() {
        let op = EditOperation::Move {
            id: "a".to_string(),
            from_parent: None,
            from_index: 0,
            to_parent: Some("p".to_string()),
            to_index: 2,
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["op"], "move");
        assert_eq!(json["to_parent"], "p");
        assert!(json["from_parent"].is_null());
    }

    #[test]
    fn test_script_json_reads_back() {
        let script: EditScript<String> = vec![
            EditOperation::Delete { id: "x".to_string() },
            EditOperation::Reload { id: "y".to_string() },
        ]
        .into();
        let json = script.to_json().unwrap();
        assert!(json.trim_start().starts_with('['));
        assert_eq!(EditScript::<String>::from_json(&json).unwrap(), script);
    }

    #[test]
    fn test_script_json_rejects_unknown_op() {
        let err = EditScript::<String>::from_json(r#"[{"op":"rename","id":"x"}]"#).unwrap_err();
        assert_eq!(err.kind(), crate::errors::ExErrorKind::Serialization);
    }

    #[test]
    fn test_reload_only_script_is_not_structural() {
        let script: EditScript<u32> = vec![EditOperation::Reload { id: 1 }].into();
        assert!(!script.has_structural_changes());
    }
}
