//! Snapshot value type
//!
//! A [`Snapshot`] is a complete ordered forest of items at one point in
//! time. It is an owned value: the builder methods here never mutate the
//! receiver, they return a fresh snapshot (or an error, leaving the caller
//! with the snapshot it already had). In-place mutators with the same
//! validation live in [`crate::ops::snapshot_ops`].
//!
//! ```
//! use outline_diff_core::{Snapshot, TextItem};
//!
//! let empty: Snapshot<TextItem> = Snapshot::new();
//! let s1 = empty.append_items(vec![TextItem::new("A")], None).unwrap();
//! let s2 = s1
//!     .append_items(vec![TextItem::new("B")], Some(&"A".to_string()))
//!     .unwrap();
//!
//! assert_eq!(s1.len(), 1);
//! assert_eq!(s2.len(), 2);
//! assert_eq!(s2.children_of(Some(&"A".to_string())).unwrap(), ["B".to_string()]);
//! ```

use std::collections::HashMap;

use crate::errors::{describe_id, OutlineError, Result};
use crate::model::{Node, OutlineItem};
use crate::ops::snapshot_ops::{self, InsertPosition};
use crate::traversal::preorder::PreOrder;

/// Ordered forest of items keyed by identity
#[derive(Debug, Clone)]
pub struct Snapshot<T: OutlineItem> {
    pub(crate) roots: Vec<T::Id>,
    pub(crate) nodes: HashMap<T::Id, Node<T>>,
}

impl<T: OutlineItem> Default for Snapshot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: OutlineItem + PartialEq> PartialEq for Snapshot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.roots == other.roots && self.nodes == other.nodes
    }
}

impl<T: OutlineItem> Snapshot<T> {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self {
            roots: Vec::new(),
            nodes: HashMap::new(),
        }
    }

    /// Number of items in the snapshot
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.nodes.contains_key(id)
    }

    /// Root identities in display order
    pub fn root_ids(&self) -> &[T::Id] {
        &self.roots
    }

    pub fn node(&self, id: &T::Id) -> Option<&Node<T>> {
        self.nodes.get(id)
    }

    pub fn item(&self, id: &T::Id) -> Option<&T> {
        self.nodes.get(id).map(|n| &n.item)
    }

    /// Look up a node, failing with `UnknownIdentity` if absent
    ///
    /// # Errors
    ///
    /// Returns `UnknownIdentity` if `id` is not in the snapshot.
    pub fn get(&self, id: &T::Id) -> Result<&Node<T>> {
        self.nodes
            .get(id)
            .ok_or_else(|| OutlineError::UnknownIdentity {
                item_id: describe_id(id),
            })
    }

    /// Parent of an item (`None` for roots)
    ///
    /// # Errors
    ///
    /// Returns `UnknownIdentity` if `id` is not in the snapshot.
    pub fn parent_of(&self, id: &T::Id) -> Result<Option<&T::Id>> {
        Ok(self.get(id)?.parent.as_ref())
    }

    /// Ordered children of `parent`, or the roots when `parent` is `None`
    ///
    /// # Errors
    ///
    /// Returns `UnknownIdentity` if `parent` is not in the snapshot.
    pub fn children_of(&self, parent: Option<&T::Id>) -> Result<&[T::Id]> {
        match parent {
            None => Ok(&self.roots),
            Some(id) => Ok(&self.get(id)?.children),
        }
    }

    /// Position of an item within its parent's child list
    ///
    /// # Errors
    ///
    /// Returns `UnknownIdentity` if `id` is not in the snapshot, or
    /// `ForestInvariant` if the parent does not list it.
    pub fn index_of(&self, id: &T::Id) -> Result<usize> {
        let siblings = self.children_of(self.parent_of(id)?)?;
        siblings
            .iter()
            .position(|c| c == id)
            .ok_or_else(|| OutlineError::ForestInvariant {
                reason: format!("{} is missing from its parent's children", describe_id(id)),
            })
    }

    /// Content revision of an item
    ///
    /// # Errors
    ///
    /// Returns `UnknownIdentity` if `id` is not in the snapshot.
    pub fn revision_of(&self, id: &T::Id) -> Result<u64> {
        Ok(self.get(id)?.revision)
    }

    /// Every descendant of `id` in pre-order, excluding `id` itself
    ///
    /// # Errors
    ///
    /// Returns `UnknownIdentity` if `id` is not in the snapshot.
    pub fn descendants_of(&self, id: &T::Id) -> Result<Vec<T::Id>> {
        let node = self.get(id)?;
        let mut out = Vec::new();
        let mut stack: Vec<&T::Id> = node.children.iter().rev().collect();
        while let Some(current) = stack.pop() {
            out.push(current.clone());
            if let Some(n) = self.nodes.get(current) {
                stack.extend(n.children.iter().rev());
            }
        }
        Ok(out)
    }

    /// Lazy depth-first, pre-order traversal of every item
    ///
    /// Each call starts a fresh traversal from the roots.
    pub fn enumerate_items(&self) -> PreOrder<'_, T> {
        PreOrder::new(self)
    }

    /// Visitor form of [`Snapshot::enumerate_items`]
    pub fn for_each_item<F>(&self, mut visitor: F)
    where
        F: FnMut(&T, Option<&T>),
    {
        for entry in self.enumerate_items() {
            visitor(entry.item, entry.parent);
        }
    }

    /// Identities in pre-order
    pub fn ids_pre_order(&self) -> Vec<T::Id> {
        self.enumerate_items().map(|e| e.item.id()).collect()
    }
}

impl<T: OutlineItem + Clone> Snapshot<T> {
    /// Return a copy with `items` appended under `parent` (or as roots)
    ///
    /// # Errors
    ///
    /// `InvalidParent` if `parent` is absent, `DuplicateIdentity` if an item
    /// is already present or repeated.
    pub fn append_items(&self, items: Vec<T>, parent: Option<&T::Id>) -> Result<Self> {
        let mut next = self.clone();
        snapshot_ops::append_items(&mut next, items, parent)?;
        Ok(next)
    }

    /// Return a copy with `items` inserted before `sibling`
    ///
    /// # Errors
    ///
    /// `UnknownSibling` if `sibling` is absent, `DuplicateIdentity` on
    /// repeated identities.
    pub fn insert_items_before(&self, items: Vec<T>, sibling: &T::Id) -> Result<Self> {
        let mut next = self.clone();
        snapshot_ops::insert_items(&mut next, items, sibling, InsertPosition::Before)?;
        Ok(next)
    }

    /// Return a copy with `items` inserted after `sibling`
    ///
    /// # Errors
    ///
    /// `UnknownSibling` if `sibling` is absent, `DuplicateIdentity` on
    /// repeated identities.
    pub fn insert_items_after(&self, items: Vec<T>, sibling: &T::Id) -> Result<Self> {
        let mut next = self.clone();
        snapshot_ops::insert_items(&mut next, items, sibling, InsertPosition::After)?;
        Ok(next)
    }

    /// Return a copy without `ids` and their descendants
    ///
    /// Identities that are not present are skipped with a warning event.
    pub fn delete_items(&self, ids: &[T::Id]) -> Self {
        let mut next = self.clone();
        snapshot_ops::delete_items(&mut next, ids);
        next
    }

    /// Like [`Snapshot::delete_items`] but rejects unknown identities
    ///
    /// # Errors
    ///
    /// `UnknownIdentity` if any id is absent; nothing is removed.
    pub fn delete_items_strict(&self, ids: &[T::Id]) -> Result<Self> {
        let mut next = self.clone();
        snapshot_ops::delete_items_strict(&mut next, ids)?;
        Ok(next)
    }

    /// Return a copy with the subtree at `id` relocated
    ///
    /// # Errors
    ///
    /// `UnknownIdentity`, `InvalidParent`, `CycleDetected` or
    /// `IndexOutOfBounds`; see [`snapshot_ops::move_item`].
    pub fn move_item(&self, id: &T::Id, to_parent: Option<&T::Id>, to_index: usize) -> Result<Self> {
        let mut next = self.clone();
        snapshot_ops::move_item(&mut next, id, to_parent, to_index)?;
        Ok(next)
    }

    /// Return a copy with `ids` marked as content-changed
    ///
    /// # Errors
    ///
    /// `UnknownIdentity` if any id is absent.
    pub fn reload_items(&self, ids: &[T::Id]) -> Result<Self> {
        let mut next = self.clone();
        snapshot_ops::reload_items(&mut next, ids)?;
        Ok(next)
    }

    /// Return a copy with the payloads of existing items replaced
    ///
    /// # Errors
    ///
    /// `UnknownIdentity` if an item's identity is absent.
    pub fn replace_items(&self, items: Vec<T>) -> Result<Self> {
        let mut next = self.clone();
        snapshot_ops::replace_items(&mut next, items)?;
        Ok(next)
    }
}
