//! In-place snapshot mutators
//!
//! Every function validates its whole input before touching the snapshot,
//! so an `Err` always means the snapshot is exactly as it was.

use std::collections::HashSet;

use crate::errors::{describe_id, describe_parent, OutlineError, Result};
use crate::model::{Node, OutlineItem};
use crate::snapshot::Snapshot;

/// Where `insert_items` places new items relative to the sibling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Before,
    After,
}

/// Reject identities already present in the snapshot or repeated in `items`.
fn check_new_identities<T: OutlineItem>(snapshot: &Snapshot<T>, items: &[T]) -> Result<Vec<T::Id>> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        let id = item.id();
        if snapshot.nodes.contains_key(&id) || !seen.insert(id.clone()) {
            return Err(OutlineError::DuplicateIdentity {
                item_id: describe_id(&id),
            });
        }
        ids.push(id);
    }
    Ok(ids)
}

/// Mutable child list of `parent`, or the roots
pub(crate) fn child_list_mut<'a, T: OutlineItem>(
    snapshot: &'a mut Snapshot<T>,
    parent: Option<&T::Id>,
) -> Option<&'a mut Vec<T::Id>> {
    match parent {
        None => Some(&mut snapshot.roots),
        Some(id) => snapshot.nodes.get_mut(id).map(|n| &mut n.children),
    }
}

/// Append `items` as trailing children of `parent` (or as new roots)
///
/// # Errors
///
/// * `InvalidParent` - `parent` is not in the snapshot
/// * `DuplicateIdentity` - an item is already present or repeated
pub fn append_items<T: OutlineItem>(
    snapshot: &mut Snapshot<T>,
    items: Vec<T>,
    parent: Option<&T::Id>,
) -> Result<()> {
    if let Some(pid) = parent {
        if !snapshot.nodes.contains_key(pid) {
            return Err(OutlineError::InvalidParent {
                parent_id: describe_id(pid),
            });
        }
    }
    let ids = check_new_identities(snapshot, &items)?;

    for item in items {
        snapshot
            .nodes
            .insert(item.id(), Node::new(item, parent.cloned()));
    }
    let siblings = child_list_mut(snapshot, parent).ok_or_else(|| OutlineError::Internal {
        message: "parent vanished during append".to_string(),
    })?;
    siblings.extend(ids);

    tracing::debug!(parent = %describe_parent(parent), "appended items");
    Ok(())
}

/// Insert `items` immediately before or after `sibling`, under its parent
///
/// # Errors
///
/// * `UnknownSibling` - `sibling` is not in the snapshot
/// * `DuplicateIdentity` - an item is already present or repeated
pub fn insert_items<T: OutlineItem>(
    snapshot: &mut Snapshot<T>,
    items: Vec<T>,
    sibling: &T::Id,
    position: InsertPosition,
) -> Result<()> {
    let parent = snapshot
        .nodes
        .get(sibling)
        .map(|n| n.parent.clone())
        .ok_or_else(|| OutlineError::UnknownSibling {
            sibling_id: describe_id(sibling),
        })?;
    let ids = check_new_identities(snapshot, &items)?;
    let sibling_index = snapshot.index_of(sibling)?;
    let at = match position {
        InsertPosition::Before => sibling_index,
        InsertPosition::After => sibling_index + 1,
    };

    for item in items {
        snapshot
            .nodes
            .insert(item.id(), Node::new(item, parent.clone()));
    }
    let siblings =
        child_list_mut(snapshot, parent.as_ref()).ok_or_else(|| OutlineError::Internal {
            message: "sibling parent vanished during insert".to_string(),
        })?;
    siblings.splice(at..at, ids);
    Ok(())
}

/// Detach `id` from its parent's child list and drop its whole subtree.
///
/// Returns the number of nodes removed.
fn remove_subtree<T: OutlineItem>(snapshot: &mut Snapshot<T>, id: &T::Id) -> usize {
    let Some(parent) = snapshot.nodes.get(id).map(|n| n.parent.clone()) else {
        return 0;
    };
    if let Some(siblings) = child_list_mut(snapshot, parent.as_ref()) {
        if let Some(pos) = siblings.iter().position(|c| c == id) {
            siblings.remove(pos);
        }
    }

    let mut removed = 0;
    let mut stack = vec![id.clone()];
    while let Some(current) = stack.pop() {
        if let Some(node) = snapshot.nodes.remove(&current) {
            removed += 1;
            stack.extend(node.children);
        }
    }
    removed
}

/// Remove `ids` and, recursively, all of their descendants
///
/// Identities that are not present (including ones already removed as the
/// descendant of an earlier id in the list) are skipped. Returns the total
/// number of items removed.
pub fn delete_items<T: OutlineItem>(snapshot: &mut Snapshot<T>, ids: &[T::Id]) -> usize {
    let mut removed = 0;
    for id in ids {
        if snapshot.nodes.contains_key(id) {
            removed += remove_subtree(snapshot, id);
        } else {
            tracing::warn!(item_id = %describe_id(id), "delete_items: unknown identity skipped");
        }
    }
    removed
}

/// Remove `ids` and their descendants, rejecting unknown identities
///
/// # Errors
///
/// * `UnknownIdentity` - any id is absent; nothing is removed
pub fn delete_items_strict<T: OutlineItem>(
    snapshot: &mut Snapshot<T>,
    ids: &[T::Id],
) -> Result<usize> {
    if let Some(missing) = ids.iter().find(|id| !snapshot.nodes.contains_key(*id)) {
        return Err(OutlineError::UnknownIdentity {
            item_id: describe_id(missing),
        });
    }
    Ok(delete_items(snapshot, ids))
}

/// True if `candidate` is `id` or one of its descendants.
///
/// Walks parent pointers upward from `candidate`, so the cost is the depth
/// of the destination rather than the size of the moved subtree.
pub(crate) fn is_self_or_descendant<T: OutlineItem>(
    snapshot: &Snapshot<T>,
    candidate: &T::Id,
    id: &T::Id,
) -> bool {
    let mut current = Some(candidate);
    while let Some(c) = current {
        if c == id {
            return true;
        }
        current = snapshot.nodes.get(c).and_then(|n| n.parent.as_ref());
    }
    false
}

/// Relocate the subtree rooted at `id` to `to_parent` at `to_index`
///
/// `to_index` is interpreted after `id` has been detached, so it ranges over
/// `0..=len` of the destination list without `id`.
///
/// # Errors
///
/// * `UnknownIdentity` - `id` is not in the snapshot
/// * `InvalidParent` - `to_parent` is not in the snapshot
/// * `CycleDetected` - `to_parent` is `id` or one of its descendants
/// * `IndexOutOfBounds` - `to_index` is past the end of the destination
pub fn move_item<T: OutlineItem>(
    snapshot: &mut Snapshot<T>,
    id: &T::Id,
    to_parent: Option<&T::Id>,
    to_index: usize,
) -> Result<()> {
    let from_parent = snapshot.parent_of(id)?.cloned();

    let dest_len = match to_parent {
        None => snapshot.roots.len(),
        Some(pid) => {
            let dest = snapshot
                .nodes
                .get(pid)
                .ok_or_else(|| OutlineError::InvalidParent {
                    parent_id: describe_id(pid),
                })?;
            if is_self_or_descendant(snapshot, pid, id) {
                return Err(OutlineError::CycleDetected {
                    item_id: describe_id(id),
                    parent_id: describe_id(pid),
                });
            }
            dest.children.len()
        }
    };
    let same_parent = from_parent.as_ref() == to_parent;
    let available = if same_parent { dest_len - 1 } else { dest_len };
    if to_index > available {
        return Err(OutlineError::IndexOutOfBounds {
            parent_id: describe_parent(to_parent),
            index: to_index,
            len: available,
        });
    }

    if let Some(siblings) = child_list_mut(snapshot, from_parent.as_ref()) {
        if let Some(pos) = siblings.iter().position(|c| c == id) {
            siblings.remove(pos);
        }
    }
    let dest = child_list_mut(snapshot, to_parent).ok_or_else(|| OutlineError::Internal {
        message: "destination vanished during move".to_string(),
    })?;
    dest.insert(to_index, id.clone());
    if let Some(node) = snapshot.nodes.get_mut(id) {
        node.parent = to_parent.cloned();
    }
    Ok(())
}

/// Mark `ids` as content-changed without altering structure
///
/// # Errors
///
/// * `UnknownIdentity` - any id is absent; no revision is bumped
pub fn reload_items<T: OutlineItem>(snapshot: &mut Snapshot<T>, ids: &[T::Id]) -> Result<()> {
    if let Some(missing) = ids.iter().find(|id| !snapshot.nodes.contains_key(*id)) {
        return Err(OutlineError::UnknownIdentity {
            item_id: describe_id(missing),
        });
    }
    for id in ids {
        if let Some(node) = snapshot.nodes.get_mut(id) {
            node.revision += 1;
        }
    }
    Ok(())
}

/// Replace the payloads of existing items, keyed by their identity
///
/// # Errors
///
/// * `UnknownIdentity` - an item's identity is absent; nothing is replaced
pub fn replace_items<T: OutlineItem>(snapshot: &mut Snapshot<T>, items: Vec<T>) -> Result<()> {
    if let Some(missing) = items.iter().find(|i| !snapshot.nodes.contains_key(&i.id())) {
        return Err(OutlineError::UnknownIdentity {
            item_id: describe_id(&missing.id()),
        });
    }
    for item in items {
        if let Some(node) = snapshot.nodes.get_mut(&item.id()) {
            node.item = item;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextItem;

    fn id(s: &str) -> String {
        s.to_string()
    }

    fn items(titles: &[&str]) -> Vec<TextItem> {
        titles.iter().map(|t| TextItem::new(*t)).collect()
    }

    fn tree() -> Snapshot<TextItem> {
        let mut s = Snapshot::new();
        append_items(&mut s, items(&["A", "B"]), None).unwrap();
        append_items(&mut s, items(&["A1", "A2"]), Some(&id("A"))).unwrap();
        append_items(&mut s, items(&["A1x"]), Some(&id("A1"))).unwrap();
        s
    }

    #[test]
    fn test_append_to_missing_parent_fails() {
        let mut s = tree();
        let before = s.clone();
        let result = append_items(&mut s, items(&["Z"]), Some(&id("missing")));
        assert!(matches!(result, Err(OutlineError::InvalidParent { .. })));
        assert_eq!(s, before);
    }

    #[test]
    fn test_append_duplicate_in_batch_fails() {
        let mut s = Snapshot::new();
        let result = append_items(&mut s, items(&["X", "X"]), None);
        assert!(matches!(result, Err(OutlineError::DuplicateIdentity { .. })));
        assert!(s.is_empty());
    }

    #[test]
    fn test_insert_before_and_after() {
        let mut s = tree();
        insert_items(&mut s, items(&["A0"]), &id("A1"), InsertPosition::Before).unwrap();
        insert_items(&mut s, items(&["A3"]), &id("A2"), InsertPosition::After).unwrap();
        assert_eq!(
            s.children_of(Some(&id("A"))).unwrap(),
            [id("A0"), id("A1"), id("A2"), id("A3")]
        );
    }

    #[test]
    fn test_insert_unknown_sibling() {
        let mut s = tree();
        let result = insert_items(&mut s, items(&["N"]), &id("nope"), InsertPosition::After);
        assert!(matches!(result, Err(OutlineError::UnknownSibling { .. })));
    }

    #[test]
    fn test_delete_removes_descendants() {
        let mut s = tree();
        let removed = delete_items(&mut s, &[id("A")]);
        assert_eq!(removed, 4);
        assert_eq!(s.root_ids(), [id("B")]);
        assert!(!s.contains(&id("A1x")));
    }

    #[test]
    fn test_delete_parent_and_child_together() {
        let mut s = tree();
        let removed = delete_items(&mut s, &[id("A"), id("A1")]);
        assert_eq!(removed, 4);
    }

    #[test]
    fn test_delete_strict_unknown_is_atomic() {
        let mut s = tree();
        let result = delete_items_strict(&mut s, &[id("B"), id("ghost")]);
        assert!(matches!(result, Err(OutlineError::UnknownIdentity { .. })));
        assert!(s.contains(&id("B")));
    }

    #[test]
    fn test_move_within_parent() {
        let mut s = tree();
        move_item(&mut s, &id("A1"), Some(&id("A")), 1).unwrap();
        assert_eq!(s.children_of(Some(&id("A"))).unwrap(), [id("A2"), id("A1")]);
    }

    #[test]
    fn test_move_to_root_keeps_subtree() {
        let mut s = tree();
        move_item(&mut s, &id("A1"), None, 0).unwrap();
        assert_eq!(s.root_ids(), [id("A1"), id("A"), id("B")]);
        assert_eq!(s.parent_of(&id("A1x")).unwrap(), Some(&id("A1")));
        assert_eq!(s.parent_of(&id("A1")).unwrap(), None);
    }

    #[test]
    fn test_move_into_descendant_is_cycle() {
        let mut s = tree();
        let before = s.clone();
        let result = move_item(&mut s, &id("A"), Some(&id("A1x")), 0);
        assert!(matches!(result, Err(OutlineError::CycleDetected { .. })));
        assert_eq!(s, before);
    }

    #[test]
    fn test_move_into_self_is_cycle() {
        let mut s = tree();
        let result = move_item(&mut s, &id("A"), Some(&id("A")), 0);
        assert!(matches!(result, Err(OutlineError::CycleDetected { .. })));
    }

    #[test]
    fn test_move_index_out_of_bounds() {
        let mut s = tree();
        let result = move_item(&mut s, &id("A1"), Some(&id("A")), 2);
        assert!(matches!(
            result,
            Err(OutlineError::IndexOutOfBounds { index: 2, len: 1, .. })
        ));
    }

    #[test]
    fn test_reload_bumps_revision() {
        let mut s = tree();
        reload_items(&mut s, &[id("B")]).unwrap();
        reload_items(&mut s, &[id("B")]).unwrap();
        assert_eq!(s.revision_of(&id("B")).unwrap(), 2);
        assert_eq!(s.revision_of(&id("A")).unwrap(), 0);
    }

    #[test]
    fn test_reload_unknown_identity() {
        let mut s = tree();
        let result = reload_items(&mut s, &[id("B"), id("ghost")]);
        assert!(matches!(result, Err(OutlineError::UnknownIdentity { .. })));
        assert_eq!(s.revision_of(&id("B")).unwrap(), 0);
    }
}
