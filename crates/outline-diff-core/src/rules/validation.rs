use std::collections::HashSet;

use crate::errors::{describe_id, OutlineError, Result};
use crate::model::OutlineItem;
use crate::snapshot::Snapshot;

fn violation(reason: String) -> OutlineError {
    OutlineError::ForestInvariant { reason }
}

/// Validate every structural invariant of a snapshot forest
///
/// 1. Every listed child (and root) has a node
/// 2. Each node's `parent` agrees with the list it appears in
/// 3. No identity is listed twice (no duplicates, no multiple parents)
/// 4. Every node is reachable from the roots (no orphans, no detached cycles)
///
/// Snapshots built only through the builder operations always pass; this is
/// run by `apply` after structural commands and by tests.
///
/// # Errors
///
/// Returns `ForestInvariant` describing the first violation found.
pub fn validate_forest<T: OutlineItem>(snapshot: &Snapshot<T>) -> Result<()> {
    let mut seen: HashSet<&T::Id> = HashSet::with_capacity(snapshot.len());
    let mut stack: Vec<(Option<&T::Id>, &T::Id)> =
        snapshot.roots.iter().rev().map(|r| (None, r)).collect();

    while let Some((expected_parent, id)) = stack.pop() {
        let node = snapshot
            .nodes
            .get(id)
            .ok_or_else(|| violation(format!("{} is listed but has no node", describe_id(id))))?;
        if node.parent.as_ref() != expected_parent {
            return Err(violation(format!(
                "{} records the wrong parent",
                describe_id(id)
            )));
        }
        if !seen.insert(id) {
            return Err(violation(format!("{} is listed more than once", describe_id(id))));
        }
        stack.extend(node.children.iter().rev().map(|c| (Some(id), c)));
    }

    if seen.len() != snapshot.nodes.len() {
        let orphan = snapshot
            .nodes
            .keys()
            .find(|k| !seen.contains(k))
            .map(describe_id)
            .unwrap_or_default();
        return Err(violation(format!("{} is not reachable from the roots", orphan)));
    }
    Ok(())
}
