//! In-memory tree control
//!
//! [`SimulatedTree`] behaves like a host outline view: it holds rows by
//! identity, keeps expansion and selection state per row, and applies edit
//! scripts operation by operation. It is what the tests and the CLI use to
//! check that a script really turns one snapshot into the next.
//!
//! View-state rules:
//!
//! - `Move` is atomic: the row and its subtree keep their state.
//! - `Delete` drops the state of the row and its whole subtree.
//! - `Insert` yields a collapsed, unselected row.
//! - `reload_all` resets every row to collapsed and unselected.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::diff::model::{EditOperation, EditScript};
use crate::errors::{describe_id, describe_parent, OutlineError, Result};
use crate::model::OutlineItem;
use crate::reconcile::control::TreeControl;
use crate::reconcile::shape::TreeShape;
use crate::snapshot::Snapshot;

/// Simulated host tree control with identity-keyed view state
#[derive(Debug, Clone)]
pub struct SimulatedTree<Id: Eq + Hash> {
    shape: TreeShape<Id>,
    expanded: HashSet<Id>,
    selected: HashSet<Id>,
    /// Rows refreshed by `Reload` since the last `take_reloaded`
    reloaded: Vec<Id>,
    full_reloads: usize,
}

impl<Id: Clone + Eq + Hash + Debug> Default for SimulatedTree<Id> {
    fn default() -> Self {
        Self {
            shape: TreeShape::default(),
            expanded: HashSet::new(),
            selected: HashSet::new(),
            reloaded: Vec::new(),
            full_reloads: 0,
        }
    }
}

impl<Id: Clone + Eq + Hash + Debug> SimulatedTree<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A control already displaying `snapshot`
    pub fn from_snapshot<T: OutlineItem<Id = Id>>(snapshot: &Snapshot<T>) -> Self {
        Self {
            shape: TreeShape::from_snapshot(snapshot),
            ..Self::default()
        }
    }

    pub fn shape(&self) -> &TreeShape<Id> {
        &self.shape
    }

    /// True if the displayed rows have exactly the snapshot's structure
    pub fn matches<T: OutlineItem<Id = Id>>(&self, snapshot: &Snapshot<T>) -> bool {
        self.shape.matches(snapshot)
    }

    pub fn len(&self) -> usize {
        self.shape.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    pub fn is_expanded(&self, id: &Id) -> bool {
        self.expanded.contains(id)
    }

    pub fn is_selected(&self, id: &Id) -> bool {
        self.selected.contains(id)
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    pub fn selected_ids(&self) -> impl Iterator<Item = &Id> {
        self.selected.iter()
    }

    /// Number of times the control fell back to a full reload
    pub fn full_reloads(&self) -> usize {
        self.full_reloads
    }

    /// Drain the rows refreshed since the previous call
    pub fn take_reloaded(&mut self) -> Vec<Id> {
        std::mem::take(&mut self.reloaded)
    }

    /// Expand every row that has children
    pub fn expand_all(&mut self) {
        let parents: Vec<Id> = self
            .shape
            .children
            .iter()
            .filter(|(_, kids)| !kids.is_empty())
            .map(|(id, _)| id.clone())
            .collect();
        self.expanded.extend(parents);
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Expand one row
    ///
    /// # Errors
    ///
    /// `UnknownIdentity` if the row is not displayed.
    pub fn expand(&mut self, id: &Id) -> Result<()> {
        self.require(id)?;
        self.expanded.insert(id.clone());
        Ok(())
    }

    /// Add a row to the selection
    ///
    /// # Errors
    ///
    /// `UnknownIdentity` if the row is not displayed.
    pub fn select(&mut self, id: &Id) -> Result<()> {
        self.require(id)?;
        self.selected.insert(id.clone());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    fn require(&self, id: &Id) -> Result<()> {
        if self.shape.contains(id) {
            Ok(())
        } else {
            Err(OutlineError::UnknownIdentity {
                item_id: describe_id(id),
            })
        }
    }
}

fn inconsistent(step: usize, reason: String) -> OutlineError {
    OutlineError::InconsistentTree {
        reason: format!("operation {}: {}", step + 1, reason),
    }
}

/// Apply one operation to `shape`, recording rows whose state must go.
fn apply_one<Id: Clone + Eq + Hash + Debug>(
    shape: &mut TreeShape<Id>,
    op: &EditOperation<Id>,
    dropped: &mut Vec<Id>,
    reloaded: &mut Vec<Id>,
) -> std::result::Result<(), String> {
    match op {
        EditOperation::Insert { id, parent, index } => {
            if shape.contains(id) {
                return Err(format!("{} is already displayed", describe_id(id)));
            }
            let siblings = shape
                .children_mut(parent.as_ref())
                .ok_or_else(|| format!("parent {} is not displayed", describe_parent(parent.as_ref())))?;
            if *index > siblings.len() {
                return Err(format!(
                    "insert index {} past {} children",
                    index,
                    siblings.len()
                ));
            }
            siblings.insert(*index, id.clone());
            shape.children.insert(id.clone(), Vec::new());
            shape.parents.insert(id.clone(), parent.clone());
            dropped.push(id.clone());
        }
        EditOperation::Delete { id } => {
            let parent = shape
                .parent_of(id)
                .ok_or_else(|| format!("{} is not displayed", describe_id(id)))?
                .cloned();
            if let Some(siblings) = shape.children_mut(parent.as_ref()) {
                siblings.retain(|c| c != id);
            }
            for gone in shape.subtree(id) {
                shape.children.remove(&gone);
                shape.parents.remove(&gone);
                dropped.push(gone);
            }
        }
        EditOperation::Move {
            id,
            from_parent,
            from_index,
            to_parent,
            to_index,
        } => {
            let current_parent = shape
                .parent_of(id)
                .ok_or_else(|| format!("{} is not displayed", describe_id(id)))?;
            if current_parent != from_parent.as_ref() {
                return Err(format!(
                    "{} is under {}, not {}",
                    describe_id(id),
                    describe_parent(current_parent),
                    describe_parent(from_parent.as_ref())
                ));
            }
            if let Some(dest) = to_parent {
                if !shape.contains(dest) {
                    return Err(format!("parent {} is not displayed", describe_id(dest)));
                }
                if shape.is_within(dest, id) {
                    return Err(format!(
                        "cannot move {} under itself ({})",
                        describe_id(id),
                        describe_id(dest)
                    ));
                }
            }
            let source = shape
                .children_mut(from_parent.as_ref())
                .ok_or_else(|| format!("parent {} is not displayed", describe_parent(from_parent.as_ref())))?;
            if source.get(*from_index) != Some(id) {
                return Err(format!(
                    "{} is not at index {} of {}",
                    describe_id(id),
                    from_index,
                    describe_parent(from_parent.as_ref())
                ));
            }
            source.remove(*from_index);
            let dest = shape
                .children_mut(to_parent.as_ref())
                .ok_or_else(|| format!("parent {} is not displayed", describe_parent(to_parent.as_ref())))?;
            if *to_index > dest.len() {
                return Err(format!(
                    "move index {} past {} children",
                    to_index,
                    dest.len()
                ));
            }
            dest.insert(*to_index, id.clone());
            shape.parents.insert(id.clone(), to_parent.clone());
        }
        EditOperation::Reload { id } => {
            if !shape.contains(id) {
                return Err(format!("{} is not displayed", describe_id(id)));
            }
            reloaded.push(id.clone());
        }
    }
    Ok(())
}

impl<Id: Clone + Eq + Hash + Debug> TreeControl<Id> for SimulatedTree<Id> {
    /// Apply every operation, or none of them
    ///
    /// The script runs against a working copy of the rows; on failure the
    /// displayed rows and view state are left as they were.
    fn apply_edits(&mut self, script: &EditScript<Id>) -> Result<()> {
        let mut working = self.shape.clone();
        let mut dropped = Vec::new();
        let mut reloaded = Vec::new();
        for (step, op) in script.iter().enumerate() {
            apply_one(&mut working, op, &mut dropped, &mut reloaded)
                .map_err(|reason| inconsistent(step, reason))?;
        }

        for id in &dropped {
            self.expanded.remove(id);
            self.selected.remove(id);
        }
        self.shape = working;
        self.reloaded.extend(reloaded);
        tracing::debug!(
            op_count = script.len(),
            dropped_state = dropped.len(),
            "simulated tree applied edits"
        );
        Ok(())
    }

    fn reload_all(&mut self, shape: &TreeShape<Id>) {
        self.shape = shape.clone();
        self.expanded.clear();
        self.selected.clear();
        self.reloaded.clear();
        self.full_reloads += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextItem;

    fn id(s: &str) -> String {
        s.to_string()
    }

    fn tree() -> Snapshot<TextItem> {
        Snapshot::new()
            .append_items(vec![TextItem::new("A"), TextItem::new("B")], None)
            .unwrap()
            .append_items(vec![TextItem::new("A1")], Some(&id("A")))
            .unwrap()
    }

    #[test]
    fn test_move_keeps_state_delete_drops_it() {
        let s = tree();
        let mut control = SimulatedTree::from_snapshot(&s);
        control.expand(&id("A")).unwrap();
        control.select(&id("A1")).unwrap();
        control.select(&id("B")).unwrap();

        let script: EditScript<String> = vec![
            EditOperation::Move {
                id: id("A"),
                from_parent: None,
                from_index: 0,
                to_parent: None,
                to_index: 1,
            },
            EditOperation::Delete { id: id("B") },
        ]
        .into();
        control.apply_edits(&script).unwrap();

        assert!(control.is_expanded(&id("A")));
        assert!(control.is_selected(&id("A1")));
        assert!(!control.is_selected(&id("B")));
        assert_eq!(control.shape().root_ids(), [id("A")]);
    }

    #[test]
    fn test_failed_script_leaves_control_untouched() {
        let s = tree();
        let mut control = SimulatedTree::from_snapshot(&s);
        control.select(&id("B")).unwrap();

        let script: EditScript<String> = vec![
            EditOperation::Delete { id: id("B") },
            EditOperation::Insert {
                id: id("X"),
                parent: None,
                index: 5,
            },
        ]
        .into();
        let err = control.apply_edits(&script).unwrap_err();

        assert!(matches!(err, OutlineError::InconsistentTree { ref reason } if reason.starts_with("operation 2")));
        assert!(control.matches(&s));
        assert!(control.is_selected(&id("B")));
    }

    #[test]
    fn test_move_under_own_descendant_is_rejected() {
        let mut control = SimulatedTree::from_snapshot(&tree());
        let script: EditScript<String> = vec![EditOperation::Move {
            id: id("A"),
            from_parent: None,
            from_index: 0,
            to_parent: Some(id("A1")),
            to_index: 0,
        }]
        .into();
        assert!(control.apply_edits(&script).is_err());
    }

    #[test]
    fn test_reload_all_resets_view_state() {
        let s = tree();
        let mut control = SimulatedTree::from_snapshot(&s);
        control.expand_all();
        assert!(control.is_expanded(&id("A")));
        assert!(!control.is_expanded(&id("B")));

        control.reload_all(&TreeShape::from_snapshot(&s));
        assert_eq!(control.expanded_count(), 0);
        assert_eq!(control.full_reloads(), 1);
    }

    #[test]
    fn test_reload_is_recorded() {
        let mut control = SimulatedTree::from_snapshot(&tree());
        let script: EditScript<String> = vec![EditOperation::Reload { id: id("B") }].into();
        control.apply_edits(&script).unwrap();
        assert_eq!(control.take_reloaded(), vec![id("B")]);
        assert!(control.take_reloaded().is_empty());
    }
}
