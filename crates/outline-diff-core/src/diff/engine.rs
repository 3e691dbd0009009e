//! Snapshot diff computation engine.
//!
//! [`compute_edits`] compares two snapshots and produces an [`EditScript`]
//! that turns a tree displaying `old` into one displaying `new`.
//!
//! The script is emitted in four groups:
//!
//! 1. Deletes of removed subtrees that hold no surviving item, grouped by
//!    old parent (old pre-order), highest index first.
//! 2. One batch per parent of `new`, in new pre-order. Each batch brings the
//!    parent's children into target order with moves and inserts. Children
//!    that keep their parent and lie on a longest increasing run of old
//!    positions are left where they are.
//! 3. Deletes of removed items that still held surviving descendants when
//!    group 1 ran; by now every survivor has been moved out of them.
//! 4. Reloads, in new pre-order.
//!
//! Parents are processed top-down, so when a batch runs its parent already
//! sits at its final position and a move can never place an item below its
//! own descendant.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use crate::diff::lis::stable_positions;
use crate::diff::model::{DiffOptions, EditOperation, EditScript};
use crate::diff::slots::SlotCounter;
use crate::logging_facility::elapsed_ms;
use crate::model::OutlineItem;
use crate::snapshot::Snapshot;
use crate::traversal::preorder::pre_order_ids;
use crate::{log_op_end, log_op_start};

/// Slot layout and occupancy for one parent's child list.
struct ParentSlots {
    counter: SlotCounter,
    /// Slot of each old child, by old index
    old_slot: Vec<usize>,
    /// Slot of each target child, by target index
    new_slot: Vec<usize>,
}

struct Planner<'a, T: OutlineItem> {
    old: &'a Snapshot<T>,
    new: &'a Snapshot<T>,
    /// Index of every old item within its old parent
    old_index: HashMap<&'a T::Id, usize>,
    /// Items that keep parent and position relative to their stable siblings
    stable: HashSet<&'a T::Id>,
    slots: HashMap<Option<&'a T::Id>, ParentSlots>,
    script: EditScript<T::Id>,
}

fn children<'a, T: OutlineItem>(snapshot: &'a Snapshot<T>, parent: Option<&T::Id>) -> &'a [T::Id] {
    match parent {
        None => snapshot.roots.as_slice(),
        Some(id) => snapshot
            .nodes
            .get(id)
            .map_or(&[][..], |n| n.children.as_slice()),
    }
}

impl<'a, T: OutlineItem> Planner<'a, T> {
    fn new(old: &'a Snapshot<T>, new: &'a Snapshot<T>) -> Self {
        let mut old_index = HashMap::with_capacity(old.len());
        for (i, id) in old.roots.iter().enumerate() {
            old_index.insert(id, i);
        }
        for node in old.nodes.values() {
            for (i, id) in node.children.iter().enumerate() {
                old_index.insert(id, i);
            }
        }

        let mut planner = Self {
            old,
            new,
            old_index,
            stable: HashSet::new(),
            slots: HashMap::new(),
            script: EditScript::new(),
        };

        // Layout order does not affect output; every parent is laid out
        // before any edit is emitted.
        planner.layout_parent(None);
        for id in old.nodes.keys() {
            planner.layout_parent(Some(id));
        }
        for id in new.nodes.keys().filter(|id| !old.nodes.contains_key(*id)) {
            planner.layout_parent(Some(id));
        }
        planner
    }

    /// Old parent of `id`, or `None` (root) when absent from `old`.
    fn old_parent(&self, id: &T::Id) -> Option<&'a T::Id> {
        self.old.nodes.get(id).and_then(|n| n.parent.as_ref())
    }

    /// Decide which target children stay put and lay out the slot order.
    ///
    /// Slot order is: incoming children that precede the first stable child,
    /// then each old child followed by the incoming children that come
    /// after it in the target (only stable old children anchor a run).
    fn layout_parent(&mut self, parent: Option<&'a T::Id>) {
        let old_children = children(self.old, parent);
        let target = children(self.new, parent);

        let same_parent: Vec<(usize, usize)> = target
            .iter()
            .enumerate()
            .filter(|(_, t)| {
                self.old.nodes.get(*t).map(|n| n.parent.as_ref()) == Some(parent)
            })
            .filter_map(|(ti, t)| self.old_index.get(t).map(|&oi| (ti, oi)))
            .collect();
        let seq: Vec<usize> = same_parent.iter().map(|&(_, oi)| oi).collect();

        let mut stable_at_target = vec![None; target.len()];
        for (&(ti, oi), keep) in same_parent.iter().zip(stable_positions(&seq)) {
            if keep {
                stable_at_target[ti] = Some(oi);
                self.stable.insert(&target[ti]);
            }
        }

        let mut front = Vec::new();
        let mut runs: Vec<Vec<usize>> = vec![Vec::new(); old_children.len()];
        let mut anchor: Option<usize> = None;
        for (ti, stable_old) in stable_at_target.iter().enumerate() {
            match (stable_old, anchor) {
                (Some(oi), _) => anchor = Some(*oi),
                (None, None) => front.push(ti),
                (None, Some(a)) => runs[a].push(ti),
            }
        }

        let mut next = 0;
        let mut old_slot = vec![0; old_children.len()];
        let mut new_slot = vec![0; target.len()];
        for ti in front {
            new_slot[ti] = next;
            next += 1;
        }
        for (oi, run) in runs.into_iter().enumerate() {
            old_slot[oi] = next;
            next += 1;
            for ti in run {
                new_slot[ti] = next;
                next += 1;
            }
        }

        let mut counter = SlotCounter::new(next);
        for &slot in &old_slot {
            counter.occupy(slot);
        }
        self.slots.insert(
            parent,
            ParentSlots {
                counter,
                old_slot,
                new_slot,
            },
        );
    }

    /// Current index of an old child and mark it as gone from `parent`.
    fn take_old(&mut self, parent: Option<&'a T::Id>, old_index: usize) -> usize {
        self.slots.get_mut(&parent).map_or(0, |s| {
            let slot = s.old_slot[old_index];
            let at = s.counter.occupied_before(slot);
            s.counter.vacate(slot);
            at
        })
    }

    /// Current index for an incoming child and mark it as present.
    fn place_new(&mut self, parent: Option<&'a T::Id>, target_index: usize) -> usize {
        self.slots.get_mut(&parent).map_or(0, |s| {
            let slot = s.new_slot[target_index];
            let at = s.counter.occupied_before(slot);
            s.counter.occupy(slot);
            at
        })
    }

    fn plan(mut self, options: &DiffOptions) -> EditScript<T::Id>
    where
        T: PartialEq,
    {
        let old_pre = pre_order_ids(self.old);
        let new_pre = pre_order_ids(self.new);

        // Old items whose strict subtree holds something that survives.
        let mut holds_survivor: HashSet<&T::Id> = HashSet::new();
        for &id in old_pre.iter().rev() {
            if self.new.contains(id) || holds_survivor.contains(id) {
                if let Some(p) = self.old_parent(id) {
                    holds_survivor.insert(p);
                }
            }
        }
        let purely_removed =
            |id: &T::Id| !self.new.contains(id) && !holds_survivor.contains(id);

        // 1. Removed subtrees with nothing to rescue.
        let mut first_deletes = Vec::new();
        for parent in std::iter::once(None).chain(old_pre.iter().map(|&id| Some(id))) {
            if parent.is_some_and(|p| purely_removed(p)) {
                continue;
            }
            for (oi, child) in children(self.old, parent).iter().enumerate().rev() {
                if purely_removed(child) {
                    first_deletes.push((parent, oi, child));
                }
            }
        }
        let husks: Vec<&T::Id> = old_pre
            .iter()
            .copied()
            .filter(|id| !self.new.contains(id) && holds_survivor.contains(id))
            .filter(|id| self.old_parent(id).map_or(true, |p| self.new.contains(p)))
            .collect();

        for (parent, oi, child) in first_deletes {
            self.take_old(parent, oi);
            self.script.push(EditOperation::Delete { id: child.clone() });
        }

        // 2. Per-parent batches, top-down.
        for parent in std::iter::once(None).chain(new_pre.iter().map(|&id| Some(id))) {
            let target = children(self.new, parent);
            for (ti, child) in target.iter().enumerate() {
                if self.stable.contains(child) {
                    continue;
                }
                let op = match self.old_index.get(child).copied() {
                    Some(oi) => {
                        let from_parent = self.old_parent(child);
                        let from_index = self.take_old(from_parent, oi);
                        let to_index = self.place_new(parent, ti);
                        EditOperation::Move {
                            id: child.clone(),
                            from_parent: from_parent.cloned(),
                            from_index,
                            to_parent: parent.cloned(),
                            to_index,
                        }
                    }
                    None => EditOperation::Insert {
                        id: child.clone(),
                        parent: parent.cloned(),
                        index: self.place_new(parent, ti),
                    },
                };
                self.script.push(op);
            }
        }

        // 3. Emptied removals, outermost only.
        for id in husks {
            self.script.push(EditOperation::Delete { id: id.clone() });
        }

        // 4. Content changes on surviving items.
        for &id in &new_pre {
            let (Some(before), Some(after)) = (self.old.nodes.get(id), self.new.nodes.get(id))
            else {
                continue;
            };
            let changed = before.revision != after.revision
                || (options.content_reloads && before.item != after.item);
            if changed {
                self.script.push(EditOperation::Reload { id: id.clone() });
            }
        }

        self.script
    }
}

/// Compute the edit script from `old` to `new` with default options
///
/// Never fails: snapshots are valid forests by construction. Identical
/// inputs always yield an empty script, and the same pair of inputs always
/// yields the same script.
///
/// ```
/// use outline_diff_core::{compute_edits, EditOperation, Snapshot, TextItem};
///
/// let old = Snapshot::new().append_items(vec![TextItem::new("A")], None).unwrap();
/// let new = old.append_items(vec![TextItem::new("B")], None).unwrap();
///
/// let script = compute_edits(&old, &new);
/// assert_eq!(
///     script.operations(),
///     [EditOperation::Insert { id: "B".to_string(), parent: None, index: 1 }]
/// );
/// ```
pub fn compute_edits<T>(old: &Snapshot<T>, new: &Snapshot<T>) -> EditScript<T::Id>
where
    T: OutlineItem + PartialEq,
{
    compute_edits_with(old, new, &DiffOptions::default())
}

/// Compute the edit script from `old` to `new`
pub fn compute_edits_with<T>(
    old: &Snapshot<T>,
    new: &Snapshot<T>,
    options: &DiffOptions,
) -> EditScript<T::Id>
where
    T: OutlineItem + PartialEq,
{
    log_op_start!("compute_edits", old_len = old.len(), new_len = new.len());
    let start = Instant::now();

    let script = Planner::new(old, new).plan(options);

    log_op_end!(
        "compute_edits",
        duration_ms = elapsed_ms(start),
        edit_count = script.len()
    );
    script
}
