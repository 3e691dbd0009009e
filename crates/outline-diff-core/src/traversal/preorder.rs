use crate::model::OutlineItem;
use crate::snapshot::Snapshot;

/// One step of a pre-order traversal
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a, T> {
    pub item: &'a T,
    /// Parent item, `None` for roots
    pub parent: Option<&'a T>,
    /// Zero for roots
    pub depth: usize,
}

/// Lazy depth-first, pre-order iterator over a snapshot
///
/// Parents are always yielded before their children and siblings in their
/// stored order. The iterator holds an explicit stack, so deep trees do not
/// recurse.
pub struct PreOrder<'a, T: OutlineItem> {
    snapshot: &'a Snapshot<T>,
    stack: Vec<(Option<&'a T>, std::slice::Iter<'a, T::Id>)>,
}

impl<'a, T: OutlineItem> PreOrder<'a, T> {
    pub(crate) fn new(snapshot: &'a Snapshot<T>) -> Self {
        Self {
            snapshot,
            stack: vec![(None, snapshot.roots.iter())],
        }
    }
}

impl<'a, T: OutlineItem> Iterator for PreOrder<'a, T> {
    type Item = Entry<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let snapshot = self.snapshot;
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let (parent, siblings) = self.stack.last_mut()?;
            let parent = *parent;
            match siblings.next() {
                Some(id) => {
                    // Skip ids without a node; validate_forest reports them.
                    let Some(node) = snapshot.nodes.get(id) else {
                        continue;
                    };
                    self.stack.push((Some(&node.item), node.children.iter()));
                    return Some(Entry {
                        item: &node.item,
                        parent,
                        depth,
                    });
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Borrowed identities in pre-order
pub(crate) fn pre_order_ids<T: OutlineItem>(snapshot: &Snapshot<T>) -> Vec<&T::Id> {
    let mut out = Vec::with_capacity(snapshot.len());
    let mut stack: Vec<&T::Id> = snapshot.roots.iter().rev().collect();
    while let Some(id) = stack.pop() {
        if let Some(node) = snapshot.nodes.get(id) {
            out.push(id);
            stack.extend(node.children.iter().rev());
        }
    }
    out
}
