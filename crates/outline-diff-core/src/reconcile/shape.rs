use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::model::OutlineItem;
use crate::snapshot::Snapshot;

/// Identity-only structure of a forest, as a tree control sees it
///
/// Tree controls do not own item payloads; they only need the ordered
/// identities at each level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeShape<Id: Eq + Hash> {
    pub(crate) roots: Vec<Id>,
    pub(crate) children: HashMap<Id, Vec<Id>>,
    pub(crate) parents: HashMap<Id, Option<Id>>,
}

impl<Id: Clone + Eq + Hash + Debug> Default for TreeShape<Id> {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            children: HashMap::new(),
            parents: HashMap::new(),
        }
    }
}

impl<Id: Clone + Eq + Hash + Debug> TreeShape<Id> {
    /// Capture the structure of a snapshot
    pub fn from_snapshot<T: OutlineItem<Id = Id>>(snapshot: &Snapshot<T>) -> Self {
        let mut shape = Self {
            roots: snapshot.roots.clone(),
            children: HashMap::with_capacity(snapshot.len()),
            parents: HashMap::with_capacity(snapshot.len()),
        };
        for (id, node) in &snapshot.nodes {
            shape.children.insert(id.clone(), node.children.clone());
            shape.parents.insert(id.clone(), node.parent.clone());
        }
        shape
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.parents.contains_key(id)
    }

    pub fn root_ids(&self) -> &[Id] {
        &self.roots
    }

    /// Ordered children of a row, or the roots for `None`
    pub fn children_of(&self, parent: Option<&Id>) -> Option<&[Id]> {
        match parent {
            None => Some(self.roots.as_slice()),
            Some(id) => self.children.get(id).map(Vec::as_slice),
        }
    }

    /// Parent of a row; `Some(None)` for roots, `None` if absent
    pub fn parent_of(&self, id: &Id) -> Option<Option<&Id>> {
        self.parents.get(id).map(Option::as_ref)
    }

    /// Identities with their depth, parents first
    pub fn rows(&self) -> Vec<(Id, usize)> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<(&Id, usize)> = self.roots.iter().rev().map(|id| (id, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            out.push((id.clone(), depth));
            if let Some(kids) = self.children.get(id) {
                stack.extend(kids.iter().rev().map(|c| (c, depth + 1)));
            }
        }
        out
    }

    /// True if the shape has exactly the snapshot's structure
    pub fn matches<T: OutlineItem<Id = Id>>(&self, snapshot: &Snapshot<T>) -> bool {
        self.roots == snapshot.roots
            && self.len() == snapshot.len()
            && snapshot.nodes.iter().all(|(id, node)| {
                self.children.get(id) == Some(&node.children)
                    && self.parents.get(id) == Some(&node.parent)
            })
    }

    pub(crate) fn children_mut(&mut self, parent: Option<&Id>) -> Option<&mut Vec<Id>> {
        match parent {
            None => Some(&mut self.roots),
            Some(id) => self.children.get_mut(id),
        }
    }

    /// `id` and everything below it, parents first
    pub(crate) fn subtree(&self, id: &Id) -> Vec<Id> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current.clone());
            if let Some(kids) = self.children.get(current) {
                stack.extend(kids.iter().rev());
            }
        }
        out
    }

    /// True if `candidate` is `id` or lies below it
    pub(crate) fn is_within(&self, candidate: &Id, id: &Id) -> bool {
        let mut cursor = Some(candidate);
        while let Some(current) = cursor {
            if current == id {
                return true;
            }
            cursor = self.parents.get(current).and_then(Option::as_ref);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextItem;

    #[test]
    fn test_shape_matches_source_snapshot() {
        let s = Snapshot::new()
            .append_items(vec![TextItem::new("A"), TextItem::new("B")], None)
            .unwrap()
            .append_items(vec![TextItem::new("C")], Some(&"A".to_string()))
            .unwrap();
        let shape = TreeShape::from_snapshot(&s);
        assert!(shape.matches(&s));
        assert_eq!(
            shape.rows(),
            vec![("A".to_string(), 0), ("C".to_string(), 1), ("B".to_string(), 0)]
        );
        assert!(shape.is_within(&"C".to_string(), &"A".to_string()));
        assert!(!shape.is_within(&"A".to_string(), &"C".to_string()));

        let other = s.move_item(&"B".to_string(), None, 0).unwrap();
        assert!(!shape.matches(&other));
    }
}
