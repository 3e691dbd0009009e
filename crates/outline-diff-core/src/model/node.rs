use crate::model::OutlineItem;

/// A single row in a snapshot forest
///
/// `parent` is `None` for roots. `revision` is bumped by `reload_items` and
/// is compared (never interpreted) by the diff engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T: OutlineItem> {
    pub(crate) item: T,
    pub(crate) parent: Option<T::Id>,
    pub(crate) children: Vec<T::Id>,
    pub(crate) revision: u64,
}

impl<T: OutlineItem> Node<T> {
    pub(crate) fn new(item: T, parent: Option<T::Id>) -> Self {
        Self {
            item,
            parent,
            children: Vec::new(),
            revision: 0,
        }
    }

    pub fn item(&self) -> &T {
        &self.item
    }

    pub fn parent(&self) -> Option<&T::Id> {
        self.parent.as_ref()
    }

    pub fn children(&self) -> &[T::Id] {
        &self.children
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
