//! Item identity model
//!
//! Application objects become outline rows by implementing [`OutlineItem`].
//! The identity must be a pure function of the item's *logical* identity:
//! the same logical item maps to the same id in every snapshot even when its
//! displayed fields change, and two distinct items never share an id.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Capability interface for items stored in a snapshot
///
/// The item value itself is the display payload; `id()` produces the stable
/// identity used for matching across snapshots.
pub trait OutlineItem {
    /// Stable, hashable identity token
    type Id: Clone + Eq + Hash + Debug;

    /// Identity of this item
    fn id(&self) -> Self::Id;
}

/// Plain titled row used by the text format and the demo CLI
///
/// The title doubles as the identity, matching how the text format refers
/// to parents by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextItem {
    pub title: String,
}

impl TextItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl OutlineItem for TextItem {
    type Id = String;

    fn id(&self) -> String {
        self.title.clone()
    }
}

impl std::fmt::Display for TextItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}
