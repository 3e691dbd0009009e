//! Snapshot diff engine.
//!
//! Compares two snapshots of the same data source and produces the ordered
//! edit script a tree control needs to go from displaying the first to
//! displaying the second, without a full reload.
//!
//! ## Entry point
//!
//! ```
//! use outline_diff_core::diff::{compute_edits, render_human_summary};
//! use outline_diff_core::{Snapshot, TextItem};
//!
//! let old = Snapshot::new()
//!     .append_items(vec![TextItem::new("A"), TextItem::new("B")], None)
//!     .unwrap();
//! let new = old.move_item(&"A".to_string(), None, 1).unwrap();
//!
//! let script = compute_edits(&old, &new);
//! assert_eq!(script.moves(), 1);
//! let _summary = render_human_summary(&script);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical scripts.
//! - **Idempotence**: diffing a snapshot against itself yields no edits.
//! - **Sequential indices**: each index is valid against the tree as left by
//!   the preceding operations.
//! - **Minimal motion**: children that keep their parent and relative order
//!   are never moved.

pub mod engine;
pub mod human_summary;
mod lis;
pub mod model;
mod slots;

pub use engine::{compute_edits, compute_edits_with};
pub use human_summary::render_human_summary;
pub use model::{DiffOptions, EditKind, EditOperation, EditScript};
