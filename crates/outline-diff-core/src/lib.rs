//! Outline Diff Core - diffable data source for outline / tree views
//!
//! This crate provides the data layer between an application and a
//! hierarchical list control, including:
//! - An item identity model and immutable snapshot forests
//! - Snapshot builder operations with full validation
//! - Deterministic pre-order traversal
//! - A diff engine producing insert / delete / move / reload edit scripts
//! - A reconciler that drives a tree control and preserves identity-keyed
//!   view state, with a full-reload fallback
//! - A plain-text outline format for import and export
//!
//! ```
//! use outline_diff_core::{compute_edits, SimulatedTree, Snapshot, TextItem, TreeControl};
//!
//! let old = Snapshot::new()
//!     .append_items(vec![TextItem::new("A"), TextItem::new("B")], None)
//!     .unwrap();
//! let new = old
//!     .append_items(vec![TextItem::new("C")], Some(&"A".to_string()))
//!     .unwrap();
//!
//! let mut control = SimulatedTree::from_snapshot(&old);
//! control.apply_edits(&compute_edits(&old, &new)).unwrap();
//! assert!(control.matches(&new));
//! ```

pub mod apply;
pub mod commands;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod reconcile;
pub mod rules;
pub mod snapshot;
pub mod text;
pub mod traversal;

// Logging macros resolve field keys through `$crate::schema`.
pub use outline_diff_core_types::schema;

// Re-export commonly used types
pub use apply::{apply, apply_all};
pub use commands::SnapshotCommand;
pub use diff::{compute_edits, compute_edits_with, DiffOptions, EditKind, EditOperation, EditScript};
pub use errors::{ExError, ExErrorKind, OutlineError, Result};
pub use model::{Node, OutlineItem, TextItem};
pub use reconcile::{ApplyOutcome, OutlineDataSource, SimulatedTree, TreeControl, TreeShape};
pub use rules::validation::validate_forest;
pub use snapshot::Snapshot;
