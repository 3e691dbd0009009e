//! Reconciliation with a host tree control.
//!
//! - [`TreeControl`]: the seam to whatever displays the rows
//! - [`SimulatedTree`]: in-memory control with identity-keyed view state
//! - [`OutlineDataSource`]: baseline owner that diffs, applies and falls back
//!   to a full reload

pub mod control;
pub mod data_source;
pub mod shape;
pub mod simulated;

pub use control::TreeControl;
pub use data_source::{ApplyOutcome, OutlineDataSource};
pub use shape::TreeShape;
pub use simulated::SimulatedTree;
