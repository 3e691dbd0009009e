pub mod snapshot_ops;

pub use snapshot_ops::InsertPosition;
