pub mod item;
pub mod node;

pub use item::{OutlineItem, TextItem};
pub use node::Node;
