pub mod preorder;

pub use preorder::{Entry, PreOrder};
