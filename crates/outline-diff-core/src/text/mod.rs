//! Plain-text outline format.
//!
//! ```
//! use outline_diff_core::text::{export_text, parse_outline};
//!
//! let snapshot = parse_outline("Mail\n  Inbox\nMail / Sent").unwrap();
//! assert_eq!(export_text(&snapshot), "Mail\nMail / Inbox\nMail / Sent");
//! ```

pub mod parse;
pub mod render;

pub use parse::{fill_item, parse_outline, PATH_SEPARATOR};
pub use render::{export_text, render_tree};
