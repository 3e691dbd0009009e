pub mod diff;
pub mod export;
pub mod reconcile;
pub mod show;

use std::path::Path;

use outline_diff_core::errors::{ExError, ExErrorKind};
use outline_diff_core::text::parse_outline;
use outline_diff_core::{Snapshot, TextItem};

/// Read and parse an outline text file
pub fn load_outline(path: &Path) -> Result<Snapshot<TextItem>, ExError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("load_outline")
            .with_message(format!("{}: {}", path.display(), e))
    })?;
    parse_outline(&text).map_err(|e| {
        ExError::new(ExErrorKind::InvalidText)
            .with_op("load_outline")
            .with_message(path.display().to_string())
            .with_source(e.into())
    })
}
