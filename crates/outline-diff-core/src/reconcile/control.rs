use crate::diff::model::EditScript;
use crate::errors::Result;
use crate::reconcile::shape::TreeShape;

/// Host tree control driven by edit scripts
///
/// Implementations apply each operation in order; indices are interpreted
/// against the control's state after the preceding operations. A control
/// that cannot apply a script returns `InconsistentTree`, after which the
/// caller is expected to fall back to [`TreeControl::reload_all`].
pub trait TreeControl<Id: Eq + std::hash::Hash> {
    /// Apply an edit script
    ///
    /// # Errors
    ///
    /// `InconsistentTree` if an operation does not match the control's
    /// current rows.
    fn apply_edits(&mut self, script: &EditScript<Id>) -> Result<()>;

    /// Discard the displayed rows and show `shape` from scratch
    fn reload_all(&mut self, shape: &TreeShape<Id>);
}
