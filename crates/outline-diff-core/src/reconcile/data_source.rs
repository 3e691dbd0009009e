//! Diffable data source
//!
//! [`OutlineDataSource`] owns the snapshot currently shown by a tree control.
//! Each [`OutlineDataSource::apply_snapshot`] diffs the new snapshot against
//! that baseline, hands the script to the control and commits the new
//! baseline. If the control rejects the script it is reloaded from scratch
//! instead; the baseline is committed either way, so the data source and the
//! control never drift apart.
//!
//! The baseline sits behind `Arc<RwLock<_>>`: one writer applies snapshots
//! while any number of clones of the data source read the current one.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use crate::diff::engine::compute_edits_with;
use crate::diff::model::{DiffOptions, EditScript};
use crate::errors::{ExError, ExErrorKind};
use crate::logging_facility::elapsed_ms;
use crate::model::OutlineItem;
use crate::reconcile::control::TreeControl;
use crate::reconcile::shape::TreeShape;
use crate::snapshot::Snapshot;
use crate::{log_op_end, log_op_error, log_op_start};

/// What happened to the control during `apply_snapshot`
#[derive(Debug, Clone)]
pub enum ApplyOutcome<Id> {
    /// Snapshots were equivalent; the control was not touched
    Unchanged,
    /// The control applied the edit script
    Edited(EditScript<Id>),
    /// The control rejected the script and was fully reloaded
    Reloaded {
        script: EditScript<Id>,
        error: ExError,
    },
}

impl<Id> ApplyOutcome<Id> {
    pub fn is_reload(&self) -> bool {
        matches!(self, ApplyOutcome::Reloaded { .. })
    }

    /// Script computed for the update, if any
    pub fn script(&self) -> Option<&EditScript<Id>> {
        match self {
            ApplyOutcome::Unchanged => None,
            ApplyOutcome::Edited(script) | ApplyOutcome::Reloaded { script, .. } => Some(script),
        }
    }
}

/// Data source feeding a tree control from successive snapshots
#[derive(Debug)]
pub struct OutlineDataSource<T: OutlineItem> {
    baseline: Arc<RwLock<Snapshot<T>>>,
    options: DiffOptions,
}

impl<T: OutlineItem> Clone for OutlineDataSource<T> {
    fn clone(&self) -> Self {
        Self {
            baseline: Arc::clone(&self.baseline),
            options: self.options,
        }
    }
}

impl<T: OutlineItem + Clone + PartialEq> Default for OutlineDataSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: OutlineItem + Clone + PartialEq> OutlineDataSource<T> {
    /// Data source with an empty baseline
    pub fn new() -> Self {
        Self::with_options(DiffOptions::default())
    }

    pub fn with_options(options: DiffOptions) -> Self {
        Self {
            baseline: Arc::new(RwLock::new(Snapshot::new())),
            options,
        }
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Copy of the baseline currently shown by the control
    pub fn snapshot(&self) -> Snapshot<T> {
        self.baseline
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Bring `control` from the baseline to `next` and commit `next`
    ///
    /// Holds the write lock for the whole update, so concurrent callers are
    /// serialized and readers never observe a baseline the control has not
    /// been told about.
    pub fn apply_snapshot<C>(&self, next: Snapshot<T>, control: &mut C) -> ApplyOutcome<T::Id>
    where
        C: TreeControl<T::Id> + ?Sized,
    {
        let mut baseline = self
            .baseline
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        log_op_start!(
            "apply_snapshot",
            old_len = baseline.len(),
            new_len = next.len()
        );
        let start = Instant::now();

        let script = compute_edits_with(&baseline, &next, &self.options);
        let outcome = if script.is_empty() {
            ApplyOutcome::Unchanged
        } else {
            match control.apply_edits(&script) {
                Ok(()) => ApplyOutcome::Edited(script),
                Err(e) => {
                    let error = ExError::new(ExErrorKind::InconsistentTree)
                        .with_op("apply_snapshot")
                        .with_message("edit script rejected, reloading")
                        .with_source(e.into());
                    log_op_error!(
                        "apply_snapshot",
                        error.clone(),
                        duration_ms = elapsed_ms(start),
                        edit_count = script.len()
                    );
                    control.reload_all(&TreeShape::from_snapshot(&next));
                    ApplyOutcome::Reloaded { script, error }
                }
            }
        };

        let edit_count = outcome.script().map_or(0, EditScript::len);
        *baseline = next;
        log_op_end!(
            "apply_snapshot",
            duration_ms = elapsed_ms(start),
            edit_count = edit_count
        );
        outcome
    }

    /// Replace the baseline without diffing and reload the control
    pub fn reset<C>(&self, next: Snapshot<T>, control: &mut C)
    where
        C: TreeControl<T::Id> + ?Sized,
    {
        let mut baseline = self
            .baseline
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        control.reload_all(&TreeShape::from_snapshot(&next));
        tracing::debug!(item_count = next.len(), "data source reset");
        *baseline = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use crate::model::TextItem;
    use crate::reconcile::simulated::SimulatedTree;

    struct RejectingTree {
        reloads: usize,
    }

    impl TreeControl<String> for RejectingTree {
        fn apply_edits(&mut self, _script: &EditScript<String>) -> Result<()> {
            Err(crate::errors::OutlineError::InconsistentTree {
                reason: "always".to_string(),
            })
        }

        fn reload_all(&mut self, _shape: &TreeShape<String>) {
            self.reloads += 1;
        }
    }

    fn snap(titles: &[&str]) -> Snapshot<TextItem> {
        Snapshot::new()
            .append_items(titles.iter().map(|t| TextItem::new(*t)).collect(), None)
            .unwrap()
    }

    #[test]
    fn test_apply_snapshot_commits_baseline() {
        let source = OutlineDataSource::new();
        let mut control = SimulatedTree::new();

        let outcome = source.apply_snapshot(snap(&["A", "B"]), &mut control);
        assert_eq!(outcome.script().map(EditScript::inserts), Some(2));
        assert!(control.matches(&source.snapshot()));

        let outcome = source.apply_snapshot(snap(&["A", "B"]), &mut control);
        assert!(matches!(outcome, ApplyOutcome::Unchanged));
    }

    #[test]
    fn test_rejected_script_falls_back_to_reload() {
        let source = OutlineDataSource::new();
        let mut control = RejectingTree { reloads: 0 };

        let outcome = source.apply_snapshot(snap(&["A"]), &mut control);
        assert!(outcome.is_reload());
        assert_eq!(control.reloads, 1);
        assert_eq!(source.snapshot().len(), 1);

        if let ApplyOutcome::Reloaded { error, .. } = outcome {
            assert_eq!(error.code(), "ERR_INCONSISTENT_TREE");
            assert!(error.source_error().is_some());
        }
    }

    #[test]
    fn test_clones_share_baseline() {
        let writer = OutlineDataSource::new();
        let reader = writer.clone();
        let mut control = SimulatedTree::new();
        writer.apply_snapshot(snap(&["A"]), &mut control);
        assert!(reader.snapshot().contains(&"A".to_string()));
    }
}
