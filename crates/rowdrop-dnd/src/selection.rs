#![forbid(unsafe_code)]

//! Post-reorder selection recovery.
//!
//! Row indices are stale the moment a reorder lands, so the tracker
//! recomputes the selection from the moved items' identities instead of
//! patching the old index set. The replacement is wholesale: a fresh
//! [`SelectionSet`] is built completely, then swapped in, so no observer
//! ever sees a partial selection.

use std::collections::BTreeSet;

use tracing::debug;

use rowdrop_model::{Item, ListSource, Notifier, Subscription};

/// The selected row indices plus the designated current row.
///
/// Replaced wholesale after every reorder, never patched incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    indices: BTreeSet<usize>,
    current: Option<usize>,
}

impl SelectionSet {
    /// An empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected row indices in ascending order.
    #[must_use]
    pub fn indices(&self) -> &BTreeSet<usize> {
        &self.indices
    }

    /// The designated current row, if any.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Whether `row` is selected.
    #[must_use]
    pub fn contains(&self, row: usize) -> bool {
        self.indices.contains(&row)
    }

    /// Number of selected rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Persistable snapshot of a [`SelectionSet`].
#[cfg(feature = "state-persistence")]
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SelectionPersistState {
    /// Selected row indices.
    pub indices: Vec<usize>,
    /// The designated current row.
    pub current: Option<usize>,
}

/// Recomputes the selection by identity after each reorder.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    selection: SelectionSet,
    changes: Notifier<SelectionSet>,
}

impl SelectionTracker {
    /// Create a tracker with an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// The designated current row, if any.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.selection.current
    }

    /// Subscribe to wholesale selection replacements.
    pub fn on_change(&self, callback: impl Fn(&SelectionSet) + 'static) -> Subscription {
        self.changes.subscribe(callback)
    }

    /// Replace the selection with the empty set.
    pub fn clear(&mut self) {
        self.replace(SelectionSet::new(), "clear");
    }

    /// Rebuild the selection from a completed reorder.
    ///
    /// Each item in `moved` order is re-resolved by identity against
    /// `source`; found items join the new selection and the last found one
    /// becomes current. Stale identities are dropped silently. The new
    /// set replaces the old atomically.
    pub fn on_reorder_finished(&mut self, source: &dyn ListSource, moved: &[Item]) {
        let mut next = SelectionSet::new();
        for item in moved {
            match source.index_of(item) {
                Some(row) => {
                    next.indices.insert(row);
                    next.current = Some(row);
                }
                None => debug!(item = %item, "selection.skip_stale"),
            }
        }
        self.replace(next, "reorder_finished");
    }

    fn replace(&mut self, next: SelectionSet, action: &'static str) {
        debug!(
            action,
            selected_count = next.len(),
            current = next.current,
            "selection.replaced"
        );
        self.selection = next;
        self.changes.publish(&self.selection);
    }

    /// Snapshot the selection for persistence.
    #[cfg(feature = "state-persistence")]
    #[must_use]
    pub fn save_state(&self) -> SelectionPersistState {
        SelectionPersistState {
            indices: self.selection.indices.iter().copied().collect(),
            current: self.selection.current,
        }
    }

    /// Restore a selection snapshot, replacing the current set wholesale.
    #[cfg(feature = "state-persistence")]
    pub fn restore_state(&mut self, state: SelectionPersistState) {
        self.replace(
            SelectionSet {
                indices: state.indices.into_iter().collect(),
                current: state.current,
            },
            "restore",
        );
    }
}
