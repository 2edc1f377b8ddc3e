#![forbid(unsafe_code)]

//! Host-facing facade over model, coordinator, and tracker.
//!
//! The presentation layer drives one drop as three calls:
//! [`begin_drag`](ListDndHost::begin_drag) at drag start,
//! [`drop_blob`](ListDndHost::drop_blob) when the payload lands, and
//! [`trigger_cleanup`](ListDndHost::trigger_cleanup) once the insert phase
//! has been rendered. The host guarantees the three run as one
//! uninterrupted sequence from the user's perspective;
//! [`move_items`](ListDndHost::move_items) does exactly that for hosts
//! with no interest in the intermediate state.

use tracing::debug;

use rowdrop_model::{Item, ListSource, RowListModel};

use crate::coordinator::{DndError, ReorderCoordinator};
use crate::payload::DragPayload;
use crate::selection::SelectionTracker;

/// Bundles the reorder subsystem behind the interface a list view needs.
#[derive(Debug, Default)]
pub struct ListDndHost {
    model: RowListModel,
    coordinator: ReorderCoordinator,
    tracker: SelectionTracker,
}

impl ListDndHost {
    /// Wrap an existing model.
    #[must_use]
    pub fn new(model: RowListModel) -> Self {
        Self {
            model,
            coordinator: ReorderCoordinator::new(),
            tracker: SelectionTracker::new(),
        }
    }

    /// The underlying model.
    #[must_use]
    pub fn model(&self) -> &RowListModel {
        &self.model
    }

    /// Mutable access for host-driven edits outside a drop.
    #[must_use]
    pub fn model_mut(&mut self) -> &mut RowListModel {
        &mut self.model
    }

    /// The drop coordinator.
    #[must_use]
    pub fn coordinator(&self) -> &ReorderCoordinator {
        &self.coordinator
    }

    /// The selection tracker.
    #[must_use]
    pub fn tracker(&self) -> &SelectionTracker {
        &self.tracker
    }

    /// Capture the identities at `selected_indices` and encode them into a
    /// transferable blob for the host's transfer mechanism.
    ///
    /// Out-of-range indices are skipped; capturing nothing at all fails
    /// with [`DndError::EmptySelection`]. The capture happens before any
    /// mutation of the collection for this drop.
    pub fn begin_drag(&self, selected_indices: &[usize]) -> Result<Vec<u8>, DndError> {
        let items: Vec<Item> = selected_indices
            .iter()
            .filter_map(|&row| self.model.get(row).cloned())
            .collect();
        if items.is_empty() {
            return Err(DndError::EmptySelection);
        }
        debug!(rows = selected_indices.len(), captured = items.len(), "drag.begin");
        Ok(DragPayload::new(items).encode()?)
    }

    /// Decode a dropped blob and run the insert phase at `target_row`.
    ///
    /// `has_resolvable_target` is false when the host could not map the
    /// cursor to any insertion point; the drop is then rejected before the
    /// blob is even decoded. All failures happen before any mutation.
    pub fn drop_blob(
        &mut self,
        blob: &[u8],
        target_row: usize,
        has_resolvable_target: bool,
    ) -> Result<(), DndError> {
        if !has_resolvable_target {
            return Err(DndError::InvalidTarget {
                row: None,
                len: self.model.len(),
            });
        }
        let payload = DragPayload::decode(blob)?;
        self.coordinator
            .handle_drop(&mut self.model, &payload, target_row)
    }

    /// Run the cleanup phase and restore the selection.
    ///
    /// Invoked by the host after its presentation layer has reflected the
    /// insert phase. Removes the stale source occurrences, fires
    /// `ReorderFinished`, and routes the moved items into the tracker.
    pub fn trigger_cleanup(&mut self) -> Result<Vec<Item>, DndError> {
        let moved = self.coordinator.trigger_cleanup(&mut self.model)?;
        self.tracker.on_reorder_finished(&self.model, &moved);
        Ok(moved)
    }

    /// Move the items at `selected_indices` to `target_row` as one atomic
    /// sequence: capture, drop, cleanup, selection restore.
    pub fn move_items(
        &mut self,
        selected_indices: &[usize],
        target_row: usize,
    ) -> Result<Vec<Item>, DndError> {
        let blob = self.begin_drag(selected_indices)?;
        self.drop_blob(&blob, target_row, true)?;
        self.trigger_cleanup()
    }

    /// Whether the visual drop indicator should hug the top edge of the
    /// row under the cursor. Only the first row qualifies; every other
    /// row draws the line along its bottom edge.
    #[must_use]
    pub fn is_drop_indicator_at_top_edge(&self, row_under_cursor: usize) -> bool {
        row_under_cursor == 0
    }
}
