#![forbid(unsafe_code)]

//! Two-phase drop orchestration.
//!
//! # Protocol
//!
//! A drop runs in two phases against the model:
//!
//! 1. **Insert phase** ([`ReorderCoordinator::handle_drop`]) — every
//!    payload identity that still resolves is inserted at the drop cursor,
//!    one row per item, leaving the collection temporarily inflated with
//!    one stale source occurrence per moved item.
//! 2. **Cleanup phase** ([`ReorderCoordinator::trigger_cleanup`]) — invoked
//!    by the host once its presentation layer has reflected the insert
//!    phase; removes the stale occurrences, returns the collection to its
//!    original length, and fires [`rowdrop_model::ListEvent::ReorderFinished`].
//!
//! Between the phases the coordinator sits in
//! [`DropPhase::AwaitingCleanup`]; a second drop started there fails fast
//! with [`DndError::CleanupPending`] before any mutation. Execution is
//! single-threaded, so the phase field doubles as the serialization guard.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Effect |
//! |---------|-------|--------|
//! | `InvalidTarget` | empty collection or cursor past the end | drop aborted, zero mutations |
//! | `CleanupPending` | drop while a cleanup is outstanding | drop aborted, zero mutations |
//! | `NoPendingDrop` | cleanup with nothing pending | no-op, surfaced to caller |
//! | identity lookup miss | item vanished since drag-begin | that item skipped, drop continues |

use core::fmt;

use tracing::debug;

use rowdrop_model::{Item, ListSource, ModelError, MutableListSource, RowListModel};

use crate::payload::{CodecError, DragPayload};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors surfaced by the drag-and-drop protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DndError {
    /// The drop location cannot be resolved to a valid insertion point.
    /// `row` is `None` when the host reported no resolvable target at all.
    InvalidTarget { row: Option<usize>, len: usize },
    /// A previous drop is still awaiting its cleanup phase.
    CleanupPending,
    /// Cleanup was triggered with no drop pending.
    NoPendingDrop,
    /// Drag-begin captured no items (all indices out of range or empty).
    EmptySelection,
    /// The payload blob failed to encode or decode.
    Codec(CodecError),
    /// The model rejected a mutation mid-protocol.
    Model(ModelError),
}

impl fmt::Display for DndError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTarget { row: Some(row), len } => {
                write!(f, "invalid drop target: row {row} over {len} rows")
            }
            Self::InvalidTarget { row: None, len } => {
                write!(f, "invalid drop target: unresolvable over {len} rows")
            }
            Self::CleanupPending => write!(f, "previous drop still awaiting cleanup"),
            Self::NoPendingDrop => write!(f, "no drop awaiting cleanup"),
            Self::EmptySelection => write!(f, "drag began over no items"),
            Self::Codec(err) => write!(f, "payload codec: {err}"),
            Self::Model(err) => write!(f, "model: {err}"),
        }
    }
}

impl std::error::Error for DndError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Codec(err) => Some(err),
            Self::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CodecError> for DndError {
    fn from(err: CodecError) -> Self {
        Self::Codec(err)
    }
}

impl From<ModelError> for DndError {
    fn from(err: ModelError) -> Self {
        Self::Model(err)
    }
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// Where the coordinator stands in the drop protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropPhase {
    /// No drop in flight.
    #[default]
    Idle,
    /// Insert phase applied; stale source occurrences not yet removed.
    AwaitingCleanup,
}

/// One provisionally inserted item, remembered until cleanup.
#[derive(Debug, Clone)]
struct PendingMove {
    item: Item,
    /// Index of the original occurrence in the pre-drop collection.
    source: usize,
}

/// Orchestrates one drop at a time over a [`RowListModel`].
#[derive(Debug, Default)]
pub struct ReorderCoordinator {
    phase: DropPhase,
    pending: Vec<PendingMove>,
    /// Insertion indices of the insert phase, in chronological order.
    insertions: Vec<usize>,
    last_moved: Vec<Item>,
}

impl ReorderCoordinator {
    /// Create an idle coordinator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current protocol phase.
    #[must_use]
    pub fn phase(&self) -> DropPhase {
        self.phase
    }

    /// Whether a drop is waiting for [`Self::trigger_cleanup`].
    #[must_use]
    pub fn is_awaiting_cleanup(&self) -> bool {
        self.phase == DropPhase::AwaitingCleanup
    }

    /// Items moved by the most recently completed drop, in drop order.
    #[must_use]
    pub fn last_moved(&self) -> &[Item] {
        &self.last_moved
    }

    /// Run the insert phase of a drop.
    ///
    /// Every payload identity is resolved against the pristine collection
    /// before any mutation. Unresolved identities are skipped, as is any
    /// identity whose resolved occurrence was already claimed by an
    /// earlier payload item of the same drop. Each surviving item is
    /// inserted at the advancing cursor starting from `target_row`, and
    /// the coordinator enters [`DropPhase::AwaitingCleanup`].
    ///
    /// Relative order of simultaneously dropped items follows payload
    /// order, not prior collection order.
    pub fn handle_drop(
        &mut self,
        model: &mut RowListModel,
        payload: &DragPayload,
        target_row: usize,
    ) -> Result<(), DndError> {
        if self.phase != DropPhase::Idle {
            return Err(DndError::CleanupPending);
        }
        let len = model.len();
        if len == 0 || target_row > len {
            return Err(DndError::InvalidTarget {
                row: Some(target_row),
                len,
            });
        }

        let mut resolved: Vec<PendingMove> = Vec::with_capacity(payload.len());
        for item in payload.items() {
            let Some(source) = model.index_of(item) else {
                debug!(item = %item, "drop.skip_unresolved");
                continue;
            };
            if resolved.iter().any(|p| p.source == source) {
                // Duplicate identity in the payload: its only occurrence is
                // already claimed by an earlier entry.
                debug!(item = %item, source, "drop.skip_claimed");
                continue;
            }
            resolved.push(PendingMove {
                item: item.clone(),
                source,
            });
        }

        let mut row = target_row;
        let mut insertions = Vec::with_capacity(resolved.len());
        let mut moved = Vec::with_capacity(resolved.len());
        for pending in &resolved {
            model.insert(row, vec![pending.item.clone()])?;
            insertions.push(row);
            moved.push(pending.item.clone());
            row += 1;
        }

        debug!(
            target_row,
            requested = payload.len(),
            inserted = moved.len(),
            "drop.insert_phase"
        );
        self.pending = resolved;
        self.insertions = insertions;
        self.last_moved = moved;
        self.phase = DropPhase::AwaitingCleanup;
        Ok(())
    }

    /// Run the cleanup phase: remove every stale source occurrence, return
    /// to [`DropPhase::Idle`], and fire [`ReorderFinished`] with the moved
    /// items in drop order.
    ///
    /// Each remembered source index is first shifted down by the insert
    /// phase: an insertion at or before an occurrence's current position
    /// pushed it one row further. Adjusted occurrences are removed
    /// bottom-up, contiguous runs as a single range removal.
    ///
    /// [`ReorderFinished`]: rowdrop_model::ListEvent::ReorderFinished
    pub fn trigger_cleanup(&mut self, model: &mut RowListModel) -> Result<Vec<Item>, DndError> {
        if self.phase != DropPhase::AwaitingCleanup {
            return Err(DndError::NoPendingDrop);
        }

        let mut stale: Vec<usize> = Vec::with_capacity(self.pending.len());
        for pending in &self.pending {
            let mut adjusted = pending.source;
            for &at in &self.insertions {
                if at <= adjusted {
                    adjusted += 1;
                }
            }
            stale.push(adjusted);
        }
        stale.sort_unstable();

        // Remove from the bottom so earlier rows keep their indices.
        let mut end = stale.len();
        while end > 0 {
            let mut start = end - 1;
            while start > 0 && stale[start - 1] + 1 == stale[start] {
                start -= 1;
            }
            model.remove(stale[start], end - start)?;
            end = start;
        }

        let moved = self.last_moved.clone();
        self.pending.clear();
        self.insertions.clear();
        self.phase = DropPhase::Idle;

        debug!(moved = moved.len(), len = model.len(), "drop.cleanup");
        model.notify_reorder_finished(moved.clone());
        Ok(moved)
    }
}
