#![forbid(unsafe_code)]

//! Drag-initiated multi-item move over a [`rowdrop_model::RowListModel`].
//!
//! A move is one drop orchestrated in two phases: the insert phase places a
//! copy of every dragged item at the drop target, and the deferred cleanup
//! phase removes the stale source occurrences once the host's presentation
//! layer has caught up. [`ReorderCoordinator`] drives the protocol,
//! [`DragPayload`] carries the dragged identities across the host's
//! transfer mechanism, and [`SelectionTracker`] restores the selection by
//! identity once the move completes.
//!
//! Hosts that do not need to observe the intermediate state can use
//! [`ListDndHost::move_items`], which runs the whole protocol as one
//! uninterrupted sequence.

pub mod coordinator;
pub mod host;
pub mod payload;
pub mod selection;

pub use coordinator::{DndError, DropPhase, ReorderCoordinator};
pub use host::ListDndHost;
pub use payload::{CodecError, DragPayload, PAYLOAD_TAG};
pub use selection::{SelectionSet, SelectionTracker};

#[cfg(feature = "state-persistence")]
pub use selection::SelectionPersistState;
