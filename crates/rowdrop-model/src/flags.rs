#![forbid(unsafe_code)]

//! Per-row capability flags.

use bitflags::bitflags;

bitflags! {
    /// What a host view may do with a given row.
    ///
    /// Informational for hosts wiring up interaction; the model itself does
    /// not gate mutations on flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RowFlags: u8 {
        /// The row participates in the view at all.
        const ENABLED = 1 << 0;
        /// The row can be added to the selection.
        const SELECTABLE = 1 << 1;
        /// The row can act as a drag source.
        const DRAGGABLE = 1 << 2;
        /// The row can act as a drop target.
        const DROP_TARGET = 1 << 3;
    }
}

impl RowFlags {
    /// Flags for a row that exists in the collection.
    #[must_use]
    pub fn interactive() -> Self {
        Self::ENABLED | Self::SELECTABLE | Self::DRAGGABLE | Self::DROP_TARGET
    }
}
