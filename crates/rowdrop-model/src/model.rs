#![forbid(unsafe_code)]

//! The concrete ordered-collection model.
//!
//! # Notification contract
//!
//! Every mutating call publishes exactly one [`ListEvent`] before it
//! returns, via a scoped-mutation guard: the edit acquires the guard with
//! the pending event, and the guard publishes on release on every exit
//! path. Validation happens before the guard exists, so a rejected call
//! publishes nothing.

use tracing::debug;

use crate::error::ModelError;
use crate::event::ListEvent;
use crate::flags::RowFlags;
use crate::item::Item;
use crate::notify::Notifier;
use crate::source::{ListSource, MutableListSource};

/// Ordered sequence of [`Item`]s with change notification.
///
/// Lives for the lifetime of the view it backs; rows are only ever mutated
/// through [`MutableListSource`] primitives.
#[derive(Debug, Default)]
pub struct RowListModel {
    rows: Vec<Item>,
    events: Notifier<ListEvent>,
}

/// Publishes the pending event when the mutation scope is released.
struct MutationScope<'a> {
    events: &'a Notifier<ListEvent>,
    event: Option<ListEvent>,
}

impl<'a> MutationScope<'a> {
    fn new(events: &'a Notifier<ListEvent>, event: ListEvent) -> Self {
        Self {
            events,
            event: Some(event),
        }
    }
}

impl Drop for MutationScope<'_> {
    fn drop(&mut self) {
        if let Some(event) = self.event.take() {
            self.events.publish(&event);
        }
    }
}

impl RowListModel {
    /// Create an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model pre-populated with `items`.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = impl Into<Item>>) -> Self {
        Self {
            rows: items.into_iter().map(Into::into).collect(),
            events: Notifier::new(),
        }
    }

    /// The notifier carrying this model's [`ListEvent`]s.
    #[must_use]
    pub fn events(&self) -> &Notifier<ListEvent> {
        &self.events
    }

    /// The rows in order.
    #[must_use]
    pub fn rows(&self) -> &[Item] {
        &self.rows
    }

    /// Capability flags for the row at `at`.
    ///
    /// Out-of-range rows report [`RowFlags::ENABLED`] alone, matching what
    /// a view expects for the empty area below the last row.
    #[must_use]
    pub fn flags(&self, at: usize) -> RowFlags {
        if at < self.rows.len() {
            RowFlags::interactive()
        } else {
            RowFlags::ENABLED
        }
    }

    /// Publish [`ListEvent::ReorderFinished`] for a completed move.
    ///
    /// Called by the reorder coordinator once the cleanup phase has
    /// removed every stale source occurrence.
    pub fn notify_reorder_finished(&self, moved: Vec<Item>) {
        debug!(moved = moved.len(), len = self.rows.len(), "rows.reorder_finished");
        self.events.publish(&ListEvent::ReorderFinished { moved });
    }
}

impl ListSource for RowListModel {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn get(&self, at: usize) -> Option<&Item> {
        self.rows.get(at)
    }

    fn index_of(&self, item: &Item) -> Option<usize> {
        self.rows.iter().position(|row| row == item)
    }
}

impl MutableListSource for RowListModel {
    fn insert(&mut self, at: usize, items: Vec<Item>) -> Result<(), ModelError> {
        if items.is_empty() || at > self.rows.len() {
            return Err(ModelError::InvalidRange {
                op: "insert",
                at,
                count: items.len(),
                len: self.rows.len(),
            });
        }
        let count = items.len();
        let _scope = MutationScope::new(&self.events, ListEvent::Inserted { at, count });
        self.rows.splice(at..at, items);
        debug!(at, count, len = self.rows.len(), "rows.inserted");
        Ok(())
    }

    fn remove(&mut self, at: usize, count: usize) -> Result<(), ModelError> {
        let len = self.rows.len();
        if count == 0 || at >= len || at + count > len {
            return Err(ModelError::InvalidRange {
                op: "remove",
                at,
                count,
                len,
            });
        }
        let _scope = MutationScope::new(&self.events, ListEvent::Removed { at, count });
        self.rows.drain(at..at + count);
        debug!(at, count, len = self.rows.len(), "rows.removed");
        Ok(())
    }

    fn set(&mut self, at: usize, value: Item) -> Result<(), ModelError> {
        if at >= self.rows.len() {
            return Err(ModelError::InvalidRange {
                op: "set",
                at,
                count: 1,
                len: self.rows.len(),
            });
        }
        let _scope = MutationScope::new(&self.events, ListEvent::Changed { at });
        self.rows[at] = value;
        debug!(at, "rows.changed");
        Ok(())
    }
}
