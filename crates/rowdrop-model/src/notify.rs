#![forbid(unsafe_code)]

//! Event notifier with RAII subscriptions.
//!
//! # Design
//!
//! [`Notifier<E>`] is a single-threaded publish/subscribe channel. Callbacks
//! are stored as weak references and handed back to the caller wrapped in a
//! [`Subscription`] guard holding the only strong reference; dropping the
//! guard unsubscribes. Dead entries are pruned lazily on publish.
//!
//! # Invariants
//!
//! 1. Subscribers are invoked in registration order.
//! 2. A callback is never invoked after its [`Subscription`] is dropped.
//! 3. `publish` releases its internal borrow before invoking callbacks, so
//!    a callback may subscribe or publish re-entrantly.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::debug_span;
use web_time::Instant;

type CallbackRc<E> = Rc<dyn Fn(&E)>;
type CallbackWeak<E> = Weak<dyn Fn(&E)>;

/// A single-threaded event channel.
pub struct Notifier<E> {
    subscribers: RefCell<Vec<CallbackWeak<E>>>,
}

impl<E: 'static> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Notifier<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscriber_count", &self.subscribers.borrow().len())
            .finish()
    }
}

impl<E: 'static> Notifier<E> {
    /// Create a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Register a callback invoked with a reference to every published
    /// event. Returns a [`Subscription`] guard; dropping it unsubscribes.
    pub fn subscribe(&self, callback: impl Fn(&E) + 'static) -> Subscription {
        let strong: CallbackRc<E> = Rc::new(callback);
        let weak = Rc::downgrade(&strong);
        self.subscribers.borrow_mut().push(weak);
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Number of registered subscribers, including dead entries not yet
    /// pruned by a publish.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Deliver `event` to every live subscriber in registration order.
    ///
    /// Dead subscribers are pruned first; the internal borrow is released
    /// before any callback runs.
    pub fn publish(&self, event: &E) {
        let callbacks: Vec<CallbackRc<E>> = {
            let mut subs = self.subscribers.borrow_mut();
            subs.retain(|w| w.strong_count() > 0);
            subs.iter().filter_map(Weak::upgrade).collect()
        };

        if callbacks.is_empty() {
            return;
        }

        let start = Instant::now();
        let span = debug_span!(
            "notify.publish",
            subscribers = callbacks.len() as u64,
            duration_us = tracing::field::Empty
        );
        let _entered = span.enter();

        for cb in &callbacks {
            cb(event);
        }

        span.record("duration_us", start.elapsed().as_micros() as u64);
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping the guard drops the only strong reference to the callback; the
/// weak entry in the notifier fails to upgrade on the next publish and is
/// pruned.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}
