// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notifications published by the carousel.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// How the viewport should move to a new offset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Animate to the offset.
    #[default]
    Smooth,
    /// Jump to the offset.
    Instant,
}

/// A scroll the host must apply to its viewport.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollRequest {
    /// Destination offset, already clamped to the scrollable range.
    pub offset: f64,
    /// How to get there.
    pub behavior: ScrollBehavior,
}

/// Arbitration phase of the carousel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    /// Visibility reports drive the active index.
    #[default]
    Idle,
    /// A programmatic scroll is in flight; visibility reports are dropped.
    Navigating,
}

/// What caused an active index change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChangeSource {
    /// A visibility report picked a new most-visible slide.
    Visibility,
    /// An explicit navigation call.
    Navigation,
    /// The slide count shrank below the active index.
    SlideCount,
}

/// A state change published to listeners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CarouselEvent {
    /// The active slide changed.
    ActiveIndexChanged {
        /// Previous active index.
        previous: usize,
        /// New active index.
        current: usize,
        /// What caused the change.
        source: ChangeSource,
    },
    /// The arbitration phase changed.
    PhaseChanged(Phase),
    /// Native scroll snapping was turned on or off.
    SnapChanged(bool),
    /// The viewport should scroll.
    ScrollRequested(ScrollRequest),
}

/// Handle returned by [`Listeners::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&CarouselEvent)>;

/// Ordered list of event callbacks.
///
/// Listeners run in subscription order.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("next_id", &self.next_id)
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl Listeners {
    /// Creates an empty listener list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listener and returns a handle for removing it.
    pub fn subscribe(&mut self, listener: impl FnMut(&CarouselEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Returns the number of subscribed listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nobody is listening.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every listener.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Delivers `event` to every listener.
    pub fn emit(&mut self, event: &CarouselEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    use super::{CarouselEvent, Listeners, Phase};

    #[test]
    fn listeners_run_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();
        for tag in ["a", "b"] {
            let log = Rc::clone(&log);
            listeners.subscribe(move |_| log.borrow_mut().push(tag));
        }
        listeners.emit(&CarouselEvent::SnapChanged(true));
        assert_eq!(*log.borrow(), ["a", "b"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::new();
        let id = {
            let count = Rc::clone(&count);
            listeners.subscribe(move |_| *count.borrow_mut() += 1)
        };
        listeners.emit(&CarouselEvent::PhaseChanged(Phase::Navigating));
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.emit(&CarouselEvent::PhaseChanged(Phase::Idle));
        assert_eq!(*count.borrow(), 1);
        assert!(listeners.is_empty());
    }
}
