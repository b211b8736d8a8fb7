//! Lifecycle events and the emitter that delivers them.
//!
//! The gallery and the lightbox each hold an [`EventEmitter`] and call it
//! directly; subscribers are plain closures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle notification emitted by the gallery or the lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GalleryEvent {
    /// The thumbnail at this index has been placed in the grid.
    ItemRendered(usize),
    /// The thumbnail at this index failed to load and was left out.
    ItemSkipped(usize),
    /// Every catalog index has been processed.
    Complete,
    /// The lightbox finished fading in its overlay.
    Opened,
    /// The lightbox accepted a move to this index.
    Navigated(usize),
    /// The lightbox overlay was released.
    Closed,
}

type Listener = Box<dyn FnMut(&GalleryEvent)>;

/// Ordered list of event subscribers.
#[derive(Default)]
pub struct EventEmitter {
    listeners: Vec<Listener>,
}

impl EventEmitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Listeners are called in subscription order.
    pub fn subscribe(&mut self, listener: impl FnMut(&GalleryEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Deliver `event` to every listener.
    pub fn emit(&mut self, event: GalleryEvent) {
        tracing::debug!(?event, "gallery event");
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn listeners_receive_events_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = EventEmitter::new();

        let first = Rc::clone(&log);
        emitter.subscribe(move |e| first.borrow_mut().push(("first", *e)));
        let second = Rc::clone(&log);
        emitter.subscribe(move |e| second.borrow_mut().push(("second", *e)));

        emitter.emit(GalleryEvent::Navigated(2));

        assert_eq!(
            *log.borrow(),
            [
                ("first", GalleryEvent::Navigated(2)),
                ("second", GalleryEvent::Navigated(2)),
            ]
        );
    }

    #[test]
    fn emit_without_listeners_is_fine() {
        let mut emitter = EventEmitter::new();
        emitter.emit(GalleryEvent::Complete);
        assert_eq!(format!("{emitter:?}"), "EventEmitter { listeners: 0 }");
    }
}
