#![forbid(unsafe_code)]

//! Value-less multicast signals.
//!
//! An [`Event<A>`] carries no state of its own: `emit` hands `&A` to every
//! live subscriber in registration order. Handlers can communicate back to
//! the emitter through interior mutability in `A` (see the text preview in
//! the widgets crate).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::observable::{Subscribers, Subscription};

/// A multicast signal with [`Subscription`]-scoped handlers.
pub struct Event<A: 'static> {
    subscribers: Rc<RefCell<Subscribers<A>>>,
}

impl<A> Clone for Event<A> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Rc::clone(&self.subscribers),
        }
    }
}

impl<A: 'static> Event<A> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Rc::new(RefCell::new(Subscribers::new())),
        }
    }

    /// Deliver `args` to every live handler.
    pub fn emit(&self, args: &A) {
        let handlers = self.subscribers.borrow_mut().snapshot();
        for handler in handlers {
            handler(args);
        }
    }

    /// Register `handler`; it stays registered while the returned guard lives.
    pub fn subscribe(&self, handler: impl Fn(&A) + 'static) -> Subscription {
        self.subscribers.borrow_mut().register(handler)
    }

    /// Number of live handlers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().live_count()
    }
}

impl<A: 'static> Default for Event<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: 'static> fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Payload of a property-changed notification: the name of the field that
/// changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyChanged {
    pub property_name: &'static str,
}

impl PropertyChanged {
    #[must_use]
    pub const fn new(property_name: &'static str) -> Self {
        Self { property_name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn emit_reaches_all_handlers() {
        let clicked = Event::<()>::new();
        let count = Rc::new(Cell::new(0));

        let c1 = Rc::clone(&count);
        let _a = clicked.subscribe(move |_| c1.set(c1.get() + 1));
        let c2 = Rc::clone(&count);
        let _b = clicked.subscribe(move |_| c2.set(c2.get() + 10));

        clicked.emit(&());
        assert_eq!(count.get(), 11);
    }

    #[test]
    fn emit_without_handlers_is_noop() {
        let ev = Event::<u32>::new();
        ev.emit(&5);
        assert_eq!(ev.subscriber_count(), 0);
    }

    #[test]
    fn dropped_handler_is_skipped() {
        let ev = Event::<i32>::new();
        let seen = Rc::new(Cell::new(0));
        let s = Rc::clone(&seen);
        let sub = ev.subscribe(move |v| s.set(*v));

        ev.emit(&1);
        drop(sub);
        ev.emit(&2);
        assert_eq!(seen.get(), 1);
        assert_eq!(ev.subscriber_count(), 0);
    }

    #[test]
    fn handler_can_signal_back_through_args() {
        struct Preview {
            handled: Cell<bool>,
        }

        let ev = Event::<Preview>::new();
        let _veto = ev.subscribe(|p| p.handled.set(true));

        let args = Preview {
            handled: Cell::new(false),
        };
        ev.emit(&args);
        assert!(args.handled.get());
    }

    #[test]
    fn handler_may_subscribe_during_emit() {
        let ev = Event::<()>::new();
        let late = Rc::new(RefCell::new(Vec::new()));
        let ev2 = ev.clone();
        let l = Rc::clone(&late);
        let _sub = ev.subscribe(move |_| {
            l.borrow_mut().push(ev2.subscribe(|_| {}));
        });

        ev.emit(&());
        assert_eq!(ev.subscriber_count(), 2);
    }

    #[test]
    fn property_changed_carries_name() {
        let ev = Event::<PropertyChanged>::new();
        let name = Rc::new(Cell::new(""));
        let n = Rc::clone(&name);
        let _sub = ev.subscribe(move |p| n.set(p.property_name));

        ev.emit(&PropertyChanged::new("value"));
        assert_eq!(name.get(), "value");
    }
}
