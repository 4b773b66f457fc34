#![forbid(unsafe_code)]

//! Version-tracked shared values with change notification.
//!
//! # Usage
//!
//! ```
//! use updown_runtime::reactive::Observable;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let count = Observable::new(0);
//! let seen = Rc::new(Cell::new(0));
//! let s = Rc::clone(&seen);
//! let sub = count.subscribe(move |v| s.set(*v));
//!
//! count.set(5);
//! assert_eq!(seen.get(), 5);
//!
//! drop(sub);
//! count.set(9);
//! assert_eq!(seen.get(), 5);
//! ```
//!
//! # Failure Modes
//!
//! - Callback panic: propagates to the caller of `set()`. The value has
//!   already been stored at that point.
//! - Nested `set()` from inside a callback: the nested cycle notifies every
//!   live subscriber with the newer value, and the outer cycle stops early so
//!   no subscriber observes a stale value after a fresh one.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Registration list shared by [`Observable`] and [`Event`](super::Event).
///
/// Holds only weak references; the strong side lives in the [`Subscription`].
pub(crate) struct Subscribers<A: 'static> {
    slots: Vec<Weak<dyn Fn(&A)>>,
}

impl<A: 'static> Subscribers<A> {
    pub(crate) fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub(crate) fn register(&mut self, callback: impl Fn(&A) + 'static) -> Subscription {
        let strong: Rc<dyn Fn(&A)> = Rc::new(callback);
        self.slots.retain(|slot| slot.strong_count() > 0);
        self.slots.push(Rc::downgrade(&strong));
        #[cfg(feature = "tracing")]
        tracing::trace!(live = self.live_count(), "subscriber registered");
        Subscription {
            _callback: Box::new(strong),
        }
    }

    /// Prune dead slots and return strong handles to the live callbacks,
    /// in registration order.
    pub(crate) fn snapshot(&mut self) -> Vec<Rc<dyn Fn(&A)>> {
        self.slots.retain(|slot| slot.strong_count() > 0);
        self.slots.iter().filter_map(Weak::upgrade).collect()
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn live_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.strong_count() > 0)
            .count()
    }
}

/// RAII guard for a registered callback.
///
/// The callback stays registered exactly as long as this guard is alive.
#[must_use = "dropping a Subscription immediately unsubscribes the callback"]
pub struct Subscription {
    _callback: Box<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

struct ObservableInner<T: 'static> {
    value: T,
    version: u64,
    subscribers: Subscribers<T>,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` yields another handle to the same value.
pub struct Observable<T: 'static> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a new observable holding `value` at version 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Subscribers::new(),
            })),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value for the duration of `f`.
    ///
    /// `f` must not call `set()` on this observable.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value and notify subscribers.
    ///
    /// Equal values are a no-op: no version bump and no notification.
    pub fn set(&self, value: T) {
        let (callbacks, value, version) = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
            (
                inner.subscribers.snapshot(),
                inner.value.clone(),
                inner.version,
            )
        };

        for callback in callbacks {
            if self.version() != version {
                // A nested set() already delivered a newer value to everyone.
                break;
            }
            callback(&value);
        }
    }

    /// Number of value-changing mutations since construction.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Register `callback` to run after every value change.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.inner.borrow_mut().subscribers.register(callback)
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.live_count()
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .finish()
    }
}
