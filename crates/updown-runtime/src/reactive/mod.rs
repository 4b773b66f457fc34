#![forbid(unsafe_code)]

//! Reactive data bindings for updown.
//!
//! This module provides change-tracking primitives for reactive UI updates:
//!
//! - [`Observable`]: A shared, version-tracked value wrapper with change
//!   notification via subscriber callbacks.
//! - [`Event`]: A value-less multicast signal (clicks, input previews,
//!   property-changed notifications).
//! - [`Subscription`]: RAII guard that automatically unsubscribes on drop.
//! - [`BindingScope`]: Owner of all subscriptions belonging to one logical
//!   scope (e.g., a widget's visible lifetime).
//!
//! # Architecture
//!
//! `Observable<T>` and `Event<A>` use `Rc<RefCell<..>>` for single-threaded
//! shared ownership. Subscribers are stored as `Weak` function pointers and
//! cleaned up lazily during notification. The strong side of each callback
//! lives in the [`Subscription`] returned to the caller.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current value is a no-op (no version bump,
//!    no notifications).
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.
//! 5. No internal borrow is held while callbacks run, so a callback may
//!    write back to the observable that notified it.

pub mod binding;
pub mod event;
pub mod observable;

pub use binding::{Binding, BindingScope, bind_mapped};
pub use event::{Event, PropertyChanged};
pub use observable::{Observable, Subscription};
