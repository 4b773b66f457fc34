#![forbid(unsafe_code)]

//! Read bindings and scoped subscription ownership.
//!
//! A [`Binding<T>`] encapsulates an observable source plus a transform,
//! making it easy to derive display values from reactive state.
//! A [`BindingScope`] owns every [`Subscription`] registered for one logical
//! scope and releases them together.
//!
//! # Usage
//!
//! ```
//! use updown_runtime::reactive::{Observable, bind_mapped};
//!
//! let count = Observable::new(0);
//! let label = bind_mapped(&count, |c| format!("Count: {c}"));
//! assert_eq!(label.get(), "Count: 0");
//!
//! count.set(5);
//! assert_eq!(label.get(), "Count: 5");
//! ```
//!
//! # Invariants
//!
//! 1. `Binding::get()` always returns the current (not stale) value.
//! 2. A binding's transform is applied on every `get()` call (no caching).
//! 3. Bindings are `Clone` and share their source.
//! 4. Dropping or clearing a `BindingScope` releases all of its
//!    subscriptions; after that no callback registered through it fires.

use std::rc::Rc;

use super::event::Event;
use super::observable::{Observable, Subscription};

/// A read-only binding to an [`Observable`] value through a transform.
pub struct Binding<T> {
    eval: Rc<dyn Fn() -> T>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            eval: Rc::clone(&self.eval),
        }
    }
}

impl<T: std::fmt::Debug + 'static> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.get())
            .finish()
    }
}

impl<T: 'static> Binding<T> {
    /// Get the current bound value.
    #[must_use]
    pub fn get(&self) -> T {
        (self.eval)()
    }
}

/// Create a mapped binding: `source` value transformed by `map`.
pub fn bind_mapped<S: Clone + PartialEq + 'static, T: 'static>(
    source: &Observable<S>,
    map: impl Fn(&S) -> T + 'static,
) -> Binding<T> {
    let src = source.clone();
    Binding {
        eval: Rc::new(move || src.with(|v| map(v))),
    }
}

/// Collects subscriptions for a logical scope (e.g., a widget while it is
/// visible).
///
/// When the scope is dropped, all held subscriptions are released, cleanly
/// disconnecting every listener registered through it.
///
/// ```
/// use updown_runtime::reactive::{BindingScope, Event, Observable};
///
/// let clicked = Event::<()>::new();
/// let value = Observable::new(0);
///
/// let mut scope = BindingScope::new();
/// scope.listen(&clicked, |_| {});
/// scope.subscribe(&value, |_| {});
/// assert_eq!(scope.binding_count(), 2);
///
/// drop(scope);
/// assert_eq!(clicked.subscriber_count(), 0);
/// assert_eq!(value.subscriber_count(), 0);
/// ```
pub struct BindingScope {
    subscriptions: Vec<Subscription>,
}

impl BindingScope {
    /// Create an empty binding scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
        }
    }

    /// Add a subscription to this scope. The subscription will be held alive
    /// until the scope is dropped or `clear()` is called.
    pub fn hold(&mut self, sub: Subscription) {
        self.subscriptions.push(sub);
    }

    /// Subscribe to an observable within this scope.
    ///
    /// Returns a reference to the scope for chaining.
    pub fn subscribe<T: Clone + PartialEq + 'static>(
        &mut self,
        source: &Observable<T>,
        callback: impl Fn(&T) + 'static,
    ) -> &mut Self {
        let sub = source.subscribe(callback);
        self.subscriptions.push(sub);
        self
    }

    /// Attach a handler to an event within this scope.
    ///
    /// Returns a reference to the scope for chaining.
    pub fn listen<A: 'static>(
        &mut self,
        event: &Event<A>,
        handler: impl Fn(&A) + 'static,
    ) -> &mut Self {
        let sub = event.subscribe(handler);
        self.subscriptions.push(sub);
        self
    }

    /// Number of active subscriptions in this scope.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether the scope holds no subscriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Release all subscriptions immediately (scope becomes empty but reusable).
    pub fn clear(&mut self) {
        // Reverse registration order, matching drop.
        while let Some(sub) = self.subscriptions.pop() {
            drop(sub);
        }
    }
}

impl Default for BindingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BindingScope {
    fn drop(&mut self) {
        self.clear();
    }
}

impl std::fmt::Debug for BindingScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingScope")
            .field("binding_count", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn binding_tracks_source() {
        let obs = Observable::new(42);
        let b = bind_mapped(&obs, |v| *v);
        assert_eq!(b.get(), 42);

        obs.set(100);
        assert_eq!(b.get(), 100);
    }

    #[test]
    fn binding_map_formats_value() {
        let value = Observable::new(3);
        let text = bind_mapped(&value, i32::to_string);
        assert_eq!(text.get(), "3");

        value.set(-7);
        assert_eq!(text.get(), "-7");
    }

    #[test]
    fn binding_clone_shares_source() {
        let obs = Observable::new(1);
        let b1 = bind_mapped(&obs, |v| v * 2);
        let b2 = b1.clone();

        obs.set(99);
        assert_eq!(b1.get(), 198);
        assert_eq!(b2.get(), 198);
    }

    #[test]
    fn scope_drop_releases_subscriptions() {
        let obs = Observable::new(0);
        let seen = Rc::new(Cell::new(0));

        {
            let mut scope = BindingScope::new();
            let s = Rc::clone(&seen);
            scope.subscribe(&obs, move |v| s.set(*v));
            obs.set(1);
            assert_eq!(seen.get(), 1);
        }

        obs.set(99);
        assert_eq!(seen.get(), 1, "callback should not fire after scope dropped");
    }

    #[test]
    fn scope_clear_releases_events_and_observables() {
        let obs = Observable::new(0);
        let clicked = Event::<()>::new();
        let hits = Rc::new(Cell::new(0));

        let mut scope = BindingScope::new();
        let h1 = Rc::clone(&hits);
        let h2 = Rc::clone(&hits);
        scope
            .subscribe(&obs, move |_| h1.set(h1.get() + 1))
            .listen(&clicked, move |_| h2.set(h2.get() + 1));
        assert_eq!(scope.binding_count(), 2);

        scope.clear();
        assert!(scope.is_empty());

        obs.set(5);
        clicked.emit(&());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn scope_clear_twice_is_harmless() {
        let clicked = Event::<()>::new();
        let mut scope = BindingScope::new();
        scope.listen(&clicked, |_| {});
        scope.clear();
        scope.clear();
        assert_eq!(clicked.subscriber_count(), 0);
    }

    #[test]
    fn scope_reusable_after_clear() {
        let obs = Observable::new(0);
        let mut scope = BindingScope::new();

        let seen1 = Rc::new(Cell::new(false));
        let s1 = Rc::clone(&seen1);
        scope.subscribe(&obs, move |_| s1.set(true));
        scope.clear();

        let seen2 = Rc::new(Cell::new(false));
        let s2 = Rc::clone(&seen2);
        scope.subscribe(&obs, move |_| s2.set(true));

        obs.set(1);
        assert!(!seen1.get(), "first subscription should be gone");
        assert!(seen2.get(), "second subscription should be active");
    }

    #[test]
    fn scope_hold_external_subscription() {
        let obs = Observable::new(0);
        let seen = Rc::new(Cell::new(0));

        let mut scope = BindingScope::new();
        let s = Rc::clone(&seen);
        scope.hold(obs.subscribe(move |v| s.set(*v)));

        obs.set(5);
        drop(scope);
        obs.set(99);
        assert_eq!(seen.get(), 5, "held subscription should be released on scope drop");
    }

    #[test]
    fn scope_debug_format() {
        let mut scope = BindingScope::new();
        let obs = Observable::new(0);
        scope.subscribe(&obs, |_| {});
        scope.subscribe(&obs, |_| {});
        let debug = format!("{scope:?}");
        assert!(debug.contains("binding_count: 2"));
    }
}
