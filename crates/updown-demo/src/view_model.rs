#![forbid(unsafe_code)]

//! View model behind the demo's main window.

use updown_runtime::{Event, Observable, PropertyChanged, Subscription};

/// Holds the single integer the window edits.
///
/// Any change to the value, whether made through [`set_value`](Self::set_value)
/// or through a binding on [`value_property`](Self::value_property), raises
/// one property-changed notification naming [`VALUE`](Self::VALUE).
pub struct MainWindowViewModel {
    value: Observable<i32>,
    property_changed: Event<PropertyChanged>,
    _notify: Subscription,
}

impl MainWindowViewModel {
    pub const VALUE: &'static str = "value";

    #[must_use]
    pub fn new() -> Self {
        Self::with_value(0)
    }

    #[must_use]
    pub fn with_value(value: i32) -> Self {
        let value = Observable::new(value);
        let property_changed = Event::new();
        let notifier = property_changed.clone();
        let notify = value.subscribe(move |_| notifier.emit(&PropertyChanged::new(Self::VALUE)));
        Self {
            value,
            property_changed,
            _notify: notify,
        }
    }

    #[must_use]
    pub fn value(&self) -> i32 {
        self.value.get()
    }

    /// Store `value`; equal values are ignored.
    pub fn set_value(&self, value: i32) {
        self.value.set(value);
    }

    /// Binding source for the value.
    #[must_use]
    pub fn value_property(&self) -> &Observable<i32> {
        &self.value
    }

    pub fn subscribe_property_changed(
        &self,
        handler: impl Fn(&PropertyChanged) + 'static,
    ) -> Subscription {
        self.property_changed.subscribe(handler)
    }
}

impl Default for MainWindowViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MainWindowViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainWindowViewModel")
            .field("value", &self.value())
            .finish()
    }
}
