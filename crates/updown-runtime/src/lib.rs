#![forbid(unsafe_code)]

//! Single-threaded reactive runtime for updown widgets.
//!
//! Widgets and view models communicate exclusively through the primitives in
//! [`reactive`]: values live in [`Observable`]s, discrete signals (clicks,
//! text previews, property changes) flow through [`Event`]s, and every
//! listener registration is represented by a [`Subscription`] guard.

pub mod reactive;

pub use reactive::{
    Binding, BindingScope, Event, Observable, PropertyChanged, Subscription, bind_mapped,
};
