#![forbid(unsafe_code)]

//! Numeric up/down widget: an integer text field flanked by increment and
//! decrement triggers.
//!
//! # Commit path
//!
//! Every change, whether it comes from a trigger, from typing or from
//! [`NumericUpDown::set_value`], goes through the same sequence:
//!
//! 1. Range check against `[minimum, maximum]`.
//! 2. Out of range: the text is redrawn from `previous_value` and nothing
//!    else changes.
//! 3. In range: the value is stored (subscribers run), then
//!    `previous_value` is updated, then the text is redrawn, then trigger
//!    enablement is refreshed.
//!
//! Value subscribers therefore still see the old `previous_value` while they
//! run.
//!
//! # Input states
//!
//! While the user types, the text may diverge from the committed value
//! ([`InputState::Editing`]). Each text change parses the whole text and
//! either commits it or snaps the text back to the last committed value.
//! A lone `-` is left in place so negative numbers can be typed one
//! keystroke at a time.
//!
//! # Example
//!
//! ```
//! use updown_widgets::{NumericUpDown, UpDownParts};
//!
//! let parts = UpDownParts::new();
//! let control = NumericUpDown::new(parts.clone());
//! control.set_range(0, 10);
//! control.load();
//!
//! parts.text.set_text("7");
//! assert_eq!(control.value(), 7);
//!
//! parts.text.set_text("70");
//! assert_eq!(control.value(), 7);
//! assert_eq!(parts.text.text(), "7");
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use updown_runtime::{BindingScope, Observable, Subscription};

use crate::config::{ConfigError, NumericUpDownConfig};
use crate::parts::{TextPreview, UpDownParts};
use crate::{display_width, ellipsize};

/// Whether the displayed text matches the committed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Valid,
    Editing,
}

/// Keystroke filter: `text` is an integer or a lone minus sign.
///
/// A leading `+` is refused even though `i32::from_str` accepts it.
#[must_use]
pub fn is_numeric_text(text: &str) -> bool {
    !text.starts_with('+') && (text.parse::<i32>().is_ok() || text == "-")
}

struct Core {
    parts: UpDownParts,
    value: Observable<i32>,
    previous_value: Cell<i32>,
    minimum: Cell<i32>,
    maximum: Cell<i32>,
    step: Cell<i32>,
    writing_text: Cell<bool>,
}

/// Suppresses the text-changed handler while the control writes its own text.
struct TextWriteGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> TextWriteGuard<'a> {
    fn new(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for TextWriteGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

impl Core {
    fn contains(&self, value: i32) -> bool {
        (self.minimum.get()..=self.maximum.get()).contains(&value)
    }

    fn set_value(&self, candidate: i32) {
        if self.contains(candidate) {
            self.commit(candidate);
        } else {
            self.reject(candidate);
        }
    }

    fn increment(&self) {
        self.step_to(self.value.get().checked_add(self.step.get()));
    }

    fn decrement(&self) {
        self.step_to(self.value.get().checked_sub(self.step.get()));
    }

    fn step_to(&self, candidate: Option<i32>) {
        match candidate {
            Some(candidate) => self.set_value(candidate),
            None => self.reject("overflow"),
        }
    }

    fn commit(&self, value: i32) {
        #[cfg(feature = "tracing")]
        {
            if value != self.value.get() {
                tracing::debug!(
                    from = self.previous_value.get(),
                    to = value,
                    "numeric up/down commit"
                );
            }
        }

        self.value.set(value);
        self.previous_value.set(value);
        self.write_text(value);
        self.refresh_enabled();
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn reject(&self, candidate: impl fmt::Display) {
        let previous = self.previous_value.get();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            %candidate,
            previous,
            minimum = self.minimum.get(),
            maximum = self.maximum.get(),
            "numeric up/down rejected value"
        );

        self.write_text(previous);
        self.refresh_enabled();
    }

    fn write_text(&self, value: i32) {
        let _guard = TextWriteGuard::new(&self.writing_text);
        self.parts.text.set_text(value.to_string());
    }

    fn refresh_enabled(&self) {
        let value = self.value.get();
        self.parts.up.set_enabled(value < self.maximum.get());
        self.parts.down.set_enabled(value > self.minimum.get());
    }

    fn on_preview(&self, preview: &TextPreview) {
        let accepted = is_numeric_text(preview.candidate());
        #[cfg(feature = "tracing")]
        tracing::trace!(
            input = preview.input(),
            candidate = preview.candidate(),
            accepted,
            "numeric up/down preview"
        );
        if !accepted {
            preview.reject();
        }
    }

    fn on_text_changed(&self, text: &str) {
        if self.writing_text.get() || text == "-" {
            return;
        }
        match text.parse::<i32>() {
            Ok(parsed) => self.set_value(parsed),
            Err(_) => self.reject(format_args!("{text:?}")),
        }
    }

    /// Re-apply the range after `minimum` or `maximum` moved.
    fn coerce_to_range(&self) {
        let value = self.value.get();
        let coerced = value.clamp(self.minimum.get(), self.maximum.get());
        if coerced == value {
            self.refresh_enabled();
        } else {
            self.commit(coerced);
        }
    }
}

/// A bounded integer spin control.
///
/// Owns `value`, `minimum`, `maximum` and `step`; the parts passed at
/// construction are driven by it. Listeners on the parts exist only while
/// the control is attached (see [`attach`](Self::attach) and
/// [`load`](Self::load)).
pub struct NumericUpDown {
    core: Rc<Core>,
    attachment: RefCell<Option<Attachment>>,
}

impl NumericUpDown {
    /// Create a control with value 0, step 1 and the full `i32` range.
    #[must_use]
    pub fn new(parts: UpDownParts) -> Self {
        let core = Rc::new(Core {
            parts,
            value: Observable::new(0),
            previous_value: Cell::new(0),
            minimum: Cell::new(i32::MIN),
            maximum: Cell::new(i32::MAX),
            step: Cell::new(1),
            writing_text: Cell::new(false),
        });
        core.write_text(0);
        core.refresh_enabled();
        Self {
            core,
            attachment: RefCell::new(None),
        }
    }

    /// Create a control from a validated configuration.
    pub fn with_config(
        parts: UpDownParts,
        config: &NumericUpDownConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let control = Self::new(parts);
        control.set_range(config.minimum, config.maximum);
        control.set_step(config.step);
        control.set_value(config.value);
        Ok(control)
    }

    #[must_use]
    pub fn value(&self) -> i32 {
        self.core.value.get()
    }

    /// Last committed value; the rollback target for rejected input.
    #[must_use]
    pub fn previous_value(&self) -> i32 {
        self.core.previous_value.get()
    }

    #[must_use]
    pub fn minimum(&self) -> i32 {
        self.core.minimum.get()
    }

    #[must_use]
    pub fn maximum(&self) -> i32 {
        self.core.maximum.get()
    }

    #[must_use]
    pub fn step(&self) -> i32 {
        self.core.step.get()
    }

    #[must_use]
    pub fn parts(&self) -> &UpDownParts {
        &self.core.parts
    }

    /// Text currently shown in the field.
    #[must_use]
    pub fn text(&self) -> String {
        self.core.parts.text.text()
    }

    #[must_use]
    pub fn input_state(&self) -> InputState {
        let committed = self.value().to_string();
        if self.core.parts.text.text_changed().with(|t| *t == committed) {
            InputState::Valid
        } else {
            InputState::Editing
        }
    }

    /// Commit `value` if it lies in `[minimum, maximum]`, otherwise keep the
    /// previous value and redraw its text.
    pub fn set_value(&self, value: i32) {
        self.core.set_value(value);
    }

    /// `set_value(value + step)`; overflow counts as out of range.
    pub fn increment(&self) {
        self.core.increment();
    }

    /// `set_value(value - step)`; overflow counts as out of range.
    pub fn decrement(&self) {
        self.core.decrement();
    }

    /// Set the lower bound. A maximum below it is raised to match, and a
    /// value below it is pulled up.
    pub fn set_minimum(&self, minimum: i32) {
        self.core.minimum.set(minimum);
        if self.core.maximum.get() < minimum {
            self.core.maximum.set(minimum);
        }
        self.core.coerce_to_range();
    }

    /// Set the upper bound. A minimum above it is lowered to match, and a
    /// value above it is pulled down.
    pub fn set_maximum(&self, maximum: i32) {
        self.core.maximum.set(maximum);
        if self.core.minimum.get() > maximum {
            self.core.minimum.set(maximum);
        }
        self.core.coerce_to_range();
    }

    /// Set both bounds at once (`minimum` wins if they are inverted).
    pub fn set_range(&self, minimum: i32, maximum: i32) {
        self.core.minimum.set(minimum);
        self.core.maximum.set(maximum.max(minimum));
        self.core.coerce_to_range();
    }

    pub fn set_step(&self, step: i32) {
        self.core.step.set(step);
    }

    /// Observe committed values.
    pub fn subscribe_value(&self, callback: impl Fn(&i32) + 'static) -> Subscription {
        self.core.value.subscribe(callback)
    }

    /// Two-way bind the control's value to `source`.
    ///
    /// The control first takes `source`'s value (through the commit path),
    /// then `source` is set to whatever was committed. Afterwards commits
    /// flow to `source`, and writes to `source` flow through the commit
    /// path; a rejected write is undone on `source` as well. Dropping the
    /// returned scope disconnects both directions.
    pub fn bind_value(&self, source: &Observable<i32>) -> BindingScope {
        self.core.set_value(source.get());
        source.set(self.core.value.get());

        let syncing = Rc::new(Cell::new(false));
        let mut scope = BindingScope::new();

        let core = Rc::downgrade(&self.core);
        let writeback = source.clone();
        let guard = Rc::clone(&syncing);
        scope.subscribe(source, move |requested| {
            if guard.get() {
                return;
            }
            let Some(core) = core.upgrade() else {
                return;
            };
            guard.set(true);
            core.set_value(*requested);
            guard.set(false);

            let committed = core.value.get();
            if committed != *requested {
                writeback.set(committed);
            }
        });

        let target = source.clone();
        let guard = Rc::clone(&syncing);
        scope.subscribe(&self.core.value, move |committed| {
            if guard.get() {
                return;
            }
            guard.set(true);
            target.set(*committed);
            guard.set(false);
        });

        scope
    }

    /// Bind trigger-click, keystroke-preview and text-changed listeners.
    ///
    /// The text is re-synced to the committed value and enablement is
    /// refreshed. Each call registers a fresh set of listeners; prefer
    /// [`load`](Self::load) when the control manages its own attachment.
    pub fn attach(&self) -> Attachment {
        let parts = &self.core.parts;
        let mut scope = BindingScope::new();

        let core = Rc::downgrade(&self.core);
        scope.listen(parts.up.clicked(), move |_| {
            if let Some(core) = core.upgrade() {
                core.increment();
            }
        });

        let core = Rc::downgrade(&self.core);
        scope.listen(parts.down.clicked(), move |_| {
            if let Some(core) = core.upgrade() {
                core.decrement();
            }
        });

        let core = Rc::downgrade(&self.core);
        scope.listen(parts.text.preview_input(), move |preview| {
            if let Some(core) = core.upgrade() {
                core.on_preview(preview);
            }
        });

        let core = Rc::downgrade(&self.core);
        scope.subscribe(parts.text.text_changed(), move |text| {
            if let Some(core) = core.upgrade() {
                core.on_text_changed(text);
            }
        });

        self.core.write_text(self.core.value.get());
        self.core.refresh_enabled();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            listeners = scope.binding_count(),
            "numeric up/down attached"
        );

        Attachment {
            scope,
            core: Rc::downgrade(&self.core),
        }
    }

    /// Attach and keep the attachment inside the control. No-op when
    /// already loaded.
    pub fn load(&self) {
        let mut slot = self.attachment.borrow_mut();
        if slot.is_none() {
            *slot = Some(self.attach());
        }
    }

    /// Release the attachment held by [`load`](Self::load). Safe to call
    /// when not loaded.
    pub fn unload(&self) {
        let attachment = self.attachment.borrow_mut().take();
        if let Some(attachment) = attachment {
            attachment.release();
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.attachment.borrow().is_some()
    }

    /// Load when shown, unload when hidden.
    pub fn set_visible(&self, visible: bool) {
        if visible {
            self.load();
        } else {
            self.unload();
        }
    }

    /// Render `[-] <text> [+]` into `width` columns. Disabled triggers draw
    /// as `[ ]`; text that does not fit is ellipsized.
    #[must_use]
    pub fn render(&self, width: usize) -> String {
        let parts = &self.core.parts;
        let down = if parts.down.is_enabled() { "[-]" } else { "[ ]" };
        let up = if parts.up.is_enabled() { "[+]" } else { "[ ]" };

        let slot = width.saturating_sub(8);
        let text = parts.text.text();
        let shown = ellipsize(&text, slot);
        let pad = slot.saturating_sub(display_width(&shown));

        format!("{down} {:pad$}{shown} {up}", "")
    }
}

impl fmt::Debug for NumericUpDown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumericUpDown")
            .field("value", &self.value())
            .field("minimum", &self.minimum())
            .field("maximum", &self.maximum())
            .field("step", &self.step())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// Listeners bound by [`NumericUpDown::attach`].
///
/// Releasing (or dropping) the attachment unbinds every listener and snaps
/// any half-typed text back to the committed value.
#[must_use = "dropping an Attachment immediately detaches the control"]
pub struct Attachment {
    scope: BindingScope,
    core: Weak<Core>,
}

impl Attachment {
    /// Number of listeners currently bound.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.scope.binding_count()
    }

    pub fn release(self) {
        drop(self);
    }
}

impl Drop for Attachment {
    fn drop(&mut self) {
        self.scope.clear();
        if let Some(core) = self.core.upgrade() {
            core.write_text(core.value.get());
            #[cfg(feature = "tracing")]
            tracing::debug!("numeric up/down detached");
        }
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
