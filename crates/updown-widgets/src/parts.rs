#![forbid(unsafe_code)]

//! Sub-elements a [`NumericUpDown`](crate::NumericUpDown) is assembled from.
//!
//! Parts are cheap handles (`Clone` shares state). The host keeps its own
//! clones to feed input (clicks, keystrokes) and to read what the control
//! wrote back (text, enablement).

use std::cell::Cell;
use std::rc::Rc;

use updown_runtime::{Event, Observable};

/// A trigger that emits `clicked` while enabled, and repeatedly while held.
#[derive(Debug, Clone)]
pub struct RepeatButton {
    enabled: Observable<bool>,
    clicked: Event<()>,
}

impl RepeatButton {
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: Observable::new(true),
            clicked: Event::new(),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    #[must_use]
    pub fn clicked(&self) -> &Event<()> {
        &self.clicked
    }

    /// Press and release once. Returns `false` when the button is disabled.
    pub fn click(&self) -> bool {
        if !self.is_enabled() {
            return false;
        }
        self.clicked.emit(&());
        true
    }

    /// Hold the button for `repeats` auto-repeat intervals.
    ///
    /// Stops early once a click handler disables the button; returns the
    /// number of clicks delivered.
    pub fn hold(&self, repeats: u32) -> u32 {
        let mut delivered = 0;
        while delivered < repeats && self.click() {
            delivered += 1;
        }
        delivered
    }
}

impl Default for RepeatButton {
    fn default() -> Self {
        Self::new()
    }
}

/// Keystroke about to be inserted into a [`TextField`].
///
/// Handlers inspect the resulting text and call [`reject`](Self::reject) to
/// suppress the input.
#[derive(Debug)]
pub struct TextPreview {
    input: String,
    candidate: String,
    handled: Cell<bool>,
}

impl TextPreview {
    /// The typed characters.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The full text the field would hold if the input were accepted.
    #[must_use]
    pub fn candidate(&self) -> &str {
        &self.candidate
    }

    pub fn reject(&self) {
        self.handled.set(true);
    }

    #[must_use]
    pub fn is_rejected(&self) -> bool {
        self.handled.get()
    }
}

/// Single-line editable text with a caret.
///
/// Every mutation of the text, whether typed or assigned, is published
/// through [`text_changed`](Self::text_changed).
#[derive(Debug, Clone)]
pub struct TextField {
    text: Observable<String>,
    caret: Rc<Cell<usize>>,
    preview: Event<TextPreview>,
}

impl TextField {
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: Observable::new(String::new()),
            caret: Rc::new(Cell::new(0)),
            preview: Event::new(),
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.text.get()
    }

    /// Replace the whole text (paste, programmatic assignment). The caret
    /// moves to the end.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.caret.set(text.chars().count());
        self.text.set(text);
    }

    #[must_use]
    pub fn text_changed(&self) -> &Observable<String> {
        &self.text
    }

    #[must_use]
    pub fn preview_input(&self) -> &Event<TextPreview> {
        &self.preview
    }

    /// Caret position in characters.
    #[must_use]
    pub fn caret(&self) -> usize {
        self.caret.get()
    }

    /// Move the caret, clamped to the end of the text.
    pub fn set_caret(&self, position: usize) {
        let len = self.text.with(|t| t.chars().count());
        self.caret.set(position.min(len));
    }

    /// Type `input` at the caret.
    ///
    /// Preview handlers run first and may reject the input; returns whether
    /// the text was modified.
    pub fn type_text(&self, input: &str) -> bool {
        if input.is_empty() {
            return false;
        }
        let caret = self.caret();
        let candidate = self.text.with(|t| {
            let at = byte_offset(t, caret);
            let mut next = String::with_capacity(t.len() + input.len());
            next.push_str(&t[..at]);
            next.push_str(input);
            next.push_str(&t[at..]);
            next
        });

        let preview = TextPreview {
            input: input.to_owned(),
            candidate,
            handled: Cell::new(false),
        };
        self.preview.emit(&preview);
        if preview.is_rejected() {
            return false;
        }

        self.caret.set(caret + input.chars().count());
        self.text.set(preview.candidate);
        true
    }

    /// Delete the character before the caret. Deletion is not previewed.
    pub fn backspace(&self) -> bool {
        let caret = self.caret();
        if caret == 0 {
            return false;
        }
        let next = self.text.with(|t| {
            let start = byte_offset(t, caret - 1);
            let end = byte_offset(t, caret);
            let mut next = String::with_capacity(t.len());
            next.push_str(&t[..start]);
            next.push_str(&t[end..]);
            next
        });
        self.caret.set(caret - 1);
        self.text.set(next);
        true
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(offset, _)| offset)
}

/// The three parts a [`NumericUpDown`](crate::NumericUpDown) drives.
#[derive(Debug, Clone, Default)]
pub struct UpDownParts {
    pub up: RepeatButton,
    pub down: RepeatButton,
    pub text: TextField,
}

impl UpDownParts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_button_swallows_clicks() {
        let button = RepeatButton::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = button.clicked().subscribe(move |_| h.set(h.get() + 1));

        assert!(button.click());
        button.set_enabled(false);
        assert!(!button.click());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn hold_stops_when_disabled() {
        let button = RepeatButton::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let b = button.clone();
        let _sub = button.clicked().subscribe(move |_| {
            h.set(h.get() + 1);
            if h.get() == 3 {
                b.set_enabled(false);
            }
        });

        assert_eq!(button.hold(10), 3);
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn type_inserts_at_caret() {
        let field = TextField::new();
        field.set_text("13");
        field.set_caret(1);
        assert!(field.type_text("2"));
        assert_eq!(field.text(), "123");
        assert_eq!(field.caret(), 2);
    }

    #[test]
    fn rejected_preview_leaves_text() {
        let field = TextField::new();
        field.set_text("7");
        let _veto = field.preview_input().subscribe(|p| {
            if p.input() == "x" {
                p.reject();
            }
        });

        assert!(!field.type_text("x"));
        assert_eq!(field.text(), "7");
        assert!(field.type_text("1"));
        assert_eq!(field.text(), "71");
    }

    #[test]
    fn preview_sees_candidate() {
        let field = TextField::new();
        field.set_text("45");
        field.set_caret(0);
        let seen = Rc::new(std::cell::RefCell::new(String::new()));
        let s = Rc::clone(&seen);
        let _sub = field
            .preview_input()
            .subscribe(move |p| *s.borrow_mut() = p.candidate().to_owned());

        field.type_text("-");
        assert_eq!(*seen.borrow(), "-45");
    }

    #[test]
    fn backspace_removes_previous_char() {
        let field = TextField::new();
        field.set_text("120");
        assert!(field.backspace());
        assert_eq!(field.text(), "12");
        field.set_caret(0);
        assert!(!field.backspace());
    }

    #[test]
    fn caret_clamped_to_text() {
        let field = TextField::new();
        field.set_text("99");
        field.set_caret(40);
        assert_eq!(field.caret(), 2);
    }
}
