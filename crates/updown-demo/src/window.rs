#![forbid(unsafe_code)]

//! The demo's host window: one numeric up/down bound to the view model.

use updown_runtime::{Binding, BindingScope, bind_mapped};
use updown_widgets::{ConfigError, NumericUpDown, NumericUpDownConfig, UpDownParts};

use crate::action::Action;
use crate::view_model::MainWindowViewModel;

pub struct MainWindow {
    view_model: MainWindowViewModel,
    parts: UpDownParts,
    control: NumericUpDown,
    _value_binding: BindingScope,
    status: Binding<String>,
    width: usize,
}

impl MainWindow {
    /// Build the control from `config` and bind it to `view_model`.
    ///
    /// The view model is overwritten with the configured initial value.
    pub fn new(
        view_model: MainWindowViewModel,
        config: &NumericUpDownConfig,
        width: usize,
    ) -> Result<Self, ConfigError> {
        let parts = UpDownParts::new();
        let control = NumericUpDown::with_config(parts.clone(), config)?;
        view_model.set_value(control.value());
        let value_binding = control.bind_value(view_model.value_property());
        let status = bind_mapped(view_model.value_property(), |v| format!("vm={v}"));
        Ok(Self {
            view_model,
            parts,
            control,
            _value_binding: value_binding,
            status,
            width,
        })
    }

    #[must_use]
    pub fn view_model(&self) -> &MainWindowViewModel {
        &self.view_model
    }

    #[must_use]
    pub fn control(&self) -> &NumericUpDown {
        &self.control
    }

    pub fn show(&self) {
        self.control.set_visible(true);
    }

    pub fn hide(&self) {
        self.control.set_visible(false);
    }

    /// Feed one interaction into the window.
    pub fn apply(&self, action: &Action) {
        tracing::debug!(%action, "apply");
        match action {
            Action::Up => {
                self.parts.up.click();
            }
            Action::Down => {
                self.parts.down.click();
            }
            Action::HoldUp(n) => {
                self.parts.up.hold(*n);
            }
            Action::HoldDown(n) => {
                self.parts.down.hold(*n);
            }
            Action::Type(text) => {
                if !self.parts.text.type_text(text) {
                    tracing::debug!(input = %text, "keystroke suppressed");
                }
            }
            Action::Replace(text) => self.parts.text.set_text(text.as_str()),
            Action::Backspace => {
                self.parts.text.backspace();
            }
            Action::Caret(position) => self.parts.text.set_caret(*position),
            Action::ViewModel(value) => self.view_model.set_value(*value),
            Action::Show => self.show(),
            Action::Hide => self.hide(),
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        self.control.render(self.width)
    }

    /// Status line text derived from the view model.
    #[must_use]
    pub fn status(&self) -> String {
        self.status.get()
    }
}
