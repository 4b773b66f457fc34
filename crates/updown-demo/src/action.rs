#![forbid(unsafe_code)]

//! Scripted input actions accepted on the demo's command line.

use std::fmt;
use std::str::FromStr;

/// One simulated user or host interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Click the increment trigger.
    Up,
    /// Click the decrement trigger.
    Down,
    /// Hold the increment trigger for N repeat intervals.
    HoldUp(u32),
    /// Hold the decrement trigger for N repeat intervals.
    HoldDown(u32),
    /// Type characters at the caret.
    Type(String),
    /// Replace the whole text (paste).
    Replace(String),
    /// Delete the character before the caret.
    Backspace,
    /// Move the caret.
    Caret(usize),
    /// Write the view model's value directly.
    ViewModel(i32),
    Show,
    Hide,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("unknown action `{0}` (expected up, down, hold-up:N, hold-down:N, type:TEXT, replace:TEXT, backspace, caret:N, vm:N, show, hide)")]
    Unknown(String),

    #[error("action `{action}` needs a numeric argument, got `{argument}`")]
    BadArgument { action: &'static str, argument: String },
}

fn numeric<T: FromStr>(action: &'static str, argument: &str) -> Result<T, ActionError> {
    argument.parse().map_err(|_| ActionError::BadArgument {
        action,
        argument: argument.to_owned(),
    })
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, argument) = match s.split_once(':') {
            Some((name, argument)) => (name, Some(argument)),
            None => (s, None),
        };

        match (name, argument) {
            ("up", None) => Ok(Self::Up),
            ("down", None) => Ok(Self::Down),
            ("backspace", None) => Ok(Self::Backspace),
            ("show", None) => Ok(Self::Show),
            ("hide", None) => Ok(Self::Hide),
            ("hold-up", Some(n)) => numeric("hold-up", n).map(Self::HoldUp),
            ("hold-down", Some(n)) => numeric("hold-down", n).map(Self::HoldDown),
            ("caret", Some(n)) => numeric("caret", n).map(Self::Caret),
            ("vm", Some(n)) => numeric("vm", n).map(Self::ViewModel),
            ("type", Some(text)) => Ok(Self::Type(text.to_owned())),
            ("replace", Some(text)) => Ok(Self::Replace(text.to_owned())),
            _ => Err(ActionError::Unknown(s.to_owned())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
            Self::HoldUp(n) => write!(f, "hold-up:{n}"),
            Self::HoldDown(n) => write!(f, "hold-down:{n}"),
            Self::Type(text) => write!(f, "type:{text}"),
            Self::Replace(text) => write!(f, "replace:{text}"),
            Self::Backspace => f.write_str("backspace"),
            Self::Caret(n) => write!(f, "caret:{n}"),
            Self::ViewModel(n) => write!(f, "vm:{n}"),
            Self::Show => f.write_str("show"),
            Self::Hide => f.write_str("hide"),
        }
    }
}
