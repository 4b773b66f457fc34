#![forbid(unsafe_code)]

//! Initial settings for a [`NumericUpDown`](crate::NumericUpDown).
//!
//! With the `config` feature the settings load from TOML; every key is
//! optional and falls back to the control's defaults:
//!
//! ```toml
//! value = 5
//! minimum = 0
//! maximum = 10
//! step = 1
//! ```

#[cfg(feature = "config")]
use std::path::{Path, PathBuf};

/// Errors raised while loading or validating a [`NumericUpDownConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("minimum {minimum} is greater than maximum {maximum}")]
    InvertedRange { minimum: i32, maximum: i32 },

    #[error("initial value {value} is outside [{minimum}, {maximum}]")]
    ValueOutOfRange {
        value: i32,
        minimum: i32,
        maximum: i32,
    },

    #[cfg(feature = "config")]
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "config")]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Value, range and step of a numeric up/down control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct NumericUpDownConfig {
    pub value: i32,
    pub minimum: i32,
    pub maximum: i32,
    pub step: i32,
}

impl Default for NumericUpDownConfig {
    fn default() -> Self {
        Self {
            value: 0,
            minimum: i32::MIN,
            maximum: i32::MAX,
            step: 1,
        }
    }
}

impl NumericUpDownConfig {
    /// Check `minimum <= value <= maximum`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minimum > self.maximum {
            return Err(ConfigError::InvertedRange {
                minimum: self.minimum,
                maximum: self.maximum,
            });
        }
        if !(self.minimum..=self.maximum).contains(&self.value) {
            return Err(ConfigError::ValueOutOfRange {
                value: self.value,
                minimum: self.minimum,
                maximum: self.maximum,
            });
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    #[cfg(feature = "config")]
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    #[cfg(feature = "config")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(NumericUpDownConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_range_rejected() {
        let config = NumericUpDownConfig {
            minimum: 5,
            maximum: 1,
            value: 3,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvertedRange {
                minimum: 5,
                maximum: 1
            }
        ));
        assert_eq!(err.to_string(), "minimum 5 is greater than maximum 1");
    }

    #[test]
    fn value_outside_range_rejected() {
        let config = NumericUpDownConfig {
            value: 11,
            minimum: 0,
            maximum: 10,
            step: 1,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange { value: 11, .. })
        ));
    }

    #[test]
    fn single_point_range_is_valid() {
        let config = NumericUpDownConfig {
            value: 4,
            minimum: 4,
            maximum: 4,
            step: 1,
        };
        assert!(config.validate().is_ok());
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_partial_uses_defaults() {
        let config = NumericUpDownConfig::from_toml_str("maximum = 10\nvalue = 3\n").unwrap();
        assert_eq!(config.maximum, 10);
        assert_eq!(config.value, 3);
        assert_eq!(config.minimum, i32::MIN);
        assert_eq!(config.step, 1);
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_unknown_key_rejected() {
        let err = NumericUpDownConfig::from_toml_str("increment = 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
