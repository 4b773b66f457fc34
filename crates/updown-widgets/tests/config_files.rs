#![forbid(unsafe_code)]

//! Integration tests: loading `NumericUpDownConfig` from TOML files.

use std::io::Write;

use updown_widgets::{ConfigError, NumericUpDown, NumericUpDownConfig, UpDownParts};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn load_full_config() {
    let file = write_config("value = 5\nminimum = 0\nmaximum = 10\nstep = 2\n");
    let config = NumericUpDownConfig::load(file.path()).unwrap();
    assert_eq!(
        config,
        NumericUpDownConfig {
            value: 5,
            minimum: 0,
            maximum: 10,
            step: 2,
        }
    );

    let parts = UpDownParts::new();
    let control = NumericUpDown::with_config(parts.clone(), &config).unwrap();
    control.load();
    parts.up.click();
    assert_eq!(control.value(), 7);
}

#[test]
fn load_empty_file_gives_defaults() {
    let file = write_config("");
    let config = NumericUpDownConfig::load(file.path()).unwrap();
    assert_eq!(config, NumericUpDownConfig::default());
}

#[test]
fn load_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = NumericUpDownConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn load_rejects_value_outside_range() {
    let file = write_config("value = 20\nminimum = 0\nmaximum = 10\n");
    let err = NumericUpDownConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ValueOutOfRange { value: 20, .. }));
}

#[test]
fn load_rejects_wrong_types() {
    let file = write_config("value = \"five\"\n");
    let err = NumericUpDownConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn config_round_trips_through_toml() {
    let config = NumericUpDownConfig {
        value: -3,
        minimum: -5,
        maximum: 5,
        step: 1,
    };
    let text = toml::to_string(&config).unwrap();
    assert_eq!(NumericUpDownConfig::from_toml_str(&text).unwrap(), config);
}
