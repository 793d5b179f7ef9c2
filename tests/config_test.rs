//! Config file loading.

use std::io::Write;

use tempfile::NamedTempFile;
use tictactoe::config::{Config, Rgb};
use tictactoe::ConfigError;

#[test]
fn no_path_means_defaults() {
    assert_eq!(Config::load(None).unwrap(), Config::default());
}

#[test]
fn loads_values_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"tick_ms": 33, "welcome": false, "confetti": 5, "theme": {{"o": [10, 20, 30]}}}}"#
    )
    .unwrap();

    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.tick_ms, 33);
    assert!(!config.welcome);
    assert_eq!(config.confetti, 5);
    assert_eq!(config.theme.o, Rgb(10, 20, 30));
    assert!(config.sound);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");
    let err = Config::load(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn bad_json_is_a_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{ tick_ms: ").unwrap();
    let err = Config::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
