//! Loading the optional JSON configuration.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use mathforml::configuration::{
    Configuration,
    ConfigurationError,
    MAX_PANEL_SIZE
};
use mathforml::optimize::fixedstepdescent::DescentSettings;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_empty_object_yields_defaults() {
    let file = write_config("{}");
    let configuration = Configuration::from_reader(file.path()).unwrap();

    assert_eq!(configuration, Configuration::new());
    assert_eq!(configuration.output_dir(), Path::new("."));
    assert_eq!(configuration.chart_style().panel_width(), 700);
    assert_eq!(*configuration.gradient_descent(), DescentSettings::default());
}

#[test]
fn test_partial_descent_settings_keep_other_defaults() {
    let file = write_config(
        r#"{
            "output_dir": "plots",
            "panel_height": 400,
            "gradient_descent": { "learning_rate": 0.05 }
        }"#
    );
    let configuration = Configuration::from_reader(file.path()).unwrap();

    assert_eq!(configuration.output_dir(), Path::new("plots"));
    assert_eq!(configuration.chart_style().panel_height(), 400);
    assert_eq!(configuration.chart_style().panel_width(), 700);
    let descent = configuration.gradient_descent();
    assert_eq!(descent.learning_rate, 0.05);
    assert_eq!(descent.initial_x, 0.5);
    assert_eq!(descent.max_iter, 1000);
}

#[test]
fn test_output_dir_override() {
    let configuration = Configuration::new().with_output_dir("charts".into());
    assert_eq!(configuration.output_dir(), Path::new("charts"));
}

#[test]
fn test_invalid_json_is_rejected() {
    let file = write_config("{ \"panel_width\": ");
    let error = Configuration::from_reader(file.path()).unwrap_err();
    assert!(matches!(error, ConfigurationError::JsonParseError { .. }));
}

#[test]
fn test_zero_panel_size_is_rejected() {
    let file = write_config(r#"{ "panel_width": 0 }"#);
    let error = Configuration::from_reader(file.path()).unwrap_err();
    assert!(matches!(error, ConfigurationError::InvalidPanelSize(0, 500)));
}

#[test]
fn test_oversized_panel_is_rejected() {
    let file = write_config(r#"{ "panel_width": 3000000000 }"#);
    let error = Configuration::from_reader(file.path()).unwrap_err();
    assert!(matches!(error, ConfigurationError::InvalidPanelSize(3_000_000_000, 500)));

    let file = write_config(&format!(r#"{{ "panel_height": {} }}"#, MAX_PANEL_SIZE + 1));
    let error = Configuration::from_reader(file.path()).unwrap_err();
    assert!(matches!(error, ConfigurationError::InvalidPanelSize(700, _)));
}

#[test]
fn test_largest_panel_size_is_accepted() {
    let file = write_config(&format!(r#"{{ "panel_width": {0}, "panel_height": {0} }}"#, MAX_PANEL_SIZE));
    let configuration = Configuration::from_reader(file.path()).unwrap();
    assert_eq!(configuration.chart_style().panel_width(), MAX_PANEL_SIZE);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let error = Configuration::from_reader(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(error, ConfigurationError::IOError { .. }));
}
