//! Tests for configuration layer precedence.

use rstest::rstest;
use serde_json::{Value, json};

use super::helpers::build_config_from_layers;
use crate::config::DEFAULT_FORMAT;

#[rstest]
#[case::file_overrides_defaults(
    vec![("defaults", json!({"format": "html"})), ("file", json!({"format": "markdown"}))],
    "format",
    "markdown",
    "file should override default"
)]
#[case::environment_overrides_file(
    vec![("file", json!({"output_dir": "file-dir"})), ("environment", json!({"output_dir": "env-dir"}))],
    "output_dir",
    "env-dir",
    "environment should override file"
)]
#[case::cli_overrides_environment(
    vec![("environment", json!({"title": "env title"})), ("cli", json!({"title": "cli title"}))],
    "title",
    "cli title",
    "CLI should override environment"
)]
#[case::preview_app_defaults_file_env_cli(
    vec![
        ("defaults", json!({"preview_app": "default-app"})),
        ("file", json!({"preview_app": "file-app"})),
        ("environment", json!({"preview_app": "env-app"})),
        ("cli", json!({"preview_app": "cli-app"}))
    ],
    "preview_app",
    "cli-app",
    "CLI should win for preview_app"
)]
fn test_layer_precedence(
    #[case] layers: Vec<(&str, Value)>,
    #[case] field: &str,
    #[case] expected: &str,
    #[case] message: &str,
) {
    let config = build_config_from_layers(&layers);

    let actual = match field {
        "format" => Some(config.format.as_str()),
        "output_dir" => config.output_dir.as_deref(),
        "title" => config.title.as_deref(),
        "preview_app" => config.preview_app.as_deref(),
        _ => panic!("unknown field: {field}"),
    };

    assert_eq!(actual, Some(expected), "{message}");
}

#[rstest]
fn format_defaults_to_html_when_no_layer_sets_it() {
    let config = build_config_from_layers(&[("file", json!({"highlight": true}))]);

    assert_eq!(config.format, DEFAULT_FORMAT);
    assert!(config.highlight, "file should enable highlighting");
    assert!(!config.svg, "svg should default to false");
    assert!(config.input.is_none(), "input should default to stdin");
}

#[rstest]
fn partial_overrides_preserve_lower_values() {
    let config = build_config_from_layers(&[
        ("file", json!({"format": "plaintext", "filename": "review.txt"})),
        ("cli", json!({"filename": "final.txt"})),
    ]);

    assert_eq!(config.format, "plaintext", "file format should be preserved");
    assert_eq!(
        config.filename.as_deref(),
        Some("final.txt"),
        "CLI should override filename"
    );
}

#[rstest]
fn boolean_flags_follow_precedence() {
    let config = build_config_from_layers(&[
        ("defaults", json!({"preview": false, "no_line_numbers": false})),
        ("file", json!({"preview": true, "no_line_numbers": true})),
        ("cli", json!({"preview": false})),
    ]);

    assert!(!config.preview, "CLI layer should win for preview");
    assert!(config.no_line_numbers, "file layer should survive for no_line_numbers");
}
