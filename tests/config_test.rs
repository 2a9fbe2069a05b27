//! Integration tests for Settings layered loading.
//!
//! These tests pass the environment explicitly and never rely on a global
//! config file, so they are independent of the machine they run on.

use std::collections::HashMap;
use std::fs;

use tempfile::TempDir;

use bintree::config::{Settings, SettingsError};
use bintree::TraversalOrder;

fn no_env() -> Option<HashMap<String, String>> {
    Some(HashMap::new())
}

#[test]
fn given_no_layers_when_load_then_defaults() {
    let settings = Settings::load_layers(None, None, no_env()).expect("load settings");
    assert_eq!(settings.order, TraversalOrder::InOrder);
    assert_eq!(settings.separator, ",");
    assert_eq!(settings.null_token, "null");
}

#[test]
fn given_config_file_when_load_then_builder_uses_its_tokens() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bintree.toml");
    fs::write(
        &path,
        r#"
order = "depth-first"
separator = ";"
null_token = "-"
"#,
    )
    .unwrap();

    let settings = Settings::load_layers(None, Some(&path), no_env()).expect("load settings");
    assert_eq!(settings.order, TraversalOrder::InOrder);

    let tree = settings.builder().parse::<i64>("1;-;2").unwrap();
    assert!(tree.left.is_none());
    assert_eq!(tree.right.as_deref().map(|n| *n.value()), Some(2));
}

#[test]
fn given_unknown_order_in_file_when_load_then_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bintree.toml");
    fs::write(&path, "order = \"spiral\"\n").unwrap();

    let result = Settings::load_layers(None, Some(&path), no_env());
    assert!(matches!(result, Err(SettingsError::Parse { .. })), "{result:?}");
}

#[test]
fn given_missing_explicit_file_when_load_then_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let result = Settings::load_layers(None, Some(&path), no_env());
    assert!(matches!(result, Err(SettingsError::Read { .. })), "{result:?}");
}

#[test]
fn given_empty_separator_from_env_when_load_then_rejected() {
    let env = HashMap::from([("BINTREE_SEPARATOR".to_string(), String::new())]);
    let result = Settings::load_layers(None, None, Some(env));
    assert!(matches!(result, Err(SettingsError::InvalidValue { .. })), "{result:?}");
}

#[test]
fn given_settings_when_rendered_then_toml_parses_back() {
    let settings = Settings {
        order: TraversalOrder::BreadthFirst,
        separator: " ".to_string(),
        null_token: "_".to_string(),
    };
    let rendered = settings.to_toml().unwrap();
    let parsed: Settings = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed, settings);
}
