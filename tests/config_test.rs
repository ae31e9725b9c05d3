//! Integration tests for Settings loading and validation.
//!
//! Note: these tests assume no global config and no MANAGED_BOOKMARKS__*
//! variables in the environment, so an explicit file layers over defaults.

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use managed_bookmarks::application::ApplicationError;
use managed_bookmarks::config::{RawSettings, Settings};
use managed_bookmarks::infrastructure::di::token_provider;
use managed_bookmarks::infrastructure::traits::{RealCommandRunner, TokenProvider};

#[test]
fn given_explicit_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookmarks.toml");
    fs::write(
        &path,
        r#"
org_unit = "orgunits/03ph8a2z"
toplevel_name = "Intranet"
separator = "/"
delimiter = "tab"
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.org_unit().unwrap().id(), "03ph8a2z");
    assert_eq!(settings.toplevel_name, "Intranet");
    assert_eq!(settings.separator, "/");
    assert_eq!(settings.delimiter, "tab");
    // untouched fields keep their defaults
    assert_eq!(settings.customer, "my_customer");
    assert_eq!(settings.policy_schema, "chrome.users.ManagedBookmarks");
    settings.validate().unwrap();
}

#[test]
fn given_missing_explicit_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let result = Settings::load(Some(&dir.path().join("nope.toml")));
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_invalid_toml_when_load_then_config_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "org_unit = [").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn given_cli_overlay_when_merging_then_flags_win() {
    let settings = Settings::default().merge_with(&RawSettings {
        org_unit: Some("eng".into()),
        separator: Some(" / ".into()),
        ..RawSettings::default()
    });
    assert_eq!(settings.org_unit().unwrap().target_resource(), "orgunits/eng");
    assert_eq!(settings.separator, " / ");
}

#[test]
fn given_bad_org_unit_when_validating_then_error() {
    let settings = Settings {
        org_unit: "orgunits/".into(),
        ..Settings::default()
    };
    assert!(matches!(
        settings.validate(),
        Err(ApplicationError::Domain(_))
    ));
}

#[test]
fn given_bad_delimiter_when_validating_then_config_error() {
    let settings = Settings {
        delimiter: ";;".into(),
        ..Settings::default()
    };
    assert!(matches!(
        settings.validate(),
        Err(ApplicationError::Config { .. })
    ));
}

#[test]
fn given_static_token_when_selecting_provider_then_token_used_without_command() {
    let settings = Settings {
        access_token: Some("abc".into()),
        token_command: "/definitely/not/a/command".into(),
        ..Settings::default()
    };
    let provider = token_provider(&settings, Arc::new(RealCommandRunner));
    assert_eq!(provider.access_token().unwrap(), "abc");
}
