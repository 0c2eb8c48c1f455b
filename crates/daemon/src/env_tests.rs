// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serial_test::serial;

use super::*;

#[test]
#[serial]
fn settings_dir_honors_override() {
    std::env::set_var("SETTINGS_DIR", "/tmp/siegeup-test-settings");
    assert_eq!(settings_dir(), PathBuf::from("/tmp/siegeup-test-settings"));
    std::env::remove_var("SETTINGS_DIR");
}

#[test]
#[serial]
fn builds_dir_defaults_under_settings_dir() {
    std::env::remove_var("BUILDS_DIR");
    assert_eq!(builds_dir(Path::new("/base")), PathBuf::from("/base/builds"));
}

#[test]
#[serial]
fn builds_dir_honors_override() {
    std::env::set_var("BUILDS_DIR", "/tmp/siegeup-test-builds");
    assert_eq!(builds_dir(Path::new("/base")), PathBuf::from("/tmp/siegeup-test-builds"));
    std::env::remove_var("BUILDS_DIR");
}

#[test]
#[serial]
fn orchestrator_url_is_none_when_unset_or_empty() {
    std::env::remove_var("ORCHESTRATOR_URL");
    assert_eq!(orchestrator_url(), None);

    std::env::set_var("ORCHESTRATOR_URL", "");
    assert_eq!(orchestrator_url(), None);
    std::env::remove_var("ORCHESTRATOR_URL");
}

#[test]
#[serial]
fn orchestrator_url_returns_the_configured_value() {
    std::env::set_var("ORCHESTRATOR_URL", "https://orchestrator.example.com");
    assert_eq!(orchestrator_url(), Some("https://orchestrator.example.com".to_string()));
    std::env::remove_var("ORCHESTRATOR_URL");
}
