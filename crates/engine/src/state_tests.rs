// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Instant;

use su_core::ChildInstance;

use super::*;

fn child(port: u16, version: &str) -> ChildInstance {
    ChildInstance::new(port, 100 + port as u32, version.to_string(), vec![], Instant::now())
}

#[test]
fn running_versions_collects_distinct_versions_across_ports() {
    let mut state = RuntimeState::new();
    state.children.insert(9001, child(9001, "v1"));
    state.children.insert(9002, child(9002, "v1"));
    state.children.insert(9003, child(9003, "v2"));

    let versions = state.running_versions();
    assert_eq!(versions.len(), 2);
    assert!(versions.contains("v1"));
    assert!(versions.contains("v2"));
}

#[test]
fn running_versions_empty_when_no_children() {
    let state = RuntimeState::new();
    assert!(state.running_versions().is_empty());
}

#[test]
fn set_and_clear_error_round_trip() {
    let mut state = RuntimeState::new();
    state.set_error(9001, "boom");
    assert_eq!(state.errors.get(&9001).map(String::as_str), Some("boom"));
    state.clear_error(9001);
    assert!(!state.errors.contains_key(&9001));
}
