// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use tempfile::TempDir;

use super::*;

#[test]
fn acquire_writes_current_pid() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("agent.lock");

    let file = acquire(&path).unwrap();
    drop(file);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.trim(), std::process::id().to_string());
}

#[test]
fn acquire_fails_while_a_lock_is_already_held() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("agent.lock");

    let _held = acquire(&path).unwrap();
    let second = acquire(&path);

    assert!(matches!(second, Err(LockError::AlreadyRunning)));
}

#[test]
fn acquire_succeeds_again_once_the_first_lock_is_dropped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("agent.lock");

    let first = acquire(&path).unwrap();
    drop(first);

    assert!(acquire(&path).is_ok());
}
