// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Singleton daemon lock: at most one live `siegeupd` per base directory.
//!
//! Opens without truncating (so a losing process never wipes the winner's
//! pid), acquires the advisory lock, then truncates and writes.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use fs2::FileExt;

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("another siegeupd instance is already running against this base directory")]
    AlreadyRunning,
}

/// Acquires the exclusive daemon lock at `path`, writing the current pid
/// into it. The returned `File` must be kept alive for the process's
/// lifetime — dropping it releases the lock.
pub fn acquire(path: &Path) -> Result<File, LockError> {
    let file = OpenOptions::new().write(true).create(true).truncate(false).open(path)?;
    file.try_lock_exclusive().map_err(|_| LockError::AlreadyRunning)?;

    let mut file = file;
    file.set_len(0)?;
    writeln!(file, "{}", std::process::id())?;
    Ok(file)
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
