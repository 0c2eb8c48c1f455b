// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate: every
//! environment-derived path is resolved here instead of scattering
//! `std::env::var` calls through the binary.

use std::path::{Path, PathBuf};

/// Base directory: `SETTINGS_DIR`, defaulting to `<home>/.siegeup`.
pub fn settings_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SETTINGS_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".siegeup")
}

/// Build artifact root: `BUILDS_DIR` overrides `<settings_dir>/builds`.
pub fn builds_dir(settings_dir: &Path) -> PathBuf {
    std::env::var("BUILDS_DIR").map(PathBuf::from).unwrap_or_else(|_| settings_dir.join("builds"))
}

/// The external registration endpoint, out of scope for this daemon's own
/// responsibilities. Read here so its absence is a deliberate no-op rather
/// than a scattered `env::var` call elsewhere.
pub fn orchestrator_url() -> Option<String> {
    std::env::var("ORCHESTRATOR_URL").ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
