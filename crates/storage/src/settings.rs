// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `settings.json` persistence: single-writer, full-file replace.
//!
//! Readers (the RPC Facade's `/status`) read the in-memory copy the engine
//! holds, never the file directly — this module is only consulted at
//! startup and on every mutating `/launch`.

use std::path::{Path, PathBuf};

use su_core::Settings;
use tracing::warn;

/// Owns the path to `settings.json` and the load/save logic.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(base_dir: &Path) -> Self {
        Self { path: base_dir.join("settings.json") }
    }

    /// Loads the persisted settings. If the file is missing or unparsable,
    /// returns an empty set rather than failing startup.
    pub async fn load(&self) -> Settings {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(_) => return Settings::default(),
        };
        match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "settings.json is unparsable, reinitializing to empty");
                Settings::default()
            }
        }
    }

    /// Replaces `settings.json` with `settings`, atomically via a
    /// write-then-rename so a crash mid-write never corrupts the file other
    /// readers (or the next startup) would see.
    pub async fn save(&self, settings: &Settings) -> std::io::Result<()> {
        let data = serde_json::to_string_pretty(settings).map_err(std::io::Error::other)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, data).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
