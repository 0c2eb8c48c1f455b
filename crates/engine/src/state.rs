// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Volatile runtime state: `children` and per-port errors, owned exclusively
//! by the task running [`crate::runtime::Engine`]. No lock is needed because
//! nothing outside that task ever touches these maps directly — everything
//! goes through a [`crate::command::Command`].

use std::collections::{HashMap, HashSet};

use su_core::ChildInstance;

#[derive(Debug, Default)]
pub struct RuntimeState {
    pub children: HashMap<u16, ChildInstance>,
    pub errors: HashMap<u16, String>,
}

impl RuntimeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `{ c.version : c in children }` set, snapshotted before
    /// `su_storage::BuildStore::purge` walks the `builds/` directory, so a
    /// version still backing a running child can never be removed.
    pub fn running_versions(&self) -> HashSet<String> {
        self.children.values().map(|c| c.version.clone()).collect()
    }

    pub fn set_error(&mut self, port: u16, message: impl Into<String>) {
        self.errors.insert(port, message.into());
    }

    pub fn clear_error(&mut self, port: u16) {
        self.errors.remove(&port);
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
