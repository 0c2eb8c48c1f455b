// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Desired state: the persisted set of servers the host must run.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ServerError;

/// A single desired server entry, as persisted in `settings.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredServer {
    pub name: String,
    pub version: String,
    pub port: u16,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub visible: bool,
    #[serde(default = "default_run")]
    pub run: bool,
}

fn default_run() -> bool {
    true
}

impl DesiredServer {
    /// Builds a `DesiredServer`, applying the `"Server <i+1>"` default name
    /// when `name` is empty. `index` is the entry's position in the incoming
    /// array (0-based).
    pub fn with_default_name(mut self, index: usize) -> Self {
        if self.name.is_empty() {
            self.name = format!("Server {}", index + 1);
        }
        self
    }
}

/// The persisted declarative configuration: `{ "servers": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub servers: Vec<DesiredServer>,
}

impl Settings {
    /// Validates that ports are unique across the set.
    pub fn validate_unique_ports(servers: &[DesiredServer]) -> Result<(), ServerError> {
        let mut seen = HashSet::with_capacity(servers.len());
        for s in servers {
            if !seen.insert(s.port) {
                return Err(ServerError::Validation(
                    "Duplicate port detected in servers array".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn get(&self, port: u16) -> Option<&DesiredServer> {
        self.servers.iter().find(|s| s.port == port)
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
