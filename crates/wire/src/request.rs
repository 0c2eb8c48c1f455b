// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request bodies accepted by the RPC Facade.

use serde::{Deserialize, Serialize};

/// One entry of a `POST /launch` body. Fields left absent by the caller
/// are `None` here; the Facade applies spec defaults (`name`, `visible`,
/// `run`) when translating into a `su_core::DesiredServer`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LaunchServerEntry {
    #[serde(default)]
    pub name: Option<String>,
    pub version: String,
    pub port: u16,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub run: Option<bool>,
}

/// Body of `POST /launch`: the complete desired server set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LaunchRequest {
    pub servers: Vec<LaunchServerEntry>,
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
