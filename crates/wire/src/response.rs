// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Response bodies returned by the RPC Facade.

use serde::{Deserialize, Serialize};

/// Generic `{"ok":true}` acknowledgement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// 4xx/5xx body: `{"error": "<message>"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }
}

/// Response to `POST /purge`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurgeResponse {
    pub ok: bool,
    pub purged: Vec<String>,
}

/// Response to `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    pub ok: bool,
    pub version: String,
}

/// Response to `GET /logs/:port`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogTailResponse {
    pub name: String,
    pub size: u64,
    pub content: String,
}

/// One entry of `StatusResponse::servers`: a desired server annotated with
/// its currently observed runtime state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerStatusEntry {
    pub name: String,
    pub version: String,
    pub port: u16,
    pub args: Vec<String>,
    pub visible: bool,
    pub run: bool,
    pub pid: Option<u32>,
    pub running: bool,
    #[serde(rename = "memoryMB")]
    pub memory_mb: u64,
    pub commit: String,
    #[serde(rename = "launchError", default, skip_serializing_if = "Option::is_none")]
    pub launch_error: Option<String>,
}

/// Response to `GET /status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub hostname: String,
    pub platform: String,
    pub memory_total_mb: u64,
    pub memory_used_mb: u64,
    pub cpu_percent: f32,
    pub servers: Vec<ServerStatusEntry>,
    pub builds: Vec<String>,
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
