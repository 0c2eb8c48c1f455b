// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child process spawn and signal delivery: piped stdio, `SIGTERM` for
//! graceful shutdown, `SIGKILL` as the forceful fallback.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use thiserror::Error;
use tokio::process::{Child, Command};

/// Parameters for spawning one server instance.
#[derive(Debug, Clone)]
pub struct ProcessSpec {
    pub executable: PathBuf,
    pub working_dir: PathBuf,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
}

/// Errors from process adapter operations.
#[derive(Debug, Error)]
pub enum ProcessAdapterError {
    #[error("failed to spawn {path}: {source}")]
    Spawn { path: String, #[source] source: std::io::Error },

    #[error("failed to signal pid {pid}: {source}")]
    Signal { pid: u32, #[source] source: nix::Error },
}

/// A spawned child, with its piped stdio handed back so the caller can wire
/// it into a log sink.
pub struct SpawnedProcess {
    pub pid: u32,
    pub child: Child,
}

/// Abstraction over spawning and signalling OS processes.
#[async_trait]
pub trait ProcessAdapter: Send + Sync + 'static {
    async fn spawn(&self, spec: ProcessSpec) -> Result<SpawnedProcess, ProcessAdapterError>;

    /// Sends `SIGTERM` — the graceful shutdown request.
    fn terminate(&self, pid: u32) -> Result<(), ProcessAdapterError>;

    /// Sends `SIGKILL` — the forceful fallback.
    fn kill(&self, pid: u32) -> Result<(), ProcessAdapterError>;
}

/// Real implementation backed by `tokio::process` and `nix::sys::signal`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessAdapter;

#[async_trait]
impl ProcessAdapter for SystemProcessAdapter {
    async fn spawn(&self, spec: ProcessSpec) -> Result<SpawnedProcess, ProcessAdapterError> {
        let mut cmd = Command::new(&spec.executable);
        cmd.current_dir(&spec.working_dir)
            .args(&spec.args)
            .envs(&spec.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = cmd.spawn().map_err(|source| ProcessAdapterError::Spawn {
            path: spec.executable.display().to_string(),
            source,
        })?;
        let pid = child.id().ok_or_else(|| ProcessAdapterError::Spawn {
            path: spec.executable.display().to_string(),
            source: std::io::Error::other("child exited before pid was available"),
        })?;

        Ok(SpawnedProcess { pid, child })
    }

    fn terminate(&self, pid: u32) -> Result<(), ProcessAdapterError> {
        signal::kill(Pid::from_raw(pid as i32), Signal::SIGTERM)
            .map_err(|source| ProcessAdapterError::Signal { pid, source })
    }

    fn kill(&self, pid: u32) -> Result<(), ProcessAdapterError> {
        signal::kill(Pid::from_raw(pid as i32), Signal::SIGKILL)
            .map_err(|source| ProcessAdapterError::Signal { pid, source })
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
