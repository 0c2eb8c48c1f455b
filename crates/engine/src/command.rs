// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Commands sent from the RPC Facade — and from the Supervisor's own
//! child-exit watchers — into the single task that owns
//! [`crate::state::RuntimeState`] and the desired set.
//!
//! One durable document (`settings.json`) backs this system, not a
//! write-ahead log to replay commands from, so each command carries its own
//! reply channel instead of being appended anywhere.

use su_core::{DesiredServer, ServerError};
use su_storage::BuildStoreError;
use tokio::sync::oneshot;

/// How a child process ended, as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Code(i32),
    Signal(i32),
    Unknown,
}

impl std::fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitOutcome::Code(0) => write!(f, "exit code 0"),
            ExitOutcome::Code(code) => write!(f, "exit code {code}"),
            ExitOutcome::Signal(sig) => write!(f, "signal {sig}"),
            ExitOutcome::Unknown => write!(f, "unknown exit"),
        }
    }
}

impl ExitOutcome {
    pub fn is_abnormal(&self) -> bool {
        !matches!(self, ExitOutcome::Code(0))
    }
}

/// A `DesiredServer` annotated with what the engine currently observes for
/// its port — the per-server shape of `GET /status`.
#[derive(Debug, Clone)]
pub struct ServerStatus {
    pub server: DesiredServer,
    pub pid: Option<u32>,
    pub running: bool,
    pub memory_mb: Option<u64>,
    pub launch_error: Option<String>,
}

/// Full reply to `GET /status`'s `Command::Status`: the per-server
/// annotations plus the directory listing of build versions on disk (the
/// latter is read directly by the caller since it needs no engine state).
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub servers: Vec<ServerStatus>,
}

/// Commands accepted by [`crate::runtime::Engine::run`].
pub enum Command {
    /// `POST /launch`: the full incoming desired set (pre-`with_default_name`,
    /// un-deduplicated — the engine validates unique ports itself so it is
    /// also safe to drive directly in tests).
    Launch { servers: Vec<DesiredServer>, reply: oneshot::Sender<Result<(), ServerError>> },
    /// `POST /restart?port=P`.
    Restart { port: u16, reply: oneshot::Sender<Result<(), ServerError>> },
    /// `POST /purge`. The running-version snapshot is computed by the
    /// engine itself, from `RuntimeState::running_versions`, before the
    /// build store's directory listing is ever touched, so a version still
    /// backing a running child can never be deleted out from under it.
    Purge { reply: oneshot::Sender<Result<Vec<String>, BuildStoreError>> },
    /// `GET /status`.
    Status { reply: oneshot::Sender<StatusSnapshot> },
    /// `POST /update`: gracefully stop every child, then let the caller
    /// exit the process. Only one reply is ever sent.
    Shutdown { reply: oneshot::Sender<()> },
    /// Internal: one of the Supervisor's exit-watcher tasks observed its
    /// child process exit and its port become free. Carries `pid` so the
    /// handler can tell a stale watcher (for a child already replaced or
    /// explicitly stopped on the same port) from the current occupant.
    ChildExited { port: u16, pid: u32, version: String, outcome: ExitOutcome },
}

/// Computed by [`crate::runtime::Engine::handle_launch`] to decide which
/// existing children must stop before the new desired set is written.
pub(crate) fn must_stop(old: &DesiredServer, new: Option<&DesiredServer>) -> bool {
    match new {
        None => true,
        Some(new) => !new.run || new.version != old.version || new.args != old.args,
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
