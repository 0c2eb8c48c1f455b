// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for the reconciliation engine and RPC Facade.
//!
//! `Validation` is surfaced as a 4xx and never recorded against a port; the
//! rest are per-port failures recorded in the engine's error map and
//! replayed on the next `/status`.

use thiserror::Error;

/// Errors surfaced by the RPC Facade and the reconciliation engine.
#[derive(Debug, Error, Clone)]
pub enum ServerError {
    /// Rejected at the Facade before any state mutation (duplicate port,
    /// missing field).
    #[error("{0}")]
    Validation(String),

    /// Referenced a port that isn't in the desired set.
    #[error("no server configured for port {port}")]
    NotFound { port: u16 },

    /// No executable found under the build directory for the requested
    /// version.
    #[error("Executable not found for version {version:?}")]
    MissingExecutable { version: String },

    /// The OS failed to start the child process.
    #[error("failed to spawn server: {0}")]
    SpawnFailure(String),

    /// The child exited with a non-zero code or a signal.
    #[error("server exited abnormally ({detail}); see log for details")]
    AbnormalExit { detail: String },

    /// The port did not become free after SIGKILL and the post-kill wait.
    #[error("port {port} still in use after forced shutdown")]
    ShutdownTimeout { port: u16 },

    /// Uncaught failure inside an RPC handler.
    #[error("internal error (correlation id {correlation_id})")]
    Internal { correlation_id: u32 },
}

impl ServerError {
    /// HTTP status code this error should be rendered as.
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::Validation(_) => 400,
            ServerError::NotFound { .. } => 404,
            ServerError::MissingExecutable { .. }
            | ServerError::SpawnFailure(_)
            | ServerError::AbnormalExit { .. }
            | ServerError::ShutdownTimeout { .. } => 500,
            ServerError::Internal { .. } => 500,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
