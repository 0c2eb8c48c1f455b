// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Port liberation checks.
//!
//! Supervision must not assume child exit implies port release — the OS may
//! hold the socket in `TIME_WAIT`, or the child may have spawned
//! descendants. Port liberation, not process exit, is the authoritative
//! "stopped" signal.

use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio::time::Instant;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Abstraction over "is this TCP port free on this host right now", so the
/// engine can be driven by a fake clock/probe in tests without binding real
/// sockets.
#[async_trait]
pub trait PortProbe: Send + Sync + 'static {
    /// Attempts to bind a listener on `0.0.0.0:port`. Success closes the
    /// listener and returns `true`; any bind error returns `false`. Never
    /// leaves a probe listener bound on either outcome.
    async fn is_free(&self, port: u16) -> bool;

    /// Polls [`PortProbe::is_free`] at [`POLL_INTERVAL`] until it returns
    /// `true` or `timeout` elapses. Returns whether the port became free
    /// within budget.
    async fn wait_until_free(&self, port: u16, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.is_free(port).await {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

/// Real implementation, backed by `tokio::net::TcpListener`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpPortProbe;

#[async_trait]
impl PortProbe for TcpPortProbe {
    async fn is_free(&self, port: u16) -> bool {
        match TcpListener::bind(("0.0.0.0", port)).await {
            Ok(listener) => {
                // Dropping the listener closes the socket immediately.
                drop(listener);
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
#[path = "port_probe_tests.rs"]
mod tests;
