// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cheap-to-clone front end the daemon's HTTP handlers hold to send
//! [`Command`]s into the engine's owning task and await its reply.

use su_adapters::{PortProbe, ProcessAdapter};
use su_core::{Clock, DesiredServer, ServerError};
use su_storage::BuildStoreError;
use tokio::sync::{mpsc, oneshot};

use crate::command::{Command, StatusSnapshot};
use crate::runtime::Engine;
use crate::util::correlation_id;

const COMMAND_CHANNEL_CAPACITY: usize = 32;

/// A clonable handle onto a running [`Engine`]. Every method round-trips
/// through the engine's command channel, so handler code never touches
/// `RuntimeState` or `Settings` directly.
#[derive(Clone)]
pub struct EngineHandle {
    command_tx: mpsc::Sender<Command>,
}

impl EngineHandle {
    /// Spawns `engine`'s owning task and returns a handle to it.
    pub fn spawn<P, A, C>(engine: Engine<P, A, C>) -> Self
    where
        P: PortProbe,
        A: ProcessAdapter,
        C: Clock,
    {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let loop_tx = command_tx.clone();
        tokio::spawn(async move {
            engine.run(loop_tx, command_rx).await;
        });
        Self { command_tx }
    }

    pub async fn launch(&self, servers: Vec<DesiredServer>) -> Result<(), ServerError> {
        self.round_trip(|reply| Command::Launch { servers, reply }).await
    }

    pub async fn restart(&self, port: u16) -> Result<(), ServerError> {
        self.round_trip(|reply| Command::Restart { port, reply }).await
    }

    pub async fn purge(&self) -> Result<Vec<String>, BuildStoreError> {
        let (reply, rx) = oneshot::channel();
        if self.command_tx.send(Command::Purge { reply }).await.is_err() {
            return Err(BuildStoreError::Io(engine_gone()));
        }
        rx.await.unwrap_or_else(|_| Err(BuildStoreError::Io(engine_gone())))
    }

    /// Never fails: if the engine task is gone, returns an empty snapshot
    /// rather than an error, since `/status` has no natural error shape.
    pub async fn status(&self) -> StatusSnapshot {
        let (reply, rx) = oneshot::channel();
        if self.command_tx.send(Command::Status { reply }).await.is_err() {
            return StatusSnapshot { servers: vec![] };
        }
        rx.await.unwrap_or(StatusSnapshot { servers: vec![] })
    }

    /// `POST /update`: awaits every child being stopped before returning,
    /// so the caller can exit the process immediately afterwards.
    pub async fn shutdown(&self) {
        let (reply, rx) = oneshot::channel();
        if self.command_tx.send(Command::Shutdown { reply }).await.is_ok() {
            let _ = rx.await;
        }
    }

    async fn round_trip<F>(&self, build: F) -> Result<(), ServerError>
    where
        F: FnOnce(oneshot::Sender<Result<(), ServerError>>) -> Command,
    {
        let (reply, rx) = oneshot::channel();
        if self.command_tx.send(build(reply)).await.is_err() {
            return Err(ServerError::Internal { correlation_id: correlation_id() });
        }
        rx.await.unwrap_or_else(|_| Err(ServerError::Internal { correlation_id: correlation_id() }))
    }
}

fn engine_gone() -> std::io::Error {
    std::io::Error::other("engine task is no longer running")
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
