// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciler: one pass of the periodic control loop, comparing desired
//! state against `RuntimeState::children` and driving the Supervisor to
//! start whatever is missing.
//!
//! Iterates every desired server, comparing observed vs desired state; one
//! entity's failure never aborts the rest of the pass.

use su_adapters::{PortProbe, ProcessAdapter};
use su_core::{Clock, Settings};
use su_storage::BuildStore;
use tokio::sync::mpsc;

use crate::command::Command;
use crate::state::RuntimeState;
use crate::supervisor::Supervisor;

/// Runs one reconcile tick: for every desired server with `run == true` and
/// no existing `ChildInstance`, resolve its executable and ask the
/// Supervisor to spawn it. A failure on one port (missing executable,
/// spawn failure) is recorded in `state.errors` and never skips the
/// remaining ports.
pub async fn reconcile_tick<P, A, C>(
    settings: &Settings,
    state: &mut RuntimeState,
    build_store: &BuildStore,
    supervisor: &Supervisor<P, A, C>,
    command_tx: &mpsc::Sender<Command>,
) where
    P: PortProbe,
    A: ProcessAdapter,
    C: Clock,
{
    for server in &settings.servers {
        if state.children.contains_key(&server.port) {
            continue;
        }
        if !server.run {
            continue;
        }

        let Some(executable) = build_store.find_executable(&server.version) else {
            state.set_error(
                server.port,
                format!("Executable not found for version {:?}", server.version),
            );
            continue;
        };

        match supervisor.spawn(server, executable, command_tx.clone()).await {
            Ok(child) => {
                state.children.insert(server.port, child);
                state.clear_error(server.port);
            }
            Err(e) => {
                state.set_error(server.port, e.to_string());
            }
        }
    }
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;
