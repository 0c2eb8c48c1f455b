// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine: the single task that owns the desired set, [`RuntimeState`], and
//! the periodic reconcile tick. Everything else talks to it only through
//! [`Command`] — there is no lock on the volatile maps because nothing
//! outside this task ever reaches them.
//!
//! A single owning task consuming a channel of commands, rather than
//! locking shared state, also gives a within-port ordering guarantee for
//! free: a `/launch`-driven stop always completes before the next tick can
//! respawn, since the task never runs two things at once.

use std::collections::HashMap;
use std::time::Duration;

use su_adapters::{PortProbe, ProcessAdapter};
use su_core::{Clock, DesiredServer, ServerError, Settings};
use su_storage::{BuildStore, SettingsStore};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{error, warn};

use crate::command::{must_stop, Command, ExitOutcome, ServerStatus, StatusSnapshot};
use crate::reconciler::reconcile_tick;
use crate::state::RuntimeState;
use crate::supervisor::Supervisor;

/// Fixed reconcile tick cadence.
pub const WATCH_INTERVAL: Duration = Duration::from_millis(2000);

pub struct Engine<P, A, C> {
    settings: Settings,
    settings_store: SettingsStore,
    build_store: BuildStore,
    supervisor: Supervisor<P, A, C>,
    state: RuntimeState,
}

impl<P, A, C> Engine<P, A, C>
where
    P: PortProbe,
    A: ProcessAdapter,
    C: Clock,
{
    pub fn new(
        settings: Settings,
        settings_store: SettingsStore,
        build_store: BuildStore,
        supervisor: Supervisor<P, A, C>,
    ) -> Self {
        Self { settings, settings_store, build_store, supervisor, state: RuntimeState::new() }
    }

    /// The owning task's main loop. `command_tx` is a clone of the sender
    /// half of `command_rx`'s channel — the reconciler needs it to hand to
    /// each Supervisor::spawn so a child's exit watcher can report back.
    ///
    /// Ticks never overlap: every branch of the `select!` below, including
    /// a whole command, runs to completion before the loop polls again.
    pub async fn run(mut self, command_tx: mpsc::Sender<Command>, mut command_rx: mpsc::Receiver<Command>) {
        let mut ticker = tokio::time::interval(WATCH_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    reconcile_tick(&self.settings, &mut self.state, &self.build_store, &self.supervisor, &command_tx).await;
                }
                cmd = command_rx.recv() => {
                    let Some(cmd) = cmd else { break };
                    if self.handle(cmd).await {
                        break;
                    }
                }
            }
        }
    }

    /// Returns `true` once a [`Command::Shutdown`] has been fully handled —
    /// the caller must stop polling `run` afterwards (the channel may still
    /// be open, but the task is done).
    async fn handle(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Launch { servers, reply } => {
                let _ = reply.send(self.handle_launch(servers).await);
            }
            Command::Restart { port, reply } => {
                let _ = reply.send(self.handle_restart(port).await);
            }
            Command::Purge { reply } => {
                let keep = self.state.running_versions();
                let result = self.build_store.purge(&keep).await;
                let _ = reply.send(result);
            }
            Command::Status { reply } => {
                let _ = reply.send(self.snapshot());
            }
            Command::Shutdown { reply } => {
                self.handle_shutdown_all().await;
                let _ = reply.send(());
                return true;
            }
            Command::ChildExited { port, pid, version, outcome } => {
                self.handle_child_exited(port, pid, version, outcome);
            }
        }
        false
    }

    /// `POST /launch`: stop whichever existing children must stop, then
    /// write and adopt the new desired set. Port uniqueness is re-checked
    /// here (not just at the Facade) so driving the engine directly in
    /// tests still honors it.
    async fn handle_launch(&mut self, servers: Vec<DesiredServer>) -> Result<(), ServerError> {
        Settings::validate_unique_ports(&servers)?;
        let servers: Vec<DesiredServer> =
            servers.into_iter().enumerate().map(|(i, s)| s.with_default_name(i)).collect();

        let new_by_port: HashMap<u16, &DesiredServer> = servers.iter().map(|s| (s.port, s)).collect();

        let old_servers = std::mem::take(&mut self.settings.servers);
        for old in &old_servers {
            if !must_stop(old, new_by_port.get(&old.port).copied()) {
                continue;
            }
            let Some(child) = self.state.children.get(&old.port) else { continue };
            let pid = child.pid;
            match self.supervisor.shutdown(old.port, pid).await {
                Ok(()) => {
                    self.state.children.remove(&old.port);
                    self.state.clear_error(old.port);
                }
                Err(e) => {
                    self.state.set_error(old.port, e.to_string());
                }
            }
        }

        self.settings.servers = servers;
        if let Err(e) = self.settings_store.save(&self.settings).await {
            error!(error = %e, "failed to persist settings.json, terminating for restart by the service manager");
            std::process::exit(1);
        }
        Ok(())
    }

    /// `POST /restart?port=P`: stop the current child if any; the next
    /// reconcile tick respawns it, since the desired set itself is
    /// untouched.
    async fn handle_restart(&mut self, port: u16) -> Result<(), ServerError> {
        if self.settings.get(port).is_none() {
            return Err(ServerError::NotFound { port });
        }
        let Some(child) = self.state.children.get(&port) else { return Ok(()) };
        let pid = child.pid;
        match self.supervisor.shutdown(port, pid).await {
            Ok(()) => {
                self.state.children.remove(&port);
                self.state.clear_error(port);
                Ok(())
            }
            Err(e) => {
                self.state.set_error(port, e.to_string());
                Err(e)
            }
        }
    }

    /// `POST /update`: stop every child gracefully before the daemon exits.
    /// A child that won't free its port is logged loudly and left behind —
    /// the process is exiting regardless.
    async fn handle_shutdown_all(&mut self) {
        let ports: Vec<u16> = self.state.children.keys().copied().collect();
        for port in ports {
            let Some(child) = self.state.children.get(&port) else { continue };
            let pid = child.pid;
            if let Err(e) = self.supervisor.shutdown(port, pid).await {
                warn!(port, error = %e, "failed to stop child cleanly before exit");
            }
            self.state.children.remove(&port);
        }
    }

    /// A Supervisor exit-watcher's report. `pid` guards against a stale
    /// watcher (for a child already stopped or replaced on the same port)
    /// clobbering a newer occupant's state.
    fn handle_child_exited(&mut self, port: u16, pid: u32, version: String, outcome: ExitOutcome) {
        match self.state.children.get(&port) {
            Some(child) if child.pid == pid => {}
            _ => return,
        }
        self.state.children.remove(&port);
        if outcome.is_abnormal() {
            self.state.set_error(
                port,
                format!("server (version {version}) exited with {outcome}; see the log for details"),
            );
        } else {
            self.state.clear_error(port);
        }
    }

    /// `GET /status`'s per-server annotation. `memory_mb` is left `None`
    /// here — reading per-pid RSS needs `sysinfo`, which belongs to the
    /// daemon's HTTP layer, not the engine (see DESIGN.md's Open Question
    /// decision on `memoryMB`'s source).
    fn snapshot(&self) -> StatusSnapshot {
        let servers = self
            .settings
            .servers
            .iter()
            .map(|s| {
                let child = self.state.children.get(&s.port);
                ServerStatus {
                    server: s.clone(),
                    pid: child.map(|c| c.pid),
                    running: child.is_some(),
                    memory_mb: None,
                    launch_error: self.state.errors.get(&s.port).cloned(),
                }
            })
            .collect();
        StatusSnapshot { servers }
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
