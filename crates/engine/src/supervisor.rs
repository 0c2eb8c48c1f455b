// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process Supervisor: spawns a configured child, wires its stdio through
//! the Log Sink, and implements the graceful-then-forceful shutdown gated
//! on port liberation rather than process exit.
//!
//! Each shutdown stage (`SIGTERM`, then `SIGKILL`) is gated on
//! [`PortProbe::wait_until_free`] instead of a fixed sleep, since process
//! exit and socket teardown aren't guaranteed to happen in the same
//! instant.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use su_adapters::{PortProbe, ProcessAdapter, ProcessSpec, SpawnedProcess};
use su_core::{ChildInstance, Clock, DesiredServer, ServerError};
use su_storage::LogSink;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;

use crate::command::{Command, ExitOutcome};

const GRACEFUL_WAIT: Duration = Duration::from_millis(2000);
const FORCE_WAIT: Duration = Duration::from_millis(1000);
const POST_EXIT_WAIT: Duration = Duration::from_millis(2000);

/// Environment variables applied on top of the supervisor's own environment
/// for every spawned server. Headless Unity/Mono servers on Linux otherwise
/// probe ICU via globalization data that game server images rarely ship.
const FIXED_ENV_OVERLAY: &[(&str, &str)] = &[("DOTNET_SYSTEM_GLOBALIZATION_INVARIANT", "1")];

/// Builds the canonical child argv:
/// `[-batchmode, -nographics, -logFile, -, --server-port, <port>, <...args>]`.
pub fn canonical_argv(port: u16, extra_args: &[String]) -> Vec<String> {
    let mut argv = vec![
        "-batchmode".to_string(),
        "-nographics".to_string(),
        "-logFile".to_string(),
        "-".to_string(),
        "--server-port".to_string(),
        port.to_string(),
    ];
    argv.extend(extra_args.iter().cloned());
    argv
}

/// Spawns children, pipes their stdio through the log sink, and performs
/// bounded graceful-then-forceful shutdown gated by the port probe.
pub struct Supervisor<P, A, C> {
    port_probe: Arc<P>,
    process: Arc<A>,
    log_sink: LogSink,
    clock: C,
}

impl<P, A, C> Supervisor<P, A, C>
where
    P: PortProbe,
    A: ProcessAdapter,
    C: Clock,
{
    pub fn new(port_probe: P, process: A, log_sink: LogSink, clock: C) -> Self {
        Self { port_probe: Arc::new(port_probe), process: Arc::new(process), log_sink, clock }
    }

    /// Launches `executable` for `desired`, wires its stdio into a fresh
    /// rotated log file, and spawns a background watcher that reports the
    /// child's exit back through `exit_tx` once its port is free again.
    pub async fn spawn(
        &self,
        desired: &DesiredServer,
        executable: PathBuf,
        exit_tx: mpsc::Sender<Command>,
    ) -> Result<ChildInstance, ServerError> {
        let working_dir =
            executable.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
        let args = canonical_argv(desired.port, &desired.args);
        let env: HashMap<String, String> =
            FIXED_ENV_OVERLAY.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        let spec = ProcessSpec { executable, working_dir, args, env };

        let (_log_path, log_file) = self
            .log_sink
            .open_new(desired.port)
            .await
            .map_err(|e| ServerError::SpawnFailure(e.to_string()))?;

        let SpawnedProcess { pid, mut child } =
            self.process.spawn(spec).await.map_err(|e| ServerError::SpawnFailure(e.to_string()))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let (line_tx, mut line_rx) = mpsc::channel::<Vec<u8>>(64);
        if let Some(out) = stdout {
            spawn_reader_pump(out, line_tx.clone());
        }
        if let Some(err) = stderr {
            spawn_reader_pump(err, line_tx.clone());
        }
        drop(line_tx);
        tokio::spawn(async move {
            let mut timestamper = su_storage::LineTimestamper::new(log_file);
            while let Some(chunk) = line_rx.recv().await {
                let _ = timestamper.write_chunk(&chunk).await;
            }
            let _ = timestamper.flush_tail().await;
        });

        let port = desired.port;
        let version = desired.version.clone();
        let port_probe = self.port_probe.clone();
        tokio::spawn(async move {
            let status = child.wait().await;
            let outcome = exit_outcome(status);
            port_probe.wait_until_free(port, POST_EXIT_WAIT).await;
            let _ = exit_tx.send(Command::ChildExited { port, pid, version, outcome }).await;
        });

        Ok(ChildInstance::new(port, pid, desired.version.clone(), desired.args.clone(), self.clock.now()))
    }

    /// Graceful-then-forceful shutdown: `SIGTERM`, wait up to 2000ms for the
    /// port to free, else `SIGKILL` and wait up to a further 1000ms.
    /// Returns `Ok(())` only once the port is confirmed free.
    pub async fn shutdown(&self, port: u16, pid: u32) -> Result<(), ServerError> {
        if let Err(e) = self.process.terminate(pid) {
            tracing::warn!(port, pid, error = %e, "SIGTERM delivery failed, continuing to port wait");
        }
        if self.port_probe.wait_until_free(port, GRACEFUL_WAIT).await {
            return Ok(());
        }

        tracing::warn!(port, pid, "graceful shutdown timed out, sending SIGKILL");
        if let Err(e) = self.process.kill(pid) {
            tracing::warn!(port, pid, error = %e, "SIGKILL delivery failed, continuing to port wait");
        }
        if self.port_probe.wait_until_free(port, FORCE_WAIT).await {
            return Ok(());
        }

        tracing::error!(port, pid, "port still in use after forced shutdown");
        Err(ServerError::ShutdownTimeout { port })
    }
}

fn spawn_reader_pump(mut reader: impl tokio::io::AsyncRead + Unpin + Send + 'static, tx: mpsc::Sender<Vec<u8>>) {
    tokio::spawn(async move {
        let mut buf = [0u8; 4096];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if tx.send(buf[..n].to_vec()).await.is_err() {
                        break;
                    }
                }
            }
        }
    });
}

#[cfg(unix)]
fn exit_outcome(status: std::io::Result<std::process::ExitStatus>) -> ExitOutcome {
    use std::os::unix::process::ExitStatusExt;
    match status {
        Ok(status) => match status.code() {
            Some(code) => ExitOutcome::Code(code),
            None => status.signal().map(ExitOutcome::Signal).unwrap_or(ExitOutcome::Unknown),
        },
        Err(_) => ExitOutcome::Unknown,
    }
}

#[cfg(not(unix))]
fn exit_outcome(status: std::io::Result<std::process::ExitStatus>) -> ExitOutcome {
    match status {
        Ok(status) => status.code().map(ExitOutcome::Code).unwrap_or(ExitOutcome::Unknown),
        Err(_) => ExitOutcome::Unknown,
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
