// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::time::Duration;

use su_adapters::{FakePortProbe, FakeProcessAdapter};
use su_core::{DesiredServer, SystemClock};
use su_storage::LogSink;
use tempfile::TempDir;
use tokio::sync::mpsc;

use super::*;

fn desired(port: u16) -> DesiredServer {
    DesiredServer {
        name: "Server 1".to_string(),
        version: "v1".to_string(),
        port,
        args: vec!["--map".to_string(), "island".to_string()],
        visible: true,
        run: true,
    }
}

#[test]
fn canonical_argv_matches_the_wire_contract() {
    let argv = canonical_argv(9001, &["--map".to_string(), "island".to_string()]);
    assert_eq!(
        argv,
        vec!["-batchmode", "-nographics", "-logFile", "-", "--server-port", "9001", "--map", "island"]
    );
}

#[tokio::test]
async fn spawn_reports_spawn_failure_when_process_adapter_errors() {
    let tmp = TempDir::new().unwrap();
    let supervisor = Supervisor::new(
        FakePortProbe::new(),
        FakeProcessAdapter::new(),
        LogSink::new(tmp.path()),
        SystemClock,
    );
    let (tx, _rx) = mpsc::channel(1);

    let result = supervisor.spawn(&desired(9001), PathBuf::from("/nonexistent/server"), tx).await;
    assert!(matches!(result, Err(ServerError::SpawnFailure(_))));
}

#[tokio::test]
async fn shutdown_succeeds_immediately_when_port_already_free() {
    let tmp = TempDir::new().unwrap();
    let probe = FakePortProbe::new();
    let process = FakeProcessAdapter::new();
    let supervisor = Supervisor::new(probe, process.clone(), LogSink::new(tmp.path()), SystemClock);

    let result = supervisor.shutdown(9001, 4242).await;
    assert!(result.is_ok());
    assert_eq!(process.terminated.lock().as_slice(), &[4242]);
    assert!(process.killed.lock().is_empty());
}

#[tokio::test]
async fn shutdown_escalates_to_sigkill_when_graceful_wait_times_out() {
    let tmp = TempDir::new().unwrap();
    let probe = FakePortProbe::new();
    probe.mark_bound(9001);
    let process = FakeProcessAdapter::new();
    let supervisor = Supervisor::new(probe.clone(), process.clone(), LogSink::new(tmp.path()), SystemClock);

    // Free the port only once SIGKILL has actually been sent, so the
    // graceful 2000ms wait is forced to time out first.
    let probe_for_task = probe.clone();
    let process_for_task = process.clone();
    tokio::spawn(async move {
        loop {
            if !process_for_task.killed.lock().is_empty() {
                probe_for_task.mark_free(9001);
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    });

    let result = supervisor.shutdown(9001, 4242).await;
    assert!(result.is_ok());
    assert_eq!(process.terminated.lock().as_slice(), &[4242]);
    assert_eq!(process.killed.lock().as_slice(), &[4242]);
}

#[tokio::test]
async fn shutdown_times_out_when_port_never_frees() {
    let tmp = TempDir::new().unwrap();
    let probe = FakePortProbe::new();
    probe.mark_bound(9001);
    let process = FakeProcessAdapter::new();
    let supervisor = Supervisor::new(probe, process, LogSink::new(tmp.path()), SystemClock);

    let result = supervisor.shutdown(9001, 4242).await;
    assert!(matches!(result, Err(ServerError::ShutdownTimeout { port: 9001 })));
}
