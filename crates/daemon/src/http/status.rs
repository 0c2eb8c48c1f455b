// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `GET /status`: hostname, normalized platform, host memory/CPU, the
//! desired-server list annotated with observed runtime state, and the
//! build-version directory listing.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use su_wire::{ServerStatusEntry, StatusResponse};
use sysinfo::{Pid, System};

use super::{ApiError, AppState};

const BYTES_PER_MIB: u64 = 1024 * 1024;

pub async fn status(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    let snapshot = state.engine.status().await;
    let builds = state.build_store.list_versions().await?;

    let pids: Vec<u32> = snapshot.servers.iter().filter_map(|s| s.pid).collect();
    let host = HostSample::take(&state.sysinfo, &pids);

    let servers = snapshot
        .servers
        .into_iter()
        .map(|s| {
            let memory_mb = s
                .pid
                .and_then(|pid| host.per_pid_mb.get(&pid).copied())
                .or(s.memory_mb)
                .unwrap_or(0);
            ServerStatusEntry {
                name: s.server.name,
                version: s.server.version,
                port: s.server.port,
                args: s.server.args,
                visible: s.server.visible,
                run: s.server.run,
                pid: s.pid,
                running: s.running,
                memory_mb,
                commit: state.commit.to_string(),
                launch_error: s.launch_error,
            }
        })
        .collect();

    Ok(Json(StatusResponse {
        hostname: host.hostname,
        platform: std::env::consts::OS.to_string(),
        memory_total_mb: host.memory_total_mb,
        memory_used_mb: host.memory_used_mb,
        cpu_percent: host.cpu_percent,
        servers,
        builds,
    }))
}

/// One refresh-and-read of the shared `sysinfo::System`, done under its
/// lock so host memory, CPU, and the requested per-pid RSS figures all
/// come from the same sample.
struct HostSample {
    hostname: String,
    memory_total_mb: u64,
    memory_used_mb: u64,
    cpu_percent: f32,
    per_pid_mb: HashMap<u32, u64>,
}

impl HostSample {
    fn take(sysinfo: &parking_lot::Mutex<System>, pids: &[u32]) -> Self {
        let mut sys = sysinfo.lock();
        sys.refresh_all();

        let per_pid_mb = pids
            .iter()
            .filter_map(|&pid| {
                sys.process(Pid::from_u32(pid)).map(|p| (pid, p.memory() / BYTES_PER_MIB))
            })
            .collect();

        Self {
            hostname: System::host_name().unwrap_or_else(|| "unknown".to_string()),
            memory_total_mb: sys.total_memory() / BYTES_PER_MIB,
            memory_used_mb: sys.used_memory() / BYTES_PER_MIB,
            cpu_percent: sys.global_cpu_usage(),
            per_pid_mb,
        }
    }
}
