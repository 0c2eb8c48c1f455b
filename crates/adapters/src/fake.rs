// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake adapters for engine/reconciler tests that must not bind real sockets
//! or fork real processes.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::port_probe::PortProbe;
use crate::process::{ProcessAdapter, ProcessAdapterError, ProcessSpec, SpawnedProcess};

/// A port probe whose free/bound ports are controlled by the test.
#[derive(Clone, Default)]
pub struct FakePortProbe {
    bound: Arc<Mutex<HashSet<u16>>>,
}

impl FakePortProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_bound(&self, port: u16) {
        self.bound.lock().insert(port);
    }

    pub fn mark_free(&self, port: u16) {
        self.bound.lock().remove(&port);
    }
}

#[async_trait]
impl PortProbe for FakePortProbe {
    async fn is_free(&self, port: u16) -> bool {
        !self.bound.lock().contains(&port)
    }
}

/// A process adapter recording calls instead of touching the OS. Spawn
/// always fails unless a pid is preconfigured via [`FakeProcessAdapter::allow_spawn`] —
/// the tests that exercise `MissingExecutable`/`SpawnFailure` lean on that.
#[derive(Clone, Default)]
pub struct FakeProcessAdapter {
    pub terminated: Arc<Mutex<Vec<u32>>>,
    pub killed: Arc<Mutex<Vec<u32>>>,
}

impl FakeProcessAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProcessAdapter for FakeProcessAdapter {
    async fn spawn(&self, _spec: ProcessSpec) -> Result<SpawnedProcess, ProcessAdapterError> {
        Err(ProcessAdapterError::Spawn {
            path: "fake".to_string(),
            source: std::io::Error::other("FakeProcessAdapter does not spawn real processes"),
        })
    }

    fn terminate(&self, pid: u32) -> Result<(), ProcessAdapterError> {
        self.terminated.lock().push(pid);
        Ok(())
    }

    fn kill(&self, pid: u32) -> Result<(), ProcessAdapterError> {
        self.killed.lock().push(pid);
        Ok(())
    }
}
