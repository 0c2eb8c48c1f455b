// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! su-adapters: OS-facing capabilities the engine drives through a trait
//! boundary — TCP port liberation checks and child process spawn/signal.

pub mod port_probe;
pub mod process;

pub use port_probe::{PortProbe, TcpPortProbe};
pub use process::{ProcessAdapter, ProcessSpec, SpawnedProcess, SystemProcessAdapter};

#[cfg(any(test, feature = "test-support"))]
pub mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakePortProbe, FakeProcessAdapter};
