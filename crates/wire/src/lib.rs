// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire DTOs for the daemon's HTTPS RPC surface.
//!
//! Kept separate from `su-core`'s domain types so the on-the-wire JSON
//! shape (field defaulting, optional vs. required) can diverge from the
//! in-memory representation without coupling the two.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod request;
mod response;

pub use request::{LaunchRequest, LaunchServerEntry};
pub use response::{
    ErrorResponse, LogTailResponse, OkResponse, PurgeResponse, ServerStatusEntry, StatusResponse,
    UploadResponse,
};
