// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! RPC Facade: one axum handler module per operation, wired onto a shared
//! [`AppState`]. `tower_http::trace::TraceLayer` and `CatchPanicLayer` log
//! every request and keep a handler panic from taking the listener down.

mod error;
mod healthz;
mod launch;
mod logs;
mod purge;
mod restart;
mod status;
mod update;
mod upload;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use parking_lot::Mutex;
use sysinfo::System;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Shared state every handler holds: a cheap-to-clone front end onto the
/// engine, plus direct read access to the build and log stores for the
/// operations that don't need to round-trip through the engine's command
/// channel.
#[derive(Clone)]
pub struct AppState {
    pub engine: su_engine::EngineHandle,
    pub build_store: su_storage::BuildStore,
    pub log_sink: su_storage::LogSink,
    /// Kept across requests so `/status`'s CPU percentage reflects the
    /// delta since the *previous* call, the way `sysinfo` expects to be
    /// sampled, rather than a first-call-always-zero snapshot.
    pub sysinfo: Arc<Mutex<System>>,
    /// This binary's short git hash, computed once at startup (`build.rs`),
    /// surfaced on every `/status` server entry.
    pub commit: Arc<str>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz::healthz))
        .route("/launch", post(launch::launch))
        .route("/upload", post(upload::upload))
        .route("/restart", post(restart::restart))
        .route("/purge", post(purge::purge))
        .route("/update", post(update::update))
        .route("/logs/:port", get(logs::logs))
        .route("/status", get(status::status))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
