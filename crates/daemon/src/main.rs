// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `siegeupd`: per-host game-server supervisor daemon.
//!
//! Startup sequence: acquire the singleton lock first (so a losing process
//! never clobbers the winner's state), create directories, load persisted
//! settings, write the TLS cert/key *before* the HTTPS listener binds, then
//! hand control to the engine and the axum server.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod cert;
mod env;
mod http;
mod lock;
mod logging;

use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use parking_lot::Mutex;
use su_adapters::{SystemProcessAdapter, TcpPortProbe};
use su_core::SystemClock;
use su_engine::{Engine, EngineHandle};
use su_storage::{BuildStore, LogSink, SettingsStore};
use sysinfo::System;
use tracing::{error, info};

use http::AppState;

/// This binary's short git hash, baked in at compile time by `build.rs`.
const COMMIT: &str = env!("BUILD_GIT_HASH");

#[derive(Debug, Parser)]
#[command(name = "siegeupd", version)]
struct Cli {
    /// TCP port the HTTPS RPC Facade listens on.
    #[arg(long, default_value_t = 8443)]
    port: u16,
}

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("another siegeupd instance is already running: {0}")]
    Lock(#[from] lock::LockError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("certificate generation failed: {0}")]
    Cert(#[from] cert::CertError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let base_dir = env::settings_dir();

    match run(cli, &base_dir).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Logging may not be initialized yet if the failure happened
            // before `logging::init`, so always also print to stderr.
            eprintln!("siegeupd: fatal startup error: {e}");
            error!(error = %e, "fatal startup error");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, base_dir: &std::path::Path) -> Result<(), StartupError> {
    std::fs::create_dir_all(base_dir)?;

    // Acquired first and held for the process's lifetime: dropping `_lock`
    // at the end of `main` releases it.
    let _lock = lock::acquire(&base_dir.join("agent.lock"))?;

    let _log_guard = logging::init(base_dir)?;
    info!(commit = COMMIT, port = cli.port, base_dir = %base_dir.display(), "starting siegeupd");

    if let Some(url) = env::orchestrator_url() {
        info!(url, "orchestrator registration is out of scope for the core; skipping");
    }

    let settings_store = SettingsStore::new(base_dir);
    let settings = settings_store.load().await;

    let build_store = BuildStore::at_root(env::builds_dir(base_dir));
    let log_sink = LogSink::new(base_dir);

    // Cert/key must exist on disk before the HTTPS listener binds.
    let (cert_path, key_path) = cert::bootstrap(base_dir)?;

    let supervisor =
        su_engine::Supervisor::new(TcpPortProbe, SystemProcessAdapter, log_sink.clone(), SystemClock);
    let engine = Engine::new(settings, settings_store, build_store.clone(), supervisor);
    let engine_handle = EngineHandle::spawn(engine);

    let state = AppState {
        engine: engine_handle,
        build_store,
        log_sink,
        sysinfo: Arc::new(Mutex::new(System::new_all())),
        commit: Arc::from(COMMIT),
    };
    let router = http::router(state);

    let tls_config = RustlsConfig::from_pem_file(&cert_path, &key_path).await?;
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    info!(%addr, "HTTPS RPC Facade listening");

    axum_server::bind_rustls(addr, tls_config).serve(router.into_make_service()).await?;
    Ok(())
}
