// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dual file+stderr structured logging: a daily-rotating file layer plus a
//! stderr layer, so interactive runs still see log output without tailing
//! the file.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the global tracing subscriber: a daily-rotated file layer
/// under `<base>/daemon.log` plus a stderr layer, both under one
/// `RUST_LOG`-driven filter (default `info`). The returned guard must be
/// kept alive for the process's lifetime — dropping it stops the
/// non-blocking file writer mid-flush.
pub fn init(base_dir: &Path) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(base_dir)?;
    let file_appender = tracing_appender::rolling::daily(base_dir, "daemon.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(guard)
}
