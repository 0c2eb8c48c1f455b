// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    validation      = { ServerError::Validation("bad".into()), 400 },
    not_found       = { ServerError::NotFound { port: 9001 }, 404 },
    missing_exe     = { ServerError::MissingExecutable { version: "v1".into() }, 500 },
    spawn_failure   = { ServerError::SpawnFailure("oops".into()), 500 },
    abnormal_exit   = { ServerError::AbnormalExit { detail: "signal 9".into() }, 500 },
    shutdown_tmo    = { ServerError::ShutdownTimeout { port: 9001 }, 500 },
    internal        = { ServerError::Internal { correlation_id: 123456 }, 500 },
)]
fn status_code_matches_taxonomy(err: ServerError, expected: u16) {
    assert_eq!(err.status_code(), expected);
}

#[test]
fn missing_executable_message_names_version() {
    let err = ServerError::MissingExecutable { version: "vX".into() };
    assert!(err.to_string().contains("Executable not found"));
    assert!(err.to_string().contains("vX"));
}
