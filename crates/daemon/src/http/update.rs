// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `POST /update`: acknowledge, gracefully stop every child, then exit the
//! process with status 0. An external service manager is expected to
//! re-launch, possibly with a new binary already in place.

use std::time::Duration;

use axum::extract::State;
use axum::Json;
use su_wire::OkResponse;

use super::AppState;

pub async fn update(State(state): State<AppState>) -> Json<OkResponse> {
    state.engine.shutdown().await;

    // Exit from a detached task so this handler's response is flushed to
    // the client before the process disappears.
    tokio::spawn(async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        std::process::exit(0);
    });

    Json(OkResponse::ok())
}
