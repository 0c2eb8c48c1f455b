// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `POST /launch`: replaces the complete desired server set.

use axum::extract::State;
use axum::Json;
use su_core::DesiredServer;
use su_wire::{LaunchRequest, LaunchServerEntry, OkResponse};

use super::{ApiError, AppState};

pub async fn launch(
    State(state): State<AppState>,
    Json(body): Json<LaunchRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    let servers: Vec<DesiredServer> = body.servers.into_iter().map(to_desired).collect();
    state.engine.launch(servers).await?;
    Ok(Json(OkResponse::ok()))
}

fn to_desired(entry: LaunchServerEntry) -> DesiredServer {
    DesiredServer {
        name: entry.name.unwrap_or_default(),
        version: entry.version,
        port: entry.port,
        args: entry.args,
        visible: entry.visible.unwrap_or(false),
        run: entry.run.unwrap_or(true),
    }
}
