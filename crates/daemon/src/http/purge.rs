// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `POST /purge`. The running-version snapshot is taken inside the engine's
//! owning task, before the build store's directory listing is ever touched
//! — see `su_engine::runtime::Engine::handle`'s `Command::Purge` arm.

use axum::extract::State;
use axum::Json;
use su_wire::PurgeResponse;

use super::{ApiError, AppState};

pub async fn purge(State(state): State<AppState>) -> Result<Json<PurgeResponse>, ApiError> {
    let purged = state.engine.purge().await?;
    Ok(Json(PurgeResponse { ok: true, purged }))
}
