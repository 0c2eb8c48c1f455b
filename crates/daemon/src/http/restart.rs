// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `POST /restart?port=P`: stop the current child on `port`, if any, and let
//! the next reconcile tick respawn it.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use su_wire::OkResponse;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct RestartQuery {
    pub port: u16,
}

pub async fn restart(
    State(state): State<AppState>,
    Query(query): Query<RestartQuery>,
) -> Result<Json<OkResponse>, ApiError> {
    state.engine.restart(query.port).await?;
    Ok(Json(OkResponse::ok()))
}
