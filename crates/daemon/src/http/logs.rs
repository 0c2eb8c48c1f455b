// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `GET /logs/:port?index=N`: the Nth-most-recent log file for `port`, via
//! the Log Sink's bounded tail read.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use su_wire::LogTailResponse;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    #[serde(default)]
    pub index: usize,
}

pub async fn logs(
    State(state): State<AppState>,
    Path(port): Path<u16>,
    Query(query): Query<LogsQuery>,
) -> Result<Json<LogTailResponse>, ApiError> {
    let tail = state.log_sink.tail(port, query.index).await?;
    Ok(Json(LogTailResponse { name: tail.name, size: tail.size, content: tail.content }))
}
