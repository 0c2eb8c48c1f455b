// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maps the core's error taxonomy onto HTTP status codes and the
//! `{"error": "<message>"}` body shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use su_core::ServerError;
use su_storage::{BuildStoreError, LogSinkError};
use su_wire::ErrorResponse;

pub enum ApiError {
    Server(ServerError),
    Build(BuildStoreError),
    Log(LogSinkError),
    /// Rejected before any core operation ran (e.g. a malformed multipart
    /// body) — always a 400, never recorded against a port.
    Validation(String),
}

impl From<ServerError> for ApiError {
    fn from(e: ServerError) -> Self {
        Self::Server(e)
    }
}

impl From<BuildStoreError> for ApiError {
    fn from(e: BuildStoreError) -> Self {
        Self::Build(e)
    }
}

impl From<LogSinkError> for ApiError {
    fn from(e: LogSinkError) -> Self {
        Self::Log(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Server(e) => {
                let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, e.to_string())
            }
            ApiError::Build(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Log(LogSinkError::NotFound(index)) => {
                (StatusCode::NOT_FOUND, format!("no log file at index {index}"))
            }
            ApiError::Log(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
        };

        if status.is_server_error() {
            tracing::error!(%message, "request failed");
        }
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
