// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `POST /upload`: multipart field `gameZip`, streamed through the Build
//! Store's archive ingest. `version` defaults to the uploaded file's base
//! name (without extension), falling back to `archive_<unix-ms>` when
//! that's empty.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Multipart, State};
use axum::Json;
use su_wire::UploadResponse;

use super::{ApiError, AppState};

pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("gameZip") {
            continue;
        }

        let version = version_from_file_name(field.file_name());
        let bytes = field.bytes().await.map_err(multipart_error)?;

        state.build_store.ingest(&version, std::io::Cursor::new(bytes.to_vec())).await?;
        return Ok(Json(UploadResponse { ok: true, version }));
    }

    Err(ApiError::Validation("no 'gameZip' field in upload".to_string()))
}

fn version_from_file_name(file_name: Option<&str>) -> String {
    let base = file_name
        .and_then(|name| name.rsplit('/').next())
        .map(|name| match name.rsplit_once('.') {
            Some((stem, _ext)) if !stem.is_empty() => stem.to_string(),
            _ => name.to_string(),
        })
        .unwrap_or_default();

    if base.is_empty() {
        format!("archive_{}", unix_ms())
    } else {
        base
    }
}

fn unix_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::Validation(format!("malformed multipart body: {e}"))
}
