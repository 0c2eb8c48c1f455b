// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Liveness probe: standard ambient surface for anything fronted by a
//! service manager health check.

use su_wire::OkResponse;

pub async fn healthz() -> axum::Json<OkResponse> {
    axum::Json(OkResponse::ok())
}
