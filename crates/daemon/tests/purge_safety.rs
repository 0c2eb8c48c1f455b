// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `POST /purge` removes build directories not backing a running child, and
//! never touches one that is.

#[path = "support/mod.rs"]
mod support;

use std::time::Duration;

use serde_json::json;
use support::{fake_server_zip, wait_for, Daemon};

#[tokio::test]
async fn purge_keeps_the_running_version_and_removes_the_idle_one() {
    let daemon = Daemon::start().await;

    daemon.upload("v1.zip", fake_server_zip()).await.expect("upload v1");
    daemon.upload("v2.zip", fake_server_zip()).await.expect("upload v2");

    daemon
        .post_json("/launch", &json!({"servers": [{"version": "v1", "port": 9501, "run": true}]}))
        .await
        .expect("POST /launch");

    let running = wait_for(Duration::from_secs(6), || async {
        daemon.status().await["servers"][0]["running"] == json!(true)
    })
    .await;
    assert!(running, "v1 should be running before purge");

    let purge = daemon.post("/purge").await.expect("POST /purge");
    assert!(purge.status().is_success());
    let body: serde_json::Value = purge.json().await.expect("purge body");
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["purged"], json!(["v2"]));

    let status = daemon.status().await;
    let builds = status["builds"].as_array().expect("builds array");
    assert!(builds.iter().any(|b| b == "v1"), "v1 must survive purge while it backs a running child");
    assert!(!builds.iter().any(|b| b == "v2"), "v2 must be purged since nothing runs it");
}
