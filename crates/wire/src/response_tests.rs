// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn ok_response_serializes_as_ok_true() {
    let json = serde_json::to_string(&OkResponse::ok()).unwrap();
    assert_eq!(json, r#"{"ok":true}"#);
}

#[test]
fn error_response_serializes_message_field() {
    let body = ErrorResponse::new("Duplicate port detected in servers array");
    let json = serde_json::to_string(&body).unwrap();
    assert_eq!(json, r#"{"error":"Duplicate port detected in servers array"}"#);
}

#[test]
fn purge_response_round_trips() {
    let body = PurgeResponse { ok: true, purged: vec!["v2".to_string()] };
    let json = serde_json::to_string(&body).unwrap();
    let round_tripped: PurgeResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(round_tripped, body);
}

#[test]
fn server_status_entry_omits_launch_error_when_absent() {
    let entry = ServerStatusEntry {
        name: "Server 1".to_string(),
        version: "v1".to_string(),
        port: 9001,
        args: vec![],
        visible: true,
        run: true,
        pid: Some(4242),
        running: true,
        memory_mb: 128,
        commit: "abc1234".to_string(),
        launch_error: None,
    };
    let json = serde_json::to_string(&entry).unwrap();
    assert!(!json.contains("launchError"));
    assert!(json.contains(r#""memoryMB":128"#));
}

#[test]
fn server_status_entry_includes_launch_error_when_present() {
    let entry = ServerStatusEntry {
        name: "Server 1".to_string(),
        version: "vX".to_string(),
        port: 9001,
        args: vec![],
        visible: true,
        run: true,
        pid: None,
        running: false,
        memory_mb: 0,
        commit: "abc1234".to_string(),
        launch_error: Some("Executable not found for version \"vX\"".to_string()),
    };
    let json = serde_json::to_string(&entry).unwrap();
    assert!(json.contains("launchError"));
}

#[test]
fn status_response_round_trips() {
    let status = StatusResponse {
        hostname: "host1".to_string(),
        platform: "linux".to_string(),
        memory_total_mb: 8192,
        memory_used_mb: 2048,
        cpu_percent: 12.5,
        servers: vec![],
        builds: vec!["v1".to_string(), "v2".to_string()],
    };
    let json = serde_json::to_string(&status).unwrap();
    let round_tripped: StatusResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(round_tripped, status);
}
