// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;
use tokio::net::TcpListener;

async fn free_port() -> u16 {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

#[tokio::test]
async fn is_free_true_for_unbound_port() {
    let port = free_port().await;
    assert!(TcpPortProbe.is_free(port).await);
}

#[tokio::test]
async fn is_free_false_while_bound() {
    let listener = TcpListener::bind(("0.0.0.0", 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    assert!(!TcpPortProbe.is_free(port).await);
    drop(listener);
}

#[tokio::test]
async fn probe_does_not_leak_listener() {
    let port = free_port().await;
    assert!(TcpPortProbe.is_free(port).await);
    // A second probe on the same port must also succeed — the first probe's
    // listener must not still be bound.
    assert!(TcpPortProbe.is_free(port).await);
}

#[tokio::test]
async fn wait_until_free_returns_true_once_released() {
    let listener = TcpListener::bind(("0.0.0.0", 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let probe = TcpPortProbe;
    let wait = tokio::spawn(async move { probe.wait_until_free(port, Duration::from_secs(2)).await });

    tokio::time::sleep(Duration::from_millis(150)).await;
    drop(listener);

    assert!(wait.await.unwrap());
}

#[tokio::test]
async fn wait_until_free_times_out_while_held() {
    let listener = TcpListener::bind(("0.0.0.0", 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let free = TcpPortProbe.wait_until_free(port, Duration::from_millis(250)).await;
    assert!(!free);
    drop(listener);
}
