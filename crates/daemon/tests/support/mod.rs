// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared black-box harness for the RPC Facade specs: spawns the real
//! `siegeupd` binary against a scratch base directory and drives it over
//! HTTPS with `reqwest`, the way an orchestrator would.

#![allow(dead_code)]

use std::io::Write;
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use tempfile::TempDir;

/// A running `siegeupd` instance bound to a scratch base directory and an
/// OS-assigned port. Killed on drop so a panicking assertion never leaks
/// the child process into the rest of the test run.
pub struct Daemon {
    child: Child,
    base: TempDir,
    port: u16,
    client: reqwest::Client,
}

impl Daemon {
    /// Starts `siegeupd` and blocks until `/healthz` answers, up to 5s.
    pub async fn start() -> Self {
        let base = TempDir::new().expect("create scratch base dir");
        let port = free_port();
        let binary = PathBuf::from(env!("CARGO_BIN_EXE_siegeupd"));

        let child = Command::new(binary)
            .arg("--port")
            .arg(port.to_string())
            .env("SETTINGS_DIR", base.path())
            .env_remove("BUILDS_DIR")
            .env_remove("ORCHESTRATOR_URL")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn siegeupd");

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .expect("build https client");

        let daemon = Self { child, base, port, client };
        let healthy = wait_for(Duration::from_secs(5), || {
            let daemon = &daemon;
            async move { daemon.get("/healthz").await.map(|r| r.status().is_success()).unwrap_or(false) }
        })
        .await;
        assert!(healthy, "siegeupd never answered /healthz on port {port}");
        daemon
    }

    pub fn base_dir(&self) -> &std::path::Path {
        self.base.path()
    }

    fn url(&self, path: &str) -> String {
        format!("https://127.0.0.1:{}{path}", self.port)
    }

    pub async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.get(self.url(path)).send().await
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Result<reqwest::Response> {
        self.client.post(self.url(path)).json(body).send().await
    }

    pub async fn post(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.post(self.url(path)).send().await
    }

    pub async fn upload(&self, version_file_name: &str, zip_bytes: Vec<u8>) -> reqwest::Result<reqwest::Response> {
        let part = reqwest::multipart::Part::bytes(zip_bytes)
            .file_name(version_file_name.to_string())
            .mime_str("application/zip")
            .expect("valid mime");
        let form = reqwest::multipart::Form::new().part("gameZip", part);
        self.client.post(self.url("/upload")).multipart(form).send().await
    }

    pub async fn status(&self) -> serde_json::Value {
        self.get("/status").await.expect("GET /status").json().await.expect("status body is JSON")
    }
}

impl Drop for Daemon {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port").local_addr().expect("local addr").port()
}

/// Polls `check` every 50ms until it returns `true` or `timeout` elapses.
pub async fn wait_for<F, Fut>(timeout: Duration, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if check().await {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

/// Builds a zip archive in memory containing a single launchable server
/// executable, named so `find_executable` will pick it up.
pub fn fake_server_zip() -> Vec<u8> {
    let mut buf = std::io::Cursor::new(Vec::new());
    let mut writer = zip::ZipWriter::new(&mut buf);
    let options = zip::write::SimpleFileOptions::default();
    writer.start_file("SiegeUpLinuxServer.x86_64", options).expect("start zip entry");
    writer.write_all(FAKE_SERVER_SCRIPT.as_bytes()).expect("write zip entry");
    writer.finish().expect("finish zip");
    buf.into_inner()
}

/// A shell script standing in for a Unity-built dedicated server: it stays
/// alive until signaled, which is all the reconciler or port probe ever
/// observes. It ignores the canonical argv entirely.
const FAKE_SERVER_SCRIPT: &str = "#!/bin/sh\nwhile true; do sleep 1; done\n";
