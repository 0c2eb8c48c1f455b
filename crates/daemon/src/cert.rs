// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Self-signed TLS certificate bootstrap: a fresh cert/key pair is
//! regenerated on every startup and written to `<base>/cert.pem` and
//! `<base>/key.pem`, before the HTTPS listener binds.

use std::net::UdpSocket;
use std::path::{Path, PathBuf};

use sysinfo::System;

#[derive(Debug, thiserror::Error)]
pub enum CertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("certificate generation failed: {0}")]
    Generation(#[from] rcgen::Error),
}

/// Writes `cert.pem`/`key.pem` under `base_dir`, returning their paths.
/// commonName is the local hostname; the SAN list additionally covers
/// loopback and the IPv4 address this host would use to reach the public
/// internet, since orchestrators typically dial one of those three.
pub fn bootstrap(base_dir: &Path) -> Result<(PathBuf, PathBuf), CertError> {
    let hostname = System::host_name().unwrap_or_else(|| "localhost".to_string());

    let mut names = vec![hostname, "127.0.0.1".to_string()];
    if let Some(ip) = external_ipv4() {
        if !names.contains(&ip) {
            names.push(ip);
        }
    }

    let certified = rcgen::generate_simple_self_signed(names)?;
    let cert_path = base_dir.join("cert.pem");
    let key_path = base_dir.join("key.pem");
    std::fs::write(&cert_path, certified.cert.pem())?;
    std::fs::write(&key_path, certified.key_pair.serialize_pem())?;
    Ok((cert_path, key_path))
}

/// The local IPv4 address a connection to the public internet would use,
/// discovered without sending any traffic: UDP sockets only resolve a route
/// on `connect`, they never transmit a packet.
fn external_ipv4() -> Option<String> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    socket.local_addr().ok().map(|addr| addr.ip().to_string())
}

#[cfg(test)]
#[path = "cert_tests.rs"]
mod tests;
