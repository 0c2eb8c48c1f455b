// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build artifact storage: archive ingest, executable discovery, and purge.
//!
//! Archives arrive over HTTP as an opaque byte stream. `zip::ZipArchive`
//! needs `Read + Seek`, so the incoming stream is first drained to a
//! scratch file under the builds root and then extracted on a blocking
//! thread — the same download-then-extract shape used for fetching and
//! unpacking a released binary from disk.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

#[derive(Debug, thiserror::Error)]
pub enum BuildStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt or unreadable archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("extraction task panicked: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Owns `<base>/builds/` — one subdirectory per ingested version.
#[derive(Debug, Clone)]
pub struct BuildStore {
    root: PathBuf,
}

impl BuildStore {
    pub fn new(base_dir: &Path) -> Self {
        Self { root: base_dir.join("builds") }
    }

    /// Builds a store whose root *is* `root` directly, for when `BUILDS_DIR`
    /// overrides the default `<base>/builds` placement.
    pub fn at_root(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.root.join(version)
    }

    /// Streams `body` into a scratch file and extracts it into
    /// `<builds>/<version>/`. Re-uploading an existing version clears and
    /// replaces its directory rather than merging into it — only deletion
    /// of a version still in use is dangerous, not re-uploading one.
    pub async fn ingest<R>(&self, version: &str, mut body: R) -> Result<PathBuf, BuildStoreError>
    where
        R: tokio::io::AsyncRead + Unpin + Send,
    {
        let dest_dir = self.version_dir(version);
        if dest_dir.exists() {
            tokio::fs::remove_dir_all(&dest_dir).await?;
        }

        tokio::fs::create_dir_all(&self.root).await?;
        let scratch = self.root.join(format!(".{version}.upload"));
        {
            let mut file = tokio::fs::File::create(&scratch).await?;
            tokio::io::copy(&mut body, &mut file).await?;
        }

        let extract_dest = dest_dir.clone();
        let extract_src = scratch.clone();
        let extracted = tokio::task::spawn_blocking(move || extract_zip(&extract_src, &extract_dest)).await?;

        let _ = tokio::fs::remove_file(&scratch).await;
        extracted?;

        if let Some(exe) = find_executable(&dest_dir) {
            mark_executable(&exe)?;
        }

        Ok(dest_dir)
    }

    /// First executable found in `version`'s directory, depth-first,
    /// skipping Unity's crash handler stub.
    pub fn find_executable(&self, version: &str) -> Option<PathBuf> {
        find_executable(&self.version_dir(version))
    }

    /// Lists the top-level build version directories, for `GET /status`'s
    /// `builds` field. Empty (not an error) if the builds root doesn't
    /// exist yet.
    pub async fn list_versions(&self) -> Result<Vec<String>, BuildStoreError> {
        let mut versions = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(versions),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                versions.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        versions.sort();
        Ok(versions)
    }

    /// Removes every build directory not in `keep`. Callers must compute
    /// `keep` from the set of versions actually referenced by a running
    /// child before calling this — builds referenced by a live instance
    /// must never be removed out from under it.
    pub async fn purge(&self, keep: &HashSet<String>) -> Result<Vec<String>, BuildStoreError> {
        let mut removed = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(removed),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if keep.contains(&name) {
                continue;
            }
            tokio::fs::remove_dir_all(entry.path()).await?;
            removed.push(name);
        }
        Ok(removed)
    }
}

fn extract_zip(zip_path: &Path, dest_dir: &Path) -> Result<(), BuildStoreError> {
    let file = fs::File::open(zip_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let Some(rel) = entry.enclosed_name() else {
            continue;
        };
        let out = dest_dir.join(rel);

        if entry.is_dir() {
            fs::create_dir_all(&out)?;
            continue;
        }
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out_file = fs::File::create(&out)?;
        std::io::copy(&mut entry, &mut out_file)?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&out, fs::Permissions::from_mode(mode))?;
        }
    }
    Ok(())
}

fn find_executable(version_dir: &Path) -> Option<PathBuf> {
    WalkDir::new(version_dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .find(|entry| is_launchable(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.into_path())
}

fn is_launchable(file_name: &str) -> bool {
    if file_name.contains("UnityCrashHandler") {
        return false;
    }
    file_name.ends_with(".exe") || file_name.ends_with(".x86_64")
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<(), BuildStoreError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<(), BuildStoreError> {
    Ok(())
}

#[cfg(test)]
#[path = "build_store_tests.rs"]
mod tests;
