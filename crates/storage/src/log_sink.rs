// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-instance append-only log file rotation, line timestamping, and tail
//! reads. Logs for port `P` live under `<base>/logs/<P>/`.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};

const KEPT_FILES: usize = 10;
const MAX_TAIL_BYTES: u64 = 2 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum LogSinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no log file at index {0}")]
    NotFound(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTail {
    pub name: String,
    pub size: u64,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct LogSink {
    logs_root: PathBuf,
}

impl LogSink {
    pub fn new(base_dir: &Path) -> Self {
        Self { logs_root: base_dir.join("logs") }
    }

    pub fn port_dir(&self, port: u16) -> PathBuf {
        self.logs_root.join(port.to_string())
    }

    /// Rotates old log files (keeping the newest 9) and creates a new one
    /// named by the current UTC timestamp.
    pub async fn open_new(&self, port: u16) -> Result<(PathBuf, tokio::fs::File), LogSinkError> {
        let dir = self.port_dir(port);
        tokio::fs::create_dir_all(&dir).await?;
        rotate(&dir).await?;

        let path = dir.join(format!("{}.log", timestamp_for_filename()));
        let file = tokio::fs::File::create(&path).await?;
        Ok((path, file))
    }

    /// Log files for `port`, newest first. Empty (not an error) if the
    /// port has never logged anything.
    pub async fn list(&self, port: u16) -> Result<Vec<PathBuf>, LogSinkError> {
        match list_log_files(&self.port_dir(port)).await {
            Ok(files) => Ok(files.into_iter().map(|(path, _)| path).collect()),
            Err(LogSinkError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(vec![]),
            Err(e) => Err(e),
        }
    }

    /// Reads the last `<= 2 MiB` of the log at `index` (0 = most recent).
    pub async fn tail(&self, port: u16, index: usize) -> Result<LogTail, LogSinkError> {
        let files = self.list(port).await?;
        let path = files.get(index).ok_or(LogSinkError::NotFound(index))?;

        let metadata = tokio::fs::metadata(path).await?;
        let size = metadata.len();
        let truncated = size > MAX_TAIL_BYTES;

        let mut file = tokio::fs::File::open(path).await?;
        if truncated {
            file.seek(std::io::SeekFrom::Start(size - MAX_TAIL_BYTES)).await?;
        }
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).await?;
        let mut content = String::from_utf8_lossy(&buf).into_owned();
        if truncated {
            content = format!("[Truncated...]\n{content}");
        }

        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        Ok(LogTail { name, size, content })
    }
}

async fn rotate(dir: &Path) -> Result<(), LogSinkError> {
    let mut files = list_log_files(dir).await?;
    if files.len() > KEPT_FILES - 1 {
        for (path, _) in files.split_off(KEPT_FILES - 1) {
            let _ = tokio::fs::remove_file(path).await;
        }
    }
    Ok(())
}

async fn list_log_files(dir: &Path) -> Result<Vec<(PathBuf, SystemTime)>, LogSinkError> {
    let mut out = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("log") {
            continue;
        }
        let mtime = entry.metadata().await?.modified()?;
        out.push((path, mtime));
    }
    out.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(out)
}

fn timestamp_for_filename() -> String {
    chrono::Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Nanos, true)
        .replace(':', "-")
        .replace('.', "-")
}

/// Buffers a byte stream to newline boundaries and prepends an ISO-8601 UTC
/// timestamp to each complete line. The tail (if any) is flushed with its
/// own timestamp when the stream closes.
pub struct LineTimestamper<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: tokio::io::AsyncWrite + Unpin> LineTimestamper<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, buffer: Vec::new() }
    }

    /// Feeds a chunk of raw child output through the transform, writing out
    /// every complete line it now contains.
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> std::io::Result<()> {
        self.buffer.extend_from_slice(chunk);
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_timestamped(&line).await?;
        }
        Ok(())
    }

    /// Flushes any buffered partial line as a final timestamped line, then
    /// flushes the underlying writer. Call once on stream close.
    pub async fn flush_tail(&mut self) -> std::io::Result<()> {
        if !self.buffer.is_empty() {
            let mut line = std::mem::take(&mut self.buffer);
            line.push(b'\n');
            self.write_timestamped(&line).await?;
        }
        self.inner.flush().await
    }

    async fn write_timestamped(&mut self, line_with_newline: &[u8]) -> std::io::Result<()> {
        let ts = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        self.inner.write_all(format!("[{ts}] ").as_bytes()).await?;
        self.inner.write_all(line_with_newline).await?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
#[path = "log_sink_tests.rs"]
mod tests;
