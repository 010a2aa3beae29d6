// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing subscriber setup.
//!
//! `TAT_LOG` holds an `EnvFilter` directive (default `warn`). Logs go to
//! stderr unless `TAT_LOG_FILE` names a file, in which case they are written
//! there through a non-blocking appender.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env("TAT_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn log_file() -> Option<PathBuf> {
    std::env::var_os("TAT_LOG_FILE").filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// Install the global subscriber.
///
/// Hold the returned guard until exit so buffered file output is flushed.
pub fn init() -> Result<Option<WorkerGuard>> {
    let Some(path) = log_file() else {
        tracing_subscriber::fmt()
            .with_env_filter(log_filter())
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!("failed to install logger: {e}"))?;
        return Ok(None);
    };

    let (dir, name) = split_log_path(&path)?;
    std::fs::create_dir_all(dir)?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {e}"))?;
    Ok(Some(guard))
}

fn split_log_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr)> {
    let name = path
        .file_name()
        .ok_or_else(|| anyhow!("TAT_LOG_FILE must name a file: {}", path.display()))?;
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    Ok((dir, name))
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
