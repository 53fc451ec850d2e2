// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! File-backed tracing. The terminal belongs to the sheet while it runs, so
//! log output goes to a file that can be followed with `tail -f`.

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "GRIDSHEET_LOG";

/// Filter directive to install: `GRIDSHEET_LOG` when set and non-empty,
/// otherwise the configured level.
pub fn filter_directive(configured: &str) -> String {
    env::var(LOG_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| configured.to_owned())
}

pub fn init(log_path: &Path, directive: &str) -> Result<()> {
    let directory = log_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .ok_or_else(|| anyhow!("log path {} has no parent directory", log_path.display()))?;
    let file_name = log_path
        .file_name()
        .ok_or_else(|| anyhow!("log path {} has no file name", log_path.display()))?;

    fs::create_dir_all(directory)
        .with_context(|| format!("create log directory {}", directory.display()))?;

    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("invalid log filter {directive:?}; set {LOG_ENV} or [log].level"))?;
    let appender = tracing_appender::rolling::never(directory, file_name);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .try_init()
        .map_err(|error| anyhow!("install tracing subscriber: {error}"))
}
