// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use gridsheet_app::{SYNTHETIC_BLANK_ROWS, SheetTab};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub const APP_NAME: &str = "gridsheet";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_STATUS_CLEAR_SECS: i64 = 4;
const MAX_BLANK_ROWS: i64 = 500;
const MAX_STATUS_CLEAR_SECS: i64 = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub blank_rows: Option<i64>,
    pub initial_tab: Option<String>,
    pub status_clear_secs: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub path: Option<String>,
    pub level: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("GRIDSHEET_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!(
                "cannot resolve config directory; set GRIDSHEET_CONFIG_PATH to the config file"
            )
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put settings under [ui] and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.version != CONFIG_VERSION {
            bail!(
                "config {} has version {}; expected {CONFIG_VERSION}",
                path.display(),
                self.version
            );
        }

        if let Some(blank_rows) = self.ui.blank_rows
            && !(0..=MAX_BLANK_ROWS).contains(&blank_rows)
        {
            bail!(
                "ui.blank_rows in {} must be between 0 and {MAX_BLANK_ROWS}, got {blank_rows}",
                path.display()
            );
        }

        if let Some(secs) = self.ui.status_clear_secs
            && !(1..=MAX_STATUS_CLEAR_SECS).contains(&secs)
        {
            bail!(
                "ui.status_clear_secs in {} must be between 1 and {MAX_STATUS_CLEAR_SECS}, got {secs}",
                path.display()
            );
        }

        if let Some(tab) = &self.ui.initial_tab
            && SheetTab::parse(tab).is_none()
        {
            let known = SheetTab::ALL
                .iter()
                .map(|tab| format!("{:?}", tab.label()))
                .collect::<Vec<_>>()
                .join(", ");
            bail!(
                "ui.initial_tab in {} is {tab:?}; use one of {known}",
                path.display()
            );
        }

        if let Some(path_value) = &self.log.path
            && path_value.trim().is_empty()
        {
            bail!(
                "log.path in {} is empty; remove it to use the default log file",
                path.display()
            );
        }

        if let Some(level) = &self.log.level {
            EnvFilter::try_new(level).with_context(|| {
                format!(
                    "log.level in {} is not a valid filter directive (try \"info\" or \"gridsheet_app=debug\")",
                    path.display()
                )
            })?;
        }

        Ok(())
    }

    pub fn blank_rows(&self) -> usize {
        self.ui
            .blank_rows
            .and_then(|rows| usize::try_from(rows).ok())
            .unwrap_or(SYNTHETIC_BLANK_ROWS)
    }

    pub fn initial_tab(&self) -> SheetTab {
        self.ui
            .initial_tab
            .as_deref()
            .and_then(SheetTab::parse)
            .unwrap_or_default()
    }

    pub fn status_clear_after(&self) -> Duration {
        let secs = self
            .ui
            .status_clear_secs
            .unwrap_or(DEFAULT_STATUS_CLEAR_SECS);
        Duration::from_secs(u64::try_from(secs).unwrap_or(1))
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log.path {
            return Ok(PathBuf::from(path));
        }
        let data_root = dirs::data_local_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].path in the config file")
        })?;
        Ok(data_root.join(APP_NAME).join(format!("{APP_NAME}.log")))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# gridsheet config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\n# Synthetic empty rows below the data, 0..={MAX_BLANK_ROWS}\nblank_rows = {SYNTHETIC_BLANK_ROWS}\ninitial_tab = \"{}\"\n# Seconds before a status message clears, 1..={MAX_STATUS_CLEAR_SECS}\nstatus_clear_secs = {DEFAULT_STATUS_CLEAR_SECS}\n\n[log]\n# Optional. Default is platform data dir (for example ~/.local/share/gridsheet/gridsheet.log)\n# path = \"/absolute/path/to/gridsheet.log\"\n# tracing filter directive; GRIDSHEET_LOG overrides it\nlevel = \"{DEFAULT_LOG_LEVEL}\"\n",
            path.display(),
            SheetTab::default().label(),
        )
    }
}
