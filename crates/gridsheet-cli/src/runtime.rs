// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use gridsheet_app::ToolbarAction;
use std::collections::BTreeMap;
use tracing::info;

/// Toolbar handler shipped with the binary. Buttons have no backing service
/// yet, so each press is logged and counted.
#[derive(Debug, Default)]
pub struct LoggingToolbar {
    presses: BTreeMap<&'static str, usize>,
}

impl LoggingToolbar {
    pub fn total_presses(&self) -> usize {
        self.presses.values().sum()
    }
}

impl gridsheet_tui::ToolbarHandler for LoggingToolbar {
    fn trigger(&mut self, action: ToolbarAction) -> Result<()> {
        let count = self.presses.entry(action.label()).or_default();
        *count += 1;
        info!(presses = *count, "{} button clicked", action.label());
        Ok(())
    }
}
