// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::RowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkStatus {
    InProgress,
    NeedToStart,
    Complete,
    Blocked,
}

impl WorkStatus {
    pub const ALL: [Self; 4] = [
        Self::InProgress,
        Self::NeedToStart,
        Self::Complete,
        Self::Blocked,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "In-progress",
            Self::NeedToStart => "Need to start",
            Self::Complete => "Complete",
            Self::Blocked => "Blocked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// One row of the sheet. Dates and the estimated value are kept exactly as
/// entered; nothing downstream parses them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: RowId,
    pub job_request: String,
    pub submitted: String,
    pub status: WorkStatus,
    pub submitter: String,
    pub url: String,
    pub assigned: String,
    pub priority: Priority,
    pub due_date: String,
    pub est_value: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SheetTab {
    #[default]
    #[serde(rename = "All Orders")]
    AllOrders,
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "Reviewed")]
    Reviewed,
    #[serde(rename = "Arrived")]
    Arrived,
}

impl SheetTab {
    pub const ALL: [Self; 4] = [Self::AllOrders, Self::Pending, Self::Reviewed, Self::Arrived];

    pub const fn label(self) -> &'static str {
        match self {
            Self::AllOrders => "All Orders",
            Self::Pending => "Pending",
            Self::Reviewed => "Reviewed",
            Self::Arrived => "Arrived",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.label() == value)
    }
}

/// Buttons that have no behaviour of their own beyond being reported to the
/// toolbar handler. `HideFields` additionally toggles the URL column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolbarAction {
    HideFields,
    Sort,
    Filter,
    Import,
    Export,
    Share,
    NewAction,
    AddTab,
}

impl ToolbarAction {
    /// Buttons shown on the toolbar row, left to right. `AddTab` lives in the
    /// tab strip instead.
    pub const TOOLBAR: [Self; 7] = [
        Self::HideFields,
        Self::Sort,
        Self::Filter,
        Self::Import,
        Self::Export,
        Self::Share,
        Self::NewAction,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::HideFields => "Hide fields",
            Self::Sort => "Sort",
            Self::Filter => "Filter",
            Self::Import => "Import",
            Self::Export => "Export",
            Self::Share => "Share",
            Self::NewAction => "New Action",
            Self::AddTab => "Add Tab",
        }
    }
}
