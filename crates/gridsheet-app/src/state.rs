// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::{debug, info};

use crate::columns::{ColumnDescriptor, ColumnKey, HiddenFields};
use crate::model::{SheetTab, ToolbarAction, WorkItem};
use crate::nav::{self, CellCoord, GridBounds, NavDirection};
use crate::seed::{SYNTHETIC_BLANK_ROWS, seed_rows};
use crate::sort::{SortState, apply_sort};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetState {
    pub rows: Vec<WorkItem>,
    pub blank_rows: usize,
    pub hidden: HiddenFields,
    pub sort: Option<SortState>,
    pub selection: Option<CellCoord>,
    pub active_tab: SheetTab,
    pub status_line: Option<String>,
}

impl Default for SheetState {
    fn default() -> Self {
        Self::new(seed_rows(), SYNTHETIC_BLANK_ROWS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetCommand {
    SortBy(ColumnKey),
    SelectCell { row: usize, col: usize },
    ClearSelection,
    Navigate(NavDirection),
    ToggleField(ColumnKey),
    SwitchTab(SheetTab),
    NextTab,
    PrevTab,
    Toolbar(ToolbarAction),
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetEvent {
    Sorted(SortState),
    SelectionChanged(Option<CellCoord>),
    FieldVisibilityChanged { key: ColumnKey, hidden: bool },
    TabChanged(SheetTab),
    ToolbarTriggered(ToolbarAction),
    StatusUpdated(String),
    StatusCleared,
}

impl SheetState {
    pub fn new(rows: Vec<WorkItem>, blank_rows: usize) -> Self {
        Self {
            rows,
            blank_rows,
            hidden: HiddenFields::default(),
            sort: None,
            selection: None,
            active_tab: SheetTab::default(),
            status_line: None,
        }
    }

    pub fn visible_columns(&self) -> Vec<&'static ColumnDescriptor> {
        self.hidden.visible_columns()
    }

    pub fn bounds(&self) -> GridBounds {
        GridBounds {
            rows: self.total_rows(),
            cols: self.visible_columns().len(),
        }
    }

    /// Data rows followed by the blank rows.
    pub fn total_rows(&self) -> usize {
        self.rows.len() + self.blank_rows
    }

    /// Column key under the selection, if any.
    pub fn selected_column(&self) -> Option<ColumnKey> {
        let selection = self.selection?;
        self.visible_columns()
            .get(selection.col)
            .map(|column| column.key)
    }

    /// Data row under the selection. `None` on blank rows.
    pub fn selected_row(&self) -> Option<&WorkItem> {
        self.rows.get(self.selection?.row)
    }

    pub fn dispatch(&mut self, command: SheetCommand) -> Vec<SheetEvent> {
        match command {
            SheetCommand::SortBy(key) => {
                info!(column = key.as_str(), "sorting rows");
                let (sort, rows) = apply_sort(&self.rows, key, self.sort);
                self.sort = Some(sort);
                self.rows = rows;
                vec![SheetEvent::Sorted(sort)]
            }
            SheetCommand::SelectCell { row, col } => {
                let Some(coord) = nav::select_cell(row, col, self.bounds()) else {
                    debug!(row, col, "ignoring selection outside the grid");
                    return Vec::new();
                };
                info!(row = row + 1, column = col + 1, "selected cell");
                self.selection = Some(coord);
                vec![SheetEvent::SelectionChanged(self.selection)]
            }
            SheetCommand::ClearSelection => {
                if self.selection.take().is_none() {
                    return Vec::new();
                }
                vec![SheetEvent::SelectionChanged(None)]
            }
            SheetCommand::Navigate(direction) => {
                let Some(next) = nav::navigate(self.selection, direction, self.bounds()) else {
                    return Vec::new();
                };
                self.selection = Some(next);
                vec![SheetEvent::SelectionChanged(self.selection)]
            }
            SheetCommand::ToggleField(key) => self.toggle_field(key),
            SheetCommand::SwitchTab(tab) => self.switch_tab(tab),
            SheetCommand::NextTab => self.rotate_tab(1),
            SheetCommand::PrevTab => self.rotate_tab(-1),
            SheetCommand::Toolbar(action) => {
                let mut events = Vec::new();
                if action == ToolbarAction::HideFields {
                    events.extend(self.toggle_field(ColumnKey::Url));
                }
                events.push(SheetEvent::ToolbarTriggered(action));
                events
            }
            SheetCommand::SetStatus(message) => {
                self.status_line = Some(message.clone());
                vec![SheetEvent::StatusUpdated(message)]
            }
            SheetCommand::ClearStatus => {
                self.status_line = None;
                vec![SheetEvent::StatusCleared]
            }
        }
    }

    fn toggle_field(&mut self, key: ColumnKey) -> Vec<SheetEvent> {
        info!(column = key.as_str(), "toggling visibility");
        let hidden = self.hidden.toggle(key);
        let mut events = vec![SheetEvent::FieldVisibilityChanged { key, hidden }];

        let clamped = nav::reclamp(self.selection, self.bounds());
        if clamped != self.selection {
            self.selection = clamped;
            events.push(SheetEvent::SelectionChanged(self.selection));
        }
        events
    }

    fn switch_tab(&mut self, tab: SheetTab) -> Vec<SheetEvent> {
        info!(tab = tab.label(), "switched tab");
        self.active_tab = tab;
        vec![SheetEvent::TabChanged(tab)]
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<SheetEvent> {
        let tabs = SheetTab::ALL;
        let current = tabs
            .iter()
            .position(|tab| *tab == self.active_tab)
            .unwrap_or(0) as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.switch_tab(tabs[next])
    }
}
