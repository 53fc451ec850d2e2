// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

/// A selected cell. `col` indexes the visible columns, not the full
/// descriptor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Addressable grid size: data rows plus blank rows, by visible columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub rows: usize,
    pub cols: usize,
}

impl GridBounds {
    pub const fn contains(self, coord: CellCoord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }
}

/// Moves one cell in `direction`, saturating at the edges. `None` stays
/// `None`: only a direct selection creates the first coordinate.
pub fn navigate(
    selection: Option<CellCoord>,
    direction: NavDirection,
    bounds: GridBounds,
) -> Option<CellCoord> {
    let current = selection?;
    if bounds.rows == 0 || bounds.cols == 0 {
        return None;
    }

    let last_row = bounds.rows - 1;
    let last_col = bounds.cols - 1;
    let next = match direction {
        NavDirection::Up => CellCoord::new(current.row.saturating_sub(1), current.col),
        NavDirection::Down => CellCoord::new(current.row.saturating_add(1), current.col),
        NavDirection::Left => CellCoord::new(current.row, current.col.saturating_sub(1)),
        NavDirection::Right => CellCoord::new(current.row, current.col.saturating_add(1)),
    };
    Some(CellCoord::new(next.row.min(last_row), next.col.min(last_col)))
}

/// Direct selection. Out-of-range coordinates are rejected rather than
/// clamped.
pub fn select_cell(row: usize, col: usize, bounds: GridBounds) -> Option<CellCoord> {
    let coord = CellCoord::new(row, col);
    bounds.contains(coord).then_some(coord)
}

/// Brings a selection back inside `bounds` after the grid shrank. Clears it
/// when there is nothing left to select.
pub fn reclamp(selection: Option<CellCoord>, bounds: GridBounds) -> Option<CellCoord> {
    let current = selection?;
    if bounds.rows == 0 || bounds.cols == 0 {
        return None;
    }
    Some(CellCoord::new(
        current.row.min(bounds.rows - 1),
        current.col.min(bounds.cols - 1),
    ))
}
