// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Screen geometry shared by rendering and mouse hit testing. Everything here
//! is recomputed from the frame area and sheet state on every draw.

use gridsheet_app::{ColumnKey, SheetState, SheetTab, ToolbarAction};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::widgets::Block;

pub(crate) const INDEX_WIDTH: u16 = 4;
pub(crate) const COLUMN_SPACING: u16 = 1;
pub(crate) const TOOLBAR_PREFIX: &str = "Tool bar ▾ ";
pub(crate) const ADD_TAB_LABEL: &str = "+";
const BUTTON_GAP: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClickTarget {
    Toolbar(ToolbarAction),
    Tab(SheetTab),
    Header(ColumnKey),
    Cell { row: usize, col: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnSlot {
    pub key: ColumnKey,
    pub visible_index: usize,
    pub x: u16,
    pub width: u16,
}

impl ColumnSlot {
    fn spans(&self, column: u16) -> bool {
        column >= self.x && column < self.x.saturating_add(self.width)
    }
}

/// Scroll position of the grid: the first row and the first visible column
/// drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct GridOffsets {
    pub row: usize,
    pub col: usize,
}

/// Placement of the header row and the window of rows and columns currently
/// drawn. The column window starts at `col_offset` and follows the selected
/// column the same way the row window follows the selected row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct GridGeometry {
    pub header_y: u16,
    pub body: Rect,
    pub columns: Vec<ColumnSlot>,
    pub row_offset: usize,
    pub col_offset: usize,
    pub total_rows: usize,
}

impl GridGeometry {
    pub(crate) fn compute(inner: Rect, state: &SheetState, previous: GridOffsets) -> Self {
        if inner.height < 2 || inner.width <= INDEX_WIDTH + COLUMN_SPACING {
            return Self {
                header_y: inner.y,
                body: Rect::new(inner.x, inner.y, inner.width, 0),
                total_rows: state.total_rows(),
                ..Self::default()
            };
        }

        let body = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
        let right = inner.right();
        let start = inner.x + INDEX_WIDTH + COLUMN_SPACING;
        let visible = state.visible_columns();
        let widths = visible
            .iter()
            .map(|column| column.width.cells())
            .collect::<Vec<_>>();
        let col_offset = column_offset(
            &widths,
            state.selection.map(|coord| coord.col),
            previous.col,
            right - start,
        );

        let mut x = start;
        let mut columns = Vec::new();
        for (visible_index, column) in visible.iter().enumerate().skip(col_offset) {
            let mut width = column.width.cells();
            if columns.is_empty() {
                width = width.min(right - x);
            }
            if width == 0 || x.saturating_add(width) > right {
                break;
            }
            columns.push(ColumnSlot {
                key: column.key,
                visible_index,
                x,
                width,
            });
            x = x.saturating_add(width + COLUMN_SPACING);
        }

        let total_rows = state.total_rows();
        Self {
            header_y: inner.y,
            body,
            columns,
            row_offset: scroll_offset(
                state.selection.map(|coord| coord.row),
                previous.row,
                usize::from(body.height),
                total_rows,
            ),
            col_offset,
            total_rows,
        }
    }

    pub(crate) fn offsets(&self) -> GridOffsets {
        GridOffsets {
            row: self.row_offset,
            col: self.col_offset,
        }
    }

    /// Rows drawn this frame, as indices into the addressable row space.
    pub(crate) fn visible_rows(&self) -> std::ops::Range<usize> {
        let end = self
            .row_offset
            .saturating_add(usize::from(self.body.height))
            .min(self.total_rows);
        self.row_offset.min(end)..end
    }

    pub(crate) fn widths(&self) -> Vec<Constraint> {
        std::iter::once(Constraint::Length(INDEX_WIDTH))
            .chain(
                self.columns
                    .iter()
                    .map(|slot| Constraint::Length(slot.width)),
            )
            .collect()
    }

    fn hit_test(&self, position: Position) -> Option<ClickTarget> {
        let slot = self
            .columns
            .iter()
            .find(|slot| slot.spans(position.x))?;
        if position.y == self.header_y {
            return Some(ClickTarget::Header(slot.key));
        }
        if !self.body.contains(position) {
            return None;
        }
        let row = self.row_offset + usize::from(position.y - self.body.y);
        (row < self.total_rows).then_some(ClickTarget::Cell {
            row,
            col: slot.visible_index,
        })
    }
}

/// First visible column to draw so that the selected column fits in
/// `available` cells, moving the window as little as possible. A selected
/// column wider than the whole table still becomes the first one drawn.
pub(crate) fn column_offset(
    widths: &[u16],
    selected: Option<usize>,
    previous: usize,
    available: u16,
) -> usize {
    if widths.is_empty() {
        return 0;
    }
    let mut offset = previous.min(widths.len() - 1);
    let Some(selected) = selected.map(|col| col.min(widths.len() - 1)) else {
        return offset;
    };
    if selected < offset {
        return selected;
    }
    while offset < selected && span_width(&widths[offset..=selected]) > available {
        offset += 1;
    }
    offset
}

fn span_width(widths: &[u16]) -> u16 {
    let gaps = u16::try_from(widths.len().saturating_sub(1)).unwrap_or(u16::MAX);
    widths
        .iter()
        .fold(gaps.saturating_mul(COLUMN_SPACING), |total, width| {
            total.saturating_add(*width)
        })
}

/// Keeps the selected row inside a window of `visible_rows` rows, moving the
/// window as little as possible.
pub(crate) fn scroll_offset(
    selected_row: Option<usize>,
    previous: usize,
    visible_rows: usize,
    total_rows: usize,
) -> usize {
    if visible_rows == 0 {
        return 0;
    }
    let max_offset = total_rows.saturating_sub(visible_rows);
    let mut offset = previous.min(max_offset);
    if let Some(row) = selected_row {
        if row < offset {
            offset = row;
        } else if row >= offset + visible_rows {
            offset = row + 1 - visible_rows;
        }
    }
    offset
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ScreenLayout {
    pub chrome: Rect,
    pub toolbar: Rect,
    pub toolbar_buttons: Vec<(Rect, ToolbarAction)>,
    pub table: Rect,
    pub grid: GridGeometry,
    pub tab_strip: Rect,
    pub tabs: Vec<(Rect, ClickTarget)>,
    pub status: Rect,
}

impl ScreenLayout {
    pub(crate) fn compute(area: Rect, state: &SheetState, previous: GridOffsets) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(4),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let toolbar_inner = Block::bordered().inner(rows[1]);
        let prefix_width = label_width(TOOLBAR_PREFIX);
        let toolbar_buttons = strip_layout(
            Rect {
                x: toolbar_inner.x.saturating_add(prefix_width),
                width: toolbar_inner.width.saturating_sub(prefix_width),
                ..toolbar_inner
            },
            ToolbarAction::TOOLBAR
                .iter()
                .map(|action| (*action, action.label())),
        );

        let tab_inner = Block::bordered().inner(rows[3]);
        let tabs = strip_layout(
            tab_inner,
            SheetTab::ALL
                .iter()
                .map(|tab| (ClickTarget::Tab(*tab), tab.label()))
                .chain(std::iter::once((
                    ClickTarget::Toolbar(ToolbarAction::AddTab),
                    ADD_TAB_LABEL,
                ))),
        );

        let grid = GridGeometry::compute(Block::bordered().inner(rows[2]), state, previous);

        Self {
            chrome: rows[0],
            toolbar: rows[1],
            toolbar_buttons,
            table: rows[2],
            grid,
            tab_strip: rows[3],
            tabs,
            status: rows[4],
        }
    }

    pub(crate) fn hit_test(&self, column: u16, row: u16) -> Option<ClickTarget> {
        let position = Position::new(column, row);
        if let Some((_, action)) = self
            .toolbar_buttons
            .iter()
            .find(|(rect, _)| rect.contains(position))
        {
            return Some(ClickTarget::Toolbar(*action));
        }
        if let Some((_, target)) = self.tabs.iter().find(|(rect, _)| rect.contains(position)) {
            return Some(*target);
        }
        if self.table.contains(position) {
            return self.grid.hit_test(position);
        }
        None
    }
}

pub(crate) fn label_width(label: &str) -> u16 {
    u16::try_from(label.chars().count()).unwrap_or(u16::MAX)
}

/// Lays bracketed labels out left to right on one line, dropping whatever
/// does not fit.
fn strip_layout<T>(area: Rect, items: impl IntoIterator<Item = (T, &'static str)>) -> Vec<(Rect, T)> {
    let mut placed = Vec::new();
    if area.height == 0 {
        return placed;
    }
    let right = area.right();
    let mut x = area.x;
    for (target, label) in items {
        let width = label_width(label).saturating_add(2);
        if x.saturating_add(width) > right {
            break;
        }
        placed.push((Rect::new(x, area.y, width, 1), target));
        x = x.saturating_add(width + BUTTON_GAP);
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::{
        ClickTarget, GridGeometry, GridOffsets, INDEX_WIDTH, ScreenLayout, column_offset,
        scroll_offset,
    };
    use gridsheet_app::{CellCoord, ColumnKey, SheetState, SheetTab, ToolbarAction};
    use ratatui::layout::Rect;

    fn wide_area() -> Rect {
        Rect::new(0, 0, 200, 40)
    }

    #[test]
    fn scroll_offset_follows_selection_minimally() {
        assert_eq!(scroll_offset(None, 0, 10, 24), 0);
        assert_eq!(scroll_offset(Some(9), 0, 10, 24), 0);
        assert_eq!(scroll_offset(Some(10), 0, 10, 24), 1);
        assert_eq!(scroll_offset(Some(23), 0, 10, 24), 14);
        assert_eq!(scroll_offset(Some(3), 14, 10, 24), 3);
        assert_eq!(scroll_offset(None, 50, 10, 24), 14);
        assert_eq!(scroll_offset(Some(5), 3, 0, 24), 0);
    }

    #[test]
    fn columns_are_placed_after_the_index_column() {
        let state = SheetState::default();
        let grid = GridGeometry::compute(Rect::new(1, 1, 198, 20), &state, GridOffsets::default());
        assert_eq!(grid.columns.len(), 9);
        assert_eq!(grid.columns[0].x, 1 + INDEX_WIDTH + 1);
        assert_eq!(grid.columns[0].key, ColumnKey::JobRequest);
        let second = grid.columns[1];
        assert_eq!(second.x, grid.columns[0].x + grid.columns[0].width + 1);
        assert_eq!(grid.widths().len(), 10);
    }

    #[test]
    fn column_offset_follows_selection_minimally() {
        let widths = [30, 13, 13, 17, 17, 17, 8, 13, 13];
        assert_eq!(column_offset(&widths, None, 0, 73), 0);
        assert_eq!(column_offset(&widths, Some(2), 0, 73), 0);
        assert_eq!(column_offset(&widths, Some(3), 0, 73), 1);
        assert_eq!(column_offset(&widths, Some(8), 1, 73), 4);
        assert_eq!(column_offset(&widths, Some(6), 4, 73), 4);
        assert_eq!(column_offset(&widths, Some(0), 5, 73), 0);
        assert_eq!(column_offset(&widths, None, 20, 73), 8);
        assert_eq!(column_offset(&widths, Some(4), 0, 10), 4);
        assert_eq!(column_offset(&[], Some(4), 3, 73), 0);
    }

    #[test]
    fn narrow_tables_window_columns_around_the_selection() {
        let mut state = SheetState::default();
        let grid = GridGeometry::compute(Rect::new(0, 0, 60, 10), &state, GridOffsets::default());
        let keys = grid.columns.iter().map(|slot| slot.key).collect::<Vec<_>>();
        assert_eq!(keys, vec![ColumnKey::JobRequest, ColumnKey::Submitted]);

        state.selection = Some(CellCoord::new(0, 4));
        let grid = GridGeometry::compute(Rect::new(0, 0, 60, 10), &state, grid.offsets());
        let keys = grid.columns.iter().map(|slot| slot.key).collect::<Vec<_>>();
        assert_eq!(grid.col_offset, 2);
        assert_eq!(
            keys,
            vec![ColumnKey::Status, ColumnKey::Submitter, ColumnKey::Url]
        );
        assert_eq!(grid.columns[0].x, INDEX_WIDTH + 1);
        assert_eq!(grid.columns[2].visible_index, 4);
    }

    #[test]
    fn oversized_first_column_is_clipped_to_the_table() {
        let mut state = SheetState::default();
        state.selection = Some(CellCoord::new(0, 0));
        let grid = GridGeometry::compute(Rect::new(0, 0, 20, 10), &state, GridOffsets::default());
        assert_eq!(grid.columns.len(), 1);
        assert_eq!(grid.columns[0].key, ColumnKey::JobRequest);
        assert_eq!(grid.columns[0].width, 20 - INDEX_WIDTH - 1);
    }

    #[test]
    fn clicks_in_a_scrolled_column_window_keep_visible_indices() {
        let mut state = SheetState::default();
        state.selection = Some(CellCoord::new(0, 8));
        let layout = ScreenLayout::compute(Rect::new(0, 0, 80, 24), &state, GridOffsets::default());
        let grid = &layout.grid;
        assert_eq!(grid.col_offset, 4);
        let due = grid
            .columns
            .iter()
            .find(|slot| slot.key == ColumnKey::DueDate)
            .copied()
            .expect("due date visible");
        assert_eq!(
            layout.hit_test(due.x, grid.header_y),
            Some(ClickTarget::Header(ColumnKey::DueDate))
        );
        assert_eq!(
            layout.hit_test(due.x, grid.body.y + 1),
            Some(ClickTarget::Cell { row: 1, col: 7 })
        );
    }

    #[test]
    fn header_and_body_clicks_resolve_to_visible_positions() {
        let mut state = SheetState::default();
        state.hidden.toggle(ColumnKey::Url);
        let layout = ScreenLayout::compute(wide_area(), &state, GridOffsets::default());
        let grid = &layout.grid;
        let assigned = grid
            .columns
            .iter()
            .find(|slot| slot.key == ColumnKey::Assigned)
            .copied()
            .expect("assigned visible");
        assert_eq!(assigned.visible_index, 4);

        assert_eq!(
            layout.hit_test(assigned.x, grid.header_y),
            Some(ClickTarget::Header(ColumnKey::Assigned))
        );
        assert_eq!(
            layout.hit_test(assigned.x + 1, grid.body.y + 2),
            Some(ClickTarget::Cell { row: 2, col: 4 })
        );
        assert_eq!(layout.hit_test(grid.body.x, grid.body.y), None);
    }

    #[test]
    fn clicks_below_the_last_row_are_ignored() {
        let state = SheetState::new(Vec::new(), 2);
        let layout = ScreenLayout::compute(wide_area(), &state, GridOffsets::default());
        let first = layout.grid.columns[0];
        assert_eq!(
            layout.hit_test(first.x, layout.grid.body.y + 1),
            Some(ClickTarget::Cell { row: 1, col: 0 })
        );
        assert_eq!(layout.hit_test(first.x, layout.grid.body.y + 2), None);
    }

    #[test]
    fn scrolled_body_offsets_row_indices() {
        let mut state = SheetState::default();
        state.selection = Some(CellCoord::new(23, 0));
        let layout = ScreenLayout::compute(Rect::new(0, 0, 200, 25), &state, GridOffsets::default());
        let grid = &layout.grid;
        assert!(grid.row_offset > 0);
        assert_eq!(grid.visible_rows().end, 24);
        let first = grid.columns[0];
        assert_eq!(
            layout.hit_test(first.x, grid.body.y),
            Some(ClickTarget::Cell {
                row: grid.row_offset,
                col: 0
            })
        );
    }

    #[test]
    fn toolbar_and_tab_strips_are_clickable() {
        let state = SheetState::default();
        let layout = ScreenLayout::compute(wide_area(), &state, GridOffsets::default());

        let (export, _) = layout
            .toolbar_buttons
            .iter()
            .find(|(_, action)| *action == ToolbarAction::Export)
            .copied()
            .expect("export button placed");
        assert_eq!(
            layout.hit_test(export.x, export.y),
            Some(ClickTarget::Toolbar(ToolbarAction::Export))
        );

        let (pending, _) = layout.tabs[1];
        assert_eq!(
            layout.hit_test(pending.x + 1, pending.y),
            Some(ClickTarget::Tab(SheetTab::Pending))
        );
        let (add, target) = layout.tabs[4];
        assert_eq!(target, ClickTarget::Toolbar(ToolbarAction::AddTab));
        assert_eq!(layout.hit_test(add.x, add.y), Some(target));
    }
}
