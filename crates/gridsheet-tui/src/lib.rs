// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod layout;
mod session;

pub use session::TerminalSession;

use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use gridsheet_app::{
    COLUMNS, ColumnKey, NavDirection, Priority, SHEET_ACTIONS, SHEET_BREADCRUMB, SHEET_OWNER,
    SHEET_TITLE, SheetCommand, SheetEvent, SheetState, SortDirection, SortState, ToolbarAction, WorkItem,
    WorkStatus,
};
use layout::{
    ADD_TAB_LABEL, COLUMN_SPACING, ClickTarget, ColumnSlot, GridOffsets, ScreenLayout,
    TOOLBAR_PREFIX,
};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

const BLANK_CELL: &str = "—";
const SORT_ASC_MARK: &str = " ↑";
const SORT_DESC_MARK: &str = " ↓";
const SEARCH_PLACEHOLDER: &str = "[ Search within sheet ]";
const NOTIFICATION_BELL: &str = "[bell]";

/// Receives toolbar button presses. The sheet only reports them; whatever a
/// button actually does lives behind this trait.
pub trait ToolbarHandler {
    fn trigger(&mut self, action: ToolbarAction) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub status_clear_after: Duration,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            status_clear_after: Duration::from_secs(4),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    help_visible: bool,
    status_token: u64,
    status_clear_after: Duration,
    layout: Option<ScreenLayout>,
}

impl ViewData {
    fn offsets(&self) -> GridOffsets {
        self.layout
            .as_ref()
            .map_or_else(GridOffsets::default, |layout| layout.grid.offsets())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    Consumed,
    Ignored,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    SortSelected,
    ToggleColumn(usize),
    HideFields,
    NextTab,
    PrevTab,
    ToggleHelp,
    Escape,
    Quit,
}

pub fn run_app<H: ToolbarHandler>(
    state: &mut SheetState,
    handler: &mut H,
    options: &ViewOptions,
) -> Result<()> {
    let mut session = TerminalSession::start()?;
    let mut view_data = ViewData {
        status_clear_after: options.status_clear_after,
        ..ViewData::default()
    };
    let (internal_tx, internal_rx) = mpsc::channel();
    info!(tab = state.active_tab.label(), rows = state.rows.len(), "view started");

    loop {
        process_internal_events(state, &view_data, &internal_rx);

        let mut drawn = None;
        session
            .terminal()
            .draw(|frame| {
                drawn = Some(render(frame, state, &view_data));
            })
            .context("draw frame")?;
        if drawn.is_some() {
            view_data.layout = drawn;
        }

        if !event::poll(Duration::from_millis(120)).context("poll event")? {
            continue;
        }
        match event::read().context("read event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let outcome = handle_key_event(state, handler, &mut view_data, &internal_tx, key);
                if outcome == KeyOutcome::Quit {
                    break;
                }
            }
            Event::Mouse(mouse) => {
                handle_mouse_event(state, handler, &mut view_data, &internal_tx, mouse);
            }
            _ => {}
        }
    }

    info!("view closed");
    Ok(())
}

fn process_internal_events(
    state: &mut SheetState,
    view_data: &ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(SheetCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64, after: Duration) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(after);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut SheetState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(SheetCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(
        internal_tx,
        view_data.status_token,
        view_data.status_clear_after,
    );
}

/// Dispatches `command`, forwards toolbar presses to `handler` and reports
/// the outcome on the status line.
fn apply_command<H: ToolbarHandler>(
    state: &mut SheetState,
    handler: &mut H,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: SheetCommand,
) -> Vec<SheetEvent> {
    let events = state.dispatch(command);
    let mut status = None;
    for event in &events {
        match event {
            SheetEvent::Sorted(sort) => status = Some(sort_status(*sort)),
            SheetEvent::FieldVisibilityChanged { key, hidden } => {
                let verb = if *hidden { "hidden" } else { "shown" };
                status = Some(format!("column {verb}: {}", key.label()));
            }
            SheetEvent::TabChanged(tab) => status = Some(format!("view {}", tab.label())),
            SheetEvent::ToolbarTriggered(action) => match handler.trigger(*action) {
                Ok(()) if *action == ToolbarAction::HideFields => {}
                Ok(()) => status = Some(format!("{} clicked", action.label())),
                Err(error) => {
                    warn!(
                        action = action.label(),
                        error = %format!("{error:#}"),
                        "toolbar action failed"
                    );
                    status = Some(format!("{} failed: {error:#}", action.label()));
                }
            },
            SheetEvent::SelectionChanged(_)
            | SheetEvent::StatusUpdated(_)
            | SheetEvent::StatusCleared => {}
        }
    }
    if let Some(status) = status {
        emit_status(state, view_data, internal_tx, status);
    }
    events
}

fn sort_status(sort: SortState) -> String {
    format!("sort {} {}", sort.key.label(), sort.direction.as_str())
}

fn nav_direction_for_key(key: KeyEvent) -> Option<NavDirection> {
    match key.code {
        KeyCode::Up => Some(NavDirection::Up),
        KeyCode::Down => Some(NavDirection::Down),
        KeyCode::Left => Some(NavDirection::Left),
        KeyCode::Right => Some(NavDirection::Right),
        _ => None,
    }
}

fn key_action_for(key: KeyEvent) -> Option<KeyAction> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyAction::Quit)
        }
        (KeyCode::Char('q'), KeyModifiers::NONE) => Some(KeyAction::Quit),
        (KeyCode::Char('s'), KeyModifiers::NONE) => Some(KeyAction::SortSelected),
        (KeyCode::Char(digit @ '1'..='9'), KeyModifiers::NONE) => digit
            .to_digit(10)
            .map(|position| KeyAction::ToggleColumn(position as usize - 1)),
        (KeyCode::Char('f'), KeyModifiers::NONE) => Some(KeyAction::HideFields),
        (KeyCode::Tab, _) => Some(KeyAction::NextTab),
        (KeyCode::BackTab, _) => Some(KeyAction::PrevTab),
        (KeyCode::Char('?'), _) => Some(KeyAction::ToggleHelp),
        (KeyCode::Esc, _) => Some(KeyAction::Escape),
        _ => None,
    }
}

fn handle_key_event<H: ToolbarHandler>(
    state: &mut SheetState,
    handler: &mut H,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> KeyOutcome {
    if view_data.help_visible {
        return match key_action_for(key) {
            Some(KeyAction::Quit) => KeyOutcome::Quit,
            Some(KeyAction::ToggleHelp | KeyAction::Escape) => {
                view_data.help_visible = false;
                KeyOutcome::Consumed
            }
            _ => KeyOutcome::Ignored,
        };
    }

    // Arrows only count as handled when something is selected.
    if let Some(direction) = nav_direction_for_key(key) {
        let events = apply_command(
            state,
            handler,
            view_data,
            internal_tx,
            SheetCommand::Navigate(direction),
        );
        return if events.is_empty() {
            KeyOutcome::Ignored
        } else {
            KeyOutcome::Consumed
        };
    }

    let Some(action) = key_action_for(key) else {
        return KeyOutcome::Ignored;
    };

    let command = match action {
        KeyAction::Quit => return KeyOutcome::Quit,
        KeyAction::ToggleHelp => {
            view_data.help_visible = true;
            return KeyOutcome::Consumed;
        }
        KeyAction::SortSelected => {
            let Some(key) = state.selected_column() else {
                emit_status(state, view_data, internal_tx, "select a cell to sort");
                return KeyOutcome::Consumed;
            };
            SheetCommand::SortBy(key)
        }
        KeyAction::ToggleColumn(position) => {
            let Some(column) = COLUMNS.get(position) else {
                return KeyOutcome::Ignored;
            };
            SheetCommand::ToggleField(column.key)
        }
        KeyAction::HideFields => SheetCommand::Toolbar(ToolbarAction::HideFields),
        KeyAction::NextTab => SheetCommand::NextTab,
        KeyAction::PrevTab => SheetCommand::PrevTab,
        KeyAction::Escape => {
            if state.selection.is_none() {
                return KeyOutcome::Ignored;
            }
            SheetCommand::ClearSelection
        }
    };
    apply_command(state, handler, view_data, internal_tx, command);
    KeyOutcome::Consumed
}

fn handle_mouse_event<H: ToolbarHandler>(
    state: &mut SheetState,
    handler: &mut H,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    mouse: MouseEvent,
) -> bool {
    if view_data.help_visible || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return false;
    }
    let Some(target) = view_data
        .layout
        .as_ref()
        .and_then(|layout| layout.hit_test(mouse.column, mouse.row))
    else {
        return false;
    };

    let command = match target {
        ClickTarget::Toolbar(action) => SheetCommand::Toolbar(action),
        ClickTarget::Tab(tab) => SheetCommand::SwitchTab(tab),
        ClickTarget::Header(key) => SheetCommand::SortBy(key),
        ClickTarget::Cell { row, col } => SheetCommand::SelectCell { row, col },
    };
    apply_command(state, handler, view_data, internal_tx, command);
    true
}

fn render(frame: &mut Frame<'_>, state: &SheetState, view_data: &ViewData) -> ScreenLayout {
    let layout = ScreenLayout::compute(frame.area(), state, view_data.offsets());

    render_chrome(frame, layout.chrome);
    render_toolbar(frame, &layout, state);
    render_table(frame, &layout, state);
    render_tab_strip(frame, &layout, state);

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout.status);

    if view_data.help_visible {
        let area = centered_rect(64, 50, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }

    layout
}

fn render_chrome(frame: &mut Frame<'_>, area: Rect) {
    let mut spans = Vec::new();
    for (index, crumb) in SHEET_BREADCRUMB.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
        let style = if index + 1 == SHEET_BREADCRUMB.len() {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(*crumb, style));
    }
    spans.push(Span::raw("   "));
    spans.push(Span::styled(
        SEARCH_PLACEHOLDER,
        Style::default().fg(Color::DarkGray),
    ));
    spans.push(Span::raw("   "));
    spans.push(Span::styled(
        NOTIFICATION_BELL,
        Style::default().fg(Color::DarkGray),
    ));
    spans.push(Span::raw(" "));
    spans.push(Span::styled(SHEET_OWNER, Style::default().fg(Color::Cyan)));

    let chrome = Paragraph::new(Line::from(spans))
        .block(Block::default().title("gridsheet").borders(Borders::ALL));
    frame.render_widget(chrome, area);
}

fn render_toolbar(frame: &mut Frame<'_>, layout: &ScreenLayout, state: &SheetState) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(layout.toolbar);
    frame.render_widget(block, layout.toolbar);
    frame.render_widget(
        Paragraph::new(TOOLBAR_PREFIX).style(Style::default().fg(Color::DarkGray)),
        inner,
    );

    for (area, action) in &layout.toolbar_buttons {
        let active = match action {
            ToolbarAction::HideFields => !state.hidden.is_empty(),
            ToolbarAction::Sort => state.sort.is_some(),
            _ => false,
        };
        let style = if active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        frame.render_widget(
            Paragraph::new(format!("[{}]", action.label())).style(style),
            *area,
        );
    }
}

fn render_tab_strip(frame: &mut Frame<'_>, layout: &ScreenLayout, state: &SheetState) {
    frame.render_widget(Block::default().borders(Borders::ALL), layout.tab_strip);
    for (area, target) in &layout.tabs {
        let (label, style) = match target {
            ClickTarget::Tab(tab) if *tab == state.active_tab => (
                tab.label(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            ClickTarget::Tab(tab) => (tab.label(), Style::default().fg(Color::White)),
            _ => (ADD_TAB_LABEL, Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(Paragraph::new(format!("[{label}]")).style(style), *area);
    }
}

fn render_table(frame: &mut Frame<'_>, layout: &ScreenLayout, state: &SheetState) {
    let grid = &layout.grid;
    let header_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let header_cells = std::iter::once(Cell::from("#").style(header_style)).chain(
        grid.columns
            .iter()
            .map(|slot| Cell::from(header_label(slot, state.sort)).style(header_style)),
    );
    let header = Row::new(header_cells);

    let rows = grid.visible_rows().map(|row_index| {
        let item = state.rows.get(row_index);
        let index_label = item.map_or_else(|| (row_index + 1).to_string(), |item| item.id.to_string());
        let cells = std::iter::once(
            Cell::from(index_label).style(Style::default().fg(Color::DarkGray)),
        )
        .chain(grid.columns.iter().map(|slot| {
            let text = item.map_or(BLANK_CELL, |item| item.value(slot.key));
            let selected = state
                .selection
                .is_some_and(|coord| coord.row == row_index && coord.col == slot.visible_index);
            let style = if selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                cell_style(item, slot.key)
            };
            Cell::from(truncate_label(text, usize::from(slot.width))).style(style)
        }))
        .collect::<Vec<_>>();
        Row::new(cells)
    });

    let table = Table::new(rows, grid.widths())
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .flex(Flex::Start)
        .block(
            Block::default()
                .title(table_title(state))
                .title(sheet_actions_line())
                .borders(Borders::ALL),
        );
    frame.render_widget(table, layout.table);
}

fn sheet_actions_line() -> Line<'static> {
    let mut spans = Vec::new();
    for (index, action) in SHEET_ACTIONS.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("[{action}]"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans).right_aligned()
}

fn header_label(slot: &ColumnSlot, sort: Option<SortState>) -> String {
    let label = slot.key.label();
    let mark = match sort {
        Some(sort) if sort.key == slot.key => match sort.direction {
            SortDirection::Asc => SORT_ASC_MARK,
            SortDirection::Desc => SORT_DESC_MARK,
        },
        _ => "",
    };
    let room = usize::from(slot.width).saturating_sub(mark.chars().count());
    format!("{}{mark}", truncate_label(label, room))
}

fn cell_style(item: Option<&WorkItem>, key: ColumnKey) -> Style {
    let Some(item) = item else {
        return Style::default().fg(Color::DarkGray);
    };
    match key {
        ColumnKey::Status => Style::default().fg(status_color(item.status)),
        ColumnKey::Priority => Style::default().fg(priority_color(item.priority)),
        ColumnKey::Url => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED),
        _ => Style::default(),
    }
}

fn status_color(status: WorkStatus) -> Color {
    match status {
        WorkStatus::InProgress => Color::Yellow,
        WorkStatus::NeedToStart => Color::Blue,
        WorkStatus::Complete => Color::Green,
        WorkStatus::Blocked => Color::Red,
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

fn table_title(state: &SheetState) -> String {
    let mut parts = vec![format!(
        "{} · {} r:{} c:{}/{}",
        SHEET_TITLE,
        state.active_tab.label(),
        state.rows.len(),
        state.visible_columns().len(),
        COLUMNS.len(),
    )];
    if let Some(sort) = state.sort {
        parts.push(format!(
            "sort {}:{}",
            sort.key.as_str(),
            sort.direction.as_str()
        ));
    }
    if !state.hidden.is_empty() {
        parts.push(format!("hidden {}", state.hidden.len()));
    }
    parts.join(" | ")
}

fn status_text(state: &SheetState, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }

    let position = match (state.selection, state.selected_column()) {
        (Some(coord), Some(key)) => {
            format!("r{} c{} {}", coord.row + 1, coord.col + 1, key.label())
        }
        _ => "no selection".to_owned(),
    };
    let hints = "click/arrows select | s sort | 1-9 cols | f hide url | tab views | ? help | q quit";
    match &state.status_line {
        Some(status) => format!("{position} | {status} | {hints}"),
        None => format!("{position} | {hints}"),
    }
}

fn help_overlay_text() -> &'static str {
    "mouse: click cell select | click header sort | click tab switch | click button run\n\
arrows: move selection (needs a selected cell, stops at edges)\n\
s: sort by selected column (again flips asc/desc)\n\
1-9: hide/show nth column | f: hide fields (url)\n\
tab/shift+tab: next/previous view\n\
esc: clear selection or close help | ? help | q or ctrl+c quit"
}

fn truncate_label(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_owned();
    }
    let kept: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
