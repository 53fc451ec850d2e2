// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use gridsheet_app::{
    COLUMNS, CellCoord, ColumnKey, NavDirection, Priority, SheetCommand, SheetState,
    SortDirection, WorkItem, WorkStatus, sorted_rows,
};
use gridsheet_testkit::{
    generated_rows, sheet_with_rows, with_est_value, with_priority, with_status, work_item,
};

fn press(state: &mut SheetState, direction: NavDirection, times: usize) {
    for _ in 0..times {
        state.dispatch(SheetCommand::Navigate(direction));
    }
}

fn ids(rows: &[WorkItem]) -> Vec<i64> {
    rows.iter().map(|row| row.id.get()).collect()
}

#[test]
fn down_arrow_scenario_saturates_at_last_blank_row() {
    let mut state = SheetState::default();
    assert_eq!(state.bounds().rows, 24);

    state.dispatch(SheetCommand::SelectCell { row: 0, col: 0 });
    press(&mut state, NavDirection::Down, 4);
    assert_eq!(state.selection, Some(CellCoord::new(4, 0)));

    press(&mut state, NavDirection::Down, 20);
    assert_eq!(state.selection, Some(CellCoord::new(23, 0)));

    press(&mut state, NavDirection::Right, 30);
    assert_eq!(state.selection, Some(CellCoord::new(23, 8)));
}

#[test]
fn sorting_by_priority_keeps_the_lexicographic_quirk() {
    let mut state = SheetState::default();
    state.dispatch(SheetCommand::SortBy(ColumnKey::Priority));
    let order = state
        .rows
        .iter()
        .map(|row| row.priority)
        .collect::<Vec<_>>();
    assert_eq!(
        order,
        vec![
            Priority::High,
            Priority::Low,
            Priority::Low,
            Priority::Medium,
            Priority::Medium,
        ]
    );
}

#[test]
fn three_sorts_on_one_column_go_asc_desc_asc() {
    let rows = generated_rows(30);
    for column in COLUMNS {
        let mut state = sheet_with_rows(rows.clone());

        state.dispatch(SheetCommand::SortBy(column.key));
        assert_eq!(
            state.sort.map(|sort| sort.direction),
            Some(SortDirection::Asc)
        );
        let ascending = state.rows.clone();
        assert!(
            ascending
                .windows(2)
                .all(|pair| pair[0].value(column.key) <= pair[1].value(column.key)),
            "{} not ascending",
            column.key.as_str()
        );

        state.dispatch(SheetCommand::SortBy(column.key));
        assert_eq!(
            state.sort.map(|sort| sort.direction),
            Some(SortDirection::Desc)
        );
        assert!(
            state
                .rows
                .windows(2)
                .all(|pair| pair[0].value(column.key) >= pair[1].value(column.key)),
            "{} not descending",
            column.key.as_str()
        );

        state.dispatch(SheetCommand::SortBy(column.key));
        assert_eq!(
            state.sort.map(|sort| sort.direction),
            Some(SortDirection::Asc)
        );
    }
}

#[test]
fn ascending_sort_of_sorted_rows_is_unchanged() {
    let rows = generated_rows(50);
    for column in COLUMNS {
        let once = sorted_rows(&rows, column.key, SortDirection::Asc);
        let twice = sorted_rows(&once, column.key, SortDirection::Asc);
        assert_eq!(ids(&once), ids(&twice), "{}", column.key.as_str());
    }
}

#[test]
fn estimated_values_sort_as_text() {
    let rows = vec![
        with_est_value(work_item(1, "big"), "10,000,000"),
        with_est_value(work_item(2, "small"), "950,000"),
        with_est_value(work_item(3, "mid"), "2,500,000"),
    ];
    let sorted = sorted_rows(&rows, ColumnKey::EstValue, SortDirection::Asc);
    assert_eq!(ids(&sorted), vec![1, 3, 2]);
}

#[test]
fn status_sorts_by_label() {
    let rows = vec![
        with_status(work_item(1, "a"), WorkStatus::NeedToStart),
        with_status(work_item(2, "b"), WorkStatus::Blocked),
        with_status(work_item(3, "c"), WorkStatus::InProgress),
        with_status(work_item(4, "d"), WorkStatus::Complete),
    ];
    let sorted = sorted_rows(&rows, ColumnKey::Status, SortDirection::Asc);
    assert_eq!(ids(&sorted), vec![2, 4, 3, 1]);
}

#[test]
fn ties_keep_input_order() {
    let rows = vec![
        with_priority(work_item(7, "x"), Priority::Low),
        with_priority(work_item(3, "y"), Priority::High),
        with_priority(work_item(5, "z"), Priority::Low),
        with_priority(work_item(1, "w"), Priority::Low),
    ];
    let ascending = sorted_rows(&rows, ColumnKey::Priority, SortDirection::Asc);
    assert_eq!(ids(&ascending), vec![3, 7, 5, 1]);

    let descending = sorted_rows(&rows, ColumnKey::Priority, SortDirection::Desc);
    assert_eq!(ids(&descending), vec![7, 5, 1, 3]);
}

#[test]
fn hiding_url_shifts_assigned_into_its_slot() {
    let mut state = SheetState::default();
    let url_index = state
        .visible_columns()
        .iter()
        .position(|column| column.key == ColumnKey::Url)
        .expect("url visible");

    state.dispatch(SheetCommand::ToggleField(ColumnKey::Url));
    state.dispatch(SheetCommand::SelectCell {
        row: 1,
        col: url_index,
    });
    assert_eq!(state.selected_column(), Some(ColumnKey::Assigned));
    assert_eq!(state.bounds().cols, 8);

    state.dispatch(SheetCommand::ToggleField(ColumnKey::Url));
    assert_eq!(state.selected_column(), Some(ColumnKey::Url));
    assert_eq!(state.bounds().cols, 9);
}

#[test]
fn navigation_respects_shrunken_column_bound() {
    let mut state = SheetState::default();
    state.dispatch(SheetCommand::ToggleField(ColumnKey::DueDate));
    state.dispatch(SheetCommand::ToggleField(ColumnKey::EstValue));
    state.dispatch(SheetCommand::SelectCell { row: 0, col: 0 });

    press(&mut state, NavDirection::Right, 12);
    assert_eq!(state.selection, Some(CellCoord::new(0, 6)));
    assert_eq!(state.selected_column(), Some(ColumnKey::Priority));
}

#[test]
fn bigger_datasets_extend_the_row_bound() {
    let mut state = sheet_with_rows(generated_rows(40));
    assert_eq!(state.bounds().rows, 59);

    state.dispatch(SheetCommand::SelectCell { row: 58, col: 0 });
    press(&mut state, NavDirection::Down, 3);
    assert_eq!(state.selection, Some(CellCoord::new(58, 0)));
    press(&mut state, NavDirection::Up, 100);
    assert_eq!(state.selection, Some(CellCoord::new(0, 0)));
}
