// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Single-column sorting.
//!
//! Values are compared as the text they are stored as. Dates in `DD-MM-YYYY`
//! form and comma-grouped numbers therefore sort lexicographically, and
//! priorities sort `High`, `Low`, `Medium`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::columns::ColumnKey;
use crate::model::WorkItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: ColumnKey,
    pub direction: SortDirection,
}

/// Only a repeat click on the active ascending key flips to descending.
/// Everything else starts over at ascending.
pub fn next_direction(current: Option<SortState>, key: ColumnKey) -> SortDirection {
    match current {
        Some(SortState {
            key: active,
            direction: SortDirection::Asc,
        }) if active == key => SortDirection::Desc,
        _ => SortDirection::Asc,
    }
}

pub fn compare_values(left: &str, right: &str) -> Ordering {
    left.cmp(right)
}

/// Returns `rows` reordered by `key`. Stable: equal values keep their input
/// order in both directions.
pub fn sorted_rows(rows: &[WorkItem], key: ColumnKey, direction: SortDirection) -> Vec<WorkItem> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|left, right| {
        let order = compare_values(left.value(key), right.value(key));
        match direction {
            SortDirection::Asc => order,
            SortDirection::Desc => order.reverse(),
        }
    });
    sorted
}

pub fn apply_sort(
    rows: &[WorkItem],
    key: ColumnKey,
    current: Option<SortState>,
) -> (SortState, Vec<WorkItem>) {
    let direction = next_direction(current, key);
    (SortState { key, direction }, sorted_rows(rows, key, direction))
}
