// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use gridsheet_app::{Priority, RowId, SheetState, WorkItem, WorkStatus};
use time::macros::{date, format_description};
use time::{Date, Duration};

const JOBS: [&str; 10] = [
    "Refresh landing page copy",
    "Audit vendor contracts",
    "Plan offsite logistics",
    "Migrate billing exports",
    "Draft hiring rubric",
    "Review brand guidelines",
    "Prepare board deck",
    "Clean up CRM duplicates",
    "Negotiate print quote",
    "Ship onboarding survey",
];

const PEOPLE: [&str; 12] = [
    "Avery Walker",
    "Jordan Martin",
    "Taylor Hill",
    "Riley Evans",
    "Morgan Lopez",
    "Casey Gray",
    "Quinn Ward",
    "Parker Young",
    "Drew Diaz",
    "Kai Reed",
    "Robin Turner",
    "Rowan Price",
];

const BASE_DATE: Date = date!(2024 - 10 - 01);

/// Minimal work item with the given id and job text. Everything else is
/// filled with fixed values so callers only spell out what they assert on.
pub fn work_item(id: i64, job_request: &str) -> WorkItem {
    WorkItem {
        id: RowId::new(id),
        job_request: job_request.to_owned(),
        submitted: "01-10-2024".to_owned(),
        status: WorkStatus::NeedToStart,
        submitter: "Avery Walker".to_owned(),
        url: format!("www.item{id}..."),
        assigned: "Jordan Martin".to_owned(),
        priority: Priority::Medium,
        due_date: "15-10-2024".to_owned(),
        est_value: "1,000,000".to_owned(),
    }
}

pub fn with_priority(mut item: WorkItem, priority: Priority) -> WorkItem {
    item.priority = priority;
    item
}

pub fn with_status(mut item: WorkItem, status: WorkStatus) -> WorkItem {
    item.status = status;
    item
}

pub fn with_est_value(mut item: WorkItem, est_value: &str) -> WorkItem {
    item.est_value = est_value.to_owned();
    item
}

/// Deterministic dataset of `count` rows with ids starting at 1. Values cycle
/// through fixed tables so ties occur in every column.
pub fn generated_rows(count: usize) -> Vec<WorkItem> {
    (0..count).map(generated_row).collect()
}

fn generated_row(index: usize) -> WorkItem {
    let id = index as i64 + 1;
    let submitted = BASE_DATE + Duration::days((index * 3 % 90) as i64);
    let due = submitted + Duration::days(7 + (index % 5) as i64 * 7);
    let submitter = PEOPLE[index % PEOPLE.len()];
    let value = 250_000 + (index * 137_500 % 9_000_000);

    WorkItem {
        id: RowId::new(id),
        job_request: JOBS[index % JOBS.len()].to_owned(),
        submitted: sheet_date(submitted),
        status: WorkStatus::ALL[index % WorkStatus::ALL.len()],
        submitter: submitter.to_owned(),
        url: format!(
            "www.{}...",
            submitter
                .split_whitespace()
                .next()
                .unwrap_or("item")
                .to_ascii_lowercase()
        ),
        assigned: PEOPLE[(index + 5) % PEOPLE.len()].to_owned(),
        priority: Priority::ALL[index % Priority::ALL.len()],
        due_date: sheet_date(due),
        est_value: group_thousands(value),
    }
}

fn sheet_date(date: Date) -> String {
    date.format(format_description!("[day]-[month]-[year]"))
        .unwrap_or_default()
}

fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Sheet over `rows` with the standard blank-row tail.
pub fn sheet_with_rows(rows: Vec<WorkItem>) -> SheetState {
    SheetState::new(rows, gridsheet_app::SYNTHETIC_BLANK_ROWS)
}
