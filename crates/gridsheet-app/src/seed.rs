// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use std::collections::BTreeSet;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::ids::RowId;
use crate::model::{Priority, WorkItem, WorkStatus};

pub const SYNTHETIC_BLANK_ROWS: usize = 19;

pub const SHEET_TITLE: &str = "Q3 Financial Overview";
pub const SHEET_BREADCRUMB: [&str; 3] = ["Workspace", "Folder 2", "Spreadsheet 3"];
pub const SHEET_OWNER: &str = "John Doe";
/// Inert actions shown beside the sheet title.
pub const SHEET_ACTIONS: [&str; 4] = ["ABC", "Answer a question", "Extract", "+"];

const SHEET_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]-[month]-[year]");

#[allow(clippy::too_many_arguments)]
fn item(
    id: i64,
    job_request: &str,
    submitted: &str,
    status: WorkStatus,
    submitter: &str,
    url: &str,
    assigned: &str,
    priority: Priority,
    due_date: &str,
    est_value: &str,
) -> WorkItem {
    WorkItem {
        id: RowId::new(id),
        job_request: job_request.to_owned(),
        submitted: submitted.to_owned(),
        status,
        submitter: submitter.to_owned(),
        url: url.to_owned(),
        assigned: assigned.to_owned(),
        priority,
        due_date: due_date.to_owned(),
        est_value: est_value.to_owned(),
    }
}

pub fn seed_rows() -> Vec<WorkItem> {
    vec![
        item(
            1,
            "Launch social media campaign for pro...",
            "15-11-2024",
            WorkStatus::InProgress,
            "Aisha Patel",
            "www.aishapatel...",
            "Sophie Choudhury",
            Priority::Medium,
            "20-11-2024",
            "6,200,000",
        ),
        item(
            2,
            "Update press kit for co...",
            "12-11-2024",
            WorkStatus::NeedToStart,
            "Irfan Khan",
            "www.irfankhan...",
            "Tejas Pandey",
            Priority::High,
            "30-10-2024",
            "3,500,000",
        ),
        item(
            3,
            "Finalize user testing feedback for app...",
            "05-12-2024",
            WorkStatus::InProgress,
            "Mark Johnson",
            "www.markjohns...",
            "Rachel Lee",
            Priority::Medium,
            "10-12-2024",
            "4,750,000",
        ),
        item(
            4,
            "Design new features for the website",
            "10-01-2025",
            WorkStatus::Complete,
            "Emily Green",
            "www.emilygreen...",
            "Tom Wright",
            Priority::Low,
            "15-01-2025",
            "6,900,000",
        ),
        item(
            5,
            "Prepare financial report for Q4",
            "25-01-2025",
            WorkStatus::Blocked,
            "Jessica Brown",
            "www.jessicabr...",
            "Kevin Smith",
            Priority::Low,
            "30-01-2025",
            "2,800,000",
        ),
    ]
}

pub fn parse_sheet_date(value: &str) -> Result<Date> {
    Date::parse(value, SHEET_DATE_FORMAT)
        .with_context(|| format!("date {value:?} is not in DD-MM-YYYY form"))
}

/// Checks the invariants a dataset must hold before it is shown: unique ids
/// and well-formed dates. Sorting never relies on the parsed dates.
pub fn validate_rows(rows: &[WorkItem]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for row in rows {
        if !seen.insert(row.id) {
            bail!("row id {} appears more than once", row.id);
        }
        parse_sheet_date(&row.submitted)
            .with_context(|| format!("row {} submitted date", row.id))?;
        parse_sheet_date(&row.due_date).with_context(|| format!("row {} due date", row.id))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_sheet_date, seed_rows, validate_rows};
    use anyhow::Result;
    use time::Month;

    #[test]
    fn seed_rows_are_valid() -> Result<()> {
        let rows = seed_rows();
        assert_eq!(rows.len(), 5);
        validate_rows(&rows)
    }

    #[test]
    fn sheet_dates_are_day_first() -> Result<()> {
        let date = parse_sheet_date("05-12-2024")?;
        assert_eq!(date.day(), 5);
        assert_eq!(date.month(), Month::December);
        assert_eq!(date.year(), 2024);
        Ok(())
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut rows = seed_rows();
        rows[1].id = rows[0].id;
        let error = validate_rows(&rows).expect_err("duplicate id should fail");
        assert!(error.to_string().contains("more than once"));
    }

    #[test]
    fn malformed_dates_are_rejected_with_row_context() {
        let mut rows = seed_rows();
        rows[2].due_date = "2024-12-10".to_owned();
        let error = validate_rows(&rows).expect_err("iso date should fail");
        let message = format!("{error:#}");
        assert!(message.contains("row 3 due date"), "unexpected: {message}");
        assert!(message.contains("DD-MM-YYYY"), "unexpected: {message}");
    }
}
