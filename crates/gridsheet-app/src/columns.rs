// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::WorkItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColumnKey {
    JobRequest,
    Submitted,
    Status,
    Submitter,
    Url,
    Assigned,
    Priority,
    DueDate,
    EstValue,
}

impl ColumnKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JobRequest => "jobRequest",
            Self::Submitted => "submitted",
            Self::Status => "status",
            Self::Submitter => "submitter",
            Self::Url => "url",
            Self::Assigned => "assigned",
            Self::Priority => "priority",
            Self::DueDate => "dueDate",
            Self::EstValue => "estValue",
        }
    }

    pub fn descriptor(self) -> &'static ColumnDescriptor {
        // COLUMNS holds exactly one descriptor per key, in declaration order.
        &COLUMNS[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.descriptor().label
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidthClass {
    Narrow,
    Regular,
    Relaxed,
    Wide,
}

impl WidthClass {
    /// Width in terminal cells.
    pub const fn cells(self) -> u16 {
        match self {
            Self::Narrow => 8,
            Self::Regular => 13,
            Self::Relaxed => 17,
            Self::Wide => 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub key: ColumnKey,
    pub label: &'static str,
    pub width: WidthClass,
}

pub const COLUMNS: [ColumnDescriptor; 9] = [
    ColumnDescriptor {
        key: ColumnKey::JobRequest,
        label: "Job Request",
        width: WidthClass::Wide,
    },
    ColumnDescriptor {
        key: ColumnKey::Submitted,
        label: "Submitted",
        width: WidthClass::Regular,
    },
    ColumnDescriptor {
        key: ColumnKey::Status,
        label: "Status",
        width: WidthClass::Regular,
    },
    ColumnDescriptor {
        key: ColumnKey::Submitter,
        label: "Submitter",
        width: WidthClass::Relaxed,
    },
    ColumnDescriptor {
        key: ColumnKey::Url,
        label: "URL",
        width: WidthClass::Relaxed,
    },
    ColumnDescriptor {
        key: ColumnKey::Assigned,
        label: "Assigned",
        width: WidthClass::Relaxed,
    },
    ColumnDescriptor {
        key: ColumnKey::Priority,
        label: "Priority",
        width: WidthClass::Narrow,
    },
    ColumnDescriptor {
        key: ColumnKey::DueDate,
        label: "Due Date",
        width: WidthClass::Regular,
    },
    ColumnDescriptor {
        key: ColumnKey::EstValue,
        label: "Est. Value",
        width: WidthClass::Regular,
    },
];

impl WorkItem {
    /// The stored text for `key`. Status and priority yield their display
    /// label, which is also what sorting compares.
    pub fn value(&self, key: ColumnKey) -> &str {
        match key {
            ColumnKey::JobRequest => &self.job_request,
            ColumnKey::Submitted => &self.submitted,
            ColumnKey::Status => self.status.as_str(),
            ColumnKey::Submitter => &self.submitter,
            ColumnKey::Url => &self.url,
            ColumnKey::Assigned => &self.assigned,
            ColumnKey::Priority => self.priority.as_str(),
            ColumnKey::DueDate => &self.due_date,
            ColumnKey::EstValue => &self.est_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HiddenFields {
    keys: BTreeSet<ColumnKey>,
}

impl HiddenFields {
    /// Flips membership of `key`. Returns true when the key is now hidden.
    pub fn toggle(&mut self, key: ColumnKey) -> bool {
        if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    pub fn contains(&self, key: ColumnKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Descriptors not hidden, in the fixed column order.
    pub fn visible_columns(&self) -> Vec<&'static ColumnDescriptor> {
        COLUMNS
            .iter()
            .filter(|column| !self.keys.contains(&column.key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{COLUMNS, ColumnKey, HiddenFields};

    fn visible_keys(hidden: &HiddenFields) -> Vec<ColumnKey> {
        hidden
            .visible_columns()
            .into_iter()
            .map(|column| column.key)
            .collect()
    }

    #[test]
    fn descriptor_lookup_matches_declaration_order() {
        for (index, column) in COLUMNS.iter().enumerate() {
            assert_eq!(column.key as usize, index);
            assert_eq!(column.key.descriptor(), column);
        }
    }

    #[test]
    fn toggling_twice_restores_contents_and_order() {
        let mut hidden = HiddenFields::default();
        let original = visible_keys(&hidden);

        assert!(hidden.toggle(ColumnKey::Status));
        assert!(hidden.toggle(ColumnKey::Url));
        assert_eq!(hidden.len(), 2);
        assert!(!visible_keys(&hidden).contains(&ColumnKey::Url));

        assert!(!hidden.toggle(ColumnKey::Url));
        assert!(!hidden.toggle(ColumnKey::Status));
        assert!(hidden.is_empty());
        assert_eq!(visible_keys(&hidden), original);
    }

    #[test]
    fn every_column_can_be_hidden() {
        let mut hidden = HiddenFields::default();
        for column in &COLUMNS {
            hidden.toggle(column.key);
        }
        assert!(hidden.visible_columns().is_empty());
    }
}
