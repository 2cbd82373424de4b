//! Centralized field normalization.
//!
//! RULE: Every derivation reads complaint fields through this view, so all
//! of them see the same defaults. Raw records are never patched in place;
//! the defaults exist only here.

use crate::model::{Complaint, Priority, Status};

/// Category label applied when a record carries none.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Display label for a record with no recognized priority.
pub const STANDARD_PRIORITY: &str = "Standard";

/// A per-record view with defaults applied, borrowed from the raw record.
#[derive(Debug, Clone, Copy)]
pub struct NormalizedComplaint<'a> {
    pub raw: &'a Complaint,
    /// None when the stored status is not one of the three queue values.
    pub status: Option<Status>,
    /// Absent or unrecognized priority normalizes to low.
    pub priority: Priority,
    pub category: &'a str,
}

impl<'a> NormalizedComplaint<'a> {
    pub fn of(raw: &'a Complaint) -> Self {
        let status = Status::parse(&raw.status);
        let priority = raw
            .priority
            .as_deref()
            .and_then(Priority::parse)
            .unwrap_or(Priority::Low);
        let category = match raw.category.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => UNCATEGORIZED,
        };
        Self {
            raw,
            status,
            priority,
            category,
        }
    }

    /// Label for the priority pill: the recognized level, or "Standard"
    /// when the record carries none. Distinct from `priority`, which
    /// answers the stats question and falls back to low.
    pub fn priority_label(&self) -> &'static str {
        match self.raw.priority.as_deref().and_then(Priority::parse) {
            Some(p) => p.label(),
            None => STANDARD_PRIORITY,
        }
    }
}
