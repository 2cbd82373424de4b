//! Canonical complaint and employee records.
//!
//! RULE: Records hold field values exactly as the directory supplied them.
//! Defaulting (category labels, priority fallbacks) happens in normalize,
//! never here. Unrecognized status or priority strings ride along untouched.

use crate::types::{ComplaintId, EmployeeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    pub complaint_id: ComplaintId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    pub status: String,
    #[serde(default)]
    pub priority: Option<String>,
    /// Weak reference: may point at an employee the directory no longer
    /// knows. Resolved lazily at display time, never validated here.
    #[serde(default)]
    pub technician: Option<EmployeeId>,
    /// Opaque display timestamp. The core never parses it.
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub full_name: String,
    pub role: String,
}

/// The three recognized queue statuses. A record carrying anything else
/// stays outside every queue but still counts toward the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Pending,
    InProgress,
    Resolved,
}

impl Status {
    /// Scan order for status-keyed views: pending, in-progress, resolved.
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Resolved];

    /// Exact-match parse against the three recognized wire values.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Status::Pending),
            "in-progress" => Some(Status::InProgress),
            "resolved" => Some(Status::Resolved),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in-progress",
            Status::Resolved => "resolved",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Resolved => "Resolved",
        }
    }
}

/// Triage priority. The cycle order is fixed: low → medium → high → low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Case-insensitive parse. An unrecognized or absent value is not an
    /// error; each consumer applies its own documented fallback.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("low") {
            Some(Priority::Low)
        } else if raw.eq_ignore_ascii_case("medium") {
            Some(Priority::Medium)
        } else if raw.eq_ignore_ascii_case("high") {
            Some(Priority::High)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Next stop in the triage cycle.
    pub fn next(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }
}
