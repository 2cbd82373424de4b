//! Complaint intake — the submission flow of the user portal.
//!
//! Validation mirrors the dispatch form: subject and description are
//! required, category comes from a fixed set. A valid form becomes a
//! pending record with a freshly minted id and submission timestamp,
//! handed to the submission collaborator.

use crate::directory::ComplaintSink;
use crate::error::DeskResult;
use crate::model::{Complaint, Status};
use crate::session::Session;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const CATEGORY_CHOICES: [&str; 3] = ["Technical", "Billing", "Facility"];
pub const DEFAULT_CATEGORY: &str = "Technical";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: &'static str,
}

/// All field problems found in one validation pass, so the form can mark
/// every offending input at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl std::error::Error for ValidationError {}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation failed: ")?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComplaint {
    pub title: String,
    pub category: String,
    pub description: String,
}

impl Default for NewComplaint {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            description: String::new(),
        }
    }
}

impl NewComplaint {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        if self.title.trim().is_empty() {
            issues.push(FieldIssue {
                field: "title",
                message: "Subject is required",
            });
        }
        if self.description.trim().is_empty() {
            issues.push(FieldIssue {
                field: "description",
                message: "Description is required",
            });
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Validate and mint the pending record this form describes.
    pub fn into_record(self) -> Result<Complaint, ValidationError> {
        self.validate()?;
        Ok(Complaint {
            complaint_id: Uuid::new_v4().to_string(),
            title: self.title,
            description: self.description,
            category: if self.category.is_empty() {
                None
            } else {
                Some(self.category)
            },
            status: Status::Pending.as_str().to_string(),
            priority: None,
            technician: None,
            date: Utc::now().format("%Y-%m-%d %H:%M").to_string(),
        })
    }
}

/// Validate, mint, and hand the record to the submission collaborator.
/// Returns the filed record so the caller can show it immediately.
pub fn file_complaint(
    form: NewComplaint,
    session: &Session,
    sink: &mut dyn ComplaintSink,
) -> DeskResult<Complaint> {
    let record = form.into_record()?;
    sink.submit(session, &record)?;
    log::info!(
        "intake: complaint {} filed by {}",
        record.complaint_id,
        session.user_id
    );
    Ok(record)
}
