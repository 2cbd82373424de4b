//! Status queue partitioning — the board behind the three kanban columns.
//!
//! RULE: A complaint sits in at most one queue, keyed on an exact status
//! match. Records with an unrecognized status appear in no column but
//! still count toward the total, so the header total can exceed the sum
//! of the three columns. That passthrough is deliberate.

use crate::model::{Complaint, Status};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub total: usize,
}

/// Borrowed partition of one complaint snapshot. Column order preserves
/// the scan order of the input (stable partition).
#[derive(Debug, Serialize)]
pub struct QueueBoard<'a> {
    pub pending: Vec<&'a Complaint>,
    pub in_progress: Vec<&'a Complaint>,
    pub resolved: Vec<&'a Complaint>,
    pub counts: QueueCounts,
}

/// Partition a snapshot into the three status queues.
///
/// Never fails: empty input and malformed records simply produce empty
/// membership.
pub fn bucketize(complaints: &[Complaint]) -> QueueBoard<'_> {
    let mut pending = Vec::new();
    let mut in_progress = Vec::new();
    let mut resolved = Vec::new();

    for complaint in complaints {
        match Status::parse(&complaint.status) {
            Some(Status::Pending) => pending.push(complaint),
            Some(Status::InProgress) => in_progress.push(complaint),
            Some(Status::Resolved) => resolved.push(complaint),
            // Unrecognized status: no column, still in the total.
            None => {}
        }
    }

    let counts = QueueCounts {
        pending: pending.len(),
        in_progress: in_progress.len(),
        resolved: resolved.len(),
        total: complaints.len(),
    };

    QueueBoard {
        pending,
        in_progress,
        resolved,
        counts,
    }
}
