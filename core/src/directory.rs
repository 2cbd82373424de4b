//! Collaborator seams — all I/O lives on the far side of these traits.
//!
//! RULE: The core consumes whole snapshots and hands single records out.
//! It never fetches on its own schedule, never retries, and never inspects
//! a response beyond success or failure.

use crate::error::DeskResult;
use crate::model::{Complaint, Employee};
use crate::session::Session;

/// Supplies complaint and employee snapshots on demand. Each snapshot is
/// complete and replaces whatever the caller held before — no diffing, no
/// incremental merge.
pub trait DirectorySource {
    fn fetch_complaints(&mut self, session: &Session) -> DeskResult<Vec<Complaint>>;
    fn fetch_employees(&mut self, session: &Session) -> DeskResult<Vec<Employee>>;
}

/// Accepts complaint writes. Success or failure is all the core reads from
/// the outcome.
pub trait ComplaintSink {
    /// Persist one edited complaint (the committed draft).
    fn persist(&mut self, session: &Session, complaint: &Complaint) -> DeskResult<()>;

    /// Accept a newly filed complaint from the intake flow.
    fn submit(&mut self, session: &Session, complaint: &Complaint) -> DeskResult<()>;
}
