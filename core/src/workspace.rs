//! The admin desk workspace — snapshot ownership and view composition.
//!
//! This is where the synchronization rules meet:
//!   - Both snapshots are replaced wholesale on refresh, never merged.
//!   - Derived views are memoized against the snapshot generation.
//!   - The open draft is a detached copy; a refresh never touches it.
//!   - Commit success flips the stale flag and emits DataInvalidated; the
//!     surrounding system decides when to refresh.

use crate::analytics::{AnalyticsMemo, AnalyticsSnapshot};
use crate::directory::{ComplaintSink, DirectorySource};
use crate::draft::DraftSession;
use crate::error::{DeskError, DeskResult};
use crate::event::DeskEvent;
use crate::model::{Complaint, Employee};
use crate::queue::{self, QueueBoard};
use crate::session::Session;
use serde::Serialize;

#[derive(Debug)]
pub struct Workspace {
    session: Session,
    complaints: Vec<Complaint>,
    employees: Vec<Employee>,
    analytics: AnalyticsMemo,
    draft: DraftSession,
    stale: bool,
}

/// Point-in-time export of the workspace for a view layer or wire frame.
#[derive(Debug, Serialize)]
pub struct WorkspaceSnapshot<'a> {
    pub board: QueueBoard<'a>,
    pub analytics: &'a AnalyticsSnapshot,
    pub draft: Option<&'a Complaint>,
    pub stale: bool,
}

impl Workspace {
    /// The queue board and dashboards are the admin surface; a user-role
    /// session is rejected here rather than at every method.
    pub fn open(session: Session) -> DeskResult<Self> {
        session.require_admin("open the desk workspace")?;
        Ok(Self {
            session,
            complaints: Vec::new(),
            employees: Vec::new(),
            analytics: AnalyticsMemo::new(),
            draft: DraftSession::new(),
            // Nothing loaded yet; the first refresh populates the desk.
            stale: true,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn complaints(&self) -> &[Complaint] {
        &self.complaints
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// True when a commit has landed since the last refresh (or nothing
    /// has been loaded yet).
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    // ── Snapshot lifecycle ───────────────────────────────────────────────────

    /// Replace both snapshots wholesale from the source. Prior local edits
    /// become durable only through the commit-then-refresh path; an open
    /// draft is deliberately left alone.
    pub fn refresh(&mut self, source: &mut dyn DirectorySource) -> DeskResult<()> {
        self.complaints = source.fetch_complaints(&self.session)?;
        self.employees = source.fetch_employees(&self.session)?;
        self.analytics.invalidate();
        self.stale = false;
        log::debug!(
            "workspace: refreshed snapshots ({} complaints, {} employees)",
            self.complaints.len(),
            self.employees.len()
        );
        Ok(())
    }

    // ── Derived views ────────────────────────────────────────────────────────

    pub fn queue_board(&self) -> QueueBoard<'_> {
        queue::bucketize(&self.complaints)
    }

    /// Memoized: recomputed only after a refresh replaced the inputs.
    pub fn analytics(&mut self) -> &AnalyticsSnapshot {
        self.analytics
            .get_or_compute(&self.complaints, &self.employees)
    }

    /// Serialize the full desk state to JSON in one frame.
    pub fn export_snapshot(&mut self) -> DeskResult<String> {
        let analytics = self
            .analytics
            .get_or_compute(&self.complaints, &self.employees);
        let snapshot = WorkspaceSnapshot {
            board: queue::bucketize(&self.complaints),
            analytics,
            draft: self.draft.draft(),
            stale: self.stale,
        };
        Ok(serde_json::to_string(&snapshot)?)
    }

    // ── Draft intents ────────────────────────────────────────────────────────

    /// Check a complaint out of the current snapshot by id.
    pub fn open_draft(&mut self, complaint_id: &str) -> DeskResult<DeskEvent> {
        let Some(complaint) = self
            .complaints
            .iter()
            .find(|c| c.complaint_id == complaint_id)
        else {
            return Err(DeskError::UnknownComplaint {
                complaint_id: complaint_id.to_string(),
            });
        };
        self.draft.open(complaint.clone())
    }

    pub fn draft(&self) -> Option<&Complaint> {
        self.draft.draft()
    }

    pub fn set_status(&mut self, raw: &str) -> DeskResult<Option<DeskEvent>> {
        self.draft.set_status(raw)
    }

    pub fn cycle_priority(&mut self) -> DeskResult<DeskEvent> {
        self.draft.cycle_priority()
    }

    pub fn assign_technician(&mut self, employee_id: &str) -> DeskResult<DeskEvent> {
        self.draft.assign_technician(employee_id)
    }

    pub fn discard_draft(&mut self) -> DeskResult<DeskEvent> {
        self.draft.discard()
    }

    /// Commit the open draft through the persistence collaborator. On
    /// success the desk is marked stale: the directory now knows more
    /// than the snapshot does.
    pub fn commit_draft(&mut self, sink: &mut dyn ComplaintSink) -> DeskResult<Vec<DeskEvent>> {
        let events = self.draft.commit(&self.session, sink)?;
        self.stale = true;
        Ok(events)
    }
}
