//! Draft edit session — one complaint checked out for speculative edits.
//!
//! State machine: Idle → Editing → Committing → Idle.
//!
//! RULES:
//!   - At most one draft exists, and it is a detached copy. The snapshot
//!     it came from is never mutated; only a successful commit (and the
//!     refresh that follows) makes the edits durable.
//!   - Editing-only operations called from the wrong state are a
//!     programming error, reported as InvalidState, never swallowed.
//!   - A second commit while one is outstanding is rejected; the
//!     Committing sub-state exists precisely to make that guard explicit.
//!   - Same-field transitions are last-write-wins; no merging with
//!     concurrent external changes is ever attempted.

use crate::directory::ComplaintSink;
use crate::error::{DeskError, DeskResult};
use crate::event::DeskEvent;
use crate::model::{Complaint, Priority, Status};
use crate::session::Session;
use crate::types::EmployeeId;

#[derive(Debug)]
enum DraftState {
    Idle,
    Editing { draft: Complaint },
    Committing { draft: Complaint },
}

#[derive(Debug)]
pub struct DraftSession {
    state: DraftState,
}

impl Default for DraftSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftSession {
    pub fn new() -> Self {
        Self {
            state: DraftState::Idle,
        }
    }

    pub fn state_name(&self) -> &'static str {
        match self.state {
            DraftState::Idle => "idle",
            DraftState::Editing { .. } => "editing",
            DraftState::Committing { .. } => "committing",
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, DraftState::Editing { .. })
    }

    /// The current draft, if one is open (editing or mid-commit).
    pub fn draft(&self) -> Option<&Complaint> {
        match &self.state {
            DraftState::Idle => None,
            DraftState::Editing { draft } | DraftState::Committing { draft } => Some(draft),
        }
    }

    fn invalid(&self, operation: &'static str) -> DeskError {
        DeskError::InvalidState {
            operation,
            state: self.state_name(),
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────────────

    /// Check a complaint out for editing. The session takes an independent
    /// copy; the caller's record is untouched from here on.
    ///
    /// Policy: opening while a draft is already being edited replaces it
    /// and warns (the surrounding UI is expected to prevent this, but the
    /// engine stays usable if it doesn't). Opening mid-commit is rejected.
    pub fn open(&mut self, complaint: Complaint) -> DeskResult<DeskEvent> {
        match &self.state {
            DraftState::Committing { .. } => Err(self.invalid("open")),
            DraftState::Editing { draft } => {
                let previous = draft.complaint_id.clone();
                log::warn!(
                    "draft: replacing open draft {} with {}",
                    previous,
                    complaint.complaint_id
                );
                let event = DeskEvent::DraftReplaced {
                    previous,
                    complaint_id: complaint.complaint_id.clone(),
                };
                self.state = DraftState::Editing { draft: complaint };
                Ok(event)
            }
            DraftState::Idle => {
                let event = DeskEvent::DraftOpened {
                    complaint_id: complaint.complaint_id.clone(),
                };
                self.state = DraftState::Editing { draft: complaint };
                Ok(event)
            }
        }
    }

    /// Drop the draft without persisting anything.
    pub fn discard(&mut self) -> DeskResult<DeskEvent> {
        match &self.state {
            DraftState::Editing { draft } => {
                let event = DeskEvent::DraftDiscarded {
                    complaint_id: draft.complaint_id.clone(),
                };
                self.state = DraftState::Idle;
                Ok(event)
            }
            _ => Err(self.invalid("discard")),
        }
    }

    // ── Field transitions (Editing only) ─────────────────────────────────────

    fn editing_draft(&mut self, operation: &'static str) -> DeskResult<&mut Complaint> {
        match &mut self.state {
            DraftState::Editing { draft } => Ok(draft),
            DraftState::Idle => Err(DeskError::InvalidState {
                operation,
                state: "idle",
            }),
            DraftState::Committing { .. } => Err(DeskError::InvalidState {
                operation,
                state: "committing",
            }),
        }
    }

    /// Replace the draft's status. An unrecognized value is rejected
    /// without an error: the draft is left unchanged, a warning is logged,
    /// and no event is emitted.
    pub fn set_status(&mut self, raw: &str) -> DeskResult<Option<DeskEvent>> {
        let draft = self.editing_draft("set_status")?;
        let Some(status) = Status::parse(raw) else {
            log::warn!(
                "draft: ignoring unrecognized status '{}' for {}",
                raw,
                draft.complaint_id
            );
            return Ok(None);
        };
        draft.status = status.as_str().to_string();
        Ok(Some(DeskEvent::StatusChanged {
            complaint_id: draft.complaint_id.clone(),
            status,
        }))
    }

    /// Advance the draft's priority one stop through the triage cycle.
    /// An absent or unrecognized current value acts as low, so the first
    /// cycle from an unset priority lands on medium.
    pub fn cycle_priority(&mut self) -> DeskResult<DeskEvent> {
        let draft = self.editing_draft("cycle_priority")?;
        let current = draft
            .priority
            .as_deref()
            .and_then(Priority::parse)
            .unwrap_or(Priority::Low);
        let next = current.next();
        draft.priority = Some(next.as_str().to_string());
        Ok(DeskEvent::PriorityCycled {
            complaint_id: draft.complaint_id.clone(),
            priority: next,
        })
    }

    /// Point the draft at a technician. The id is not checked against the
    /// employee collection; a dangling reference renders as unassigned.
    pub fn assign_technician(&mut self, employee_id: impl Into<EmployeeId>) -> DeskResult<DeskEvent> {
        let draft = self.editing_draft("assign_technician")?;
        let technician = employee_id.into();
        draft.technician = Some(technician.clone());
        Ok(DeskEvent::TechnicianAssigned {
            complaint_id: draft.complaint_id.clone(),
            technician,
        })
    }

    // ── Commit ───────────────────────────────────────────────────────────────

    /// Start a commit: detach a copy of the draft for the persistence
    /// collaborator and move to Committing. Further edits, discards, and
    /// commits are rejected until the outcome is reported.
    pub fn begin_commit(&mut self) -> DeskResult<Complaint> {
        match std::mem::replace(&mut self.state, DraftState::Idle) {
            DraftState::Editing { draft } => {
                let outbound = draft.clone();
                self.state = DraftState::Committing { draft };
                Ok(outbound)
            }
            other => {
                self.state = other;
                Err(self.invalid("begin_commit"))
            }
        }
    }

    /// The collaborator accepted the draft: the session returns to Idle and
    /// the caller is told the snapshot went stale.
    pub fn commit_succeeded(&mut self) -> DeskResult<Vec<DeskEvent>> {
        match std::mem::replace(&mut self.state, DraftState::Idle) {
            DraftState::Committing { draft } => {
                log::info!("draft: commit succeeded for {}", draft.complaint_id);
                Ok(vec![
                    DeskEvent::CommitSucceeded {
                        complaint_id: draft.complaint_id,
                    },
                    DeskEvent::DataInvalidated,
                ])
            }
            other => {
                self.state = other;
                Err(self.invalid("commit_succeeded"))
            }
        }
    }

    /// The collaborator failed: the draft goes back to Editing untouched
    /// so the operator can retry or discard. No rollback, no auto-retry.
    pub fn commit_failed(&mut self) -> DeskResult<()> {
        match std::mem::replace(&mut self.state, DraftState::Idle) {
            DraftState::Committing { draft } => {
                log::warn!("draft: commit failed for {}, draft preserved", draft.complaint_id);
                self.state = DraftState::Editing { draft };
                Ok(())
            }
            other => {
                self.state = other;
                Err(self.invalid("commit_failed"))
            }
        }
    }

    /// Drive a full commit against a synchronous collaborator: begin,
    /// persist, and resolve in one call. On failure the persistence error
    /// is returned and the draft stays open for retry.
    pub fn commit(
        &mut self,
        session: &Session,
        sink: &mut dyn ComplaintSink,
    ) -> DeskResult<Vec<DeskEvent>> {
        let outbound = self.begin_commit()?;
        match sink.persist(session, &outbound) {
            Ok(()) => self.commit_succeeded(),
            Err(err) => {
                self.commit_failed()?;
                Err(err)
            }
        }
    }
}
