//! Draft edit session tests — the Idle → Editing → Committing machine.

use nexus_core::directory::ComplaintSink;
use nexus_core::draft::DraftSession;
use nexus_core::error::{DeskError, DeskResult};
use nexus_core::event::DeskEvent;
use nexus_core::model::Complaint;
use nexus_core::session::{Role, Session};

fn complaint(id: &str) -> Complaint {
    Complaint {
        complaint_id: id.to_string(),
        title: format!("Complaint {id}"),
        description: "It is broken".to_string(),
        category: Some("Technical".to_string()),
        status: "pending".to_string(),
        priority: None,
        technician: None,
        date: "2025-11-02".to_string(),
    }
}

fn admin() -> Session {
    Session::new("admin-1", Role::Admin, "token")
}

/// Sink that records what it was asked to persist, optionally failing.
#[derive(Default)]
struct RecordingSink {
    persisted: Vec<Complaint>,
    fail: bool,
}

impl ComplaintSink for RecordingSink {
    fn persist(&mut self, _session: &Session, complaint: &Complaint) -> DeskResult<()> {
        if self.fail {
            return Err(DeskError::Persistence {
                reason: "backend unavailable".to_string(),
            });
        }
        self.persisted.push(complaint.clone());
        Ok(())
    }

    fn submit(&mut self, session: &Session, complaint: &Complaint) -> DeskResult<()> {
        self.persist(session, complaint)
    }
}

// ── State guards ─────────────────────────────────────────────────────────────

/// Editing-only operations from Idle are programming errors, reported
/// distinctly — never swallowed.
#[test]
fn editing_operations_rejected_while_idle() {
    let mut session = DraftSession::new();

    assert!(matches!(
        session.set_status("resolved"),
        Err(DeskError::InvalidState { operation: "set_status", .. })
    ));
    assert!(matches!(
        session.cycle_priority(),
        Err(DeskError::InvalidState { .. })
    ));
    assert!(matches!(
        session.assign_technician("E1"),
        Err(DeskError::InvalidState { .. })
    ));
    assert!(matches!(session.discard(), Err(DeskError::InvalidState { .. })));
    assert!(matches!(
        session.begin_commit(),
        Err(DeskError::InvalidState { .. })
    ));
}

#[test]
fn open_transitions_idle_to_editing() {
    let mut session = DraftSession::new();
    let event = session.open(complaint("C-1")).unwrap();
    assert_eq!(
        event,
        DeskEvent::DraftOpened {
            complaint_id: "C-1".to_string()
        }
    );
    assert!(session.is_editing());
    assert_eq!(session.draft().unwrap().complaint_id, "C-1");
}

/// Replace-and-warn policy: a second open displaces the first draft and
/// says so in the emitted event.
#[test]
fn open_while_editing_replaces_draft() {
    let mut session = DraftSession::new();
    session.open(complaint("C-1")).unwrap();
    let event = session.open(complaint("C-2")).unwrap();

    assert_eq!(
        event,
        DeskEvent::DraftReplaced {
            previous: "C-1".to_string(),
            complaint_id: "C-2".to_string()
        }
    );
    assert_eq!(session.draft().unwrap().complaint_id, "C-2");
}

// ── Field transitions ────────────────────────────────────────────────────────

#[test]
fn set_status_replaces_draft_status() {
    let mut session = DraftSession::new();
    session.open(complaint("C-1")).unwrap();

    let event = session.set_status("in-progress").unwrap();
    assert!(event.is_some());
    assert_eq!(session.draft().unwrap().status, "in-progress");
}

/// An unrecognized status is rejected without an error: no event, draft
/// unchanged.
#[test]
fn set_status_ignores_unrecognized_value() {
    let mut session = DraftSession::new();
    session.open(complaint("C-1")).unwrap();

    let event = session.set_status("escalated").unwrap();
    assert!(event.is_none(), "rejection is silent — no event");
    assert_eq!(session.draft().unwrap().status, "pending", "draft untouched");
}

/// Unset priority acts as low, so the first cycle lands on medium and the
/// second on high.
#[test]
fn cycle_priority_from_unset_reaches_high_in_two_steps() {
    let mut session = DraftSession::new();
    session.open(complaint("C-1")).unwrap();

    session.cycle_priority().unwrap();
    assert_eq!(session.draft().unwrap().priority.as_deref(), Some("medium"));
    session.cycle_priority().unwrap();
    assert_eq!(session.draft().unwrap().priority.as_deref(), Some("high"));
}

/// The cycle wraps: high goes back to low.
#[test]
fn cycle_priority_wraps_from_high() {
    let mut session = DraftSession::new();
    let mut c = complaint("C-1");
    c.priority = Some("high".to_string());
    session.open(c).unwrap();

    session.cycle_priority().unwrap();
    assert_eq!(session.draft().unwrap().priority.as_deref(), Some("low"));
}

/// Assignment never validates the id; dangling references are resolved at
/// display time.
#[test]
fn assign_technician_tolerates_dangling_id() {
    let mut session = DraftSession::new();
    session.open(complaint("C-1")).unwrap();

    session.assign_technician("NOBODY-7").unwrap();
    assert_eq!(
        session.draft().unwrap().technician.as_deref(),
        Some("NOBODY-7")
    );
}

/// The draft is a detached copy: edits never reach the record it was
/// opened from, and a discard drops them entirely.
#[test]
fn discard_leaves_original_untouched() {
    let original = complaint("C-1");
    let mut session = DraftSession::new();
    session.open(original.clone()).unwrap();

    session.assign_technician("E9").unwrap();
    session.set_status("resolved").unwrap();
    session.discard().unwrap();

    assert_eq!(original.technician, None);
    assert_eq!(original.status, "pending");
    assert!(session.draft().is_none());
    assert_eq!(session.state_name(), "idle");
}

// ── Commit ───────────────────────────────────────────────────────────────────

/// A successful commit hands the edited copy to the sink, returns to Idle,
/// and announces staleness exactly once.
#[test]
fn commit_success_returns_to_idle_and_invalidates() {
    let mut session = DraftSession::new();
    let mut sink = RecordingSink::default();
    session.open(complaint("C-1")).unwrap();
    session.set_status("resolved").unwrap();

    let events = session.commit(&admin(), &mut sink).unwrap();

    assert_eq!(sink.persisted.len(), 1);
    assert_eq!(sink.persisted[0].status, "resolved", "the sink sees the edited copy");
    assert_eq!(
        events,
        vec![
            DeskEvent::CommitSucceeded {
                complaint_id: "C-1".to_string()
            },
            DeskEvent::DataInvalidated,
        ]
    );
    assert_eq!(session.state_name(), "idle");
}

/// A failed commit surfaces the persistence error and preserves the draft
/// field-for-field so the operator can retry.
#[test]
fn commit_failure_preserves_draft_for_retry() {
    let mut session = DraftSession::new();
    let mut sink = RecordingSink {
        fail: true,
        ..Default::default()
    };
    session.open(complaint("C-1")).unwrap();
    session.set_status("in-progress").unwrap();
    session.assign_technician("E1").unwrap();

    let err = session.commit(&admin(), &mut sink).unwrap_err();
    assert!(matches!(err, DeskError::Persistence { .. }));

    assert_eq!(session.state_name(), "editing", "failure keeps the session editable");
    let draft = session.draft().unwrap();
    assert_eq!(draft.status, "in-progress");
    assert_eq!(draft.technician.as_deref(), Some("E1"));

    // Retry against a healthy sink succeeds.
    sink.fail = false;
    session.commit(&admin(), &mut sink).unwrap();
    assert_eq!(sink.persisted.len(), 1);
}

/// Re-entrant commit is rejected: while an outcome is outstanding the
/// session is Committing and refuses everything.
#[test]
fn reentrant_commit_is_rejected() {
    let mut session = DraftSession::new();
    session.open(complaint("C-1")).unwrap();

    let outbound = session.begin_commit().unwrap();
    assert_eq!(outbound.complaint_id, "C-1");
    assert_eq!(session.state_name(), "committing");

    assert!(matches!(
        session.begin_commit(),
        Err(DeskError::InvalidState { operation: "begin_commit", .. })
    ));
    assert!(matches!(
        session.set_status("resolved"),
        Err(DeskError::InvalidState { .. })
    ));
    assert!(matches!(session.discard(), Err(DeskError::InvalidState { .. })));

    // Reporting the failure reopens the draft.
    session.commit_failed().unwrap();
    assert_eq!(session.state_name(), "editing");
}
