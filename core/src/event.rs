//! Discrete signals the view layer observes.
//!
//! RULE: The core never flips a counter to provoke a refetch. When a commit
//! lands, staleness is announced exactly once, as DataInvalidated, and the
//! surrounding system decides when to refresh.

use crate::model::{Priority, Status};
use crate::types::{ComplaintId, EmployeeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeskEvent {
    // ── Draft lifecycle ───────────────────────────
    DraftOpened {
        complaint_id: ComplaintId,
    },
    /// Replace-and-warn: a new draft displaced one that was still open.
    DraftReplaced {
        previous: ComplaintId,
        complaint_id: ComplaintId,
    },
    DraftDiscarded {
        complaint_id: ComplaintId,
    },

    // ── Field transitions ─────────────────────────
    StatusChanged {
        complaint_id: ComplaintId,
        status: Status,
    },
    PriorityCycled {
        complaint_id: ComplaintId,
        priority: Priority,
    },
    TechnicianAssigned {
        complaint_id: ComplaintId,
        technician: EmployeeId,
    },

    // ── Commit outcomes ───────────────────────────
    CommitSucceeded {
        complaint_id: ComplaintId,
    },
    /// The snapshot held by the desk no longer matches the directory.
    DataInvalidated,
}
