//! Normalization tests — one set of defaults, applied in one place.

use nexus_core::model::{Complaint, Priority, Status};
use nexus_core::normalize::{NormalizedComplaint, STANDARD_PRIORITY, UNCATEGORIZED};

fn complaint(status: &str, priority: Option<&str>, category: Option<&str>) -> Complaint {
    Complaint {
        complaint_id: "C-1".to_string(),
        title: "Complaint".to_string(),
        description: String::new(),
        category: category.map(str::to_string),
        status: status.to_string(),
        priority: priority.map(str::to_string),
        technician: None,
        date: "2025-11-02".to_string(),
    }
}

/// The raw record is never patched: defaults exist only in the view.
#[test]
fn normalization_leaves_the_record_alone() {
    let raw = complaint("escalated", None, None);
    let norm = NormalizedComplaint::of(&raw);

    assert_eq!(norm.status, None);
    assert_eq!(norm.priority, Priority::Low);
    assert_eq!(norm.category, UNCATEGORIZED);

    // Meanwhile the record still says what the directory said.
    assert_eq!(raw.status, "escalated");
    assert_eq!(raw.priority, None);
    assert_eq!(raw.category, None);
}

#[test]
fn recognized_fields_pass_through() {
    let raw = complaint("in-progress", Some("HIGH"), Some("Billing"));
    let norm = NormalizedComplaint::of(&raw);

    assert_eq!(norm.status, Some(Status::InProgress));
    assert_eq!(norm.priority, Priority::High, "priority parses case-insensitively");
    assert_eq!(norm.category, "Billing");
}

/// An empty category string gets the same default as an absent one.
#[test]
fn empty_category_defaults_like_absent() {
    let raw = complaint("pending", None, Some(""));
    assert_eq!(NormalizedComplaint::of(&raw).category, UNCATEGORIZED);
}

/// The pill label distinguishes "no recognized priority" from the low
/// fallback the stats use.
#[test]
fn priority_label_says_standard_when_unset() {
    let unset = complaint("pending", None, None);
    assert_eq!(NormalizedComplaint::of(&unset).priority_label(), STANDARD_PRIORITY);

    let junk = complaint("pending", Some("urgent"), None);
    assert_eq!(NormalizedComplaint::of(&junk).priority_label(), STANDARD_PRIORITY);

    let high = complaint("pending", Some("high"), None);
    assert_eq!(NormalizedComplaint::of(&high).priority_label(), "High");
}
