//! Aggregation engine — the dashboard's derived views.
//!
//! Four independent derivations over the same two snapshots, plus the
//! headline stat tiles. Each is a pure function of (complaints, employees):
//! no hidden state, recomputable from scratch, and tolerant of malformed
//! records per the normalization rules.
//!
//! AnalyticsMemo caches the combined snapshot against a generation counter
//! that the snapshot owner bumps whenever either input is replaced; the
//! views recompute only when the inputs change identity, never per read.

use crate::model::{Complaint, Employee, Priority, Status};
use crate::normalize::NormalizedComplaint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Technician workload is truncated to this many groups, in first-seen
/// order during the scan.
pub const WORKLOAD_MAX_ROWS: usize = 10;

// ── Row types ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSlice {
    pub status: Status,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadRow {
    pub name: String,
    pub active: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityRow {
    pub priority: Priority,
    pub count: usize,
}

// ── Derivations ──────────────────────────────────────────────────────────────

/// Status counts in pending → in-progress → resolved order.
/// Zero-count entries are omitted: consumers render only nonzero slices.
pub fn status_distribution(complaints: &[Complaint]) -> Vec<StatusSlice> {
    Status::ALL
        .into_iter()
        .map(|status| StatusSlice {
            status,
            count: complaints
                .iter()
                .filter(|c| Status::parse(&c.status) == Some(status))
                .count(),
        })
        .filter(|slice| slice.count > 0)
        .collect()
}

/// Complaint counts grouped by category, descending by count. Ties keep
/// first-seen order from the scan. Records without a category land under
/// the "Uncategorized" label.
pub fn category_distribution(complaints: &[Complaint]) -> Vec<CategoryRow> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for complaint in complaints {
        let category = NormalizedComplaint::of(complaint).category;
        let entry = counts.entry(category).or_insert(0);
        if *entry == 0 {
            order.push(category);
        }
        *entry += 1;
    }

    let mut rows: Vec<CategoryRow> = order
        .into_iter()
        .map(|name| CategoryRow {
            count: counts[name],
            name: name.to_string(),
        })
        .collect();
    // Stable sort: equal counts stay in first-seen order.
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Active tickets per technician, capped at WORKLOAD_MAX_ROWS groups in
/// first-seen order (not sorted by count; which ten survive is decided
/// by scan order).
///
/// Only complaints that are assigned and not resolved qualify. The group
/// label is the first whitespace token of the matching employee's full
/// name; an id the employee collection does not know is used verbatim as
/// the label rather than treated as an error.
pub fn technician_workload(complaints: &[Complaint], employees: &[Employee]) -> Vec<WorkloadRow> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for complaint in complaints {
        if Status::parse(&complaint.status) == Some(Status::Resolved) {
            continue;
        }
        let Some(technician) = complaint.technician.as_deref() else {
            continue;
        };

        let name = employees
            .iter()
            .find(|e| e.employee_id == technician)
            .map(|e| {
                e.full_name
                    .split_whitespace()
                    .next()
                    .unwrap_or(e.full_name.as_str())
                    .to_string()
            })
            .unwrap_or_else(|| technician.to_string());

        let entry = counts.entry(name.clone()).or_insert(0);
        if *entry == 0 {
            order.push(name);
        }
        *entry += 1;
    }

    let mut rows: Vec<WorkloadRow> = order
        .into_iter()
        .map(|name| WorkloadRow {
            active: counts[&name],
            name,
        })
        .collect();
    rows.truncate(WORKLOAD_MAX_ROWS);
    rows
}

/// Exactly three rows, high → medium → low, zero-filled, never omitted,
/// even for an empty snapshot. Priority strings compare case-insensitively;
/// absent or unrecognized values count as low.
pub fn priority_breakdown(complaints: &[Complaint]) -> Vec<PriorityRow> {
    let mut high = 0;
    let mut medium = 0;
    let mut low = 0;

    for complaint in complaints {
        match NormalizedComplaint::of(complaint).priority {
            Priority::High => high += 1,
            Priority::Medium => medium += 1,
            Priority::Low => low += 1,
        }
    }

    vec![
        PriorityRow {
            priority: Priority::High,
            count: high,
        },
        PriorityRow {
            priority: Priority::Medium,
            count: medium,
        },
        PriorityRow {
            priority: Priority::Low,
            count: low,
        },
    ]
}

// ── Headline stats and combined snapshot ─────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlineStats {
    pub total: usize,
    pub resolved: usize,
    pub high_priority: usize,
    /// resolved / total as a rounded percentage; 0 for an empty snapshot.
    pub resolution_rate_pct: u32,
    /// Number of technician workload groups.
    pub active_staff: usize,
}

/// Everything the dashboard renders, computed in one pass over the inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub stats: HeadlineStats,
    pub status_distribution: Vec<StatusSlice>,
    pub category_distribution: Vec<CategoryRow>,
    pub technician_workload: Vec<WorkloadRow>,
    pub priority_breakdown: Vec<PriorityRow>,
}

impl AnalyticsSnapshot {
    pub fn compute(complaints: &[Complaint], employees: &[Employee]) -> Self {
        let status_distribution = status_distribution(complaints);
        let category_distribution = category_distribution(complaints);
        let technician_workload = technician_workload(complaints, employees);
        let priority_breakdown = priority_breakdown(complaints);

        let total = complaints.len();
        let resolved = complaints
            .iter()
            .filter(|c| Status::parse(&c.status) == Some(Status::Resolved))
            .count();
        let high_priority = complaints
            .iter()
            .filter(|c| NormalizedComplaint::of(c).priority == Priority::High)
            .count();
        let resolution_rate_pct = if total > 0 {
            ((resolved as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };

        Self {
            stats: HeadlineStats {
                total,
                resolved,
                high_priority,
                resolution_rate_pct,
                active_staff: technician_workload.len(),
            },
            status_distribution,
            category_distribution,
            technician_workload,
            priority_breakdown,
        }
    }
}

// ── Memoization ──────────────────────────────────────────────────────────────

/// Identity-keyed memo over the two input snapshots.
///
/// The owner of the snapshots calls `invalidate` whenever either collection
/// is replaced; until then, every read serves the cached snapshot without
/// touching the inputs. Deep equality is never consulted.
#[derive(Debug, Default)]
pub struct AnalyticsMemo {
    generation: u64,
    cached_generation: u64,
    cached: Option<AnalyticsSnapshot>,
}

impl AnalyticsMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the inputs as replaced. The next read recomputes.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn get_or_compute(
        &mut self,
        complaints: &[Complaint],
        employees: &[Employee],
    ) -> &AnalyticsSnapshot {
        if self.cached.is_none() || self.cached_generation != self.generation {
            log::debug!(
                "analytics: recomputing snapshot (generation {})",
                self.generation
            );
            self.cached = Some(AnalyticsSnapshot::compute(complaints, employees));
            self.cached_generation = self.generation;
        }
        match self.cached.as_ref() {
            Some(snapshot) => snapshot,
            None => unreachable!("memo filled by the branch above"),
        }
    }
}
