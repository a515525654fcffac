//! Operator radar: actionable signals derived from live store state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::estimators::Estimator;
use crate::jobs::{JobRecord, Priority};
use crate::leads::Lead;
use crate::quotes::format_cents;

/// What a signal is about, which also determines where it links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Leads,
    Performance,
    Estimator,
    Revenue,
}

/// One radar entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub kind: SignalKind,
    pub message: String,
    pub priority: Priority,
    pub count: u32,
    /// Dashboard route the signal links to.
    pub route: &'static str,
}

/// Per-priority tally for the radar header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Scans current state and emits the signals worth an operator's
/// attention. Quiet conditions produce no entry.
pub fn scan(
    jobs: &[JobRecord],
    leads: &[Lead],
    estimators: &[Estimator],
    now: DateTime<Utc>,
) -> Vec<Signal> {
    let mut signals = Vec::new();

    let due = leads.iter().filter(|l| l.needs_follow_up(now)).count() as u32;
    if due > 0 {
        signals.push(Signal {
            kind: SignalKind::Leads,
            message: format!(
                "{} lead{} need{} follow-up today",
                due,
                if due == 1 { "" } else { "s" },
                if due == 1 { "s" } else { "" },
            ),
            priority: Priority::High,
            count: due,
            route: "/leads",
        });
    }

    let below = estimators
        .iter()
        .filter(|e| e.below_alert_threshold())
        .count() as u32;
    if below > 0 {
        signals.push(Signal {
            kind: SignalKind::Estimator,
            message: format!(
                "{} estimator{} below 30% close rate",
                below,
                if below == 1 { "" } else { "s" },
            ),
            priority: Priority::High,
            count: below,
            route: "/estimators",
        });
    }

    let overdue = jobs.iter().filter(|j| j.is_overdue(now)).count() as u32;
    if overdue > 0 {
        signals.push(Signal {
            kind: SignalKind::Performance,
            message: format!(
                "{} job{} past {} due date",
                overdue,
                if overdue == 1 { "" } else { "s" },
                if overdue == 1 { "its" } else { "their" },
            ),
            priority: Priority::Medium,
            count: overdue,
            route: "/pipeline",
        });
    }

    let hot: Vec<&Lead> = leads
        .iter()
        .filter(|l| l.temperature == crate::leads::Temperature::Hot)
        .collect();
    if !hot.is_empty() {
        let value_cents: i64 = hot.iter().map(|l| l.estimated_value as i64 * 100).sum();
        signals.push(Signal {
            kind: SignalKind::Revenue,
            message: format!(
                "{} hot lead{} worth {} ready to close",
                hot.len(),
                if hot.len() == 1 { "" } else { "s" },
                format_cents(value_cents),
            ),
            priority: Priority::Low,
            count: hot.len() as u32,
            route: "/leads",
        });
    }

    signals
}

/// Keeps only signals at the given priority; `None` keeps everything.
pub fn filter_by_priority(signals: &[Signal], priority: Option<Priority>) -> Vec<Signal> {
    signals
        .iter()
        .filter(|s| priority.map_or(true, |p| s.priority == p))
        .cloned()
        .collect()
}

/// Tallies signals per priority.
pub fn counts(signals: &[Signal]) -> PriorityCounts {
    let mut tally = PriorityCounts {
        high: 0,
        medium: 0,
        low: 0,
    };
    for signal in signals {
        match signal.priority {
            Priority::High => tally.high += 1,
            Priority::Medium => tally.medium += 1,
            Priority::Low => tally.low += 1,
        }
    }
    tally
}
