//! Job records: the unit of work tracked by the board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::{stage, Stage};

/// Urgency of a repair job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn from_str_or_default(s: &str) -> Priority {
        match s {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One collision-repair job.
///
/// The `status` field is the single source of truth for stage membership
/// and is mutated only through the board controller. The remaining fields
/// are descriptive attributes the board logic treats as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    /// Unique job number, e.g. `#CC-2024-001`. Assigned at creation, never
    /// reused.
    pub id: String,
    pub customer: String,
    pub phone: String,
    pub vehicle: String,
    pub issue: String,
    /// Serialized as the status label (`"Estimate"`, `"Delivered"`, ...),
    /// not the stage id.
    #[serde(with = "stage::status_label")]
    pub status: Stage,
    /// Estimated job value in whole dollars.
    pub value: u32,
    pub estimator: String,
    pub due_date: DateTime<Utc>,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    /// Creates a job in the first pipeline stage with a due date one week
    /// out. Use the `with_*` setters to fill in the rest.
    pub fn new(id: &str, customer: &str, vehicle: &str, issue: &str) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            customer: customer.to_string(),
            phone: String::new(),
            vehicle: vehicle.to_string(),
            issue: issue.to_string(),
            status: Stage::NewInquiry,
            value: 0,
            estimator: String::new(),
            due_date: now + chrono::Duration::days(7),
            priority: Priority::Medium,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_status(mut self, status: Stage) -> Self {
        self.status = status;
        self
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = phone.to_string();
        self
    }

    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    pub fn with_estimator(mut self, estimator: &str) -> Self {
        self.estimator = estimator.to_string();
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// True when the due date has passed and the job has not been
    /// delivered.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date < now && self.status != Stage::Complete
    }

    /// Case-insensitive match against customer name, phone, or job id.
    pub fn matches_search(&self, term: &str) -> bool {
        let term_lower = term.to_lowercase();
        self.customer.to_lowercase().contains(&term_lower)
            || self.phone.contains(term)
            || self.id.to_lowercase().contains(&term_lower)
    }
}
