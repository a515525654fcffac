//! Lead records: prospective jobs being tracked toward conversion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a lead came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadSource {
    #[serde(rename = "Google Ads")]
    GoogleAds,
    #[serde(rename = "GMB")]
    Gmb,
    #[serde(rename = "Dealers")]
    Dealers,
    #[serde(rename = "Walk-ins")]
    WalkIns,
    #[serde(rename = "Referrals")]
    Referrals,
}

impl LeadSource {
    pub const ALL: [LeadSource; 5] = [
        LeadSource::GoogleAds,
        LeadSource::Gmb,
        LeadSource::Dealers,
        LeadSource::WalkIns,
        LeadSource::Referrals,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::GoogleAds => "Google Ads",
            LeadSource::Gmb => "GMB",
            LeadSource::Dealers => "Dealers",
            LeadSource::WalkIns => "Walk-ins",
            LeadSource::Referrals => "Referrals",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<LeadSource> {
        LeadSource::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

impl std::fmt::Display for LeadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How warm the lead currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Temperature {
    Hot,
    Warm,
    Cold,
}

impl Temperature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Temperature::Hot => "Hot",
            Temperature::Warm => "Warm",
            Temperature::Cold => "Cold",
        }
    }

    pub fn from_str_or_default(s: &str) -> Temperature {
        match s {
            "Hot" => Temperature::Hot,
            "Cold" => Temperature::Cold,
            _ => Temperature::Warm,
        }
    }
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Customer engagement level, one of the confidence-score factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engagement {
    High,
    Medium,
    Low,
}

impl Engagement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engagement::High => "high",
            Engagement::Medium => "medium",
            Engagement::Low => "low",
        }
    }

    pub fn from_str_or_default(s: &str) -> Engagement {
        match s {
            "high" => Engagement::High,
            "low" => Engagement::Low,
            _ => Engagement::Medium,
        }
    }
}

impl std::fmt::Display for Engagement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One tracked lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub source: LeadSource,
    pub vehicle: String,
    pub issue: String,
    pub temperature: Temperature,
    pub last_contact: DateTime<Utc>,
    pub next_follow_up: DateTime<Utc>,
    /// Estimated job value in whole dollars.
    pub estimated_value: u32,
    /// Hours from first contact to first shop response.
    pub response_time_hours: f64,
    /// Number of follow-ups made so far.
    pub follow_ups: u32,
    pub engagement: Engagement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Creates a warm lead with a follow-up due tomorrow. Fill in the rest
    /// with the `with_*` setters.
    pub fn new(id: &str, name: &str, source: LeadSource) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            name: name.to_string(),
            phone: String::new(),
            email: String::new(),
            source,
            vehicle: String::new(),
            issue: String::new(),
            temperature: Temperature::Warm,
            last_contact: now,
            next_follow_up: now + chrono::Duration::days(1),
            estimated_value: 0,
            response_time_hours: 0.0,
            follow_ups: 0,
            engagement: Engagement::Medium,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_contact(mut self, phone: &str, email: &str) -> Self {
        self.phone = phone.to_string();
        self.email = email.to_string();
        self
    }

    pub fn with_vehicle(mut self, vehicle: &str, issue: &str) -> Self {
        self.vehicle = vehicle.to_string();
        self.issue = issue.to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: Temperature) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_estimated_value(mut self, value: u32) -> Self {
        self.estimated_value = value;
        self
    }

    pub fn with_engagement(
        mut self,
        response_time_hours: f64,
        follow_ups: u32,
        engagement: Engagement,
    ) -> Self {
        self.response_time_hours = response_time_hours;
        self.follow_ups = follow_ups;
        self.engagement = engagement;
        self
    }

    pub fn with_follow_up(mut self, last_contact: DateTime<Utc>, next: DateTime<Utc>) -> Self {
        self.last_contact = last_contact;
        self.next_follow_up = next;
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// Case-insensitive match against name, phone, or email.
    pub fn matches_search(&self, term: &str) -> bool {
        let term_lower = term.to_lowercase();
        self.name.to_lowercase().contains(&term_lower)
            || self.phone.contains(term)
            || self.email.to_lowercase().contains(&term_lower)
    }

    /// True when the scheduled follow-up time has passed.
    pub fn needs_follow_up(&self, now: DateTime<Utc>) -> bool {
        self.next_follow_up <= now
    }
}
