//! Builder patterns for creating test data programmatically.
//!
//! These builders allow creating job and lead records without repetitive
//! boilerplate in the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};

use command_center::board::Stage;
use command_center::jobs::{JobRecord, Priority};
use command_center::leads::{Engagement, Lead, LeadSource, Temperature};

/// Builder for creating `JobRecord` instances.
pub struct JobBuilder {
    id: String,
    customer: String,
    vehicle: String,
    issue: String,
    status: Stage,
    value: u32,
    priority: Priority,
    due_in_days: i64,
    created_at: DateTime<Utc>,
}

impl JobBuilder {
    /// Create a new builder with sensible defaults for testing.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            customer: "Test Customer".to_string(),
            vehicle: "2022 Honda Civic".to_string(),
            issue: "Rear bumper repair".to_string(),
            status: Stage::NewInquiry,
            value: 1000,
            priority: Priority::Medium,
            due_in_days: 7,
            created_at: Utc::now(),
        }
    }

    pub fn customer(mut self, customer: &str) -> Self {
        self.customer = customer.to_string();
        self
    }

    pub fn status(mut self, status: Stage) -> Self {
        self.status = status;
        self
    }

    pub fn value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn due_in_days(mut self, days: i64) -> Self {
        self.due_in_days = days;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn build(self) -> JobRecord {
        let mut job = JobRecord::new(&self.id, &self.customer, &self.vehicle, &self.issue)
            .with_status(self.status)
            .with_value(self.value)
            .with_priority(self.priority)
            .with_due_date(Utc::now() + Duration::days(self.due_in_days));
        job.created_at = self.created_at;
        job.updated_at = self.created_at;
        job
    }
}

/// Builder for creating `Lead` instances.
pub struct LeadBuilder {
    id: String,
    name: String,
    source: LeadSource,
    temperature: Temperature,
    estimated_value: u32,
    response_time_hours: f64,
    follow_ups: u32,
    engagement: Engagement,
    follow_up_in_hours: i64,
}

impl LeadBuilder {
    /// Create a new builder with sensible defaults for testing.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: "Test Lead".to_string(),
            source: LeadSource::GoogleAds,
            temperature: Temperature::Warm,
            estimated_value: 1500,
            response_time_hours: 4.0,
            follow_ups: 1,
            engagement: Engagement::Medium,
            follow_up_in_hours: 24,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn source(mut self, source: LeadSource) -> Self {
        self.source = source;
        self
    }

    pub fn temperature(mut self, temperature: Temperature) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn estimated_value(mut self, value: u32) -> Self {
        self.estimated_value = value;
        self
    }

    pub fn engagement(mut self, response_time_hours: f64, follow_ups: u32, engagement: Engagement) -> Self {
        self.response_time_hours = response_time_hours;
        self.follow_ups = follow_ups;
        self.engagement = engagement;
        self
    }

    pub fn follow_up_in_hours(mut self, hours: i64) -> Self {
        self.follow_up_in_hours = hours;
        self
    }

    pub fn build(self) -> Lead {
        let now = Utc::now();
        Lead::new(&self.id, &self.name, self.source)
            .with_contact("(215) 555-0100", &format!("{}@email.com", self.id.to_lowercase()))
            .with_vehicle("2022 Honda Civic", "Rear bumper damage")
            .with_temperature(self.temperature)
            .with_estimated_value(self.estimated_value)
            .with_engagement(self.response_time_hours, self.follow_ups, self.engagement)
            .with_follow_up(now, now + Duration::hours(self.follow_up_in_hours))
    }
}
