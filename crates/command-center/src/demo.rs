//! Demo dataset: the sample records the dashboard ships with.
//!
//! Due dates and follow-up times are relative to now so the overdue and
//! follow-up indicators always have something to show.

use chrono::{Duration, Utc};

use crate::board::Stage;
use crate::config::ShopConfig;
use crate::db::DatabaseError;
use crate::estimators::Estimator;
use crate::jobs::{JobRecord, JobStore, Priority};
use crate::leads::{Engagement, Lead, LeadSource, LeadStore, SourceConversion, Temperature};
use crate::quotes::{CompetitorQuote, LaborTask, Quote, QuoteBuilder};

/// Four jobs spread across the pipeline, one of them overdue.
pub fn sample_jobs() -> Vec<JobRecord> {
    let now = Utc::now();
    let mut jobs = vec![
        JobRecord::new(
            "#CC-2024-001",
            "Jessica Martinez",
            "2022 Honda Civic",
            "Rear bumper repair + paint",
        )
        .with_phone("(215) 555-0123")
        .with_status(Stage::InProgress)
        .with_value(2450)
        .with_estimator("Ali Sheikh")
        .with_due_date(now + Duration::days(1))
        .with_priority(Priority::High)
        .with_notes("Customer wants OEM parts only"),
        JobRecord::new(
            "#CC-2024-002",
            "Mike Johnson",
            "2021 Toyota Camry",
            "Front door dent removal",
        )
        .with_phone("(215) 555-0124")
        .with_status(Stage::JobScheduled)
        .with_value(1850)
        .with_estimator("Ali Sheikh")
        .with_due_date(now + Duration::days(2))
        .with_priority(Priority::Medium)
        .with_notes("Insurance claim - State Farm"),
        JobRecord::new(
            "#CC-2024-003",
            "Sarah Wilson",
            "2020 BMW 3 Series",
            "Full front end collision",
        )
        .with_phone("(215) 555-0125")
        .with_status(Stage::EstimateSent)
        .with_value(3200)
        .with_estimator("Ali Sheikh")
        .with_due_date(now - Duration::days(1))
        .with_priority(Priority::High)
        .with_notes("Waiting for adjuster approval"),
        JobRecord::new(
            "#CC-2024-004",
            "David Brown",
            "2019 Ford F-150",
            "Bed liner + tailgate paint",
        )
        .with_phone("(215) 555-0126")
        .with_status(Stage::Complete)
        .with_value(1200)
        .with_estimator("Ali Sheikh")
        .with_due_date(now - Duration::days(1))
        .with_priority(Priority::Low)
        .with_notes("Customer pickup completed"),
    ];

    // Stagger creation times so lane derivation is stable.
    for (i, job) in jobs.iter_mut().enumerate() {
        job.created_at = now - Duration::days(4) + Duration::hours(i as i64);
        job.updated_at = job.created_at;
    }
    jobs
}

/// Four leads across the temperature range, one with an overdue follow-up.
pub fn sample_leads() -> Vec<Lead> {
    let now = Utc::now();
    vec![
        Lead::new("L001", "Jessica Martinez", LeadSource::GoogleAds)
            .with_contact("(215) 555-0123", "jessica@email.com")
            .with_vehicle("2022 Honda Civic", "Rear bumper damage")
            .with_temperature(Temperature::Hot)
            .with_estimated_value(2450)
            .with_engagement(1.0, 3, Engagement::High)
            .with_follow_up(now - Duration::days(2), now + Duration::days(1))
            .with_notes("Very interested, wants OEM parts"),
        Lead::new("L002", "Mike Johnson", LeadSource::Gmb)
            .with_contact("(215) 555-0124", "mike@email.com")
            .with_vehicle("2021 Toyota Camry", "Door dent")
            .with_temperature(Temperature::Warm)
            .with_estimated_value(1850)
            .with_engagement(3.0, 2, Engagement::Medium)
            .with_follow_up(now - Duration::days(1), now + Duration::days(2))
            .with_notes("Price shopping, sent quote"),
        Lead::new("L003", "Sarah Wilson", LeadSource::Dealers)
            .with_contact("(215) 555-0125", "sarah@email.com")
            .with_vehicle("2020 BMW 3 Series", "Front end collision")
            .with_temperature(Temperature::Cold)
            .with_estimated_value(3200)
            .with_engagement(6.0, 1, Engagement::Low)
            .with_follow_up(now - Duration::days(3), now - Duration::days(1))
            .with_notes("Waiting for insurance approval"),
        Lead::new("L004", "David Brown", LeadSource::Referrals)
            .with_contact("(215) 555-0126", "david@email.com")
            .with_vehicle("2019 Ford F-150", "Bed liner + tailgate paint")
            .with_temperature(Temperature::Hot)
            .with_estimated_value(1200)
            .with_engagement(0.5, 3, Engagement::High)
            .with_follow_up(now - Duration::hours(12), now + Duration::hours(12))
            .with_notes("Ready to schedule"),
    ]
}

/// The four-estimator roster.
pub fn sample_estimators() -> Vec<Estimator> {
    vec![
        Estimator::new("E1", "Ali Sheikh")
            .with_performance(156, 108, 24_560_000)
            .with_trend(12),
        Estimator::new("E2", "Marcus Johnson")
            .with_performance(134, 89, 19_840_000)
            .with_trend(8),
        Estimator::new("E3", "Sarah Chen")
            .with_performance(142, 85, 18_730_000)
            .with_trend(5),
        Estimator::new("E4", "Tony Rodriguez")
            .with_performance(98, 28, 6_240_000)
            .with_trend(-3),
    ]
}

/// Per-source conversion history for the tracker's breakdown chart.
pub fn conversion_table() -> Vec<SourceConversion> {
    vec![
        SourceConversion::new(LeadSource::GoogleAds, 45, 31),
        SourceConversion::new(LeadSource::Gmb, 38, 28),
        SourceConversion::new(LeadSource::Dealers, 22, 18),
        SourceConversion::new(LeadSource::WalkIns, 15, 12),
        SourceConversion::new(LeadSource::Referrals, 12, 11),
    ]
}

/// The competitor quote used by the demo comparison.
pub fn sample_competitor_quote() -> CompetitorQuote {
    CompetitorQuote {
        competitor: "AutoBody Plus".to_string(),
        vehicle: "2022 Honda Civic".to_string(),
        damage: "Rear bumper replacement + paint".to_string(),
        labor_hours: 8.0,
        parts_cost_cents: 45000,
        paint_cost_cents: 20000,
        total_cents: 125000,
    }
}

/// The demo bumper quote, priced against `config` and compared with
/// [`sample_competitor_quote`].
pub fn sample_quote(config: &ShopConfig) -> Quote {
    QuoteBuilder::new("2022 Honda Civic", "Rear bumper replacement + paint")
        .labor(LaborTask::Removal, 1.5)
        .labor(LaborTask::Bodywork, 3.0)
        .labor(LaborTask::Paint, 4.0)
        .labor(LaborTask::Reassembly, 1.0)
        .part("Bumper cover", 38000)
        .part("Clips", 2500)
        .part("Foam absorber", 4500)
        .material("Basecoat", 8500)
        .material("Clearcoat", 6500)
        .material("Primer", 3500)
        .material("Supplies", 4500)
        .upsell("Headlight restoration", 15000, true)
        .upsell("Trim blackout", 7500, true)
        .upsell("Sealer upgrade", 10000, false)
        .against(sample_competitor_quote())
        .build(config)
}

/// Seeds a job store with [`sample_jobs`].
pub fn seed_job_store(store: &JobStore) -> Result<(), DatabaseError> {
    for job in sample_jobs() {
        store.insert(job)?;
    }
    Ok(())
}

/// Seeds a lead store with [`sample_leads`].
pub fn seed_lead_store(store: &LeadStore) -> Result<(), DatabaseError> {
    for lead in sample_leads() {
        store.insert(lead)?;
    }
    Ok(())
}
