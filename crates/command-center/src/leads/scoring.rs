//! Conversion-confidence scoring.
//!
//! A bounded score in `[0, 100]`, the sum of five independent per-factor
//! contributions. Pure derivation used only for display ranking; it has no
//! bearing on stage membership or lead state.

use serde::Serialize;

use super::{Engagement, Lead, LeadSource};

/// The five inputs the confidence score reads.
#[derive(Debug, Clone, Copy)]
pub struct ScoreFactors {
    pub response_time_hours: f64,
    pub source: LeadSource,
    pub estimated_value: u32,
    pub follow_ups: u32,
    pub engagement: Engagement,
}

impl From<&Lead> for ScoreFactors {
    fn from(lead: &Lead) -> Self {
        Self {
            response_time_hours: lead.response_time_hours,
            source: lead.source,
            estimated_value: lead.estimated_value,
            follow_ups: lead.follow_ups,
            engagement: lead.engagement,
        }
    }
}

/// Computes the confidence score.
///
/// Factor weights: response time under two hours 20 else 10; referral
/// source 25, dealer 20, other 15; estimated value over $2,000 20 else 15;
/// more than two follow-ups 15 else 10; high engagement 20 else 10. The
/// total is capped at 100 (the maximum achievable sum).
pub fn confidence_score(factors: &ScoreFactors) -> u8 {
    let response_time = if factors.response_time_hours < 2.0 { 20 } else { 10 };
    let source = match factors.source {
        LeadSource::Referrals => 25,
        LeadSource::Dealers => 20,
        _ => 15,
    };
    let value = if factors.estimated_value > 2000 { 20 } else { 15 };
    let follow_ups = if factors.follow_ups > 2 { 15 } else { 10 };
    let engagement = if factors.engagement == Engagement::High { 20 } else { 10 };

    let total: u8 = response_time + source + value + follow_ups + engagement;
    total.min(100)
}

/// Display band for a confidence score (the green/yellow/red bar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    Strong,
    Moderate,
    Weak,
}

impl ConfidenceBand {
    pub fn from_score(score: u8) -> ConfidenceBand {
        if score > 80 {
            ConfidenceBand::Strong
        } else if score > 60 {
            ConfidenceBand::Moderate
        } else {
            ConfidenceBand::Weak
        }
    }
}

impl Lead {
    /// Confidence score for this lead. See [`confidence_score`].
    pub fn confidence_score(&self) -> u8 {
        confidence_score(&ScoreFactors::from(self))
    }
}
