//! Lead tracking: records, confidence scoring, and the lead store.

pub mod record;
pub mod scoring;
pub mod tracker;

pub use record::{Engagement, Lead, LeadSource, Temperature};
pub use scoring::{confidence_score, ConfidenceBand, ScoreFactors};
pub use tracker::{LeadListResponse, LeadQueryParams, LeadStore, SourceConversion};
