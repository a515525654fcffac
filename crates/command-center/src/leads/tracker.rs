//! Lead store, filtering, and conversion summaries.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::lead_repo::{self, LeadFilter, LeadRow};
use crate::db::{Database, DatabaseError};
use crate::leads::{Engagement, Lead, LeadSource, Temperature};

// ─── Helpers ────────────────────────────────────────────────────────────────

fn parse_source(s: &str, lead_id: &str) -> LeadSource {
    match LeadSource::from_str_opt(s) {
        Some(source) => source,
        None => {
            log::warn!(
                "Unknown lead source '{}' for lead {}, defaulting to Walk-ins",
                s,
                lead_id
            );
            LeadSource::WalkIns
        }
    }
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            log::warn!("parse_timestamp: failed to parse '{}': {}", s, e);
            Utc::now()
        })
}

fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl Lead {
    /// Creates a Lead from a database row.
    pub fn from_lead_row(row: &LeadRow) -> Self {
        Self {
            id: row.id.clone(),
            name: row.name.clone(),
            phone: row.phone.clone(),
            email: row.email.clone(),
            source: parse_source(&row.source, &row.id),
            vehicle: row.vehicle.clone(),
            issue: row.issue.clone(),
            temperature: Temperature::from_str_or_default(&row.temperature),
            last_contact: parse_timestamp(&row.last_contact),
            next_follow_up: parse_timestamp(&row.next_follow_up),
            estimated_value: row.estimated_value.max(0) as u32,
            response_time_hours: row.response_time_hours,
            follow_ups: row.follow_ups.max(0) as u32,
            engagement: Engagement::from_str_or_default(&row.engagement),
            notes: row.notes.clone(),
            created_at: parse_timestamp(&row.created_at),
            updated_at: parse_timestamp(&row.updated_at),
        }
    }

    fn to_lead_row(&self) -> LeadRow {
        LeadRow {
            id: self.id.clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            source: self.source.as_str().to_string(),
            vehicle: self.vehicle.clone(),
            issue: self.issue.clone(),
            temperature: self.temperature.as_str().to_string(),
            last_contact: format_timestamp(self.last_contact),
            next_follow_up: format_timestamp(self.next_follow_up),
            estimated_value: self.estimated_value as i64,
            response_time_hours: self.response_time_hours,
            follow_ups: self.follow_ups as i64,
            engagement: self.engagement.as_str().to_string(),
            notes: self.notes.clone(),
            created_at: format_timestamp(self.created_at),
            updated_at: format_timestamp(self.updated_at),
        }
    }
}

// ─── Query types ────────────────────────────────────────────────────────────

/// Query parameters for lead listing.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadQueryParams {
    /// Matched against name, phone, and email.
    pub search: Option<String>,
    pub source: Option<LeadSource>,
    pub temperature: Option<Temperature>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Response for lead listing with pagination.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadListResponse {
    pub leads: Vec<Lead>,
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

// ─── Conversion summary ─────────────────────────────────────────────────────

/// Per-source conversion counts for the tracker's source breakdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConversion {
    pub source: LeadSource,
    pub leads: u32,
    pub converted: u32,
}

impl SourceConversion {
    pub fn new(source: LeadSource, leads: u32, converted: u32) -> Self {
        Self {
            source,
            leads,
            converted,
        }
    }

    /// Conversion rate as a whole percentage, rounded half-up.
    pub fn rate(&self) -> u32 {
        if self.leads == 0 {
            return 0;
        }
        (self.converted * 100 + self.leads / 2) / self.leads
    }
}

// ─── LeadStore ──────────────────────────────────────────────────────────────

/// In-memory lead store with optional persistent backing, mirroring the
/// job store's cache-then-database discipline.
pub struct LeadStore {
    db: RwLock<Option<Database>>,
    cache: RwLock<HashMap<String, Lead>>,
}

impl LeadStore {
    pub fn new() -> Self {
        Self {
            db: RwLock::new(None),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Sets the database connection.
    pub fn set_database(&self, db: Database) {
        let mut guard = match self.db.write() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Lead store DB lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        *guard = Some(db);
    }

    fn get_database(&self) -> Option<Database> {
        let guard = match self.db.read() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Lead store DB lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.clone()
    }

    /// Inserts a lead into the cache and persists it when a database is
    /// attached.
    pub fn insert(&self, lead: Lead) -> Result<(), DatabaseError> {
        if let Some(db) = self.get_database() {
            lead_repo::insert(&db, &lead.to_lead_row())?;
        }
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(lead.id.clone(), lead);
        }
        Ok(())
    }

    /// Returns a specific lead by ID (from cache).
    pub fn get(&self, lead_id: &str) -> Option<Lead> {
        let cache = match self.cache.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Lead store cache lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        cache.get(lead_id).cloned()
    }

    /// Returns all leads sorted by next follow-up (soonest first).
    pub fn get_all(&self) -> Vec<Lead> {
        let cache = match self.cache.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Lead store cache lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        let mut result: Vec<Lead> = cache.values().cloned().collect();
        result.sort_by(|a, b| a.next_follow_up.cmp(&b.next_follow_up));
        result
    }

    /// Query leads with filters and pagination, preferring the database.
    pub fn query(&self, params: &LeadQueryParams) -> Result<LeadListResponse, DatabaseError> {
        if let Some(db) = self.get_database() {
            let filter = LeadFilter {
                source: params.source.map(|s| s.as_str().to_string()),
                temperature: params.temperature.map(|t| t.as_str().to_string()),
                search: params.search.clone(),
                limit: params.limit,
                offset: params.offset,
            };
            let (rows, total) = lead_repo::query(&db, &filter)?;
            let leads = rows.iter().map(Lead::from_lead_row).collect();
            Ok(LeadListResponse {
                leads,
                total,
                limit: params.limit,
                offset: params.offset,
            })
        } else {
            self.query_cache(params)
        }
    }

    fn query_cache(&self, params: &LeadQueryParams) -> Result<LeadListResponse, DatabaseError> {
        let mut leads = self.get_all();

        if let Some(ref search) = params.search {
            leads.retain(|l| l.matches_search(search));
        }
        if let Some(source) = params.source {
            leads.retain(|l| l.source == source);
        }
        if let Some(temperature) = params.temperature {
            leads.retain(|l| l.temperature == temperature);
        }

        let total = leads.len() as u64;
        let offset = params.offset.unwrap_or(0) as usize;
        let limit = params.limit.unwrap_or(100) as usize;
        let leads: Vec<Lead> = leads.into_iter().skip(offset).take(limit).collect();

        Ok(LeadListResponse {
            leads,
            total,
            limit: params.limit,
            offset: params.offset,
        })
    }

    /// Records a follow-up: bumps the counter, moves the clock forward, and
    /// persists when a database is attached.
    pub fn record_follow_up(
        &self,
        lead_id: &str,
        now: DateTime<Utc>,
        next: DateTime<Utc>,
    ) -> Option<Lead> {
        let updated = match self.cache.write() {
            Ok(mut cache) => cache.get_mut(lead_id).map(|lead| {
                lead.follow_ups += 1;
                lead.last_contact = now;
                lead.next_follow_up = next;
                lead.updated_at = now;
                lead.clone()
            }),
            Err(poisoned) => {
                log::warn!("Lead store cache lock was poisoned, recovering");
                poisoned.into_inner().get_mut(lead_id).map(|lead| {
                    lead.follow_ups += 1;
                    lead.last_contact = now;
                    lead.next_follow_up = next;
                    lead.updated_at = now;
                    lead.clone()
                })
            }
        };

        match updated {
            Some(ref lead) => {
                if let Some(db) = self.get_database() {
                    if let Err(e) = lead_repo::update(&db, &lead.to_lead_row()) {
                        log::error!("Failed to persist follow-up for lead {}: {}", lead_id, e);
                    }
                }
            }
            None => log::warn!("record_follow_up: lead {} not in store", lead_id),
        }

        updated
    }

    /// Leads whose follow-up is due, soonest first.
    pub fn follow_ups_due(&self, now: DateTime<Utc>) -> Vec<Lead> {
        self.get_all()
            .into_iter()
            .filter(|l| l.needs_follow_up(now))
            .collect()
    }

    /// Loads persisted leads from the database into the cache on startup.
    pub fn load_from_database(&self) {
        let db = match self.get_database() {
            Some(db) => db,
            None => return,
        };

        let result = lead_repo::query(&db, &LeadFilter::default());

        let mut loaded = 0;
        if let Ok(mut cache) = self.cache.write() {
            if let Ok((rows, _)) = result {
                for row in &rows {
                    let lead = Lead::from_lead_row(row);
                    cache.insert(lead.id.clone(), lead);
                    loaded += 1;
                }
            }
        }

        log::info!("Loaded {} leads from database into cache", loaded);
    }
}

impl Default for LeadStore {
    fn default() -> Self {
        Self::new()
    }
}
