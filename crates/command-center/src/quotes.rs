//! Quote engine: deterministic quote calculation from labor, parts, and
//! materials at the shop's configured rates.
//!
//! All money is integer cents; fractional intermediate values (hours times
//! rate, markup) are rounded half-away-from-zero at the line level.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ShopConfig;

/// Labor categories on a collision quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaborTask {
    Removal,
    Bodywork,
    Paint,
    Reassembly,
}

impl std::fmt::Display for LaborTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LaborTask::Removal => "Removal",
            LaborTask::Bodywork => "Bodywork",
            LaborTask::Paint => "Paint",
            LaborTask::Reassembly => "Reassembly",
        };
        write!(f, "{}", s)
    }
}

/// One labor line: hours at the shop rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborLine {
    pub task: LaborTask,
    pub hours: f64,
    pub rate_cents: i64,
    pub total_cents: i64,
}

/// One part line: cost with the shop markup applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartLine {
    pub name: String,
    pub cost_cents: i64,
    pub markup: f64,
    pub total_cents: i64,
}

/// Paint and materials, passed through at cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialLine {
    pub name: String,
    pub cost_cents: i64,
}

/// An optional add-on offered with the quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsellOffer {
    pub name: String,
    pub price_cents: i64,
    pub recommended: bool,
}

/// Warranty tiers offered on every quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarrantyTier {
    Standard,
    Premium,
    Lifetime,
}

/// A priced warranty option; `months` is `None` for lifetime coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarrantyOption {
    pub tier: WarrantyTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months: Option<u32>,
    pub price_cents: i64,
}

/// A competitor's quote, extracted for comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorQuote {
    pub competitor: String,
    pub vehicle: String,
    pub damage: String,
    pub labor_hours: f64,
    pub parts_cost_cents: i64,
    pub paint_cost_cents: i64,
    pub total_cents: i64,
}

/// How our price stacks up against the competitor's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitiveAnalysis {
    pub our_price_cents: i64,
    pub competitor_price_cents: i64,
    /// Positive when we are more expensive.
    pub difference_cents: i64,
    pub value_props: Vec<String>,
}

/// A fully priced quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub job_id: String,
    pub vehicle: String,
    pub damage: String,
    pub labor: Vec<LaborLine>,
    pub parts: Vec<PartLine>,
    pub materials: Vec<MaterialLine>,
    pub upsells: Vec<UpsellOffer>,
    pub warranty_options: Vec<WarrantyOption>,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitive: Option<CompetitiveAnalysis>,
    pub created_at: DateTime<Utc>,
}

impl Quote {
    /// Total labor hours across all lines.
    pub fn labor_hours(&self) -> f64 {
        self.labor.iter().map(|l| l.hours).sum()
    }
}

/// Generates a job number in the shop's `#CC-<year>-NNN` format.
pub fn next_job_number() -> String {
    let entropy = (uuid::Uuid::new_v4().as_u128() % 1000) as u32;
    format!("#CC-{}-{:03}", Utc::now().year(), entropy)
}

/// Formats cents as a dollar string with thousands separators,
/// e.g. `$1,751.76`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    let dollars = cents / 100;
    let remainder = cents % 100;

    let mut digits = dollars.to_string();
    let mut grouped = String::new();
    while digits.len() > 3 {
        let tail = digits.split_off(digits.len() - 3);
        grouped = format!(",{}{}", tail, grouped);
    }
    format!("{}${}{}.{:02}", sign, digits, grouped, remainder)
}

fn round_cents(value: f64) -> i64 {
    value.round() as i64
}

/// Assembles a [`Quote`] line by line, pricing it against a [`ShopConfig`]
/// at build time.
#[derive(Debug, Clone, Default)]
pub struct QuoteBuilder {
    vehicle: String,
    damage: String,
    labor: Vec<(LaborTask, f64)>,
    parts: Vec<(String, i64)>,
    materials: Vec<(String, i64)>,
    upsells: Vec<UpsellOffer>,
    competitor: Option<CompetitorQuote>,
}

impl QuoteBuilder {
    pub fn new(vehicle: &str, damage: &str) -> Self {
        Self {
            vehicle: vehicle.to_string(),
            damage: damage.to_string(),
            ..Default::default()
        }
    }

    pub fn labor(mut self, task: LaborTask, hours: f64) -> Self {
        self.labor.push((task, hours));
        self
    }

    pub fn part(mut self, name: &str, cost_cents: i64) -> Self {
        self.parts.push((name.to_string(), cost_cents));
        self
    }

    pub fn material(mut self, name: &str, cost_cents: i64) -> Self {
        self.materials.push((name.to_string(), cost_cents));
        self
    }

    pub fn upsell(mut self, name: &str, price_cents: i64, recommended: bool) -> Self {
        self.upsells.push(UpsellOffer {
            name: name.to_string(),
            price_cents,
            recommended,
        });
        self
    }

    /// Attaches a competitor quote for the competitive analysis block.
    pub fn against(mut self, competitor: CompetitorQuote) -> Self {
        self.competitor = Some(competitor);
        self
    }

    /// Prices the quote. Upsells and warranty pricing are offered, not
    /// included: the subtotal covers labor, parts, and materials only.
    pub fn build(self, config: &ShopConfig) -> Quote {
        let labor: Vec<LaborLine> = self
            .labor
            .into_iter()
            .map(|(task, hours)| LaborLine {
                task,
                hours,
                rate_cents: config.labor_rate_cents,
                total_cents: round_cents(hours * config.labor_rate_cents as f64),
            })
            .collect();

        let parts: Vec<PartLine> = self
            .parts
            .into_iter()
            .map(|(name, cost_cents)| PartLine {
                name,
                cost_cents,
                markup: config.parts_markup,
                total_cents: round_cents(cost_cents as f64 * config.parts_markup),
            })
            .collect();

        let materials: Vec<MaterialLine> = self
            .materials
            .into_iter()
            .map(|(name, cost_cents)| MaterialLine { name, cost_cents })
            .collect();

        let subtotal_cents = labor.iter().map(|l| l.total_cents).sum::<i64>()
            + parts.iter().map(|p| p.total_cents).sum::<i64>()
            + materials.iter().map(|m| m.cost_cents).sum::<i64>();
        let tax_cents = round_cents(subtotal_cents as f64 * config.tax_rate);
        let total_cents = subtotal_cents + tax_cents;

        let warranty_options = vec![
            WarrantyOption {
                tier: WarrantyTier::Standard,
                months: Some(config.warranty.standard_months),
                price_cents: 0,
            },
            WarrantyOption {
                tier: WarrantyTier::Premium,
                months: Some(config.warranty.premium_months),
                price_cents: config.warranty.premium_price_cents,
            },
            WarrantyOption {
                tier: WarrantyTier::Lifetime,
                months: None,
                price_cents: config.warranty.lifetime_price_cents,
            },
        ];

        let competitive = self.competitor.map(|c| CompetitiveAnalysis {
            our_price_cents: total_cents,
            competitor_price_cents: c.total_cents,
            difference_cents: total_cents - c.total_cents,
            value_props: config.value_props.clone(),
        });

        let quote = Quote {
            job_id: next_job_number(),
            vehicle: self.vehicle,
            damage: self.damage,
            labor,
            parts,
            materials,
            upsells: self.upsells,
            warranty_options,
            subtotal_cents,
            tax_cents,
            total_cents,
            competitive,
            created_at: Utc::now(),
        };
        tracing::debug!(job_id = %quote.job_id, total = quote.total_cents, "quote built");
        quote
    }
}
