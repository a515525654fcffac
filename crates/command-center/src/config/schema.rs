use serde::{Deserialize, Serialize};

/// Shop-level settings: the rates and pricing the quote engine applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_shop_name")]
    pub shop_name: String,
    /// Hourly labor rate in cents.
    #[serde(default = "default_labor_rate_cents")]
    pub labor_rate_cents: i64,
    /// Multiplier applied to part cost (1.3 = 30% markup).
    #[serde(default = "default_parts_markup")]
    pub parts_markup: f64,
    /// Sales tax as a fraction (0.08 = 8%).
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    #[serde(default)]
    pub warranty: WarrantyConfig,
    /// Competitive talking points attached to generated quotes.
    #[serde(default = "default_value_props")]
    pub value_props: Vec<String>,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_shop_name() -> String {
    "Collision Club".to_string()
}

fn default_labor_rate_cents() -> i64 {
    8500
}

fn default_parts_markup() -> f64 {
    1.3
}

fn default_tax_rate() -> f64 {
    0.08
}

fn default_value_props() -> Vec<String> {
    vec![
        "OEM parts guarantee".to_string(),
        "Sherwin-Williams paint system".to_string(),
        "Lifetime warranty available".to_string(),
        "Free headlight restoration".to_string(),
    ]
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            shop_name: default_shop_name(),
            labor_rate_cents: default_labor_rate_cents(),
            parts_markup: default_parts_markup(),
            tax_rate: default_tax_rate(),
            warranty: WarrantyConfig::default(),
            value_props: default_value_props(),
        }
    }
}

/// Warranty tier durations and pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarrantyConfig {
    #[serde(default = "default_standard_months")]
    pub standard_months: u32,
    #[serde(default = "default_premium_months")]
    pub premium_months: u32,
    /// Premium tier price in cents.
    #[serde(default = "default_premium_price_cents")]
    pub premium_price_cents: i64,
    /// Lifetime tier price in cents.
    #[serde(default = "default_lifetime_price_cents")]
    pub lifetime_price_cents: i64,
}

fn default_standard_months() -> u32 {
    12
}

fn default_premium_months() -> u32 {
    24
}

fn default_premium_price_cents() -> i64 {
    15000
}

fn default_lifetime_price_cents() -> i64 {
    30000
}

impl Default for WarrantyConfig {
    fn default() -> Self {
        Self {
            standard_months: default_standard_months(),
            premium_months: default_premium_months(),
            premium_price_cents: default_premium_price_cents(),
            lifetime_price_cents: default_lifetime_price_cents(),
        }
    }
}
