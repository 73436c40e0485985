//! Raw product-pricing configuration shapes
//!
//! These mirror the payload returned by the product service's
//! "get product configuration" endpoint. Field values arrive loosely typed:
//! numeric fields may be JSON numbers or string-encoded numbers, and most
//! fields can be absent. Everything defaults rather than fails; the loader
//! decides what to keep.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level pricing configuration for one insurer product
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPricingConfig {
    /// Insurer/product display name
    #[serde(default)]
    pub product_name: String,

    /// Clause pricing records, enabled or not
    #[serde(default)]
    pub clauses: Vec<ClausePricing>,

    /// Liability-limit tiers; empty means "use the standard table"
    #[serde(default)]
    pub liability_tiers: Vec<TierPricing>,
}

/// One clause/extension/warranty pricing record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClausePricing {
    #[serde(default)]
    pub id: u32,

    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Disabled records are dropped by the loader
    #[serde(default = "default_true")]
    pub is_enabled: bool,

    /// "CONDITION" | "EXTENSION" | "WARRANTY" (free case in practice)
    #[serde(default)]
    pub clause_type: String,

    /// "MANDATORY" | "OPTIONAL"
    #[serde(default)]
    pub classification: String,

    /// Declared unit of `pricing_value`; not always consistent with the
    /// nested options, which carry their own type
    #[serde(default)]
    pub pricing_type: String,

    /// Base-rate value; number or string-encoded number
    #[serde(default)]
    pub pricing_value: Value,

    #[serde(default)]
    pub options: Vec<OptionPricing>,
}

/// One nested coverage-limit option record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionPricing {
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub limit_description: String,

    /// "PERCENTAGE" for percentage-of-premium, anything else is a fixed amount
    #[serde(default)]
    pub option_type: String,

    /// Adjustment magnitude; number or string-encoded number
    #[serde(default)]
    pub value: Value,
}

/// One liability-limit tier record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TierPricing {
    #[serde(default)]
    pub id: u32,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub limit: Value,

    #[serde(default)]
    pub description: String,

    /// Signed percentage adjustment to the base premium
    #[serde(default)]
    pub premium_adjustment: Value,
}

fn default_true() -> bool {
    true
}

/// Lenient numeric coercion for loosely typed config values.
///
/// Strings are trimmed and parsed; anything missing or unparsable is 0.
pub(crate) fn parse_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
