//! Third-party-liability limit tiers
//!
//! Products that do not price their own TPL tiers fall back to the standard
//! table below.

use super::config::{parse_number, TierPricing};
use super::data::LiabilityTier;

/// Standard TPL tier table used when the product configuration carries none.
///
/// The base policy includes the lowest limit at no adjustment; higher caps
/// load the premium by a flat percentage.
pub fn default_liability_tiers() -> Vec<LiabilityTier> {
    vec![
        LiabilityTier {
            id: 1,
            label: "TPL 500,000".to_string(),
            limit: 500_000.0,
            description: "Standard third-party liability limit".to_string(),
            premium_adjustment: 0.0,
        },
        LiabilityTier {
            id: 2,
            label: "TPL 1,000,000".to_string(),
            limit: 1_000_000.0,
            description: "Third-party liability limit raised to 1M".to_string(),
            premium_adjustment: 2.5,
        },
        LiabilityTier {
            id: 3,
            label: "TPL 2,000,000".to_string(),
            limit: 2_000_000.0,
            description: "Third-party liability limit raised to 2M".to_string(),
            premium_adjustment: 5.0,
        },
        LiabilityTier {
            id: 4,
            label: "TPL 5,000,000".to_string(),
            limit: 5_000_000.0,
            description: "Third-party liability limit raised to 5M".to_string(),
            premium_adjustment: 8.5,
        },
        LiabilityTier {
            id: 5,
            label: "TPL 10,000,000".to_string(),
            limit: 10_000_000.0,
            description: "Third-party liability limit raised to 10M".to_string(),
            premium_adjustment: 12.0,
        },
    ]
}

/// Build the tier table from configured records, falling back to the
/// standard table when the configuration carries none.
pub fn build_liability_tiers(configured: &[TierPricing]) -> Vec<LiabilityTier> {
    if configured.is_empty() {
        return default_liability_tiers();
    }

    configured
        .iter()
        .map(|tier| LiabilityTier {
            id: tier.id,
            label: tier.label.clone(),
            limit: parse_number(&tier.limit),
            description: tier.description.clone(),
            premium_adjustment: parse_number(&tier.premium_adjustment),
        })
        .collect()
}
