//! CEW catalog: raw configuration shapes, normalized model, and loading

mod data;
pub mod config;
pub mod liability;
pub mod loader;

pub use config::{ClausePricing, OptionPricing, ProductPricingConfig, TierPricing};
pub use data::{AdjustmentUnit, ItemClass, ItemOption, LiabilityTier, SelectableItem};
pub use liability::{build_liability_tiers, default_liability_tiers};
pub use loader::{build_catalog, catalog_from_json};
