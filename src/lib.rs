//! Premium adjustment engine for Contractors' All-Risk (CAR) quoting
//!
//! A CAR proposal carries a catalog of CEW riders (Conditions, Extensions,
//! Warranties) and a third-party-liability limit tier. This crate owns the
//! computation behind the quote: normalizing the insurer's pricing
//! configuration into a selectable catalog, deriving each rider's premium
//! impact from its selection state, folding the impacts into bucketed
//! adjustment totals, and evaluating admin-authored rating formulas against
//! test inputs.
//!
//! The UI and backend layers around this (form wiring, persistence, the map
//! widget, document handling) are external collaborators: configurations
//! come in as JSON, totals go out through callbacks or plain values.

pub mod catalog;
pub mod formula;
pub mod rating;

pub use catalog::{
    build_catalog, catalog_from_json, AdjustmentUnit, ItemClass, ItemOption, LiabilityTier,
    ProductPricingConfig, SelectableItem,
};
pub use formula::{evaluate, FormulaError, Operator, Token};
pub use rating::{
    aggregate, impact, AdjustmentListener, AdjustmentTotals, AggregateEngine, Bucket, Impact,
    PremiumBreakdown, QuoteState,
};
