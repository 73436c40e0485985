//! Premium adjustment computation: per-item impacts, bucketed totals, and
//! the quote selection state that drives them

mod impact;
pub mod aggregate;
pub mod state;

pub use aggregate::{
    aggregate, AdjustmentListener, AdjustmentTotals, Bucket, PremiumBreakdown,
};
pub use impact::{impact, Impact};
pub use state::{AggregateEngine, QuoteState};
