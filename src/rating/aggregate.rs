//! Aggregate adjustment totals across the whole catalog
//!
//! Every recompute walks the entire catalog; catalogs are tens of items, so
//! there is no incremental update or caching to invalidate.

use crate::catalog::{AdjustmentUnit, LiabilityTier, SelectableItem};
use crate::rating::impact::impact;
use serde::{Deserialize, Serialize};

/// Mandatory vs. optional partition of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Mandatory,
    Optional,
}

/// Bucketed adjustment sums plus the liability-limit contribution
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentTotals {
    /// Percentage sum over selected mandatory items
    pub mandatory_percentage: f64,

    /// Fixed-amount sum over selected mandatory items
    pub mandatory_fixed: f64,

    /// Percentage sum over selected optional items
    pub optional_percentage: f64,

    /// Fixed-amount sum over selected optional items
    pub optional_fixed: f64,

    /// Premium adjustment of the selected liability tier (0 if none)
    pub liability_percentage: f64,
}

impl AdjustmentTotals {
    /// Headline figure: arithmetic sum of all five components.
    ///
    /// Percentage and fixed units are mixed into one number purely for a
    /// simplified display; currency-correct math goes through `apply`.
    pub fn combined(&self) -> f64 {
        self.liability_percentage
            + self.mandatory_percentage
            + self.mandatory_fixed
            + self.optional_percentage
            + self.optional_fixed
    }

    /// Total percentage loading across all buckets
    pub fn total_percentage(&self) -> f64 {
        self.mandatory_percentage + self.optional_percentage + self.liability_percentage
    }

    /// Total fixed loading across all buckets
    pub fn total_fixed(&self) -> f64 {
        self.mandatory_fixed + self.optional_fixed
    }

    /// Apply the totals to an actual base premium.
    ///
    /// The percentage buckets load the base premium; the fixed buckets are
    /// added on top in currency units.
    pub fn apply(&self, base_premium: f64) -> PremiumBreakdown {
        let percentage_adjustment = base_premium * self.total_percentage() / 100.0;
        let fixed_adjustment = self.total_fixed();
        PremiumBreakdown {
            base_premium,
            percentage_adjustment,
            fixed_adjustment,
            total_premium: base_premium + percentage_adjustment + fixed_adjustment,
        }
    }
}

/// Currency-correct premium after applying the adjustment totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PremiumBreakdown {
    pub base_premium: f64,
    pub percentage_adjustment: f64,
    pub fixed_adjustment: f64,
    pub total_premium: f64,
}

/// Fold per-item impacts into bucketed totals.
pub fn aggregate(items: &[SelectableItem], tier: Option<&LiabilityTier>) -> AdjustmentTotals {
    let mut totals = AdjustmentTotals {
        liability_percentage: tier.map(|t| t.premium_adjustment).unwrap_or(0.0),
        ..Default::default()
    };

    for item in items {
        let imp = impact(item);
        match (item.is_mandatory, imp.unit) {
            (true, AdjustmentUnit::Percentage) => totals.mandatory_percentage += imp.value,
            (true, AdjustmentUnit::Fixed) => totals.mandatory_fixed += imp.value,
            (false, AdjustmentUnit::Percentage) => totals.optional_percentage += imp.value,
            (false, AdjustmentUnit::Fixed) => totals.optional_fixed += imp.value,
        }
    }

    totals
}

/// Listener notified after every recompute.
///
/// Mirrors the callback contract toward the purchase/declaration flow: the
/// full item list, one call per bucket pair, then the liability value with
/// the combined headline total and the chosen tier.
pub trait AdjustmentListener {
    fn on_catalog_changed(&mut self, items: &[SelectableItem]);
    fn on_bucket_totals(&mut self, bucket: Bucket, percentage: f64, fixed: f64);
    fn on_liability_total(&mut self, liability_percentage: f64, combined: f64);
    fn on_tier_changed(&mut self, tier: Option<&LiabilityTier>);
}

/// Notify a listener with the current catalog state and totals.
pub fn notify<L: AdjustmentListener>(
    listener: &mut L,
    items: &[SelectableItem],
    tier: Option<&LiabilityTier>,
    totals: &AdjustmentTotals,
) {
    listener.on_catalog_changed(items);
    listener.on_bucket_totals(
        Bucket::Mandatory,
        totals.mandatory_percentage,
        totals.mandatory_fixed,
    );
    listener.on_bucket_totals(
        Bucket::Optional,
        totals.optional_percentage,
        totals.optional_fixed,
    );
    listener.on_liability_total(totals.liability_percentage, totals.combined());
    listener.on_tier_changed(tier);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemClass, ItemOption};
    use approx::assert_relative_eq;

    fn item(
        id: u32,
        is_mandatory: bool,
        is_selected: bool,
        selected_option: Option<u32>,
        default_value: f64,
        options: Vec<ItemOption>,
    ) -> SelectableItem {
        SelectableItem {
            id,
            code: format!("MR{id:03}"),
            name: format!("Clause {id}"),
            description: String::new(),
            class: ItemClass::Extension,
            is_mandatory,
            is_selected,
            selected_option,
            default_value,
            options,
        }
    }

    fn pct_option(id: u32, value: f64) -> ItemOption {
        ItemOption {
            id,
            label: format!("Option {id}"),
            limit: String::new(),
            value,
            unit: AdjustmentUnit::Percentage,
            recommended: id == 1,
        }
    }

    fn tier(adjustment: f64) -> LiabilityTier {
        LiabilityTier {
            id: 2,
            label: "TPL 1,000,000".to_string(),
            limit: 1_000_000.0,
            description: String::new(),
            premium_adjustment: adjustment,
        }
    }

    fn sample_items() -> Vec<SelectableItem> {
        vec![
            // Mandatory with option chosen: delta 8 - 5 = +3 pct
            item(1, true, true, Some(1), 5.0, vec![pct_option(1, 8.0)]),
            // Mandatory at base rate: neutral
            item(2, true, true, None, 4.0, vec![]),
            // Optional selected at base rate, fixed 1200
            item(3, false, true, None, 1200.0, vec![]),
            // Optional selected with percentage option: full 12 pct
            item(4, false, true, Some(2), 5.0, vec![pct_option(1, 8.0), pct_option(2, 12.0)]),
            // Optional unselected: nothing
            item(5, false, false, None, 900.0, vec![]),
        ]
    }

    #[test]
    fn test_bucketed_sums() {
        let totals = aggregate(&sample_items(), Some(&tier(2.5)));
        assert_relative_eq!(totals.mandatory_percentage, 3.0);
        assert_eq!(totals.mandatory_fixed, 0.0);
        assert_relative_eq!(totals.optional_percentage, 12.0);
        assert_relative_eq!(totals.optional_fixed, 1200.0);
        assert_relative_eq!(totals.liability_percentage, 2.5);
    }

    #[test]
    fn test_combined_is_sum_of_components() {
        let totals = aggregate(&sample_items(), Some(&tier(2.5)));
        let expected = totals.mandatory_percentage
            + totals.mandatory_fixed
            + totals.optional_percentage
            + totals.optional_fixed
            + totals.liability_percentage;
        assert_relative_eq!(totals.combined(), expected);
        assert_relative_eq!(totals.combined(), 1217.5);
    }

    #[test]
    fn test_no_tier_contributes_zero() {
        let totals = aggregate(&sample_items(), None);
        assert_eq!(totals.liability_percentage, 0.0);
        assert_relative_eq!(totals.combined(), 1215.0);
    }

    #[test]
    fn test_empty_catalog() {
        let totals = aggregate(&[], None);
        assert_eq!(totals, AdjustmentTotals::default());
        assert_eq!(totals.combined(), 0.0);
    }

    #[test]
    fn test_apply_keeps_units_separate() {
        let totals = aggregate(&sample_items(), Some(&tier(2.5)));
        let breakdown = totals.apply(50_000.0);
        // 3 + 12 + 2.5 = 17.5 pct of 50,000 = 8,750 plus 1,200 fixed
        assert_relative_eq!(breakdown.percentage_adjustment, 8_750.0);
        assert_relative_eq!(breakdown.fixed_adjustment, 1_200.0);
        assert_relative_eq!(breakdown.total_premium, 59_950.0);
    }

    #[derive(Default)]
    struct Recorder {
        catalog_calls: usize,
        buckets: Vec<(Bucket, f64, f64)>,
        liability: Option<(f64, f64)>,
        tier_ids: Vec<Option<u32>>,
    }

    impl AdjustmentListener for Recorder {
        fn on_catalog_changed(&mut self, _items: &[SelectableItem]) {
            self.catalog_calls += 1;
        }
        fn on_bucket_totals(&mut self, bucket: Bucket, percentage: f64, fixed: f64) {
            self.buckets.push((bucket, percentage, fixed));
        }
        fn on_liability_total(&mut self, liability_percentage: f64, combined: f64) {
            self.liability = Some((liability_percentage, combined));
        }
        fn on_tier_changed(&mut self, tier: Option<&LiabilityTier>) {
            self.tier_ids.push(tier.map(|t| t.id));
        }
    }

    #[test]
    fn test_notify_emits_both_buckets_and_liability() {
        let items = sample_items();
        let t = tier(2.5);
        let totals = aggregate(&items, Some(&t));
        let mut recorder = Recorder::default();
        notify(&mut recorder, &items, Some(&t), &totals);

        assert_eq!(recorder.catalog_calls, 1);
        assert_eq!(recorder.buckets.len(), 2);
        assert_eq!(recorder.buckets[0].0, Bucket::Mandatory);
        assert_eq!(recorder.buckets[1].0, Bucket::Optional);
        let (liability, combined) = recorder.liability.unwrap();
        assert_relative_eq!(liability, 2.5);
        assert_relative_eq!(combined, totals.combined());
        assert_eq!(recorder.tier_ids, vec![Some(2)]);
    }
}
