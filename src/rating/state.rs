//! Quote selection state and its transitions
//!
//! The whole selection state is one serializable value. Transitions are
//! reducer-style: they take the state by reference, return a new state, and
//! never mutate in place, so the selection logic is testable without any UI
//! harness. Derived totals are recomputed on demand, never cached.

use crate::catalog::{
    build_catalog, build_liability_tiers, default_liability_tiers, LiabilityTier,
    ProductPricingConfig, SelectableItem,
};
use crate::rating::aggregate::{aggregate, notify, AdjustmentListener, AdjustmentTotals};
use serde::{Deserialize, Serialize};

/// Full selection state for one quote in progress
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteState {
    /// The CEW catalog with per-item selection state
    pub items: Vec<SelectableItem>,

    /// Available TPL tiers
    pub liability_tiers: Vec<LiabilityTier>,

    /// Selected tier id; None means base TPL cover only
    pub selected_tier: Option<u32>,
}

impl QuoteState {
    pub fn new(items: Vec<SelectableItem>, liability_tiers: Vec<LiabilityTier>) -> Self {
        Self {
            items,
            liability_tiers,
            selected_tier: None,
        }
    }

    /// Build a fresh state from a pricing configuration.
    ///
    /// Rebuilding on a configuration reload resets every selection:
    /// mandatory items come back pre-selected, option choices and the
    /// liability tier are cleared.
    pub fn from_config(config: Option<&ProductPricingConfig>) -> Self {
        let items = build_catalog(config);
        let liability_tiers = match config {
            Some(config) => build_liability_tiers(&config.liability_tiers),
            None => default_liability_tiers(),
        };
        Self::new(items, liability_tiers)
    }

    /// Replay a previously saved selection set onto this catalog.
    ///
    /// Matching is by item id; saved items with no counterpart are ignored,
    /// as are saved option ids that no longer exist. Mandatory items stay
    /// selected regardless of the saved flag.
    pub fn replay(&self, saved: &[SelectableItem]) -> QuoteState {
        let mut next = self.clone();
        for item in &mut next.items {
            let Some(prior) = saved.iter().find(|s| s.id == item.id) else {
                continue;
            };
            item.is_selected = item.is_mandatory || prior.is_selected;
            item.selected_option = prior
                .selected_option
                .filter(|id| item.options.iter().any(|o| o.id == *id));
            if item.selected_option.is_some() {
                item.is_selected = true;
            }
        }
        next
    }

    /// Set an item's selection flag.
    ///
    /// Deselecting a mandatory item is a silent no-op; deselecting an
    /// optional item also clears its chosen option.
    pub fn select(&self, item_id: u32, selected: bool) -> QuoteState {
        let mut next = self.clone();
        if let Some(item) = next.items.iter_mut().find(|i| i.id == item_id) {
            if item.is_mandatory && !selected {
                log::debug!("ignoring deselect of mandatory item {}", item.code);
                return next;
            }
            item.is_selected = selected;
            if !selected {
                item.selected_option = None;
            }
        }
        next
    }

    /// Choose (or toggle off) a coverage-limit option.
    ///
    /// Picking an option auto-selects the item; re-picking the currently
    /// chosen option reverts the item to its base rate.
    pub fn choose_option(&self, item_id: u32, option_id: u32) -> QuoteState {
        let mut next = self.clone();
        if let Some(item) = next.items.iter_mut().find(|i| i.id == item_id) {
            if !item.options.iter().any(|o| o.id == option_id) {
                log::debug!("ignoring unknown option {option_id} on item {}", item.code);
                return next;
            }
            if item.selected_option == Some(option_id) {
                // Toggle off back to base rate; the item stays selected
                item.selected_option = None;
            } else {
                item.selected_option = Some(option_id);
                item.is_selected = true;
            }
        }
        next
    }

    /// Select (or toggle off) a liability-limit tier.
    pub fn toggle_liability_tier(&self, tier_id: u32) -> QuoteState {
        let mut next = self.clone();
        if !next.liability_tiers.iter().any(|t| t.id == tier_id) {
            return next;
        }
        next.selected_tier = if next.selected_tier == Some(tier_id) {
            None
        } else {
            Some(tier_id)
        };
        next
    }

    /// Resolve the currently selected tier, if any
    pub fn current_tier(&self) -> Option<&LiabilityTier> {
        self.selected_tier
            .and_then(|id| self.liability_tiers.iter().find(|t| t.id == id))
    }

    /// Derive the bucketed adjustment totals for the current state
    pub fn totals(&self) -> AdjustmentTotals {
        aggregate(&self.items, self.current_tier())
    }
}

/// Owns a `QuoteState` and pushes totals to a listener after every change.
///
/// This is the boundary toward the price-summary display and the purchase
/// flow: each transition recomputes the whole catalog and emits the full
/// notification sequence.
pub struct AggregateEngine<L: AdjustmentListener> {
    state: QuoteState,
    listener: L,
}

impl<L: AdjustmentListener> AggregateEngine<L> {
    /// Wrap an initial state and emit the initial totals.
    pub fn new(state: QuoteState, listener: L) -> Self {
        let mut engine = Self { state, listener };
        engine.recompute();
        engine
    }

    pub fn state(&self) -> &QuoteState {
        &self.state
    }

    pub fn select(&mut self, item_id: u32, selected: bool) {
        self.state = self.state.select(item_id, selected);
        self.recompute();
    }

    pub fn choose_option(&mut self, item_id: u32, option_id: u32) {
        self.state = self.state.choose_option(item_id, option_id);
        self.recompute();
    }

    pub fn toggle_liability_tier(&mut self, tier_id: u32) {
        self.state = self.state.toggle_liability_tier(tier_id);
        self.recompute();
    }

    /// Replace the catalog after a configuration reload
    pub fn reload(&mut self, config: Option<&ProductPricingConfig>) {
        self.state = QuoteState::from_config(config);
        self.recompute();
    }

    /// Replay a saved selection set onto the current catalog
    pub fn replay(&mut self, saved: &[SelectableItem]) {
        self.state = self.state.replay(saved);
        self.recompute();
    }

    fn recompute(&mut self) {
        let totals = self.state.totals();
        log::debug!(
            "recomputed adjustments: combined {:.4} over {} items",
            totals.combined(),
            self.state.items.len()
        );
        notify(
            &mut self.listener,
            &self.state.items,
            self.state.current_tier(),
            &totals,
        );
    }
}
