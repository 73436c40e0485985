//! Normalized CEW catalog data structures
//!
//! A CEW (Condition, Extension, Warranty) is presented to the broker as a
//! selectable rider with zero or more coverage-limit options. The shapes here
//! are the in-memory model built by the loader from the raw product
//! configuration.

use serde::{Deserialize, Serialize};

/// Unit of a premium adjustment value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentUnit {
    /// Percentage of the base premium
    Percentage,
    /// Fixed currency amount
    Fixed,
}

impl Default for AdjustmentUnit {
    fn default() -> Self {
        AdjustmentUnit::Percentage
    }
}

/// Classification of a CEW clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemClass {
    Condition,
    Extension,
    Warranty,
}

impl Default for ItemClass {
    fn default() -> Self {
        ItemClass::Extension
    }
}

/// A concrete coverage-limit choice within a CEW
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemOption {
    /// Local id, 1-based within the parent item
    pub id: u32,

    /// Display label
    pub label: String,

    /// Free-text limit description
    pub limit: String,

    /// Adjustment magnitude
    pub value: f64,

    /// Unit of `value`
    pub unit: AdjustmentUnit,

    /// First option of an item is flagged recommended by convention
    pub recommended: bool,
}

/// A selectable CEW rider with its current selection state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectableItem {
    /// Product-level clause id
    pub id: u32,

    /// Short clause code (e.g. "MR001")
    pub code: String,

    /// Display name
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Condition / extension / warranty
    pub class: ItemClass,

    /// Mandatory items are always included in the base policy
    pub is_mandatory: bool,

    /// Mandatory implies selected; the reducers enforce this
    pub is_selected: bool,

    /// Chosen option's local id; None means "use base rate"
    pub selected_option: Option<u32>,

    /// Base-rate adjustment baked into the product configuration
    pub default_value: f64,

    /// Coverage-limit options, local ids 1..=n
    pub options: Vec<ItemOption>,
}

impl SelectableItem {
    /// Resolve the currently chosen option, if any
    pub fn chosen_option(&self) -> Option<&ItemOption> {
        self.selected_option
            .and_then(|id| self.options.iter().find(|o| o.id == id))
    }

    /// Unit of `default_value` when no option is chosen.
    ///
    /// The configuration does not always carry an explicit unit when there
    /// are no options to anchor it: the first option's unit wins if present,
    /// otherwise a magnitude of 100 or less is read as a percentage and
    /// anything larger as a fixed currency amount.
    pub fn base_rate_unit(&self) -> AdjustmentUnit {
        match self.options.first() {
            Some(first) => first.unit,
            None if self.default_value.abs() <= 100.0 => AdjustmentUnit::Percentage,
            None => AdjustmentUnit::Fixed,
        }
    }
}

/// A third-party-liability limit tier
///
/// Modeled as a separate single-select catalog: at most one tier is selected
/// at a time, and selecting the already-selected tier deselects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiabilityTier {
    pub id: u32,

    /// Display label (e.g. "TPL 1,000,000")
    pub label: String,

    /// Coverage cap in currency units
    pub limit: f64,

    /// Free-text description
    pub description: String,

    /// Signed premium adjustment, always a percentage of base premium
    pub premium_adjustment: f64,
}
