//! Per-item premium impact calculation
//!
//! Pure function of a single item's selection state. Mandatory items have
//! their base rate already priced into the base premium, so only the delta
//! from an option upgrade is surfaced; optional items contribute their full
//! value once selected.

use crate::catalog::{AdjustmentUnit, SelectableItem};
use serde::{Deserialize, Serialize};

/// Signed premium adjustment contributed by one item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    pub value: f64,
    pub unit: AdjustmentUnit,
}

impl Impact {
    /// The canonical "no impact" value
    pub const NONE: Impact = Impact {
        value: 0.0,
        unit: AdjustmentUnit::Percentage,
    };

    pub fn new(value: f64, unit: AdjustmentUnit) -> Self {
        Self { value, unit }
    }

    /// Displays render zero impact as a neutral state, not an error
    pub fn is_neutral(&self) -> bool {
        self.value == 0.0
    }
}

/// Compute the premium impact of an item's current selection state.
pub fn impact(item: &SelectableItem) -> Impact {
    if !item.is_selected {
        return Impact::NONE;
    }

    if let Some(option) = item.chosen_option() {
        if item.is_mandatory {
            // Base rate is already priced in; surface only the option delta
            return Impact::new(option.value - item.default_value, option.unit);
        }
        return Impact::new(option.value, option.unit);
    }

    // Selected at base rate
    if item.is_mandatory {
        Impact::NONE
    } else {
        Impact::new(item.default_value, item.base_rate_unit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemClass, ItemOption};

    fn item(
        is_mandatory: bool,
        is_selected: bool,
        selected_option: Option<u32>,
        default_value: f64,
        options: Vec<ItemOption>,
    ) -> SelectableItem {
        SelectableItem {
            id: 1,
            code: "MR001".to_string(),
            name: "Test clause".to_string(),
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

    fn fixed_option(id: u32, value: f64) -> ItemOption {
        ItemOption {
            id,
            label: format!("Option {id}"),
            limit: String::new(),
            value,
            unit: AdjustmentUnit::Fixed,
            recommended: id == 1,
        }
    }

    #[test]
    fn test_unselected_has_no_impact() {
        let it = item(false, false, None, 9.0, vec![pct_option(1, 4.0)]);
        assert_eq!(impact(&it), Impact::NONE);

        // Even with a stale option reference, unselected wins
        let it = item(false, false, Some(1), 9.0, vec![pct_option(1, 4.0)]);
        assert_eq!(impact(&it), Impact::NONE);
    }

    #[test]
    fn test_mandatory_base_rate_is_neutral() {
        let it = item(true, true, None, 5.0, vec![pct_option(1, 8.0)]);
        assert_eq!(impact(&it), Impact::NONE);

        // Regardless of the default value magnitude
        let it = item(true, true, None, 5000.0, vec![]);
        assert_eq!(impact(&it), Impact::NONE);
    }

    #[test]
    fn test_mandatory_option_surfaces_delta() {
        let it = item(true, true, Some(1), 5.0, vec![pct_option(1, 8.0)]);
        assert_eq!(impact(&it), Impact::new(3.0, AdjustmentUnit::Percentage));

        // Downgrade below the baked-in base rate is a negative delta
        let it = item(true, true, Some(1), 5.0, vec![pct_option(1, 2.0)]);
        assert_eq!(impact(&it), Impact::new(-3.0, AdjustmentUnit::Percentage));
    }

    #[test]
    fn test_mandatory_fixed_option_delta_keeps_unit() {
        let it = item(true, true, Some(1), 1000.0, vec![fixed_option(1, 2500.0)]);
        assert_eq!(impact(&it), Impact::new(1500.0, AdjustmentUnit::Fixed));
    }

    #[test]
    fn test_optional_option_contributes_full_value() {
        let it = item(false, true, Some(2), 5.0, vec![pct_option(1, 8.0), pct_option(2, 12.0)]);
        assert_eq!(impact(&it), Impact::new(12.0, AdjustmentUnit::Percentage));
    }

    #[test]
    fn test_optional_base_rate_uses_default_value() {
        // Unit anchored by the first option
        let it = item(false, true, None, 3.5, vec![pct_option(1, 8.0)]);
        assert_eq!(impact(&it), Impact::new(3.5, AdjustmentUnit::Percentage));

        // No options, small magnitude reads as percentage
        let it = item(false, true, None, 7.0, vec![]);
        assert_eq!(impact(&it), Impact::new(7.0, AdjustmentUnit::Percentage));

        // No options, large magnitude reads as fixed currency
        let it = item(false, true, None, 1200.0, vec![]);
        assert_eq!(impact(&it), Impact::new(1200.0, AdjustmentUnit::Fixed));
    }

    #[test]
    fn test_end_to_end_mandatory_scenario() {
        // Mandatory 5% base with an 8% option: selecting the option surfaces
        // +3%, deselecting it reverts to neutral
        let mut it = item(true, true, Some(1), 5.0, vec![pct_option(1, 8.0)]);
        assert_eq!(impact(&it), Impact::new(3.0, AdjustmentUnit::Percentage));

        it.selected_option = None;
        assert_eq!(impact(&it), Impact::NONE);
    }

    #[test]
    fn test_end_to_end_optional_fixed_scenario() {
        let mut it = item(false, true, None, 1200.0, vec![]);
        assert_eq!(impact(&it), Impact::new(1200.0, AdjustmentUnit::Fixed));

        it.is_selected = false;
        assert_eq!(impact(&it), Impact::NONE);
    }
}
