//! Catalog construction from the raw product-pricing configuration
//!
//! Normalizes the clause pricing records into `SelectableItem`s:
//! disabled records are dropped, mandatory items start selected, nested
//! options get 1-based local ids with the first flagged recommended.

use super::config::{parse_number, ClausePricing, ProductPricingConfig};
use super::data::{AdjustmentUnit, ItemClass, ItemOption, SelectableItem};

/// Build the selectable-item catalog from a pricing configuration.
///
/// An absent configuration yields an empty catalog; downstream display
/// treats that as "no extensions available" rather than an error.
pub fn build_catalog(config: Option<&ProductPricingConfig>) -> Vec<SelectableItem> {
    let Some(config) = config else {
        log::warn!("no pricing configuration available, building empty catalog");
        return Vec::new();
    };

    config
        .clauses
        .iter()
        .filter(|clause| clause.is_enabled)
        .map(build_item)
        .collect()
}

/// Parse a raw JSON payload and build the catalog from it.
///
/// A malformed payload degrades to an empty catalog, same as an absent one.
pub fn catalog_from_json(raw: &str) -> Vec<SelectableItem> {
    match serde_json::from_str::<ProductPricingConfig>(raw) {
        Ok(config) => build_catalog(Some(&config)),
        Err(err) => {
            log::warn!("malformed pricing configuration, building empty catalog: {err}");
            Vec::new()
        }
    }
}

fn build_item(clause: &ClausePricing) -> SelectableItem {
    let is_mandatory = clause.classification.eq_ignore_ascii_case("mandatory");

    let options = clause
        .options
        .iter()
        .enumerate()
        .map(|(idx, option)| ItemOption {
            id: idx as u32 + 1,
            label: option.label.clone(),
            limit: option.limit_description.clone(),
            value: parse_number(&option.value),
            unit: parse_unit(&option.option_type),
            recommended: idx == 0,
        })
        .collect();

    SelectableItem {
        id: clause.id,
        code: clause.code.clone(),
        name: clause.name.clone(),
        description: clause.description.clone(),
        class: parse_class(&clause.clause_type),
        is_mandatory,
        // Mandatory items are pre-selected and stay that way
        is_selected: is_mandatory,
        selected_option: None,
        default_value: parse_number(&clause.pricing_value),
        options,
    }
}

fn parse_unit(declared: &str) -> AdjustmentUnit {
    if declared.eq_ignore_ascii_case("percentage") {
        AdjustmentUnit::Percentage
    } else {
        AdjustmentUnit::Fixed
    }
}

fn parse_class(declared: &str) -> ItemClass {
    if declared.eq_ignore_ascii_case("condition") {
        ItemClass::Condition
    } else if declared.eq_ignore_ascii_case("warranty") {
        ItemClass::Warranty
    } else {
        ItemClass::Extension
    }
}
