use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Ingredient;

/// Default serving count for a fresh recipe.
pub const DEFAULT_SERVINGS: u32 = 4;
/// Default batch multiplier for a fresh recipe.
pub const DEFAULT_BATCH_MULTIPLIER: u32 = 1;

/// The working set: an ordered ingredient list plus the scaling knobs.
///
/// Order is display/insertion order only; it has no cost semantics. The
/// aggregate total is never stored — it is always recomputed from the
/// current list via [`Recipe::total_cost`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub ingredients: Vec<Ingredient>,
    pub servings: u32,
    pub batch_multiplier: u32,
}

impl Recipe {
    pub fn total_cost(&self) -> Decimal {
        self.ingredients
            .iter()
            .map(|ing| ing.calculated_cost)
            .sum()
    }

    pub fn summary(&self) -> CostSummary {
        CostSummary::for_recipe(self)
    }
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            ingredients: Vec::new(),
            servings: DEFAULT_SERVINGS,
            batch_multiplier: DEFAULT_BATCH_MULTIPLIER,
        }
    }
}

/// Derived recipe metrics. Never persisted, always recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    pub total_cost: Decimal,
    pub scaled_total_cost: Decimal,
    pub total_servings: u32,
    pub cost_per_serving: Decimal,
}

impl CostSummary {
    pub fn for_recipe(recipe: &Recipe) -> Self {
        let total_cost = recipe.total_cost();
        let scaled_total_cost = total_cost * Decimal::from(recipe.batch_multiplier);
        let total_servings = recipe.servings * recipe.batch_multiplier;
        let cost_per_serving = if total_servings > 0 {
            scaled_total_cost / Decimal::from(total_servings)
        } else {
            Decimal::ZERO
        };

        Self {
            total_cost,
            scaled_total_cost,
            total_servings,
            cost_per_serving,
        }
    }
}
