use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Ingredient;

/// A recipe as stored by the persistence layer, addressable both by row id
/// and by its shareable short id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedRecipe {
    pub id: i64,
    /// Unique short id used in shareable URLs.
    pub share_id: String,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub servings: u32,
    pub batch_multiplier: u32,
    /// Total cost at save time. Snapshot only — the live total is always
    /// recomputed from the ingredient list.
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// For creating new saved recipes (no id, share id, or timestamps).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSavedRecipe {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub servings: u32,
    pub batch_multiplier: u32,
    pub total_cost: Decimal,
}
