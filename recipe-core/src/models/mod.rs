mod ingredient;
mod recipe;
mod saved_recipe;
mod unit;

pub use ingredient::{Ingredient, Provenance};
pub use recipe::{CostSummary, DEFAULT_BATCH_MULTIPLIER, DEFAULT_SERVINGS, Recipe};
pub use saved_recipe::{NewSavedRecipe, SavedRecipe};
pub use unit::{Unit, UnitCategory};
