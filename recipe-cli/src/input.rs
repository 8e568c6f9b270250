//! Recipe input files.
//!
//! A recipe file is a JSON document describing ingredients by their entry
//! fields, not by pre-computed costs. Each ingredient is replayed through
//! the editor field by field, so the same sync and reset rules apply as in
//! interactive entry, and every calculated cost comes out of the engine.

use anyhow::{Context, Result};
use recipe_core::{EditWarning, IngredientEdit, Recipe, RecipeEditor, Unit};
use rust_decimal::Decimal;
use serde::Deserialize;

fn default_servings() -> u32 {
    recipe_core::DEFAULT_SERVINGS
}

fn default_batch_multiplier() -> u32 {
    recipe_core::DEFAULT_BATCH_MULTIPLIER
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecipeFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default = "default_batch_multiplier")]
    pub batch_multiplier: u32,
    pub ingredients: Vec<IngredientEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IngredientEntry {
    pub name: String,
    pub used_quantity: Decimal,
    pub used_unit: Unit,
    pub package_cost: Decimal,
    pub package_size: Decimal,
    /// Defaults to the used unit when omitted.
    #[serde(default)]
    pub package_unit: Option<Unit>,
}

impl RecipeFile {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse recipe file")
    }

    /// Replay the file through an editor and return the resulting recipe
    /// plus any advisories raised along the way.
    pub fn into_recipe(self) -> (Recipe, Vec<EditWarning>) {
        let mut editor = RecipeEditor::new();
        let mut warnings = Vec::new();

        for entry in self.ingredients {
            // Seed the ingredient with the entry's own unit so the replay
            // never crosses a category boundary on a blank record.
            editor.set_default_unit(entry.used_unit);
            let id = editor.add_ingredient();
            let edits = [
                IngredientEdit::Name(entry.name),
                IngredientEdit::UsedQuantity(entry.used_quantity),
                IngredientEdit::PackageUnit(entry.package_unit.unwrap_or(entry.used_unit)),
                IngredientEdit::PackageSize(entry.package_size),
                IngredientEdit::PackageCost(entry.package_cost),
            ];
            for edit in edits {
                warnings.extend(editor.apply(&id, edit));
            }
        }

        editor.set_servings(self.servings);
        editor.set_batch_multiplier(self.batch_multiplier);

        (editor.into_recipe(), warnings)
    }
}
