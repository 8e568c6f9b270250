//! Ingredient aggregation and recalculation.
//!
//! [`RecipeEditor`] owns the working recipe and applies field edits one at a
//! time, each to completion: merge the edit, run its side effects (unit
//! re-sync, package-size auto-sync, category-switch resets), then recompute
//! the ingredient's calculated cost before returning. Unit incompatibility
//! and zero-size packages never escape as errors — they are absorbed into a
//! zero cost plus an [`EditWarning`] advisory for whatever notification
//! mechanism the caller owns.

use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use crate::conversions::can_convert;
use crate::costing::{self, CostError};
use crate::models::{
    DEFAULT_BATCH_MULTIPLIER, DEFAULT_SERVINGS, CostSummary, Ingredient, Provenance, Recipe, Unit,
    UnitCategory,
};

/// Supplies unique ingredient identifiers. Identifiers are never reused
/// after deletion, so any collision-resistant generator qualifies.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Default [`IdSource`] backed by random v4 UUIDs.
#[derive(Debug, Default)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// A single field edit to an ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientEdit {
    Name(String),
    UsedQuantity(Decimal),
    UsedUnit(Unit),
    PackageCost(Decimal),
    PackageSize(Decimal),
    PackageUnit(Unit),
}

/// Advisory signals produced while applying an edit. These are user-facing
/// notifications, not errors: the edit itself always completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditWarning {
    /// The used unit moved to a different category; the package unit and
    /// size were reset to the new category's defaults.
    CategorySwitched(UnitCategory),
    /// A unit pairing could not be converted. Either a package-unit edit
    /// was rejected back to the category default, or recomputation found
    /// the stored pairing incompatible and zeroed the cost.
    IncompatibleUnits { used: Unit, package: Unit },
}

/// Owns the ingredient list and keeps every derived cost consistent under a
/// sequence of discrete edit operations.
pub struct RecipeEditor {
    recipe: Recipe,
    default_unit: Unit,
    ids: Box<dyn IdSource>,
}

impl RecipeEditor {
    pub fn new() -> Self {
        Self::with_id_source(Box::new(UuidSource))
    }

    pub fn with_id_source(ids: Box<dyn IdSource>) -> Self {
        Self {
            recipe: Recipe::default(),
            default_unit: Unit::Each,
            ids,
        }
    }

    /// Replace the working set wholesale, e.g. with a recipe loaded from
    /// persistence. Costs are recomputed so a stale or hand-edited record
    /// can never leave `calculated_cost` inconsistent with its inputs.
    pub fn load(
        &mut self,
        mut recipe: Recipe,
    ) -> Vec<EditWarning> {
        let mut warnings = Vec::new();
        for ingredient in &mut recipe.ingredients {
            if let Some(warning) = recalculate(ingredient) {
                warnings.push(warning);
            }
        }
        self.recipe = recipe;
        warnings
    }

    /// The unit assigned to both sides of a freshly added ingredient.
    /// Defaults to the count unit.
    pub fn set_default_unit(
        &mut self,
        unit: Unit,
    ) {
        self.default_unit = unit;
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn into_recipe(self) -> Recipe {
        self.recipe
    }

    pub fn ingredient(
        &self,
        id: &str,
    ) -> Option<&Ingredient> {
        self.recipe.ingredients.iter().find(|ing| ing.id == id)
    }

    pub fn summary(&self) -> CostSummary {
        self.recipe.summary()
    }

    /// Append a blank ingredient and return its id. All cost preconditions
    /// are false on a blank record, so no recompute fires.
    pub fn add_ingredient(&mut self) -> String {
        let id = self.ids.next_id();
        self.recipe
            .ingredients
            .push(Ingredient::new(id.clone(), self.default_unit));
        id
    }

    /// Apply one field edit and recompute the ingredient's cost.
    ///
    /// Total operation: an unknown id is ignored (with a log line), and
    /// unit/arithmetic failures come back as advisories, never errors.
    pub fn apply(
        &mut self,
        id: &str,
        edit: IngredientEdit,
    ) -> Vec<EditWarning> {
        let Some(ingredient) = self.recipe.ingredients.iter_mut().find(|ing| ing.id == id)
        else {
            warn!(id, "edit ignored: no ingredient with this id");
            return Vec::new();
        };

        let mut warnings = Vec::new();

        match edit {
            IngredientEdit::Name(name) => {
                ingredient.name = name;
            }
            IngredientEdit::PackageCost(cost) => {
                ingredient.package_cost = cost;
            }
            IngredientEdit::PackageSize(size) => {
                ingredient.package_size = size;
                ingredient.package_size_provenance = Provenance::UserSet;
            }
            IngredientEdit::UsedQuantity(quantity) => {
                ingredient.used_quantity = quantity;
                // Auto-sync convenience: until the user asserts a package
                // size themselves, keep it tracking the used quantity.
                if !ingredient.package_size_provenance.is_user_set() {
                    ingredient.package_size = quantity;
                }
            }
            IngredientEdit::UsedUnit(unit) => {
                let old_category = ingredient.used_unit.category();
                let new_category = unit.category();
                ingredient.used_unit = unit;

                if old_category != new_category {
                    ingredient.package_unit = new_category.default_package_unit();
                    ingredient.package_size = Decimal::ZERO;
                    ingredient.package_size_provenance = Provenance::Derived;
                    warnings.push(EditWarning::CategorySwitched(new_category));
                } else {
                    // Same category: keep the package unit tracking the
                    // used unit until the user picks one explicitly.
                    ingredient.package_unit = unit;
                    ingredient.package_size_provenance = Provenance::Derived;
                }
            }
            IngredientEdit::PackageUnit(unit) => {
                if ingredient.used_unit.category() != unit.category() {
                    // Reject: reset to the used unit's category default.
                    ingredient.package_unit =
                        ingredient.used_unit.category().default_package_unit();
                    warnings.push(EditWarning::IncompatibleUnits {
                        used: ingredient.used_unit,
                        package: unit,
                    });
                } else {
                    ingredient.package_unit = unit;
                    ingredient.package_size_provenance = Provenance::UserSet;
                }
            }
        }

        if let Some(warning) = recalculate(ingredient) {
            warnings.push(warning);
        }

        warnings
    }

    /// Remove an ingredient by identity. Sibling costs are independent, so
    /// only the aggregate changes (and that is always recomputed on read).
    pub fn delete_ingredient(
        &mut self,
        id: &str,
    ) -> bool {
        let before = self.recipe.ingredients.len();
        self.recipe.ingredients.retain(|ing| ing.id != id);
        before != self.recipe.ingredients.len()
    }

    /// Clone an ingredient under a new id, inserted immediately after the
    /// source. All fields including the calculated cost and provenance are
    /// preserved verbatim; the inputs are identical, so no recompute runs.
    pub fn duplicate_ingredient(
        &mut self,
        id: &str,
    ) -> Option<String> {
        let index = self.recipe.ingredients.iter().position(|ing| ing.id == id)?;
        let mut clone = self.recipe.ingredients[index].clone();
        clone.id = self.ids.next_id();
        let new_id = clone.id.clone();
        self.recipe.ingredients.insert(index + 1, clone);
        Some(new_id)
    }

    /// Empty the ingredient list and reset servings and batch multiplier to
    /// their defaults.
    pub fn clear_all(&mut self) {
        self.recipe.ingredients.clear();
        self.recipe.servings = DEFAULT_SERVINGS;
        self.recipe.batch_multiplier = DEFAULT_BATCH_MULTIPLIER;
    }

    /// Servings must stay positive; zero is ignored.
    pub fn set_servings(
        &mut self,
        servings: u32,
    ) {
        if servings == 0 {
            warn!("ignoring request to set servings to zero");
            return;
        }
        self.recipe.servings = servings;
    }

    /// Batch multiplier must stay positive; zero is ignored.
    pub fn set_batch_multiplier(
        &mut self,
        batch_multiplier: u32,
    ) {
        if batch_multiplier == 0 {
            warn!("ignoring request to set batch multiplier to zero");
            return;
        }
        self.recipe.batch_multiplier = batch_multiplier;
    }
}

impl Default for RecipeEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Recompute one ingredient's calculated cost from its current fields.
///
/// Preconditions for a non-zero cost: used quantity, package cost, and
/// package size all positive, and the units convertible. Failed numeric
/// preconditions zero the cost silently (expected mid-entry state); an
/// incompatible unit pairing zeroes it and returns an advisory.
fn recalculate(ingredient: &mut Ingredient) -> Option<EditWarning> {
    let complete = ingredient.used_quantity > Decimal::ZERO
        && ingredient.package_cost > Decimal::ZERO
        && ingredient.package_size > Decimal::ZERO;

    if !complete {
        ingredient.calculated_cost = Decimal::ZERO;
        return None;
    }

    if !can_convert(ingredient.used_unit, ingredient.package_unit) {
        warn!(
            used_unit = %ingredient.used_unit,
            package_unit = %ingredient.package_unit,
            "incompatible units; cost set to zero"
        );
        ingredient.calculated_cost = Decimal::ZERO;
        return Some(EditWarning::IncompatibleUnits {
            used: ingredient.used_unit,
            package: ingredient.package_unit,
        });
    }

    match costing::derive_cost(
        ingredient.used_quantity,
        ingredient.used_unit,
        ingredient.package_cost,
        ingredient.package_size,
        ingredient.package_unit,
    ) {
        Ok(cost) => {
            ingredient.calculated_cost = cost;
            None
        }
        Err(CostError::IncompatibleUnits(err)) => {
            // can_convert is checked above; kept for completeness so a
            // converter error can never escape an edit.
            ingredient.calculated_cost = Decimal::ZERO;
            Some(EditWarning::IncompatibleUnits {
                used: err.from,
                package: err.to,
            })
        }
        Err(CostError::NonPositivePackageSize(_)) => {
            ingredient.calculated_cost = Decimal::ZERO;
            None
        }
    }
}
