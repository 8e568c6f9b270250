//! End-to-end editing flows exercised through the public API.

use pretty_assertions::assert_eq;
use recipe_core::costing::round_half_up;
use recipe_core::{IngredientEdit, Recipe, RecipeEditor, Unit};
use rust_decimal_macros::dec;

/// Build a two-ingredient recipe the way a user would: field by field, in
/// entry order, and check the aggregate metrics at the end.
#[test]
fn two_ingredient_recipe_entry_flow() {
    let mut ed = RecipeEditor::new();

    // 8 oz of pasta from a 16 oz box costing $1.49.
    let pasta = ed.add_ingredient();
    ed.apply(&pasta, IngredientEdit::Name("pasta".to_string()));
    ed.apply(&pasta, IngredientEdit::UsedUnit(Unit::Ounce));
    ed.apply(&pasta, IngredientEdit::PackageUnit(Unit::Ounce));
    ed.apply(&pasta, IngredientEdit::UsedQuantity(dec!(8)));
    ed.apply(&pasta, IngredientEdit::PackageSize(dec!(16)));
    ed.apply(&pasta, IngredientEdit::PackageCost(dec!(1.49)));

    // 1 onion from a bag of 6 costing $1.69.
    let onion = ed.add_ingredient();
    ed.apply(&onion, IngredientEdit::Name("onion".to_string()));
    ed.apply(&onion, IngredientEdit::UsedQuantity(dec!(1)));
    ed.apply(&onion, IngredientEdit::PackageSize(dec!(6)));
    ed.apply(&onion, IngredientEdit::PackageCost(dec!(1.69)));

    assert_eq!(ed.ingredient(&pasta).unwrap().calculated_cost, dec!(0.745));
    assert_eq!(
        round_half_up(ed.ingredient(&onion).unwrap().calculated_cost),
        dec!(0.28)
    );

    let summary = ed.summary();
    assert_eq!(round_half_up(summary.total_cost), dec!(1.03));
    assert_eq!(summary.total_servings, 4);
}

/// A recipe round-trips through JSON and reloads into an editor with the
/// same costs, without relying on the persisted calculated values.
#[test]
fn recipe_survives_json_round_trip() {
    let mut ed = RecipeEditor::new();
    let id = ed.add_ingredient();
    ed.apply(&id, IngredientEdit::Name("flour".to_string()));
    ed.apply(&id, IngredientEdit::UsedUnit(Unit::Cup));
    ed.apply(&id, IngredientEdit::UsedQuantity(dec!(2)));
    ed.apply(&id, IngredientEdit::PackageSize(dec!(8)));
    ed.apply(&id, IngredientEdit::PackageCost(dec!(3.20)));
    ed.set_servings(6);

    let json = serde_json::to_string(ed.recipe()).unwrap();
    let restored: Recipe = serde_json::from_str(&json).unwrap();

    let mut ed2 = RecipeEditor::new();
    let warnings = ed2.load(restored);

    assert!(warnings.is_empty());
    assert_eq!(ed2.recipe(), ed.recipe());
    assert_eq!(ed2.summary().total_cost, dec!(0.80));
}

/// Switching a used unit across categories mid-entry forces the package
/// side to be re-entered, and the cost follows.
#[test]
fn category_switch_mid_entry_requires_new_package_size() {
    let mut ed = RecipeEditor::new();
    let id = ed.add_ingredient();
    ed.apply(&id, IngredientEdit::UsedUnit(Unit::Cup));
    ed.apply(&id, IngredientEdit::UsedQuantity(dec!(2)));
    ed.apply(&id, IngredientEdit::PackageSize(dec!(4)));
    ed.apply(&id, IngredientEdit::PackageCost(dec!(2.00)));
    assert_eq!(ed.ingredient(&id).unwrap().calculated_cost, dec!(1.00));

    // Recipe actually calls for weight. Package size is gone until
    // re-entered, so the cost drops to zero.
    let warnings = ed.apply(&id, IngredientEdit::UsedUnit(Unit::Gram));
    assert_eq!(warnings.len(), 1);
    assert_eq!(ed.ingredient(&id).unwrap().calculated_cost, dec!(0));

    ed.apply(&id, IngredientEdit::PackageUnit(Unit::Kilogram));
    ed.apply(&id, IngredientEdit::PackageSize(dec!(1)));
    assert_eq!(ed.ingredient(&id).unwrap().used_quantity, dec!(2));
    // 2 g of a 1 kg / $2.00 package.
    assert_eq!(ed.ingredient(&id).unwrap().calculated_cost, dec!(0.004));
}
