//! Plain-text cost reports.

use recipe_core::costing::round_half_up;
use recipe_core::{EditWarning, Recipe};
use rust_decimal::Decimal;

/// Format a monetary amount for display, rounded half-up to cents.
pub fn currency(amount: Decimal) -> String {
    format!("${:.2}", round_half_up(amount))
}

/// One human-readable line per advisory.
pub fn describe_warning(warning: &EditWarning) -> String {
    match warning {
        EditWarning::CategorySwitched(category) => {
            format!(
                "unit category changed to {}; package size was reset and must be re-entered",
                category
            )
        }
        EditWarning::IncompatibleUnits { used, package } => {
            format!(
                "cannot convert between {} and {}; check the ingredient's units",
                used, package
            )
        }
    }
}

/// Render the full cost report: one line per ingredient, then the totals.
pub fn render(recipe: &Recipe) -> String {
    let mut out = String::new();

    for ing in &recipe.ingredients {
        let name = if ing.name.is_empty() {
            "(unnamed)"
        } else {
            &ing.name
        };
        out.push_str(&format!(
            "{:<24} {} {} of {} {} @ {}  ->  {}\n",
            name,
            ing.used_quantity,
            ing.used_unit,
            ing.package_size,
            ing.package_unit,
            currency(ing.package_cost),
            currency(ing.calculated_cost),
        ));
    }

    let summary = recipe.summary();
    out.push('\n');
    out.push_str(&format!("Total cost:       {}\n", currency(summary.total_cost)));
    if recipe.batch_multiplier > 1 {
        out.push_str(&format!(
            "Batch x{}:         {}\n",
            recipe.batch_multiplier,
            currency(summary.scaled_total_cost)
        ));
    }
    out.push_str(&format!(
        "Per serving ({}): {}\n",
        summary.total_servings,
        currency(summary.cost_per_serving)
    ));

    out
}
