//! Unit conversion over a static factor table.
//!
//! Every unit carries a multiplicative factor relative to its category's base
//! unit (milliliter for volume, gram for weight, the count unit for count).
//! Conversion always goes through the base unit: to-base then from-base,
//! `value × factor(from) / factor(to)`. Same-unit conversion is not
//! special-cased; the factors cancel.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Unit, UnitCategory};

/// Attempted conversion between units of different categories.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot convert {from} to {to}: different unit categories")]
pub struct IncompatibleUnitsError {
    pub from: Unit,
    pub to: Unit,
}

/// Multiplicative factor from `unit` to its category's base unit.
///
/// Physical constants match the conversion table used by the recipe data
/// (1 tbsp = 14.7868 ml, 1 lb = 453.592 g, ...), good to at least five
/// significant digits so currency rounding downstream stays stable.
pub fn factor(unit: Unit) -> Decimal {
    match unit {
        // Volume, to ml
        Unit::Teaspoon => Decimal::new(492892, 5),
        Unit::Tablespoon => Decimal::new(147868, 4),
        Unit::Cup => Decimal::new(236588, 3),
        Unit::Milliliter => Decimal::ONE,
        Unit::Liter => Decimal::new(1000, 0),
        // Weight, to g
        Unit::Ounce => Decimal::new(283495, 4),
        Unit::Pound => Decimal::new(453592, 3),
        Unit::Gram => Decimal::ONE,
        Unit::Kilogram => Decimal::new(1000, 0),
        // Count
        Unit::Each => Decimal::ONE,
    }
}

/// Whether a quantity in `from` can be expressed in `to`.
/// Reflexive and symmetric: categories either match or they don't.
pub fn can_convert(
    from: Unit,
    to: Unit,
) -> bool {
    from.category() == to.category()
}

/// Express `value` (in `from` units) in `to` units.
///
/// # Errors
///
/// Returns [`IncompatibleUnitsError`] when the units belong to different
/// categories; the error carries both units for diagnostics.
pub fn convert(
    value: Decimal,
    from: Unit,
    to: Unit,
) -> Result<Decimal, IncompatibleUnitsError> {
    if !can_convert(from, to) {
        return Err(IncompatibleUnitsError { from, to });
    }

    let in_base = value * factor(from);
    Ok(in_base / factor(to))
}

/// Category of `unit` — re-exported here so callers that only deal with the
/// converter don't need to reach into the model types.
pub fn category_of(unit: Unit) -> UnitCategory {
    unit.category()
}
