//! Cost derivation from package economics.
//!
//! Given how much of an ingredient a recipe uses and what the cook paid for
//! the package it came in, derive the monetary cost attributable to the used
//! quantity. The used quantity is first expressed in package units, then
//! multiplied by the package's per-unit cost. No rounding happens here —
//! presentation code rounds with [`common::round_half_up`].

pub mod common;

pub use common::round_half_up;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::conversions::{self, IncompatibleUnitsError};
use crate::models::Unit;

/// Errors from [`derive_cost`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CostError {
    /// The used unit and package unit belong to different categories.
    #[error(transparent)]
    IncompatibleUnits(#[from] IncompatibleUnitsError),

    /// The package size would put a zero (or negative) in the divisor.
    /// Callers are expected to guard this before calling; it is still
    /// checked here so the engine can never divide by zero.
    #[error("package size must be positive, got {0}")]
    NonPositivePackageSize(Decimal),
}

/// Monetary cost of `used_quantity` (in `used_unit`) of an ingredient
/// purchased as a package of `package_size` `package_unit` for
/// `package_cost`.
///
/// Pure function: `convert(used, used_unit, package_unit) × package_cost /
/// package_size`, full precision, no rounding.
///
/// # Errors
///
/// * [`CostError::NonPositivePackageSize`] when `package_size <= 0`.
/// * [`CostError::IncompatibleUnits`] when the units don't share a category.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use recipe_core::costing::derive_cost;
/// use recipe_core::models::Unit;
///
/// // Half of a 1 lb / $1.49 package of pasta.
/// let cost = derive_cost(dec!(8), Unit::Ounce, dec!(1.49), dec!(16), Unit::Ounce).unwrap();
/// assert_eq!(cost, dec!(0.745));
/// ```
pub fn derive_cost(
    used_quantity: Decimal,
    used_unit: Unit,
    package_cost: Decimal,
    package_size: Decimal,
    package_unit: Unit,
) -> Result<Decimal, CostError> {
    if package_size <= Decimal::ZERO {
        return Err(CostError::NonPositivePackageSize(package_size));
    }

    let used_in_package_units = conversions::convert(used_quantity, used_unit, package_unit)?;
    let cost_per_package_unit = package_cost / package_size;

    Ok(used_in_package_units * cost_per_package_unit)
}
