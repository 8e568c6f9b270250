use recipe_core::RepositoryError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Convert a monetary amount to whole cents for storage.
///
/// Amounts are rounded half-up to two places first, so sub-cent precision
/// from unrounded cost derivations is not an error.
pub fn decimal_to_cents(amount: Decimal) -> Result<i64, RepositoryError> {
    let cents = (amount * Decimal::ONE_HUNDRED).round_dp_with_strategy(
        0,
        rust_decimal::RoundingStrategy::MidpointAwayFromZero,
    );
    cents.to_i64().ok_or_else(|| {
        RepositoryError::Database(format!("Amount {} out of range for cents storage", amount))
    })
}

/// Convert stored cents back to a monetary amount with two decimal places.
pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
