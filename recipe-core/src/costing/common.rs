//! Shared helpers for cost math.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up
/// rounding (midpoint away from zero), the standard convention for
/// displaying currency.
///
/// The cost engine itself never rounds; callers apply this at presentation
/// time only, so chained computations (batch scaling, per-serving division)
/// keep full precision.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use recipe_core::costing::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(0.745)), dec!(0.75));
/// assert_eq!(round_half_up(dec!(0.744)), dec!(0.74));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(1.234)), dec!(1.23));
    }

    #[test]
    fn rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(1.235)), dec!(1.24));
    }

    #[test]
    fn rounds_away_from_zero_for_negatives() {
        assert_eq!(round_half_up(dec!(-1.235)), dec!(-1.24));
    }

    #[test]
    fn preserves_already_rounded_values() {
        assert_eq!(round_half_up(dec!(2.23)), dec!(2.23));
    }

    #[test]
    fn handles_zero() {
        assert_eq!(round_half_up(dec!(0)), dec!(0));
    }

    #[test]
    fn handles_long_division_tails() {
        // 1.69 / 6 = 0.28166..., displayed as 0.28.
        let raw = dec!(1.69) / dec!(6);
        assert_eq!(round_half_up(raw), dec!(0.28));
    }
}
