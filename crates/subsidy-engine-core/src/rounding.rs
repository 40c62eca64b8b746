use rust_decimal::{Decimal, RoundingStrategy};

/// Round a monetary value to 2 decimal places, half-up.
///
/// Applied only at the presentation boundary; intermediate schedule
/// balances are carried forward unrounded.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
