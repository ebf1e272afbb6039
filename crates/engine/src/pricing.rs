//! Points-to-currency discount math for the shop checkout

/// Fixed conversion rate: 10 points buy 1 currency unit of discount
pub const POINTS_PER_CURRENCY_UNIT: u64 = 10;

/// Discount amount for applying `points_to_apply` against `unit_price`.
///
/// `floor(points / 10)`, capped at the unit price and at what the
/// current balance can actually cover.
pub fn points_discount(points_to_apply: u64, unit_price: u64, balance: u64) -> u64 {
    let usable = points_to_apply.min(balance);
    (usable / POINTS_PER_CURRENCY_UNIT).min(unit_price)
}

/// Final price after a discount, floored at zero
pub fn discounted_price(unit_price: u64, discount: u64) -> u64 {
    unit_price.saturating_sub(discount)
}
