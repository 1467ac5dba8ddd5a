//! Order totals
//!
//! All arithmetic stays in integer minor units. Prices are tax-inclusive:
//! the tax figure is carved out of the total for display and never added on
//! top. Formula: `tax = total * rate / (100 + rate)`.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::order::OrderItem;

/// Totals computed once at order creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of line totals in minor units
    pub subtotal: i64,
    /// Flat fee of the selected shipping method
    pub shipping_fee: i64,
    /// `subtotal + shipping_fee`
    pub total: i64,
    /// Tax portion already included in `total`; display only
    pub tax_included: i64,
}

impl OrderTotals {
    /// Compute totals over resolved order items
    pub fn compute(items: &[OrderItem], shipping_fee: i64, tax_rate: u32) -> Self {
        let subtotal: i64 = items.iter().map(|item| item.line_total).sum();
        let total = subtotal + shipping_fee;
        Self {
            subtotal,
            shipping_fee,
            total,
            tax_included: tax_included(total, tax_rate),
        }
    }
}

/// Tax portion included in a tax-inclusive gross amount
///
/// Rounded to whole minor units, midpoint away from zero.
pub fn tax_included(total: i64, rate: u32) -> i64 {
    if rate == 0 || total <= 0 {
        return 0;
    }
    let gross = Decimal::from(total);
    let rate = Decimal::from(rate);
    (gross * rate / (Decimal::ONE_HUNDRED + rate))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        // SAFETY: the tax portion of an i64 gross amount is strictly below
        // the gross amount, so it always fits i64
        .expect("tax portion fits i64")
}
