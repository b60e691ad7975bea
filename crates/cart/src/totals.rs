//! Pure totals computation.
//!
//! Totals are derived values: every mutation recomputes them from the line
//! collection so a stale denormalized figure can never survive.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::PricingConfig;
use crate::types::{CartTotals, LineItem};

/// Compute cart totals from a line collection.
///
/// `subtotal = Σ(unit price × quantity)`, `tax = subtotal × tax rate`,
/// shipping is zero at or above the free-shipping threshold and the flat fee
/// below it, `total = subtotal + tax + shipping`. Each reported figure is
/// rounded half-up to the currency minor unit at the final step only;
/// intermediate terms stay unrounded.
///
/// An empty line collection yields all-zero totals: no tax or shipping is
/// charged on nothing.
#[must_use]
pub fn compute_totals(lines: &[LineItem], config: &PricingConfig) -> CartTotals {
    if lines.is_empty() {
        return CartTotals::zero();
    }

    let subtotal: Decimal = lines.iter().map(LineItem::line_total).sum();
    let item_count: u32 = lines.iter().map(|l| l.quantity).sum();

    let tax = subtotal * config.tax_rate;
    let shipping = if subtotal >= config.free_shipping_threshold {
        Decimal::ZERO
    } else {
        config.flat_shipping_fee
    };
    let total = subtotal + tax + shipping;

    let dp = config.currency.minor_units();
    CartTotals {
        subtotal: round_money(subtotal, dp),
        tax: round_money(tax, dp),
        shipping: round_money(shipping, dp),
        total: round_money(total, dp),
        item_count,
    }
}

/// Round a monetary amount half-up to `dp` decimal places.
fn round_money(amount: Decimal, dp: u32) -> Decimal {
    amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
