//! Effective unit price for a product + variant selection.

use rust_decimal::Decimal;
use tracing::warn;

use crate::types::{Product, VariantSelection};

/// Compute the effective unit price: base price plus the price modifiers of
/// every selected option that exists on the product.
///
/// Selection entries that name an unknown variant or option contribute
/// nothing; they are treated as unselected, not as errors. A negative result
/// (bad catalog data) is clamped to zero.
#[must_use]
pub fn unit_price(product: &Product, selection: &VariantSelection) -> Decimal {
    let mut price = product.price.amount;

    for variant in &product.variants {
        if let Some(chosen) = selection.get(&variant.name)
            && let Some(option) = variant.option(chosen)
            && let Some(modifier) = option.price_modifier
        {
            price += modifier;
        }
    }

    if price < Decimal::ZERO {
        warn!(
            product_id = %product.id,
            %price,
            "computed unit price is negative; clamping to zero"
        );
        return Decimal::ZERO;
    }
    price
}
