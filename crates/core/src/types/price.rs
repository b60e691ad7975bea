//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts use [`Decimal`] so catalog prices and variant modifiers never go
/// through floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from a whole number of major units.
    #[must_use]
    pub fn from_major(units: i64, currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::from(units),
            currency_code,
        }
    }

    /// Format for display (e.g., "₹2499" or "$19.99").
    ///
    /// Whole amounts are shown without a fractional part, matching how the
    /// storefront lists catalog prices.
    #[must_use]
    pub fn display(&self) -> String {
        let symbol = self.currency_code.symbol();
        if self.amount.fract().is_zero() {
            format!("{}{}", symbol, self.amount.trunc())
        } else {
            format!("{}{:.2}", symbol, self.amount)
        }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Currency symbol for display.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// ISO 4217 three-letter code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }

    /// Number of minor-unit decimal places for the currency.
    #[must_use]
    pub const fn minor_units(&self) -> u32 {
        // All supported currencies use 2 (paise, cents, pence)
        2
    }
}

/// Percentage discount between an original and a current price, rounded to
/// the nearest whole percent.
///
/// Returns 0 when there is no discount (original missing, zero, or not
/// greater than current).
#[must_use]
pub fn discount_percent(original: Decimal, current: Decimal) -> u32 {
    if original <= current || original.is_zero() {
        return 0;
    }
    ((original - current) * Decimal::from(100) / original)
        .round()
        .to_u32()
        .unwrap_or(0)
}
