//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional, with store defaults:
//! - `MARIGOLD_CURRENCY` - ISO 4217 code (default: INR)
//! - `MARIGOLD_TAX_RATE` - tax rate as a fraction (default: 0.18, 18% GST)
//! - `MARIGOLD_FREE_SHIPPING_THRESHOLD` - subtotal for free shipping
//!   (default: 2000)
//! - `MARIGOLD_SHIPPING_FEE` - flat fee below the threshold (default: 199)
//! - `MARIGOLD_CART_PATH` - snapshot file path (default: marigold-cart.json)

use std::path::PathBuf;

use marigold_core::CurrencyCode;
use rust_decimal::Decimal;
use thiserror::Error;

/// Snapshot filename used when `MARIGOLD_CART_PATH` is unset.
const DEFAULT_CART_PATH: &str = "marigold-cart.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Pricing rules for totals computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    /// Currency all cart math is carried out in (single-currency store).
    pub currency: CurrencyCode,
    /// Tax rate as a fraction of the subtotal.
    pub tax_rate: Decimal,
    /// Subtotal at or above which shipping is free.
    pub free_shipping_threshold: Decimal,
    /// Flat shipping fee below the threshold.
    pub flat_shipping_fee: Decimal,
}

impl Default for PricingConfig {
    /// Store defaults: INR, 18% GST, free shipping from 2000, flat fee 199.
    fn default() -> Self {
        Self {
            currency: CurrencyCode::INR,
            tax_rate: Decimal::new(18, 2),
            free_shipping_threshold: Decimal::from(2000),
            flat_shipping_fee: Decimal::from(199),
        }
    }
}

/// Full cart engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Pricing rules.
    pub pricing: PricingConfig,
    /// Path of the persisted cart snapshot.
    pub cart_path: PathBuf,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            pricing: PricingConfig::default(),
            cart_path: PathBuf::from(DEFAULT_CART_PATH),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present. Unset
    /// variables fall back to store defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = PricingConfig::default();
        let pricing = PricingConfig {
            currency: get_currency_or("MARIGOLD_CURRENCY", defaults.currency)?,
            tax_rate: get_decimal_or("MARIGOLD_TAX_RATE", defaults.tax_rate)?,
            free_shipping_threshold: get_decimal_or(
                "MARIGOLD_FREE_SHIPPING_THRESHOLD",
                defaults.free_shipping_threshold,
            )?,
            flat_shipping_fee: get_decimal_or("MARIGOLD_SHIPPING_FEE", defaults.flat_shipping_fee)?,
        };

        let cart_path = std::env::var("MARIGOLD_CART_PATH")
            .map_or_else(|_| PathBuf::from(DEFAULT_CART_PATH), PathBuf::from);

        Ok(Self { pricing, cart_path })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a decimal environment variable, falling back to a default when unset.
fn get_decimal_or(key: &str, default: Decimal) -> Result<Decimal, ConfigError> {
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(value) => value
            .parse::<Decimal>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string())),
    }
}

/// Parse a currency-code environment variable, falling back to a default.
fn get_currency_or(key: &str, default: CurrencyCode) -> Result<CurrencyCode, ConfigError> {
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(value) => match value.to_ascii_uppercase().as_str() {
            "INR" => Ok(CurrencyCode::INR),
            "USD" => Ok(CurrencyCode::USD),
            "EUR" => Ok(CurrencyCode::EUR),
            "GBP" => Ok(CurrencyCode::GBP),
            other => Err(ConfigError::InvalidEnvVar(
                key.to_owned(),
                format!("unsupported currency code '{other}'"),
            )),
        },
    }
}
