//! Multi-level stock validation.
//!
//! Available stock is the minimum across the product-level ceiling and every
//! selected option's ceiling. Insufficient stock is a query result, never an
//! error: the engine lets callers decide whether to block an add or allow an
//! oversell.

use serde::{Deserialize, Serialize};

use marigold_core::{LineItemId, ProductId};

use crate::catalog::CatalogReader;
use crate::types::{Cart, Product, VariantSelection};

/// Available stock for a product + variant selection.
///
/// Starts from the product ceiling and intersects (takes the minimum) with
/// the stock of every selected option that exists on the product. Selection
/// entries the product does not know add no further restriction.
#[must_use]
pub fn available_stock(product: &Product, selection: &VariantSelection) -> u32 {
    let mut available = product.stock;

    for variant in &product.variants {
        if let Some(chosen) = selection.get(&variant.name)
            && let Some(option) = variant.option(chosen)
        {
            available = available.min(option.stock);
        }
    }

    available
}

/// Whether a requested quantity can be satisfied.
#[must_use]
pub fn is_satisfiable(product: &Product, selection: &VariantSelection, quantity: u32) -> bool {
    quantity <= available_stock(product, selection)
}

/// Quick in-stock check for a selection.
///
/// False when the product ceiling is zero, or when any selected option is
/// missing from the product or has zero stock.
#[must_use]
pub fn is_in_stock(product: &Product, selection: &VariantSelection) -> bool {
    if product.stock == 0 {
        return false;
    }

    for variant in &product.variants {
        if let Some(chosen) = selection.get(&variant.name) {
            match variant.option(chosen) {
                Some(option) if option.stock > 0 => {}
                _ => return false,
            }
        }
    }

    true
}

/// Result of a stock check for a requested quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockStatus {
    /// Quantity the caller asked for.
    pub requested: u32,
    /// Maximum satisfiable quantity.
    pub available: u32,
}

impl StockStatus {
    /// Whether the requested quantity fits within available stock.
    #[must_use]
    pub const fn is_satisfiable(&self) -> bool {
        self.requested <= self.available
    }
}

/// Check a requested quantity against all applicable stock ceilings.
#[must_use]
pub fn check(product: &Product, selection: &VariantSelection, quantity: u32) -> StockStatus {
    StockStatus {
        requested: quantity,
        available: available_stock(product, selection),
    }
}

// =============================================================================
// Cart Validation (checkout audit)
// =============================================================================

/// One problem found while validating a cart for checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockIssue {
    /// The cart has no line items.
    EmptyCart,
    /// A line references a product the catalog no longer knows.
    ProductMissing {
        line_id: LineItemId,
        product_id: ProductId,
    },
    /// A line requests more than the available stock.
    InsufficientStock {
        line_id: LineItemId,
        product_name: String,
        requested: u32,
        available: u32,
    },
}

impl std::fmt::Display for StockIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCart => write!(f, "Cart is empty"),
            Self::ProductMissing { product_id, .. } => {
                write!(f, "Product {product_id} is no longer available")
            }
            Self::InsufficientStock {
                product_name,
                requested,
                available,
                ..
            } => write!(
                f,
                "{product_name} - Only {available} items available, but {requested} requested"
            ),
        }
    }
}

/// Outcome of a full-cart stock audit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartValidation {
    /// Problems found, empty when the cart is ready for checkout.
    pub issues: Vec<StockIssue>,
}

impl CartValidation {
    /// Whether the cart passed validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Validate every cart line against current catalog stock.
///
/// Products are resolved live from the catalog so the audit reflects stock
/// changes since the lines were added. An empty cart is itself an issue.
#[must_use]
pub fn validate_cart(cart: &Cart, catalog: &dyn CatalogReader) -> CartValidation {
    let mut issues = Vec::new();

    if cart.is_empty() {
        issues.push(StockIssue::EmptyCart);
    }

    for line in &cart.lines {
        match catalog.product(&line.product_id) {
            None => issues.push(StockIssue::ProductMissing {
                line_id: line.id.clone(),
                product_id: line.product_id.clone(),
            }),
            Some(product) => {
                let available = available_stock(product, &line.selection);
                if line.quantity > available {
                    issues.push(StockIssue::InsufficientStock {
                        line_id: line.id.clone(),
                        product_name: product.name.clone(),
                        requested: line.quantity,
                        available,
                    });
                }
            }
        }
    }

    CartValidation { issues }
}
