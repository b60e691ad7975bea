//! Domain types for the cart & pricing engine.
//!
//! Catalog types ([`Product`] and friends) are read-only inputs: the engine
//! never mutates them. Cart types ([`Cart`], [`LineItem`], [`CartTotals`])
//! are owned and mutated exclusively by the engine.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marigold_core::{CartId, LineItemId, Price, ProductId, discount_percent};

// =============================================================================
// Catalog Types
// =============================================================================

/// A catalog product.
///
/// Owned by the catalog and immutable to the engine; `stock` is the
/// product-level ceiling across all variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier (e.g., `prod-1`).
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Base price before variant modifiers.
    pub price: Price,
    /// Pre-sale price, for discounted items.
    pub original_price: Option<Price>,
    /// Category name.
    pub category: String,
    /// Variant axes (e.g., Size, Color).
    pub variants: Vec<ProductVariant>,
    /// Product-level stock ceiling.
    pub stock: u32,
    /// Whether the product is featured on the home page.
    pub featured: bool,
    /// Free-form tags.
    pub tags: Vec<String>,
}

impl Product {
    /// Look up a variant axis by name.
    #[must_use]
    pub fn variant(&self, name: &str) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Discount percentage against the original price, 0 if not on sale.
    #[must_use]
    pub fn discount_percent(&self) -> u32 {
        self.original_price
            .map_or(0, |original| discount_percent(original.amount, self.price.amount))
    }
}

/// One variant axis of a product (e.g., "Size").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Axis name (e.g., "Size", "Color").
    pub name: String,
    /// Selectable options, in display order.
    pub options: Vec<VariantOption>,
}

impl ProductVariant {
    /// Look up an option by value.
    #[must_use]
    pub fn option(&self, value: &str) -> Option<&VariantOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// One selectable option of a variant axis (e.g., "Large").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantOption {
    /// Option value (e.g., "Large", "Royal Blue").
    pub value: String,
    /// Option-level stock ceiling.
    pub stock: u32,
    /// Signed additive price adjustment for this option.
    pub price_modifier: Option<Decimal>,
}

// =============================================================================
// Variant Selection
// =============================================================================

/// A buyer's choice of options, one per variant axis.
///
/// Backed by a `BTreeMap` so iteration order is always lexicographic by
/// variant name; canonicalization relies on this (two set-equal selections
/// iterate identically no matter the insertion order). May be empty for
/// products without variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantSelection(BTreeMap<String, String>);

impl VariantSelection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: add a choice and return the selection.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Choose an option for a variant axis, replacing any previous choice.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// The chosen option value for a variant axis, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Whether no options are chosen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of chosen options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate `(variant name, option value)` pairs in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for VariantSelection {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for VariantSelection {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        )
    }
}

// =============================================================================
// Cart Types
// =============================================================================

/// One entry in a cart: a product + variant selection + quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Deterministic identity: product id + canonical selection key.
    pub id: LineItemId,
    /// Identifier of the owning product.
    pub product_id: ProductId,
    /// Snapshot copy of the product at add time.
    pub product: Product,
    /// Quantity, always >= 1.
    pub quantity: u32,
    /// Unit price frozen when the line was created; later catalog price
    /// changes do not alter it.
    pub unit_price: Decimal,
    /// The variant selection this line represents.
    pub selection: VariantSelection,
}

impl LineItem {
    /// Extended price for this line (unit price x quantity), unrounded.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Denormalized cart totals.
///
/// These are derived values: always equal to [`compute_totals`] over the
/// cart's current lines, never independent state.
///
/// [`compute_totals`]: crate::totals::compute_totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of line totals, rounded to the currency minor unit.
    pub subtotal: Decimal,
    /// Tax on the subtotal.
    pub tax: Decimal,
    /// Shipping fee (zero above the free-shipping threshold).
    pub shipping: Decimal,
    /// Grand total: subtotal + tax + shipping.
    pub total: Decimal,
    /// Sum of all line quantities.
    pub item_count: u32,
}

impl CartTotals {
    /// All-zero totals (empty cart).
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            shipping: Decimal::ZERO,
            total: Decimal::ZERO,
            item_count: 0,
        }
    }
}

/// A shopping cart: ordered line items plus derived totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Cart identifier, stable across mutations and persistence.
    pub id: CartId,
    /// Line items in insertion order.
    pub lines: Vec<LineItem>,
    /// Derived totals for the current lines.
    pub totals: CartTotals,
    /// When the cart was created.
    pub created_at: DateTime<Utc>,
    /// Last mutation time.
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Create a fresh empty cart with a new identifier.
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: CartId::new(format!("cart-{}", Uuid::new_v4())),
            lines: Vec::new(),
            totals: CartTotals::zero(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up a line item by identity.
    #[must_use]
    pub fn line(&self, id: &LineItemId) -> Option<&LineItem> {
        self.lines.iter().find(|l| &l.id == id)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}
