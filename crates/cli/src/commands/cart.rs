//! Cart commands.
//!
//! Every command loads configuration from the environment, opens the
//! persisted cart snapshot, performs one operation, and drains the
//! persistence worker before returning, so each invocation leaves a
//! durable cart behind for the next one.
//!
//! # Environment Variables
//!
//! See [`marigold_cart::config`] for the `MARIGOLD_*` variables; all are
//! optional.

use std::sync::Arc;

use thiserror::Error;

use marigold_cart::{
    CartConfig, CartEngine, CartEvent, CatalogReader, ConfigError, JsonFileStore, NotificationSink,
    Product, VariantSelection, validate_cart,
};
use marigold_core::{LineItemId, ProductId};

use super::seed;

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Configuration failed to load.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Product id not in the catalog.
    #[error("No product with id '{0}' in the catalog (try `marigold catalog list`)")]
    UnknownProduct(String),

    /// Line id not in the cart.
    #[error("No cart line with id '{0}' (try `marigold cart show`)")]
    UnknownLine(String),

    /// A `-v` argument was not `Name=Value`.
    #[error("Invalid variant '{0}': expected Name=Value, e.g. Size=Medium")]
    InvalidVariantSpec(String),

    /// The product has no variant with that name.
    #[error("Product '{product}' has no variant named '{variant}'")]
    UnknownVariant { product: String, variant: String },

    /// The variant has no option with that value.
    #[error("Variant '{variant}' has no option '{option}'")]
    UnknownOption { variant: String, option: String },

    /// Requested quantity exceeds available stock.
    #[error("Only {available} in stock (requested {requested}); pass --force to add anyway")]
    OutOfStock { requested: u32, available: u32 },
}

/// Prints advisory cart notifications straight to the terminal.
struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, event: &CartEvent) {
        println!("{event}");
    }
}

/// Add a product to the cart.
pub async fn add(
    product_id: &str,
    quantity: u32,
    variants: &[String],
    force: bool,
) -> Result<(), CartCommandError> {
    let catalog = seed::demo_catalog();
    let product = catalog
        .product(&ProductId::new(product_id))
        .ok_or_else(|| CartCommandError::UnknownProduct(product_id.to_owned()))?;
    let selection = parse_selection(product, variants)?;

    let mut engine = open_engine()?;

    let status = engine.stock_status(product, &selection, quantity);
    if !status.is_satisfiable() && !force {
        engine.shutdown().await;
        return Err(CartCommandError::OutOfStock {
            requested: status.requested,
            available: status.available,
        });
    }

    let line_id = engine.add_item(product, quantity, selection);
    println!("Line id: {line_id}");
    print_totals(&engine);

    engine.shutdown().await;
    Ok(())
}

/// Print the cart lines and totals.
pub async fn show() -> Result<(), CartCommandError> {
    let engine = open_engine()?;
    let cart = engine.cart();

    if cart.is_empty() {
        println!("Your cart is empty");
    } else {
        println!("Cart {} ({} lines)", cart.id, cart.lines.len());
        for line in &cart.lines {
            let symbol = engine.pricing().currency.symbol();
            println!(
                "  {} x{}  {}{}  ({}{} each)",
                line.product.name,
                line.quantity,
                symbol,
                line.line_total(),
                symbol,
                line.unit_price,
            );
            if !line.selection.is_empty() {
                let choices: Vec<String> = line
                    .selection
                    .iter()
                    .map(|(name, value)| format!("{name}: {value}"))
                    .collect();
                println!("    {}", choices.join(", "));
            }
            println!("    id: {}", line.id);
        }
        print_totals(&engine);
    }

    engine.shutdown().await;
    Ok(())
}

/// Set a line's quantity. Zero removes the line.
pub async fn update(line_id: &str, quantity: u32) -> Result<(), CartCommandError> {
    let line_id = LineItemId::new(line_id);
    let mut engine = open_engine()?;

    if engine.cart().line(&line_id).is_none() {
        engine.shutdown().await;
        return Err(CartCommandError::UnknownLine(line_id.into_inner()));
    }

    engine.update_quantity(&line_id, quantity);
    print_totals(&engine);

    engine.shutdown().await;
    Ok(())
}

/// Remove a line from the cart.
pub async fn remove(line_id: &str) -> Result<(), CartCommandError> {
    let line_id = LineItemId::new(line_id);
    let mut engine = open_engine()?;

    if engine.cart().line(&line_id).is_none() {
        engine.shutdown().await;
        return Err(CartCommandError::UnknownLine(line_id.into_inner()));
    }

    engine.remove_item(&line_id);
    print_totals(&engine);

    engine.shutdown().await;
    Ok(())
}

/// Empty the cart.
pub async fn clear() -> Result<(), CartCommandError> {
    let mut engine = open_engine()?;
    engine.clear();
    engine.shutdown().await;
    Ok(())
}

/// Check every cart line against current catalog stock.
pub async fn validate() -> Result<(), CartCommandError> {
    let catalog = seed::demo_catalog();
    let engine = open_engine()?;

    let validation = validate_cart(engine.cart(), &catalog);
    if validation.is_valid() {
        println!("Cart is ready for checkout");
    } else {
        println!("Cart has {} issue(s):", validation.issues.len());
        for issue in &validation.issues {
            println!("  - {issue}");
        }
    }

    engine.shutdown().await;
    Ok(())
}

/// Open the engine against the configured snapshot file.
fn open_engine() -> Result<CartEngine, CartCommandError> {
    let config = CartConfig::from_env()?;
    let store = Arc::new(JsonFileStore::new(config.cart_path));
    Ok(CartEngine::start(
        config.pricing,
        store,
        Arc::new(ConsoleSink),
    ))
}

/// Parse repeated `Name=Value` arguments into a selection, checking each
/// pair against the product's variants.
fn parse_selection(
    product: &Product,
    variants: &[String],
) -> Result<VariantSelection, CartCommandError> {
    let mut selection = VariantSelection::new();
    for spec in variants {
        let (name, value) = spec
            .split_once('=')
            .ok_or_else(|| CartCommandError::InvalidVariantSpec(spec.clone()))?;
        let name = name.trim();
        let value = value.trim();

        let variant = product
            .variant(name)
            .ok_or_else(|| CartCommandError::UnknownVariant {
                product: product.id.to_string(),
                variant: name.to_owned(),
            })?;
        if variant.option(value).is_none() {
            return Err(CartCommandError::UnknownOption {
                variant: name.to_owned(),
                option: value.to_owned(),
            });
        }
        selection.set(name, value);
    }
    Ok(selection)
}

fn print_totals(engine: &CartEngine) {
    let totals = engine.totals();
    let symbol = engine.pricing().currency.symbol();
    println!("Subtotal: {symbol}{}", totals.subtotal);
    if totals.shipping.is_zero() && totals.item_count > 0 {
        println!("Shipping: free");
    } else {
        println!("Shipping: {symbol}{}", totals.shipping);
    }
    println!("Tax:      {symbol}{}", totals.tax);
    println!("Total:    {symbol}{} ({} items)", totals.total, totals.item_count);
}
