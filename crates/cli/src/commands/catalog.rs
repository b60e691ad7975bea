//! Catalog browsing commands.

use marigold_cart::CatalogReader;
use marigold_core::ProductId;

use super::cart::CartCommandError;
use super::seed;

/// List every product in the catalog.
pub fn list() {
    let catalog = seed::demo_catalog();
    for product in catalog.products() {
        let mut price = product.price.display();
        if let Some(original) = &product.original_price {
            let percent = product.discount_percent();
            price = format!("{price} (was {}, -{percent}%)", original.display());
        }
        println!("{}  {}  {}", product.id, product.name, price);
        println!("    {} | stock: {}", product.category, product.stock);
    }
}

/// Show one product with its variants and per-option stock.
pub fn show(product_id: &str) -> Result<(), CartCommandError> {
    let catalog = seed::demo_catalog();
    let product = catalog
        .product(&ProductId::new(product_id))
        .ok_or_else(|| CartCommandError::UnknownProduct(product_id.to_owned()))?;

    println!("{} - {}", product.id, product.name);
    println!("{}", product.description);
    match &product.original_price {
        Some(original) => println!(
            "Price: {} (was {}, -{}%)",
            product.price.display(),
            original.display(),
            product.discount_percent(),
        ),
        None => println!("Price: {}", product.price.display()),
    }
    println!("Category: {} | stock: {}", product.category, product.stock);
    if !product.tags.is_empty() {
        println!("Tags: {}", product.tags.join(", "));
    }
    for variant in &product.variants {
        println!("{}:", variant.name);
        for option in &variant.options {
            println!("  {} (stock: {})", option.value, option.stock);
        }
    }
    Ok(())
}
