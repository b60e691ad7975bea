//! Read-only catalog access.
//!
//! The engine consumes the catalog as an immutable lookup table. It is an
//! explicit repository object handed to whatever constructs the engine,
//! never a process-wide collection.

use std::collections::HashMap;

use marigold_core::ProductId;

use crate::types::Product;

/// Read-only product lookup.
pub trait CatalogReader: Send + Sync {
    /// Look up a product by identifier.
    fn product(&self, id: &ProductId) -> Option<&Product>;

    /// All products, in catalog order.
    fn products(&self) -> &[Product];
}

/// In-memory catalog repository.
///
/// Holds the product list plus an id index for O(1) lookup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl InMemoryCatalog {
    /// Build a catalog from a product list.
    ///
    /// If two products share an id, the later one wins the index slot.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        let index = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        Self { products, index }
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogReader for InMemoryCatalog {
    fn product(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).and_then(|&i| self.products.get(i))
    }

    fn products(&self) -> &[Product] {
        &self.products
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use marigold_core::{CurrencyCode, Price};

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            description: String::new(),
            price: Price::from_major(100, CurrencyCode::INR),
            original_price: None,
            category: "Accessories".to_owned(),
            variants: Vec::new(),
            stock: 5,
            featured: false,
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = InMemoryCatalog::new(vec![
            product("prod-1", "Kurta"),
            product("prod-2", "Dupatta"),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.product(&ProductId::new("prod-2")).unwrap().name,
            "Dupatta"
        );
        assert!(catalog.product(&ProductId::new("prod-9")).is_none());
    }

    #[test]
    fn test_products_preserve_order() {
        let catalog = InMemoryCatalog::new(vec![
            product("prod-1", "Kurta"),
            product("prod-2", "Dupatta"),
        ]);
        let names: Vec<_> = catalog.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Kurta", "Dupatta"]);
    }
}
