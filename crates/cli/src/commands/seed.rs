//! Built-in demo catalog.
//!
//! A small clothing line used by the `cart` and `catalog` commands so the
//! CLI works out of the box without a product database. Per-variant stock
//! adds up to less than the product ceiling for some products, which is
//! what makes the multi-level stock checks interesting to demo.

use marigold_cart::{InMemoryCatalog, Product, ProductVariant, VariantOption};
use marigold_core::{CurrencyCode, Price, ProductId};

/// The demo catalog served by the CLI.
#[must_use]
pub fn demo_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(demo_products())
}

fn demo_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new("prod-1"),
            name: "Premium Cotton Kurta".to_owned(),
            description: "Handcrafted premium cotton kurta with intricate embroidery. \
                          Perfect for festive occasions and traditional events."
                .to_owned(),
            price: rupees(2499),
            original_price: Some(rupees(2999)),
            category: "Traditional Wear".to_owned(),
            variants: vec![
                variant(
                    "Size",
                    vec![
                        option("Small", 10),
                        option("Medium", 15),
                        option("Large", 8),
                        option("Extra Large", 5),
                    ],
                ),
                variant(
                    "Color",
                    vec![
                        option("Royal Blue", 12),
                        option("Ivory White", 15),
                        option("Maroon", 11),
                    ],
                ),
            ],
            stock: 38,
            featured: true,
            tags: tags(&["traditional", "cotton", "festive", "embroidered"]),
        },
        Product {
            id: ProductId::new("prod-2"),
            name: "Designer Silk Saree".to_owned(),
            description: "Exquisite silk saree with zari work and traditional patterns. \
                          A timeless piece for special occasions."
                .to_owned(),
            price: rupees(8999),
            original_price: Some(rupees(12999)),
            category: "Women's Collection".to_owned(),
            variants: vec![variant(
                "Color",
                vec![
                    option("Deep Red", 8),
                    option("Emerald Green", 6),
                    option("Navy Blue", 7),
                ],
            )],
            stock: 21,
            featured: true,
            tags: tags(&["silk", "saree", "zari", "wedding", "luxury"]),
        },
        Product {
            id: ProductId::new("prod-3"),
            name: "Casual Denim Jacket".to_owned(),
            description: "Trendy denim jacket with modern fit. Perfect for casual \
                          outings and layering."
                .to_owned(),
            price: rupees(3499),
            original_price: None,
            category: "Men's Collection".to_owned(),
            variants: vec![variant(
                "Size",
                vec![
                    option("Small", 12),
                    option("Medium", 18),
                    option("Large", 14),
                    option("Extra Large", 9),
                ],
            )],
            stock: 53,
            featured: false,
            tags: tags(&["denim", "casual", "jacket", "street-style"]),
        },
        Product {
            id: ProductId::new("prod-4"),
            name: "Elegant Evening Dress".to_owned(),
            description: "Sophisticated evening dress with flowing silhouette. Perfect \
                          for formal events and celebrations."
                .to_owned(),
            price: rupees(5999),
            original_price: Some(rupees(7999)),
            category: "Women's Collection".to_owned(),
            variants: vec![
                variant(
                    "Size",
                    vec![
                        option("Extra Small", 4),
                        option("Small", 8),
                        option("Medium", 10),
                        option("Large", 6),
                    ],
                ),
                variant(
                    "Color",
                    vec![
                        option("Classic Black", 15),
                        option("Midnight Navy", 8),
                        option("Wine Red", 5),
                    ],
                ),
            ],
            stock: 28,
            featured: true,
            tags: tags(&["dress", "evening", "formal", "elegant"]),
        },
        Product {
            id: ProductId::new("prod-5"),
            name: "Handcrafted Leather Belt".to_owned(),
            description: "Premium genuine leather belt with brass buckle. Handcrafted \
                          for durability and style."
                .to_owned(),
            price: rupees(1999),
            original_price: None,
            category: "Accessories".to_owned(),
            variants: vec![
                variant(
                    "Size",
                    vec![
                        option("32 inches", 8),
                        option("34 inches", 12),
                        option("36 inches", 15),
                        option("38 inches", 10),
                        option("40 inches", 6),
                    ],
                ),
                variant(
                    "Color",
                    vec![
                        option("Classic Brown", 25),
                        option("Jet Black", 20),
                        option("Tan", 6),
                    ],
                ),
            ],
            stock: 51,
            featured: false,
            tags: tags(&["leather", "belt", "accessories", "handcrafted"]),
        },
        Product {
            id: ProductId::new("prod-6"),
            name: "Printed Cotton Shirt".to_owned(),
            description: "Comfortable cotton shirt with unique print design. Perfect \
                          for casual and semi-formal occasions."
                .to_owned(),
            price: rupees(2799),
            original_price: None,
            category: "Men's Collection".to_owned(),
            variants: vec![variant(
                "Size",
                vec![
                    option("Small", 14),
                    option("Medium", 20),
                    option("Large", 16),
                    option("Extra Large", 8),
                ],
            )],
            stock: 58,
            featured: false,
            tags: tags(&["cotton", "shirt", "printed", "casual"]),
        },
    ]
}

fn rupees(amount: i64) -> Price {
    Price::from_major(amount, CurrencyCode::INR)
}

fn variant(name: &str, options: Vec<VariantOption>) -> ProductVariant {
    ProductVariant {
        name: name.to_owned(),
        options,
    }
}

fn option(value: &str, stock: u32) -> VariantOption {
    VariantOption {
        value: value.to_owned(),
        stock,
        price_modifier: None,
    }
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|&t| t.to_owned()).collect()
}
