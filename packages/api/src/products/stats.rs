//! Aggregate figures for the dashboard cards.

use serde::Serialize;

use crate::models::Product;

/// Stats over the full, unfiltered collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total: usize,
    /// Products with `stock < 10`.
    pub low_stock: usize,
    /// Number of distinct categories.
    pub categories: usize,
    /// Sum of price × stock.
    pub total_value: f64,
}

impl InventoryStats {
    pub fn from_products(products: &[Product]) -> Self {
        Self {
            total: products.len(),
            low_stock: products.iter().filter(|p| p.is_low_stock()).count(),
            categories: distinct_categories(products).len(),
            total_value: products.iter().map(Product::value).sum(),
        }
    }
}

/// Distinct categories in first-seen order.
pub fn distinct_categories(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in products {
        if !seen.contains(&product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::product;

    #[test]
    fn test_empty_collection() {
        assert_eq!(InventoryStats::from_products(&[]), InventoryStats::default());
    }

    #[test]
    fn test_stats() {
        let products = vec![
            product(1, "Bolt", 0.5, 200, "Hardware"),
            product(2, "Lamp", 25.0, 9, "Home"),
            product(3, "Drill", 80.0, 10, "Hardware"),
            product(4, "Rug", 40.0, 0, "Home"),
        ];
        let stats = InventoryStats::from_products(&products);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.low_stock, 2);
        assert_eq!(stats.categories, 2);
        assert_eq!(stats.total_value, 100.0 + 225.0 + 800.0);
    }

    #[test]
    fn test_low_stock_boundary() {
        let nine = [product(1, "A", 1.0, 9, "X")];
        let ten = [product(1, "A", 1.0, 10, "X")];
        assert_eq!(InventoryStats::from_products(&nine).low_stock, 1);
        assert_eq!(InventoryStats::from_products(&ten).low_stock, 0);
    }

    #[test]
    fn test_distinct_categories_keep_first_seen_order() {
        let products = vec![
            product(1, "A", 1.0, 1, "Toys"),
            product(2, "B", 1.0, 1, "Garden"),
            product(3, "C", 1.0, 1, "Toys"),
            product(4, "D", 1.0, 1, "Books"),
        ];
        assert_eq!(
            distinct_categories(&products),
            vec!["Toys", "Garden", "Books"]
        );
    }
}
