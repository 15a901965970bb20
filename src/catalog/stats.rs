use indexmap::IndexMap;
use indexmap::IndexSet;

use super::query::ALL_CATEGORIES;
use crate::domain::Product;

/// Figures shown at the top of the admin dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_products: usize,
    /// Product count per category, in first-seen order.
    pub categories: IndexMap<String, usize>,
    pub low_stock_items: Vec<Product>,
    pub featured_count: usize,
}

impl DashboardStats {
    pub fn compute(products: &[Product]) -> Self {
        let mut categories: IndexMap<String, usize> = IndexMap::new();
        let mut low_stock_items = Vec::new();
        let mut featured_count = 0;

        for product in products {
            *categories.entry(product.category.clone()).or_default() += 1;
            if product.is_low_stock() {
                low_stock_items.push(product.clone());
            }
            if product.featured {
                featured_count += 1;
            }
        }

        Self {
            total_products: products.len(),
            categories,
            low_stock_items,
            featured_count,
        }
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

/// Options for the category dropdown: the `All` sentinel followed by each
/// distinct category in first-seen order.
///
/// A category literally named `All` collides with the sentinel. It is listed
/// once, and choosing it selects every product.
pub fn category_options(products: &[Product]) -> Vec<String> {
    let distinct: IndexSet<&str> = products
        .iter()
        .map(|p| p.category.as_str())
        .filter(|category| *category != ALL_CATEGORIES)
        .collect();
    std::iter::once(ALL_CATEGORIES)
        .chain(distinct)
        .map(str::to_string)
        .collect()
}
