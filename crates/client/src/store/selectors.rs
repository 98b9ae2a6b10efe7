//! Values derived from cached state.

use std::cmp::Reverse;

use catalog_admin_core::{CategoryId, Product};
use rust_decimal::{Decimal, RoundingStrategy};

use super::AppState;

/// Number of products listed under "recent".
pub const RECENT_PRODUCTS: usize = 5;

/// Product count for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub id: CategoryId,
    pub name: String,
    pub count: usize,
}

/// Summary shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_categories: usize,
    /// Mean product price rounded to 2 decimals; zero with no products.
    pub average_price: Decimal,
    /// Products per cached category, most populated first.
    pub category_counts: Vec<CategoryCount>,
    /// Newest products by creation time.
    pub recent_products: Vec<Product>,
}

/// Compute dashboard statistics from the cached lists.
#[must_use]
pub fn dashboard_stats(state: &AppState) -> DashboardStats {
    let products = &state.products.list.items;
    let categories = &state.categories.list.items;

    DashboardStats {
        total_products: products.len(),
        total_categories: categories.len(),
        average_price: average_price(products),
        category_counts: category_counts(state),
        recent_products: recent_products(products, RECENT_PRODUCTS),
    }
}

fn average_price(products: &[Product]) -> Decimal {
    if products.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = products.iter().map(|p| p.price.amount()).sum();
    (total / Decimal::from(products.len()))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn category_counts(state: &AppState) -> Vec<CategoryCount> {
    let products = &state.products.list.items;
    let mut counts: Vec<CategoryCount> = state
        .categories
        .list
        .items
        .iter()
        .map(|category| CategoryCount {
            id: category.id.clone(),
            name: category.name.clone(),
            count: products
                .iter()
                .filter(|p| p.category_id() == Some(&category.id))
                .count(),
        })
        .collect();
    // Stable: ties keep category order
    counts.sort_by_key(|c| Reverse(c.count));
    counts
}

/// The `n` newest products; products without a timestamp sort last.
#[must_use]
pub fn recent_products(products: &[Product], n: usize) -> Vec<Product> {
    let mut sorted = products.to_vec();
    sorted.sort_by_key(|p| Reverse(p.created_at));
    sorted.truncate(n);
    sorted
}
