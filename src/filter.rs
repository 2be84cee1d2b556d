//! Catalog narrowing by category, price range, and sale status.

use serde::{Deserialize, Serialize};

use crate::catalog::ProductRecord;

/// Filter criteria for narrowing a catalog before matching.
///
/// Absent fields are no-ops; an all-absent criteria set leaves the catalog
/// unchanged. Price bounds compare against the effective price, so a sale
/// item is filtered by what the customer would actually pay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Keep products carrying at least one of these categories.
    pub categories: Option<Vec<String>>,

    /// Lower bound on effective price, inclusive.
    pub min_price: Option<f64>,

    /// Upper bound on effective price, inclusive.
    pub max_price: Option<f64>,

    /// Keep only products matching this sale status.
    pub on_sale: Option<bool>,
}

impl FilterCriteria {
    /// True when every field is absent.
    pub fn is_empty(&self) -> bool {
        self.categories.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.on_sale.is_none()
    }

    fn accepts(&self, product: &ProductRecord) -> bool {
        if let Some(categories) = &self.categories {
            if !categories.iter().any(|c| product.has_category(c)) {
                return false;
            }
        }

        let price = product.effective_price();
        if let Some(min) = self.min_price {
            if price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if price > max {
                return false;
            }
        }

        if let Some(on_sale) = self.on_sale {
            if product.on_sale != on_sale {
                return false;
            }
        }

        true
    }
}

/// Narrow `catalog` to records satisfying `criteria`, preserving order.
///
/// An inverted price range (`min > max`) is not an error; nothing can
/// satisfy it, so the result is empty. Unknown categories likewise just
/// match nothing.
pub fn apply_filters<'a>(
    catalog: &'a [ProductRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a ProductRecord> {
    catalog.iter().filter(|p| criteria.accepts(p)).collect()
}
