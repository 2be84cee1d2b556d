//! Product catalog data model.
//!
//! Everything here is a caller-owned snapshot: the engine reads these types
//! per call and never mutates or retains them. Loading, refreshing, and
//! invalidating catalog or co-purchase data is entirely the caller's job.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Stable, unique product identifier.
pub type ProductId = u64;

/// A single sellable product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductId,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Category tags. Treated as a set; order carries no meaning.
    #[serde(default)]
    pub categories: Vec<String>,

    /// Regular price. Non-negative by catalog-provider contract.
    pub price: f64,

    #[serde(default)]
    pub on_sale: bool,

    /// Discounted price, meaningful only while `on_sale` is set.
    #[serde(default)]
    pub sale_price: Option<f64>,
}

impl ProductRecord {
    /// The price used for range filtering: the sale price when the product
    /// is on sale and one is set, the regular price otherwise.
    pub fn effective_price(&self) -> f64 {
        match self.sale_price {
            Some(sale) if self.on_sale => sale,
            _ => self.price,
        }
    }

    /// Whether this record carries the given category tag.
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Whether this record shares at least one category with `other`.
    pub fn shares_category(&self, other: &ProductRecord) -> bool {
        self.categories.iter().any(|c| other.has_category(c))
    }
}

/// One line of a cart snapshot.
///
/// Quantity validity (> 0) is the cart owner's responsibility; the engine
/// only reads the product ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Co-purchase frequency table: for each product, the products historically
/// bought together with it and how often.
///
/// The table is supplied by the caller, precomputed or derived offline from
/// order history; the engine only reads it. Products without an entry are
/// treated as having no co-purchase history, never as an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoOccurrenceTable {
    entries: HashMap<ProductId, Vec<(ProductId, u32)>>,
}

impl CoOccurrenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `other` was bought together with `product` the given
    /// number of times.
    pub fn insert(&mut self, product: ProductId, other: ProductId, frequency: u32) {
        self.entries.entry(product).or_default().push((other, frequency));
    }

    /// Co-purchase partners of `product`; empty when the product is unknown.
    pub fn partners(&self, product: ProductId) -> &[(ProductId, u32)] {
        self.entries.get(&product).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Distinct category tags across the catalog, in first-seen order.
pub fn categories(catalog: &[ProductRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in catalog {
        for category in &product.categories {
            if !seen.iter().any(|c| c == category) {
                seen.push(category.clone());
            }
        }
    }
    seen
}
