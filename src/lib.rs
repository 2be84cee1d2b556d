//! Mercato - product search and recommendation engine.
//!
//! A pure, in-process library for storefront catalogs: a staged fuzzy
//! text-matching pipeline with typo tolerance and field-weighted scoring,
//! plus a "customers also bought" generator blending co-purchase
//! frequencies with category affinity and randomized fallback.
//!
//! # Architecture
//!
//! The library is organized into these main modules:
//!
//! - [`catalog`] - Product, cart, and co-purchase snapshot types
//! - [`filter`] - Category / price-range / sale-status narrowing
//! - [`pipeline`] - Staged match pipeline (exact through edit-distance)
//! - [`rank`] - Score-ordered, catalog-stable result ranking
//! - [`recommend`] - Co-purchase recommendation engine
//! - [`config`] - Enumerated tuning knobs with defaults
//!
//! Every entry point is a synchronous pure function over caller-supplied
//! snapshots; nothing is cached or retained between calls, so concurrent
//! use needs no coordination. Randomness for the recommendation fallback
//! paths comes from a caller-injected, seedable generator.
//!
//! # Example
//!
//! ```
//! use mercato::{search, FilterCriteria, ProductRecord, SearchOptions};
//!
//! let catalog = vec![ProductRecord {
//!     id: 1,
//!     name: "Organic Tomatoes".into(),
//!     description: "Vine-ripened and pesticide free".into(),
//!     categories: vec!["Vegetables".into()],
//!     price: 250.0,
//!     on_sale: false,
//!     sale_price: None,
//! }];
//!
//! let hits = search(
//!     &catalog,
//!     "tomatoes",
//!     &FilterCriteria::default(),
//!     &SearchOptions::default(),
//! );
//! assert_eq!(hits[0].0.id, 1);
//! assert_eq!(hits[0].1, 0.0);
//! ```

pub mod catalog;
pub mod config;
pub mod filter;
pub mod matcher;
pub mod pipeline;
pub mod rank;
pub mod recommend;

mod error;

// Re-export commonly used types for convenience
pub use catalog::{categories, CartEntry, CoOccurrenceTable, ProductId, ProductRecord};
pub use config::{RecommendOptions, SearchOptions};
pub use error::{EngineError, EngineResult};
pub use filter::{apply_filters, FilterCriteria};
pub use pipeline::{match_products, MatchResult, MatchStage, MatchedField};
pub use rank::rank;
pub use recommend::recommend;

/// Filter, match, and rank in one call.
///
/// `criteria` narrows the catalog first; the query then resolves against
/// the filtered subset and the results come back ordered best-first.
/// An empty query returns exactly the filtered catalog in order, every
/// item scored 0. No matches is an empty vector, never an error.
pub fn search<'a>(
    catalog: &'a [ProductRecord],
    query: &str,
    criteria: &FilterCriteria,
    options: &SearchOptions,
) -> Vec<(&'a ProductRecord, f64)> {
    let filtered = apply_filters(catalog, criteria);
    let matches = match_products(&filtered, query, options);
    rank(matches, options)
        .into_iter()
        .map(|m| (m.product, m.score))
        .collect()
}
