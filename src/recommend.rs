//! "Customers also bought" recommendation generation.
//!
//! Candidates come from the co-purchase table first, ordered by summed
//! frequency; category affinity and then random picks fill any remainder.
//! All randomness flows through the caller's injected generator, so output
//! is reproducible whenever the caller wants it to be.

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{CartEntry, CoOccurrenceTable, ProductId, ProductRecord};
use crate::config::RecommendOptions;
use crate::error::{EngineError, EngineResult};

/// Produce up to `options.k` suggested products for the given cart.
///
/// For an empty cart (a new visitor) the catalog is shuffled and the first
/// `k` items returned, ignoring the co-purchase table. Otherwise candidates
/// are the cart's co-purchase partners summed across cart lines and taken
/// in descending frequency order, under-filled first with catalog-order
/// items sharing a category with something in the cart, then with random
/// leftovers. The result never includes a cart id, never repeats an id,
/// and only contains products present in the supplied catalog.
///
/// The caller owns the generator: seed it per call for reproducible tests,
/// or per session for suggestions that stay stable across one visit.
///
/// An empty catalog yields an empty list; a cart product missing from the
/// co-purchase table simply contributes no candidates. Asking for zero
/// suggestions is a caller bug and fails with
/// [`EngineError::InvalidRecommendationCount`].
pub fn recommend<R: Rng>(
    cart: &[CartEntry],
    catalog: &[ProductRecord],
    table: &CoOccurrenceTable,
    options: &RecommendOptions,
    rng: &mut R,
) -> EngineResult<Vec<ProductRecord>> {
    let k = options.k;
    if k == 0 {
        return Err(EngineError::InvalidRecommendationCount(0));
    }

    let cart_ids: HashSet<ProductId> = cart.iter().map(|entry| entry.product_id).collect();

    // New visitor: nothing to correlate against, pick at random.
    if cart_ids.is_empty() {
        let mut pool: Vec<&ProductRecord> = catalog.iter().collect();
        pool.shuffle(rng);
        let chosen: Vec<ProductRecord> = pool.into_iter().take(k).cloned().collect();
        tracing::debug!(picked = chosen.len(), "new-visitor random suggestions");
        return Ok(finalize(chosen, &cart_ids, catalog, k));
    }

    // 1. Sum co-purchase frequencies across every cart line, skipping
    //    anything already in the cart.
    let mut frequency: HashMap<ProductId, u32> = HashMap::new();
    let mut first_seen: Vec<ProductId> = Vec::new();
    for entry in cart {
        for &(candidate, count) in table.partners(entry.product_id) {
            if cart_ids.contains(&candidate) {
                continue;
            }
            let sum = frequency.entry(candidate).or_insert_with(|| {
                first_seen.push(candidate);
                0
            });
            *sum += count;
        }
    }

    // Highest summed frequency first; the sort is stable, so ties keep
    // first-seen order and the ordering stays deterministic.
    let mut candidates = first_seen;
    candidates.sort_by_key(|id| std::cmp::Reverse(frequency[id]));

    let mut chosen: Vec<ProductRecord> = Vec::with_capacity(k);
    for id in candidates {
        if chosen.len() >= k {
            break;
        }
        // Stale table entries pointing outside the catalog are dropped here.
        if let Some(product) = catalog.iter().find(|p| p.id == id) {
            chosen.push(product.clone());
        }
    }
    tracing::debug!(co_purchase = chosen.len(), "frequency candidates taken");

    // 2. Under-fill with catalog-order items sharing a category with
    //    anything in the cart.
    if chosen.len() < k {
        let cart_products: Vec<&ProductRecord> = catalog
            .iter()
            .filter(|p| cart_ids.contains(&p.id))
            .collect();
        for product in catalog {
            if chosen.len() >= k {
                break;
            }
            if cart_ids.contains(&product.id) || chosen.iter().any(|c| c.id == product.id) {
                continue;
            }
            if cart_products.iter().any(|cp| product.shares_category(cp)) {
                chosen.push(product.clone());
            }
        }
    }

    // 3. Still short: random fill from whatever is left.
    if chosen.len() < k {
        let mut pool: Vec<&ProductRecord> = catalog
            .iter()
            .filter(|p| !cart_ids.contains(&p.id) && !chosen.iter().any(|c| c.id == p.id))
            .collect();
        pool.shuffle(rng);
        for product in pool {
            if chosen.len() >= k {
                break;
            }
            chosen.push(product.clone());
        }
    }

    Ok(finalize(chosen, &cart_ids, catalog, k))
}

/// Final integrity pass: drop duplicates, cart ids, and ids that have left
/// the catalog, then truncate to `k`.
fn finalize(
    chosen: Vec<ProductRecord>,
    cart_ids: &HashSet<ProductId>,
    catalog: &[ProductRecord],
    k: usize,
) -> Vec<ProductRecord> {
    let live: HashSet<ProductId> = catalog.iter().map(|p| p.id).collect();
    let mut seen: HashSet<ProductId> = HashSet::new();
    let mut result: Vec<ProductRecord> = chosen
        .into_iter()
        .filter(|p| live.contains(&p.id) && !cart_ids.contains(&p.id) && seen.insert(p.id))
        .collect();
    result.truncate(k);
    result
}
