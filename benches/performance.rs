//! Performance benchmarks for the engine.
//!
//! Run with: cargo bench
//!
//! Target performance:
//! - Search over a 500-item catalog: < 10ms per query
//! - Recommendation generation: < 1ms per cart

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use mercato::{
    recommend, search, CartEntry, CoOccurrenceTable, FilterCriteria, ProductRecord,
    RecommendOptions, SearchOptions,
};

/// A catalog shaped like real product data: short names, a sentence of
/// description, a handful of categories.
fn synthetic_catalog(size: u64) -> Vec<ProductRecord> {
    let names = [
        "Organic Tomatoes",
        "Fresh Carrots",
        "Free-Range Chicken",
        "Napier Grass Bundle",
        "Brown Eggs",
        "Seasonal Greens",
    ];
    let categories = ["Vegetables", "Chicken", "Grass", "Dairy"];

    (0..size)
        .map(|i| ProductRecord {
            id: i,
            name: format!("{} {}", names[(i % names.len() as u64) as usize], i),
            description: "Fresh from the farm, harvested this week".to_string(),
            categories: vec![categories[(i % categories.len() as u64) as usize].to_string()],
            price: 100.0 + (i % 50) as f64 * 10.0,
            on_sale: i % 7 == 0,
            sale_price: (i % 7 == 0).then(|| 80.0 + (i % 50) as f64 * 8.0),
        })
        .collect()
}

/// Benchmark search latency across query shapes: exact, whole-word, typo
/// (falls through to the fuzzy stages), miss, and the empty-query identity.
fn bench_search(c: &mut Criterion) {
    let catalog = synthetic_catalog(500);
    let criteria = FilterCriteria::default();
    let options = SearchOptions::default();

    let queries = [
        ("exact", "Fresh Carrots 1"),
        ("word", "chicken"),
        ("typo", "tomatoe"),
        ("fuzzy", "carot"),
        ("miss", "wrench"),
        ("empty", ""),
    ];

    let mut group = c.benchmark_group("search");
    for (name, query) in queries {
        group.bench_with_input(BenchmarkId::from_parameter(name), &query, |b, query| {
            b.iter(|| black_box(search(&catalog, query, &criteria, &options)))
        });
    }
    group.finish();
}

/// Benchmark filtered search with price and category criteria present.
fn bench_filtered_search(c: &mut Criterion) {
    let catalog = synthetic_catalog(500);
    let criteria = FilterCriteria {
        categories: Some(vec!["Vegetables".into()]),
        min_price: Some(150.0),
        max_price: Some(450.0),
        on_sale: None,
    };
    let options = SearchOptions::default();

    c.bench_function("search_filtered", |b| {
        b.iter(|| black_box(search(&catalog, "tomato", &criteria, &options)))
    });
}

/// Benchmark recommendation generation for carts of varying size.
fn bench_recommend(c: &mut Criterion) {
    let catalog = synthetic_catalog(500);
    let mut table = CoOccurrenceTable::new();
    for i in 0..500u64 {
        table.insert(i, (i + 1) % 500, 5);
        table.insert(i, (i + 7) % 500, 2);
    }
    let options = RecommendOptions::default();

    let mut group = c.benchmark_group("recommend");
    for cart_size in [0usize, 1, 5, 20] {
        let cart: Vec<CartEntry> = (0..cart_size as u64)
            .map(|product_id| CartEntry {
                product_id,
                quantity: 1,
            })
            .collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(cart_size),
            &cart,
            |b, cart| {
                b.iter(|| {
                    let mut rng = StdRng::seed_from_u64(42);
                    black_box(recommend(cart, &catalog, &table, &options, &mut rng).unwrap())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_search, bench_filtered_search, bench_recommend);
criterion_main!(benches);
