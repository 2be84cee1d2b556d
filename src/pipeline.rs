//! Staged match pipeline resolving a free-text query against a catalog.
//!
//! Strategies run from strictest to loosest, and each stage is only
//! attempted when the previous one accepted nothing: exact name,
//! whole-word, substring in name, substring in description, weighted fuzzy
//! over the name, weighted fuzzy over all fields, and finally a Levenshtein
//! sweep for typos the fuzzy matcher cannot align. The whole pipeline is a
//! deterministic pure function of `(catalog, query, options)`.

use crate::catalog::ProductRecord;
use crate::config::SearchOptions;
use crate::matcher::{self, FieldMatcher};

/// Score assigned to description-substring matches: below every name
/// match, above nothing the fuzzy stages would accept outright.
const DESCRIPTION_SUBSTRING_SCORE: f64 = 0.1;

/// Whole-name edit-distance budget as a fraction of the longer operand.
const EDIT_DISTANCE_RATIO: f64 = 0.34;

/// Per-word edit-distance budget as a fraction of the word length.
const WORD_EDIT_DISTANCE_RATIO: f64 = 0.4;

/// Queries shorter than this skip the fuzzy and edit-distance stages;
/// single characters produce too many spurious approximate matches.
const MIN_FUZZY_QUERY_LEN: usize = 2;

/// Which field of the product a match was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedField {
    Name,
    Description,
    Category,
}

/// Which pipeline stage produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStage {
    /// Empty-query identity pass-through.
    All,
    ExactName,
    WholeWord,
    NameSubstring,
    DescriptionSubstring,
    FuzzyName,
    FuzzyAllFields,
    EditDistance,
}

impl MatchStage {
    /// Fuzzy and edit-distance output is subject to the result cap; exact
    /// and substring output never is.
    pub fn is_fuzzy(self) -> bool {
        matches!(
            self,
            MatchStage::FuzzyName | MatchStage::FuzzyAllFields | MatchStage::EditDistance
        )
    }
}

/// A single match, scored in [0, 1] where 0 is a perfect match.
#[derive(Debug, Clone, Copy)]
pub struct MatchResult<'a> {
    pub product: &'a ProductRecord,
    pub score: f64,
    pub field: MatchedField,
    pub stage: MatchStage,
}

/// Resolve `query` against `catalog`, returning output of the first stage
/// that accepts anything, deduplicated by product id.
///
/// An empty or whitespace-only query returns every item in catalog order
/// with score 0, including on an empty catalog.
pub fn match_products<'a>(
    catalog: &[&'a ProductRecord],
    query: &str,
    options: &SearchOptions,
) -> Vec<MatchResult<'a>> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return catalog
            .iter()
            .copied()
            .map(|product| MatchResult {
                product,
                score: 0.0,
                field: MatchedField::Name,
                stage: MatchStage::All,
            })
            .collect();
    }

    let results = run_stages(catalog, &query, options);
    match results.first() {
        Some(first) => {
            tracing::debug!(stage = ?first.stage, hits = results.len(), %query, "query resolved");
        }
        None => tracing::debug!(%query, "query matched nothing"),
    }
    results
}

fn run_stages<'a>(
    catalog: &[&'a ProductRecord],
    query: &str,
    options: &SearchOptions,
) -> Vec<MatchResult<'a>> {
    // 1. Exact name match.
    let hits = scan_names(catalog, MatchStage::ExactName, |name| name == query);
    if !hits.is_empty() {
        return dedup_by_id(hits);
    }

    // 2. Whole word inside the name.
    let hits = scan_names(catalog, MatchStage::WholeWord, |name| {
        name.split(|c: char| !c.is_alphanumeric()).any(|w| w == query)
    });
    if !hits.is_empty() {
        return dedup_by_id(hits);
    }

    // 3. Substring of the name.
    let hits = scan_names(catalog, MatchStage::NameSubstring, |name| {
        name.contains(query)
    });
    if !hits.is_empty() {
        return dedup_by_id(hits);
    }

    // 4. Substring of the description, at a lower score.
    let hits: Vec<MatchResult<'a>> = catalog
        .iter()
        .copied()
        .filter(|p| p.description.to_lowercase().contains(query))
        .map(|product| MatchResult {
            product,
            score: DESCRIPTION_SUBSTRING_SCORE,
            field: MatchedField::Description,
            stage: MatchStage::DescriptionSubstring,
        })
        .collect();
    if !hits.is_empty() {
        return dedup_by_id(hits);
    }

    if query.chars().count() < MIN_FUZZY_QUERY_LEN {
        return Vec::new();
    }

    let matcher = FieldMatcher::new();

    // 5. Weighted fuzzy over the name only.
    if options.prefer_name_matches {
        let hits: Vec<MatchResult<'a>> = catalog
            .iter()
            .copied()
            .filter_map(|product| {
                let score = matcher.score(&product.name, query, matcher::NAME_WEIGHT)?;
                (score <= options.threshold).then_some(MatchResult {
                    product,
                    score,
                    field: MatchedField::Name,
                    stage: MatchStage::FuzzyName,
                })
            })
            .collect();
        if !hits.is_empty() {
            return top_fuzzy(hits, options.max_fuzzy_results);
        }
    }

    // 6. Weighted fuzzy over all fields, looser cutoff. The best (lowest)
    //    weighted field score represents the product.
    let hits: Vec<MatchResult<'a>> = catalog
        .iter()
        .copied()
        .filter_map(|product| {
            let name = matcher
                .score(&product.name, query, matcher::NAME_WEIGHT)
                .map(|s| (s, MatchedField::Name));
            let description = matcher
                .score(&product.description, query, matcher::DESCRIPTION_WEIGHT)
                .map(|s| (s, MatchedField::Description));
            let category = product
                .categories
                .iter()
                .filter_map(|c| matcher.score(c, query, matcher::CATEGORY_WEIGHT))
                .min_by(|a, b| a.total_cmp(b))
                .map(|s| (s, MatchedField::Category));

            let (score, field) = [name, description, category]
                .into_iter()
                .flatten()
                .min_by(|a, b| a.0.total_cmp(&b.0))?;
            (score <= options.score_cutoff).then_some(MatchResult {
                product,
                score,
                field,
                stage: MatchStage::FuzzyAllFields,
            })
        })
        .collect();
    if !hits.is_empty() {
        return top_fuzzy(hits, options.max_fuzzy_results);
    }

    // 7. Edit-distance sweep over names.
    let hits: Vec<MatchResult<'a>> = catalog
        .iter()
        .copied()
        .filter_map(|product| {
            let score = edit_distance_score(&product.name.to_lowercase(), query)?;
            Some(MatchResult {
                product,
                score,
                field: MatchedField::Name,
                stage: MatchStage::EditDistance,
            })
        })
        .collect();
    top_fuzzy(hits, options.max_fuzzy_results)
}

/// Accept `name` when the query is within the edit budget of the whole
/// name, or of any single word in it ("carot" is two edits from "carrots"
/// even though it is eight from "fresh carrots").
///
/// The raw distance `d` over the longer operand length `m` gives the
/// similarity `1 - d/m`; inverting that back onto the engine's 0-is-best
/// scale leaves exactly `d/m` as the score.
fn edit_distance_score(name: &str, query: &str) -> Option<f64> {
    let query_len = query.chars().count();
    let name_len = name.chars().count();
    let longest = query_len.max(name_len);
    if longest == 0 {
        return None;
    }

    let mut best: Option<f64> = None;
    let distance = matcher::levenshtein(query, name);
    if distance <= (EDIT_DISTANCE_RATIO * longest as f64).floor() as usize {
        best = Some(distance as f64 / longest as f64);
    }

    for word in name.split_whitespace() {
        let word_len = word.chars().count();
        let budget = (WORD_EDIT_DISTANCE_RATIO * word_len as f64).floor() as usize;
        let distance = matcher::levenshtein(query, word);
        if distance <= budget {
            let longest = query_len.max(word_len);
            let score = distance as f64 / longest as f64;
            if best.map_or(true, |b| score < b) {
                best = Some(score);
            }
        }
    }
    best
}

fn scan_names<'a>(
    catalog: &[&'a ProductRecord],
    stage: MatchStage,
    accept: impl Fn(&str) -> bool,
) -> Vec<MatchResult<'a>> {
    catalog
        .iter()
        .copied()
        .filter(|p| accept(&p.name.to_lowercase()))
        .map(|product| MatchResult {
            product,
            score: 0.0,
            field: MatchedField::Name,
            stage,
        })
        .collect()
}

/// Keep the first occurrence of each product id.
fn dedup_by_id(hits: Vec<MatchResult<'_>>) -> Vec<MatchResult<'_>> {
    let mut seen = std::collections::HashSet::new();
    hits.into_iter()
        .filter(|hit| seen.insert(hit.product.id))
        .collect()
}

/// Sort ascending by score (ties keep catalog order, sort is stable), cap
/// to the configured fuzzy maximum, and deduplicate.
fn top_fuzzy(mut hits: Vec<MatchResult<'_>>, max: usize) -> Vec<MatchResult<'_>> {
    hits.sort_by(|a, b| a.score.total_cmp(&b.score));
    hits.truncate(max);
    dedup_by_id(hits)
}
