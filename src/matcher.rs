//! Field-weighted approximate text matching.
//!
//! Wraps the skim fuzzy matcher and normalizes its unbounded
//! higher-is-better integer scores into the engine-wide [0, 1] convention
//! where 0 is a perfect match. Also provides the Levenshtein distance used
//! by the pipeline's last-resort typo stage.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Relative field weights. Name matches dominate; a description match must
/// be four times as clean to score the same, a category match eight times.
pub const NAME_WEIGHT: f64 = 1.0;
pub const DESCRIPTION_WEIGHT: f64 = 0.25;
pub const CATEGORY_WEIGHT: f64 = 0.125;

/// Approximate matcher over a single text field.
pub struct FieldMatcher {
    matcher: SkimMatcherV2,
}

impl FieldMatcher {
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }

    /// Score `text` against `query`, normalized into [0, 1] with 0 best
    /// and scaled by the inverse field weight. `None` means the matcher
    /// found no alignment at all, or the weighted score saturated past 1.
    ///
    /// Skim scores grow with query length and have no fixed upper bound,
    /// so the query's self-match score serves as the "perfect" reference;
    /// `1 - raw/reference` maps that onto the 0-is-best scale.
    pub fn score(&self, text: &str, query: &str, weight: f64) -> Option<f64> {
        let reference = self.matcher.fuzzy_match(query, query)?;
        if reference <= 0 {
            return None;
        }
        let raw = self.matcher.fuzzy_match(text, query)?;
        let normalized = 1.0 - (raw as f64 / reference as f64).clamp(0.0, 1.0);
        let weighted = normalized / weight;
        (weighted <= 1.0).then_some(weighted)
    }
}

impl Default for FieldMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Levenshtein distance: minimum single-character insertions, deletions,
/// and substitutions turning `a` into `b`. Single-row dynamic programming,
/// O(|a|·|b|) time, O(|b|) space, over chars rather than bytes.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            let next = (diagonal + cost).min(row[j] + 1).min(row[j + 1] + 1);
            diagonal = row[j + 1];
            row[j + 1] = next;
        }
    }
    row[b.len()]
}
