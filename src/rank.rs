//! Ordering of heterogeneous match output.

use crate::config::SearchOptions;
use crate::pipeline::MatchResult;

/// Sort matches ascending by score. The sort is stable and the pipeline
/// emits in catalog order, so ties keep the catalog-curated ordering
/// rather than falling back to id or name.
///
/// Fuzzy and edit-distance matches are capped at
/// `options.max_fuzzy_results`; exact and substring matches pass through
/// untruncated.
pub fn rank<'a>(mut results: Vec<MatchResult<'a>>, options: &SearchOptions) -> Vec<MatchResult<'a>> {
    results.sort_by(|a, b| a.score.total_cmp(&b.score));

    let mut fuzzy_kept = 0;
    results.retain(|result| {
        if result.stage.is_fuzzy() {
            fuzzy_kept += 1;
            fuzzy_kept <= options.max_fuzzy_results
        } else {
            true
        }
    });
    results
}
