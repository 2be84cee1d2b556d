//! Search and recommendation tuning knobs.
//!
//! The source system passed these around as loosely-typed option bags with
//! many optional keys; here every recognized option is enumerated with an
//! explicit default.

use serde::{Deserialize, Serialize};

/// Options controlling the match pipeline and ranker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchOptions {
    /// Acceptance threshold for the name-only fuzzy stage, in the engine's
    /// 0-is-best scale.
    pub threshold: f64,

    /// Looser acceptance threshold for the all-fields fuzzy stage.
    pub score_cutoff: f64,

    /// Run the name-only fuzzy stage before widening to all fields. When
    /// disabled the pipeline goes straight to the all-fields pass.
    pub prefer_name_matches: bool,

    /// Cap on results returned by the fuzzy and edit-distance stages.
    /// Exact and substring matches are never capped.
    pub max_fuzzy_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.45,
            score_cutoff: 0.6,
            prefer_name_matches: true,
            max_fuzzy_results: 10,
        }
    }
}

/// Options controlling the recommendation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecommendOptions {
    /// Maximum number of suggestions to return. Must be at least 1.
    pub k: usize,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self { k: 3 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_defaults() {
        let options = SearchOptions::default();
        assert_eq!(options.threshold, 0.45);
        assert_eq!(options.score_cutoff, 0.6);
        assert!(options.prefer_name_matches);
        assert_eq!(options.max_fuzzy_results, 10);
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let options: SearchOptions = serde_json::from_str(r#"{"threshold": 0.3}"#).unwrap();
        assert_eq!(options.threshold, 0.3);
        assert_eq!(options.max_fuzzy_results, 10);

        let options: RecommendOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.k, 3);
    }
}
