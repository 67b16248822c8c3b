use serde::{Deserialize, Serialize};

use super::matcher::MatchingResult;
use super::policy::RecommendationLevel;

/// Batch summary over every announcement checked, before filtering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingStatistics {
    pub checked: usize,
    pub eligible: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub not_eligible: usize,
    pub average_score: f64,
}

impl MatchingStatistics {
    pub fn from_results(results: &[MatchingResult]) -> Self {
        let mut stats = MatchingStatistics {
            checked: results.len(),
            ..Self::default()
        };

        for result in results {
            match result.overall_recommendation {
                RecommendationLevel::High => stats.high += 1,
                RecommendationLevel::Medium => stats.medium += 1,
                RecommendationLevel::Low => stats.low += 1,
                RecommendationLevel::NotEligible => stats.not_eligible += 1,
            }
        }
        stats.eligible = results.iter().filter(|result| result.is_eligible()).count();

        if !results.is_empty() {
            let total: f64 = results.iter().map(|result| result.matching_score).sum();
            stats.average_score = (total / results.len() as f64 * 100.0).round() / 100.0;
        }

        stats
    }
}
