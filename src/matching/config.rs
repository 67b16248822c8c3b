use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::Announcement;
use super::evaluation::AttributeMap;
use super::policy::RecommendationLevel;
use super::priority::PriorityScorePolicy;

/// Relative weight of each matching-score component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub eligibility: f64,
    pub competition: f64,
    pub priority: f64,
    pub regional: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            eligibility: 40.0,
            competition: 30.0,
            priority: 20.0,
            regional: 10.0,
        }
    }
}

/// Result filtering and capping applied across a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchFilters {
    pub only_eligible: bool,
    pub min_recommendation: Option<RecommendationLevel>,
    pub max_results: Option<usize>,
}

impl MatchFilters {
    pub fn admits(&self, level: RecommendationLevel) -> bool {
        if self.only_eligible && level == RecommendationLevel::NotEligible {
            return false;
        }
        self.min_recommendation
            .map(|minimum| level >= minimum)
            .unwrap_or(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityPolicy {
    /// Quota ratios below this are HIGH competition.
    pub low_quota_threshold: f64,
    /// Quota ratios above this are LOW competition.
    pub high_quota_threshold: f64,
    pub priority: PriorityScorePolicy,
    pub attributes: AttributeMap,
    pub enforce_rewinning_restriction: bool,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            low_quota_threshold: 20.0,
            high_quota_threshold: 50.0,
            priority: PriorityScorePolicy::default(),
            attributes: AttributeMap::standard(),
            enforce_rewinning_restriction: false,
        }
    }
}

/// Everything a matching run needs besides its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default)]
    pub weights: ScoreWeights,
    #[serde(default)]
    pub filters: MatchFilters,
    #[serde(default)]
    pub policy: EligibilityPolicy,
    pub as_of: NaiveDate,
    #[serde(default)]
    pub income_year: Option<i32>,
}

impl MatchingConfig {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            weights: ScoreWeights::default(),
            filters: MatchFilters::default(),
            policy: EligibilityPolicy::default(),
            as_of,
            income_year: None,
        }
    }

    /// Income table year: explicit override, then the announcement date, then `as_of`.
    pub fn income_year_for(&self, announcement: &Announcement) -> i32 {
        self.income_year
            .or_else(|| announcement.announcement_date.map(|date| date.year()))
            .unwrap_or_else(|| self.as_of.year())
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self::new(NaiveDate::default())
    }
}
