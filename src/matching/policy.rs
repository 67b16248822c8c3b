use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::config::EligibilityPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompetitionLevel {
    High,
    Medium,
    Low,
}

impl CompetitionLevel {
    /// 1.0 for the least contested supply, 0.0 for the most.
    pub const fn inverse_score(self) -> f64 {
        match self {
            CompetitionLevel::High => 0.0,
            CompetitionLevel::Medium => 0.5,
            CompetitionLevel::Low => 1.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CompetitionLevel::High => "HIGH",
            CompetitionLevel::Medium => "MEDIUM",
            CompetitionLevel::Low => "LOW",
        }
    }
}

impl fmt::Display for CompetitionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered worst to best so `max` picks the strongest recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationLevel {
    NotEligible,
    Low,
    Medium,
    High,
}

impl RecommendationLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RecommendationLevel::NotEligible => "NOT_ELIGIBLE",
            RecommendationLevel::Low => "LOW",
            RecommendationLevel::Medium => "MEDIUM",
            RecommendationLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RecommendationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown recommendation level '{0}'")]
pub struct UnknownRecommendationLevel(pub String);

impl FromStr for RecommendationLevel {
    type Err = UnknownRecommendationLevel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "NOT_ELIGIBLE" => Ok(RecommendationLevel::NotEligible),
            "LOW" => Ok(RecommendationLevel::Low),
            "MEDIUM" => Ok(RecommendationLevel::Medium),
            "HIGH" => Ok(RecommendationLevel::High),
            _ => Err(UnknownRecommendationLevel(value.to_string())),
        }
    }
}

/// Map a raw quota ratio (percent) onto a competition estimate.
pub fn estimate_competition(quota_ratio: f64, policy: &EligibilityPolicy) -> CompetitionLevel {
    if quota_ratio < policy.low_quota_threshold {
        CompetitionLevel::High
    } else if quota_ratio > policy.high_quota_threshold {
        CompetitionLevel::Low
    } else {
        CompetitionLevel::Medium
    }
}

pub fn recommend(
    is_eligible: bool,
    competition: CompetitionLevel,
    has_unmet_preferred: bool,
) -> RecommendationLevel {
    if !is_eligible {
        return RecommendationLevel::NotEligible;
    }

    match competition {
        CompetitionLevel::High => RecommendationLevel::Low,
        CompetitionLevel::Medium => RecommendationLevel::Medium,
        CompetitionLevel::Low if has_unmet_preferred => RecommendationLevel::Medium,
        CompetitionLevel::Low => RecommendationLevel::High,
    }
}
