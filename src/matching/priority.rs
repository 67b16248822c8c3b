use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::ApplicantProfile;
use super::regional::PriorityTier;

/// Points awarded once a measured quantity reaches `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBracket {
    pub threshold: u32,
    pub points: u32,
}

/// Step schedule: the best bracket reached wins, never exceeding `cap`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSchedule {
    pub brackets: Vec<ScoreBracket>,
    pub cap: u32,
}

impl BracketSchedule {
    pub fn new(brackets: &[(u32, u32)], cap: u32) -> Self {
        Self {
            brackets: brackets
                .iter()
                .map(|&(threshold, points)| ScoreBracket { threshold, points })
                .collect(),
            cap,
        }
    }

    /// Best points among met brackets, capped. Bracket order is irrelevant.
    pub fn score(&self, measured: u32) -> u32 {
        self.brackets
            .iter()
            .filter(|bracket| measured >= bracket.threshold)
            .map(|bracket| bracket.points)
            .max()
            .unwrap_or(0)
            .min(self.cap)
    }
}

/// Bracket policy for the four tie-break sub-scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityScorePolicy {
    /// Minor children count.
    pub children: BracketSchedule,
    /// Months of elderly-parent support.
    pub elderly_support: BracketSchedule,
    /// Months of residence in the announcement's region.
    pub local_residence: BracketSchedule,
    /// Months of subscription-account tenure.
    pub subscription_tenure: BracketSchedule,
}

impl PriorityScorePolicy {
    /// Sum of the four caps, saturating at `u32::MAX`.
    pub fn max_total(&self) -> u32 {
        [
            self.elderly_support.cap,
            self.local_residence.cap,
            self.subscription_tenure.cap,
        ]
        .into_iter()
        .fold(self.children.cap, u32::saturating_add)
    }
}

impl Default for PriorityScorePolicy {
    fn default() -> Self {
        Self {
            children: BracketSchedule::new(&[(1, 10), (2, 20), (3, 30), (4, 35), (5, 40)], 40),
            elderly_support: BracketSchedule::new(&[(12, 5), (36, 10)], 10),
            local_residence: BracketSchedule::new(&[(12, 5), (36, 10), (60, 15)], 15),
            subscription_tenure: BracketSchedule::new(
                &[(6, 1), (12, 2), (24, 5), (60, 10), (120, 15)],
                15,
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriorityScore {
    pub children: u32,
    pub elderly_support: u32,
    pub local_residence: u32,
    pub subscription_tenure: u32,
}

impl PriorityScore {
    pub fn total(&self) -> u32 {
        [
            self.elderly_support,
            self.local_residence,
            self.subscription_tenure,
        ]
        .into_iter()
        .fold(self.children, u32::saturating_add)
    }
}

pub fn calculate_priority_score(
    profile: &ApplicantProfile,
    tier: PriorityTier,
    as_of: NaiveDate,
    policy: &PriorityScorePolicy,
) -> PriorityScore {
    let support_months = if profile.elderly_support.is_supporting {
        profile.elderly_support.support_months.unwrap_or(0)
    } else {
        0
    };
    let local_months = if tier.is_local() {
        profile.residence.residence_months
    } else {
        0
    };
    let tenure_months = if profile.subscription.has_account {
        profile
            .subscription
            .effective_tenure_months(as_of)
            .unwrap_or(0)
    } else {
        0
    };

    PriorityScore {
        children: policy.children.score(u32::from(profile.children.minor_count)),
        elderly_support: policy.elderly_support.score(support_months),
        local_residence: policy.local_residence.score(local_months),
        subscription_tenure: policy.subscription_tenure.score(tenure_months),
    }
}
