//! Eligibility and ranking engine for housing subscription announcements.
//!
//! Everything here is a pure function of the applicant snapshot, the announcement graph,
//! the national income table and a [`MatchingConfig`]. Faults inside a single check are
//! recorded as reasons on that check; batch matching never aborts.

pub mod config;
pub mod domain;
pub mod evaluation;
mod matcher;
pub mod policy;
pub mod priority;
mod qualification;
pub mod ranking;
pub mod regional;
mod statistics;

#[cfg(test)]
mod tests;

pub use config::{EligibilityPolicy, MatchFilters, MatchingConfig, ScoreWeights};
pub use domain::{
    AccountType, Announcement, AnnouncementId, ApplicantId, ApplicantProfile, AssetProfile,
    ChildrenInfo, ElderlySupport, EmploymentType, HousingOwnership, HousingType, IncomeProfile,
    PersonalInfo, Residence, Restrictions, SpecialQualifications, Subcategory,
    SubscriptionAccount, SupplyKind, SupplyType, SupplyTypeId, WinHistory,
};
pub use evaluation::{IncomeTier, NationalIncomeStandard, NationalIncomeTable};
pub use matcher::{
    check_supply_type, match_many, match_many_with_statistics, match_one, MatchError,
    MatchingEngine, MatchingResult,
};
pub use policy::{CompetitionLevel, RecommendationLevel};
pub use qualification::SupplyTypeQualification;
pub use regional::{PriorityTier, RegionalOutcome, RegionalPriority};
pub use statistics::MatchingStatistics;
