//! Per-rule checkers applied to a single applicant profile.

mod asset;
mod attributes;
mod condition;
mod income;
mod subscription;

pub use asset::{check_assets, AssetCategory, AssetCheck, AssetStandard, AssetViolation};
pub use attributes::{ApplicantAttribute, AttributeError, AttributeMap, AttributeValue, ProfileView};
pub use condition::{
    evaluate_condition, ComparisonOperator, ConditionClass, ConditionError, ConditionOutcome,
    ConditionStatus, ConditionTemplate, ConditionValue, DataType, EffectiveCondition,
    EqualityOperator, InvalidCondition, Predicate, SupplyTypeCondition,
};
pub use income::{
    check_income, scan_income_tiers, IncomeBucket, IncomeCheck, IncomeInput, IncomeLookupError,
    IncomeStandard, IncomeTier, IncomeVerdict, NationalIncomeStandard, NationalIncomeTable,
};
pub use subscription::{check_subscription, SubscriptionCheck, SubscriptionRequirement};
