use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::condition::DataType;
use crate::matching::domain::{months_between, ApplicantProfile};

/// Applicant attributes a condition category can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicantAttribute {
    Age,
    IsMarried,
    MarriageYears,
    MarriageDate,
    HouseholdSize,
    MinorChildren,
    ChildrenCount,
    YoungestChildAge,
    HasNewborn,
    NewbornBirthDate,
    ElderlySupportYears,
    SupportsElderlyParent,
    HasOwnedHouse,
    CurrentHouseCount,
    ResidenceMonths,
    SubscriptionMonths,
    DepositCount,
    DepositAmount,
    AccountType,
    HouseholdIncome,
    IncomePercent,
    DualIncome,
    TotalAssets,
    FirstTimeHomebuyer,
    HasSpecialStatus,
    InstitutionalRecommendation,
    HasDisability,
    NorthKoreanDefector,
    RewinningRestrictionEnd,
    CriminalRecord,
    OverseasResidence,
}

/// Applicant-side value read for a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Number(f64),
    Boolean(bool),
    Date(NaiveDate),
    Text(String),
}

impl AttributeValue {
    pub const fn data_type(&self) -> DataType {
        match self {
            AttributeValue::Number(_) => DataType::Number,
            AttributeValue::Boolean(_) => DataType::Boolean,
            AttributeValue::Date(_) => DataType::Date,
            AttributeValue::Text(_) => DataType::Text,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Number(value) => write!(f, "{value}"),
            AttributeValue::Boolean(value) => write!(f, "{value}"),
            AttributeValue::Date(value) => write!(f, "{value}"),
            AttributeValue::Text(value) => write!(f, "\"{value}\""),
        }
    }
}

/// Input faults raised while reading an attribute from a profile.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttributeError {
    #[error("unknown condition category '{code}'")]
    UnknownCategory { code: String },
    #[error("applicant profile has no value for {field}")]
    MissingField { field: &'static str },
    #[error("national income baseline unavailable for the applicant's household size")]
    MissingIncomeBaseline,
    #[error("condition expects {expected} but applicant attribute is {found}")]
    KindMismatch { expected: DataType, found: DataType },
}

/// Profile plus the derived context needed to read elapsed durations and income ratios.
#[derive(Debug, Clone, Copy)]
pub struct ProfileView<'a> {
    pub profile: &'a ApplicantProfile,
    pub as_of: NaiveDate,
    /// The 100% national income standard for the applicant's household size.
    pub income_baseline: Option<u64>,
}

impl ApplicantAttribute {
    pub fn read(self, view: &ProfileView<'_>) -> Result<AttributeValue, AttributeError> {
        use AttributeValue::{Boolean, Date, Number, Text};

        let profile = view.profile;
        let value = match self {
            ApplicantAttribute::Age => Number(profile.personal.age as f64),
            ApplicantAttribute::IsMarried => Boolean(profile.personal.is_married),
            ApplicantAttribute::MarriageYears => {
                let married_on = profile.personal.marriage_date.ok_or(AttributeError::MissingField {
                    field: "personal.marriage_date",
                })?;
                Number((months_between(married_on, view.as_of) / 12) as f64)
            }
            ApplicantAttribute::MarriageDate => {
                Date(profile.personal.marriage_date.ok_or(AttributeError::MissingField {
                    field: "personal.marriage_date",
                })?)
            }
            ApplicantAttribute::HouseholdSize => Number(profile.personal.household_size as f64),
            ApplicantAttribute::MinorChildren => Number(profile.children.minor_count as f64),
            ApplicantAttribute::ChildrenCount => Number(profile.children.count as f64),
            ApplicantAttribute::YoungestChildAge => {
                let age = profile
                    .children
                    .youngest_child_age
                    .ok_or(AttributeError::MissingField {
                        field: "children.youngest_child_age",
                    })?;
                Number(age as f64)
            }
            ApplicantAttribute::HasNewborn => Boolean(profile.children.has_newborn),
            ApplicantAttribute::NewbornBirthDate => {
                Date(profile.children.newborn_birth_date.ok_or(AttributeError::MissingField {
                    field: "children.newborn_birth_date",
                })?)
            }
            ApplicantAttribute::ElderlySupportYears => {
                let support = &profile.elderly_support;
                if !support.is_supporting {
                    Number(0.0)
                } else {
                    let months = support.support_months.ok_or(AttributeError::MissingField {
                        field: "elderly_support.support_months",
                    })?;
                    Number((months / 12) as f64)
                }
            }
            ApplicantAttribute::SupportsElderlyParent => {
                Boolean(profile.elderly_support.is_supporting)
            }
            ApplicantAttribute::HasOwnedHouse => Boolean(profile.housing.has_owned_house),
            ApplicantAttribute::CurrentHouseCount => {
                Number(profile.housing.current_house_count as f64)
            }
            ApplicantAttribute::ResidenceMonths => {
                Number(profile.residence.residence_months as f64)
            }
            ApplicantAttribute::SubscriptionMonths => {
                let account = &profile.subscription;
                if !account.has_account {
                    Number(0.0)
                } else {
                    let months = account.effective_tenure_months(view.as_of).ok_or(
                        AttributeError::MissingField {
                            field: "subscription.tenure_months",
                        },
                    )?;
                    Number(months as f64)
                }
            }
            ApplicantAttribute::DepositCount => {
                let account = &profile.subscription;
                if !account.has_account {
                    Number(0.0)
                } else {
                    let count = account.deposit_count.ok_or(AttributeError::MissingField {
                        field: "subscription.deposit_count",
                    })?;
                    Number(count as f64)
                }
            }
            ApplicantAttribute::DepositAmount => {
                let account = &profile.subscription;
                if !account.has_account {
                    Number(0.0)
                } else {
                    let amount = account.deposit_amount.ok_or(AttributeError::MissingField {
                        field: "subscription.deposit_amount",
                    })?;
                    Number(amount as f64)
                }
            }
            ApplicantAttribute::AccountType => {
                let account_type =
                    profile
                        .subscription
                        .account_type
                        .ok_or(AttributeError::MissingField {
                            field: "subscription.account_type",
                        })?;
                Text(account_type.label().to_string())
            }
            ApplicantAttribute::HouseholdIncome => Number(profile.income.household_monthly as f64),
            ApplicantAttribute::IncomePercent => {
                let baseline = view
                    .income_baseline
                    .filter(|baseline| *baseline > 0)
                    .ok_or(AttributeError::MissingIncomeBaseline)?;
                Number(profile.income.household_monthly as f64 * 100.0 / baseline as f64)
            }
            ApplicantAttribute::DualIncome => Boolean(profile.income.is_dual_income),
            ApplicantAttribute::TotalAssets => Number(profile.assets.total as f64),
            ApplicantAttribute::FirstTimeHomebuyer => {
                Boolean(profile.personal.is_first_time_homebuyer)
            }
            ApplicantAttribute::HasSpecialStatus => Boolean(profile.special.has_special_status),
            ApplicantAttribute::InstitutionalRecommendation => {
                Boolean(profile.special.has_institutional_recommendation)
            }
            ApplicantAttribute::HasDisability => Boolean(profile.special.has_disability),
            ApplicantAttribute::NorthKoreanDefector => {
                Boolean(profile.special.is_north_korean_defector)
            }
            ApplicantAttribute::RewinningRestrictionEnd => {
                Date(profile.history.rewinning_restriction_end.ok_or(
                    AttributeError::MissingField {
                        field: "history.rewinning_restriction_end",
                    },
                )?)
            }
            ApplicantAttribute::CriminalRecord => Boolean(profile.restrictions.has_criminal_record),
            ApplicantAttribute::OverseasResidence => {
                Boolean(profile.restrictions.has_overseas_residence)
            }
        };

        Ok(value)
    }
}

/// Category code to applicant attribute mapping, passed in with the matching policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap {
    entries: BTreeMap<String, ApplicantAttribute>,
}

impl AttributeMap {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The category catalogue used by the subscription programs.
    pub fn standard() -> Self {
        let entries = [
            ("AGE", ApplicantAttribute::Age),
            ("MARRIAGE", ApplicantAttribute::IsMarried),
            ("MARRIAGE_PERIOD", ApplicantAttribute::MarriageYears),
            ("MARRIAGE_DATE", ApplicantAttribute::MarriageDate),
            ("CHILDREN", ApplicantAttribute::MinorChildren),
            ("CHILDREN_AGE", ApplicantAttribute::YoungestChildAge),
            ("HOUSING_OWNERSHIP", ApplicantAttribute::HasOwnedHouse),
            ("HOUSING_COUNT", ApplicantAttribute::CurrentHouseCount),
            ("RESIDENCE_PERIOD", ApplicantAttribute::ResidenceMonths),
            ("SUBSCRIPTION_PERIOD", ApplicantAttribute::SubscriptionMonths),
            ("DEPOSIT_COUNT", ApplicantAttribute::DepositCount),
            ("INCOME", ApplicantAttribute::IncomePercent),
            ("ASSETS", ApplicantAttribute::TotalAssets),
            ("SPECIAL_STATUS", ApplicantAttribute::HasSpecialStatus),
            ("ELDERLY_SUPPORT", ApplicantAttribute::ElderlySupportYears),
            ("NEWBORN", ApplicantAttribute::HasNewborn),
            ("NEWBORN_BIRTH_DATE", ApplicantAttribute::NewbornBirthDate),
            ("REWINNING_RESTRICTION_END", ApplicantAttribute::RewinningRestrictionEnd),
            ("FIRST_TIME_HOMEBUYER", ApplicantAttribute::FirstTimeHomebuyer),
            ("INSTITUTIONAL_RECOMMENDATION", ApplicantAttribute::InstitutionalRecommendation),
            ("DISABILITY", ApplicantAttribute::HasDisability),
            ("NORTH_KOREAN_DEFECTOR", ApplicantAttribute::NorthKoreanDefector),
            ("DUAL_INCOME", ApplicantAttribute::DualIncome),
            ("CRIMINAL_RECORD", ApplicantAttribute::CriminalRecord),
            ("OVERSEAS_RESIDENCE", ApplicantAttribute::OverseasResidence),
            ("ACCOUNT_TYPE", ApplicantAttribute::AccountType),
        ]
        .into_iter()
        .map(|(code, attribute)| (code.to_string(), attribute))
        .collect();

        Self { entries }
    }

    pub fn insert(
        &mut self,
        code: impl Into<String>,
        attribute: ApplicantAttribute,
    ) -> Option<ApplicantAttribute> {
        self.entries.insert(code.into(), attribute)
    }

    pub fn resolve(&self, code: &str) -> Option<ApplicantAttribute> {
        self.entries.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AttributeMap {
    fn default() -> Self {
        Self::standard()
    }
}
