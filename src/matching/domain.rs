use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::evaluation::{AssetStandard, IncomeStandard, SubscriptionRequirement, SupplyTypeCondition};
use super::regional::RegionalPriority;

/// Identifier wrapper for an applicant snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

/// Identifier wrapper for a housing announcement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnnouncementId(pub String);

/// Identifier wrapper for one allocation track inside an announcement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SupplyTypeId(pub String);

/// Immutable applicant snapshot supplied by the caller for one matching run.
///
/// Monetary amounts share whatever unit the national income table uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub applicant_id: ApplicantId,
    pub personal: PersonalInfo,
    pub children: ChildrenInfo,
    pub elderly_support: ElderlySupport,
    pub residence: Residence,
    pub housing: HousingOwnership,
    pub subscription: SubscriptionAccount,
    pub income: IncomeProfile,
    pub assets: AssetProfile,
    pub special: SpecialQualifications,
    pub history: WinHistory,
    pub restrictions: Restrictions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub age: u8,
    pub is_married: bool,
    pub marriage_date: Option<NaiveDate>,
    pub is_first_time_homebuyer: bool,
    pub household_size: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildrenInfo {
    pub count: u8,
    pub minor_count: u8,
    pub has_newborn: bool,
    pub newborn_birth_date: Option<NaiveDate>,
    pub youngest_child_age: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElderlySupport {
    pub is_supporting: bool,
    pub support_months: Option<u32>,
}

/// Residence of the applicant, expressed as "<province> <city/county> ..." text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Residence {
    pub current_address: String,
    pub residence_months: u32,
    pub has_local_connection: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingOwnership {
    pub has_owned_house: bool,
    pub current_house_count: u8,
    pub previous_house_count: u8,
    pub last_sale_date: Option<NaiveDate>,
    pub house_value: Option<u64>,
}

/// Subscription savings account kinds recognised by the programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    HousingSubscription,
    YouthHousing,
    WorkerHousing,
}

impl AccountType {
    pub const fn label(self) -> &'static str {
        match self {
            AccountType::HousingSubscription => "HOUSING_SUBSCRIPTION",
            AccountType::YouthHousing => "YOUTH_HOUSING",
            AccountType::WorkerHousing => "WORKER_HOUSING",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionAccount {
    pub has_account: bool,
    pub account_type: Option<AccountType>,
    pub opened_on: Option<NaiveDate>,
    pub tenure_months: Option<u32>,
    pub deposit_count: Option<u32>,
    pub deposit_amount: Option<u64>,
    /// Housing type the account may apply for, e.g. "85㎡ 이하".
    pub housing_type_limit: Option<String>,
}

impl SubscriptionAccount {
    /// Tenure in months, derived from the open date when not recorded directly.
    pub fn effective_tenure_months(&self, as_of: NaiveDate) -> Option<u32> {
        self.tenure_months
            .or_else(|| self.opened_on.map(|opened| months_between(opened, as_of)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentType {
    Employee,
    SelfEmployed,
    Unemployed,
}

/// Monthly and annual income figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeProfile {
    pub applicant_monthly: u64,
    pub applicant_employment: Option<EmploymentType>,
    pub spouse_monthly: u64,
    pub spouse_employment: Option<EmploymentType>,
    pub household_monthly: u64,
    pub annual: u64,
    pub is_dual_income: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetProfile {
    pub real_estate: u64,
    pub financial: u64,
    pub vehicle: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialQualifications {
    pub has_institutional_recommendation: bool,
    pub institution_type: Option<String>,
    pub has_special_status: bool,
    pub special_status_type: Option<String>,
    pub has_disability: bool,
    pub is_north_korean_defector: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinHistory {
    pub has_won_before: bool,
    pub last_win_date: Option<NaiveDate>,
    pub rewinning_restriction_end: Option<NaiveDate>,
    pub has_applied_recently: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restrictions {
    pub has_overseas_residence: bool,
    pub overseas_months: u32,
    pub has_criminal_record: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HousingType {
    PublicSale,
    PrivateSale,
    PublicRental,
}

/// Read-only announcement graph owned by an external collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub title: String,
    pub announcement_date: Option<NaiveDate>,
    pub application_start_date: Option<NaiveDate>,
    pub application_end_date: Option<NaiveDate>,
    pub winner_announcement_date: Option<NaiveDate>,
    pub contract_date: Option<NaiveDate>,
    pub location: String,
    pub housing_type: HousingType,
    pub developer: Option<String>,
    pub total_units: u32,
    pub regional_priority: Option<RegionalPriority>,
    pub supply_types: Vec<SupplyType>,
}

impl Announcement {
    pub fn supply_type(&self, id: &SupplyTypeId) -> Option<&SupplyType> {
        self.supply_types.iter().find(|supply| &supply.id == id)
    }
}

/// One allocation track with its attached rule sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyType {
    pub id: SupplyTypeId,
    pub subcategory: Subcategory,
    pub units: u32,
    #[serde(default = "available_by_default")]
    pub is_available: bool,
    #[serde(default)]
    pub conditions: Vec<SupplyTypeCondition>,
    #[serde(default)]
    pub income_standards: Vec<IncomeStandard>,
    #[serde(default)]
    pub asset_standards: Vec<AssetStandard>,
    #[serde(default)]
    pub subscription_requirement: Option<SubscriptionRequirement>,
}

fn available_by_default() -> bool {
    true
}

/// Classification of a supply type and the rule families it activates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub code: String,
    pub name: String,
    pub is_special_supply: bool,
    pub requires_income_standard: bool,
    pub requires_asset_standard: bool,
    pub requires_subscription: bool,
    pub requires_priority_ranking: bool,
}

/// The allocation tracks offered by the subscription programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupplyKind {
    MultiChild,
    Newlywed,
    FirstTime,
    ElderlyParent,
    Newborn,
    Institutional,
    PreApplication,
    General,
}

impl SupplyKind {
    pub const fn code(self) -> &'static str {
        match self {
            SupplyKind::MultiChild => "MULTI_CHILD",
            SupplyKind::Newlywed => "NEWLYWED",
            SupplyKind::FirstTime => "FIRST_TIME",
            SupplyKind::ElderlyParent => "ELDERLY_PARENT",
            SupplyKind::Newborn => "NEWBORN",
            SupplyKind::Institutional => "INSTITUTIONAL",
            SupplyKind::PreApplication => "PRE_APPLICATION",
            SupplyKind::General => "GENERAL",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SupplyKind::MultiChild => "multi-child household special supply",
            SupplyKind::Newlywed => "newlywed special supply",
            SupplyKind::FirstTime => "first-time homebuyer special supply",
            SupplyKind::ElderlyParent => "elderly parent support special supply",
            SupplyKind::Newborn => "newborn special supply",
            SupplyKind::Institutional => "institutional recommendation special supply",
            SupplyKind::PreApplication => "pre-application winner supply",
            SupplyKind::General => "general supply",
        }
    }

    /// Rule flags the programs attach to each track.
    pub fn subcategory(self) -> Subcategory {
        let (special, income, asset, subscription, priority) = match self {
            SupplyKind::MultiChild => (true, true, true, true, true),
            SupplyKind::Newlywed => (true, true, true, true, false),
            SupplyKind::FirstTime => (true, true, true, true, false),
            SupplyKind::ElderlyParent => (true, true, true, true, true),
            SupplyKind::Newborn => (true, true, true, true, false),
            SupplyKind::Institutional => (true, false, false, true, false),
            SupplyKind::PreApplication => (true, false, false, false, false),
            SupplyKind::General => (false, false, false, true, true),
        };

        Subcategory {
            code: self.code().to_string(),
            name: self.label().to_string(),
            is_special_supply: special,
            requires_income_standard: income,
            requires_asset_standard: asset,
            requires_subscription: subscription,
            requires_priority_ranking: priority,
        }
    }
}

/// Whole calendar months elapsed from `from` to `to`; zero when `to` precedes `from`.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    if to <= from {
        return 0;
    }

    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0) as u32
}
