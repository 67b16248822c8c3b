use chrono::NaiveDate;

use crate::matching::config::MatchingConfig;
use crate::matching::domain::{
    AccountType, Announcement, AnnouncementId, ApplicantId, ApplicantProfile, AssetProfile,
    ChildrenInfo, ElderlySupport, EmploymentType, HousingOwnership, HousingType, IncomeProfile,
    PersonalInfo, Residence, Restrictions, SpecialQualifications, SubscriptionAccount,
    SupplyKind, SupplyType, SupplyTypeId, WinHistory,
};
use crate::matching::evaluation::{
    ConditionClass, ConditionTemplate, ConditionValue, DataType, IncomeStandard, IncomeTier,
    NationalIncomeTable, ProfileView, SupplyTypeCondition,
};
use crate::matching::regional::RegionalPriority;

pub(super) const ANNOUNCEMENT_LOCATION: &str = "서울특별시 강남구 역삼동 123-45";

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn as_of() -> NaiveDate {
    date(2024, 6, 1)
}

pub(super) fn income_table() -> NationalIncomeTable {
    NationalIncomeTable::standard_2024()
}

pub(super) fn config() -> MatchingConfig {
    MatchingConfig::new(as_of())
}

/// Married household of four in Gangnam with two minor children and no home.
pub(super) fn profile() -> ApplicantProfile {
    ApplicantProfile {
        applicant_id: ApplicantId("applicant-001".to_string()),
        personal: PersonalInfo {
            age: 35,
            is_married: true,
            marriage_date: Some(date(2021, 3, 1)),
            is_first_time_homebuyer: true,
            household_size: 4,
        },
        children: ChildrenInfo {
            count: 2,
            minor_count: 2,
            has_newborn: false,
            newborn_birth_date: None,
            youngest_child_age: Some(3),
        },
        elderly_support: ElderlySupport {
            is_supporting: false,
            support_months: None,
        },
        residence: Residence {
            current_address: "서울특별시 강남구 대치동 77".to_string(),
            residence_months: 48,
            has_local_connection: true,
        },
        housing: HousingOwnership {
            has_owned_house: false,
            current_house_count: 0,
            previous_house_count: 0,
            last_sale_date: None,
            house_value: None,
        },
        subscription: SubscriptionAccount {
            has_account: true,
            account_type: Some(AccountType::HousingSubscription),
            opened_on: Some(date(2021, 12, 1)),
            tenure_months: Some(30),
            deposit_count: Some(30),
            deposit_amount: Some(3_000_000),
            housing_type_limit: Some("85㎡ 이하".to_string()),
        },
        income: IncomeProfile {
            applicant_monthly: 5_500_000,
            applicant_employment: Some(EmploymentType::Employee),
            spouse_monthly: 3_500_000,
            spouse_employment: Some(EmploymentType::Employee),
            household_monthly: 9_000_000,
            annual: 108_000_000,
            is_dual_income: false,
        },
        assets: AssetProfile {
            real_estate: 100_000_000,
            financial: 50_000_000,
            vehicle: 20_000_000,
            total: 170_000_000,
        },
        special: SpecialQualifications {
            has_institutional_recommendation: false,
            institution_type: None,
            has_special_status: false,
            special_status_type: None,
            has_disability: false,
            is_north_korean_defector: false,
        },
        history: WinHistory {
            has_won_before: false,
            last_win_date: None,
            rewinning_restriction_end: None,
            has_applied_recently: false,
        },
        restrictions: Restrictions {
            has_overseas_residence: false,
            overseas_months: 0,
            has_criminal_record: false,
        },
    }
}

pub(super) fn view(profile: &ApplicantProfile) -> ProfileView<'_> {
    ProfileView {
        profile,
        as_of: as_of(),
        income_baseline: Some(8_881_000),
    }
}

pub(super) fn template(
    code: &str,
    category: &str,
    data_type: DataType,
    value: ConditionValue,
    operator: &str,
) -> ConditionTemplate {
    ConditionTemplate {
        code: code.to_string(),
        name: code.to_ascii_lowercase().replace('_', " "),
        category_code: category.to_string(),
        data_type,
        value: Some(value),
        operator: operator.to_string(),
    }
}

pub(super) fn condition(template: ConditionTemplate, class: ConditionClass) -> SupplyTypeCondition {
    SupplyTypeCondition {
        template,
        override_value: None,
        override_operator: None,
        class,
        score_points: 0,
    }
}

pub(super) fn no_house_owner() -> SupplyTypeCondition {
    condition(
        template(
            "NO_HOUSE_OWNER",
            "HOUSING_OWNERSHIP",
            DataType::Boolean,
            ConditionValue::Boolean(false),
            "=",
        ),
        ConditionClass::Required,
    )
}

pub(super) fn tier(tier: IncomeTier, percentage: u16, ratio: u16) -> IncomeStandard {
    IncomeStandard {
        tier,
        percentage,
        dual_income_percentage: None,
        ratio,
    }
}

pub(super) fn supply_type(id: &str, kind: SupplyKind, units: u32) -> SupplyType {
    SupplyType {
        id: SupplyTypeId(id.to_string()),
        subcategory: kind.subcategory(),
        units,
        is_available: true,
        conditions: Vec::new(),
        income_standards: Vec::new(),
        asset_standards: Vec::new(),
        subscription_requirement: None,
    }
}

/// A supply type with every rule family switched off.
pub(super) fn bare_supply_type(id: &str, units: u32) -> SupplyType {
    supply_type(id, SupplyKind::PreApplication, units)
}

pub(super) fn announcement(id: &str, supply_types: Vec<SupplyType>) -> Announcement {
    Announcement {
        id: AnnouncementId(id.to_string()),
        title: format!("Announcement {id}"),
        announcement_date: Some(date(2024, 5, 1)),
        application_start_date: Some(date(2024, 6, 10)),
        application_end_date: Some(date(2024, 6, 20)),
        winner_announcement_date: Some(date(2024, 7, 15)),
        contract_date: None,
        location: ANNOUNCEMENT_LOCATION.to_string(),
        housing_type: HousingType::PublicSale,
        developer: Some("Korea Land & Housing".to_string()),
        total_units: 100,
        regional_priority: Some(RegionalPriority {
            local_city_ratio: Some(50),
            local_province_ratio: Some(30),
            other_region_ratio: Some(20),
        }),
        supply_types,
    }
}
