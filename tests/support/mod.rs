#![allow(dead_code)]

use chrono::NaiveDate;
use housing_match::matching::evaluation::{
    ConditionClass, ConditionTemplate, ConditionValue, DataType, IncomeStandard, IncomeTier,
    SupplyTypeCondition,
};
use housing_match::matching::{
    Announcement, AnnouncementId, ApplicantProfile, HousingType, RegionalPriority, SupplyKind,
    SupplyType, SupplyTypeId,
};
use serde_json::json;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Household of four renting in Seoul, decoded from the JSON shape callers submit.
pub fn applicant(household_monthly: u64, has_owned_house: bool) -> ApplicantProfile {
    let house_count = u8::from(has_owned_house);
    let payload = json!({
        "applicant_id": "applicant-042",
        "personal": {
            "age": 34,
            "is_married": true,
            "marriage_date": "2020-10-10",
            "is_first_time_homebuyer": true,
            "household_size": 4
        },
        "children": {
            "count": 2,
            "minor_count": 2,
            "has_newborn": false,
            "newborn_birth_date": null,
            "youngest_child_age": 2
        },
        "elderly_support": { "is_supporting": false, "support_months": null },
        "residence": {
            "current_address": "서울특별시 송파구 잠실동 1",
            "residence_months": 26,
            "has_local_connection": false
        },
        "housing": {
            "has_owned_house": has_owned_house,
            "current_house_count": house_count,
            "previous_house_count": 0,
            "last_sale_date": null,
            "house_value": null
        },
        "subscription": {
            "has_account": true,
            "account_type": "HOUSING_SUBSCRIPTION",
            "opened_on": "2019-01-15",
            "tenure_months": null,
            "deposit_count": 60,
            "deposit_amount": 6000000
        },
        "income": {
            "applicant_monthly": household_monthly,
            "applicant_employment": "EMPLOYEE",
            "spouse_monthly": 0,
            "spouse_employment": null,
            "household_monthly": household_monthly,
            "annual": household_monthly * 12,
            "is_dual_income": false
        },
        "assets": {
            "real_estate": 0,
            "financial": 80000000,
            "vehicle": 15000000,
            "total": 95000000
        },
        "special": {
            "has_institutional_recommendation": false,
            "institution_type": null,
            "has_special_status": false,
            "special_status_type": null,
            "has_disability": false,
            "is_north_korean_defector": false
        },
        "history": {
            "has_won_before": false,
            "last_win_date": null,
            "rewinning_restriction_end": null,
            "has_applied_recently": false
        },
        "restrictions": {
            "has_overseas_residence": false,
            "overseas_months": 0,
            "has_criminal_record": false
        }
    });

    serde_json::from_value(payload).expect("profile payload decodes")
}

pub fn no_house_owner() -> SupplyTypeCondition {
    SupplyTypeCondition {
        template: ConditionTemplate {
            code: "NO_HOUSE_OWNER".to_string(),
            name: "Homeless household".to_string(),
            category_code: "HOUSING_OWNERSHIP".to_string(),
            data_type: DataType::Boolean,
            value: Some(ConditionValue::Boolean(false)),
            operator: "=".to_string(),
        },
        override_value: None,
        override_operator: None,
        class: ConditionClass::Required,
        score_points: 0,
    }
}

pub fn income_tier(tier: IncomeTier, percentage: u16, ratio: u16) -> IncomeStandard {
    IncomeStandard {
        tier,
        percentage,
        dual_income_percentage: None,
        ratio,
    }
}

pub fn supply(id: &str, kind: SupplyKind, units: u32) -> SupplyType {
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

pub fn announcement(id: &str, end: NaiveDate, supply_types: Vec<SupplyType>) -> Announcement {
    Announcement {
        id: AnnouncementId(id.to_string()),
        title: format!("{id} public sale"),
        announcement_date: Some(date(2024, 4, 1)),
        application_start_date: Some(date(2024, 4, 15)),
        application_end_date: Some(end),
        winner_announcement_date: None,
        contract_date: None,
        location: "서울특별시 강남구 역삼동 123-45".to_string(),
        housing_type: HousingType::PublicSale,
        developer: None,
        total_units: 100,
        regional_priority: Some(RegionalPriority {
            local_city_ratio: Some(50),
            local_province_ratio: Some(30),
            other_region_ratio: Some(20),
        }),
        supply_types,
    }
}
