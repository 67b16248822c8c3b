use super::common::*;
use crate::matching::evaluation::{
    check_income, scan_income_tiers, IncomeBucket, IncomeInput, IncomeLookupError, IncomeStandard,
    IncomeTier, NationalIncomeStandard, NationalIncomeTable,
};

fn input(monthly_income: u64) -> IncomeInput {
    IncomeInput {
        monthly_income,
        household_size: 4,
        year: 2024,
        is_dual_income: false,
    }
}

#[test]
fn income_within_priority_ceiling_passes() {
    let check = check_income(
        &input(9_000_000),
        &tier(IncomeTier::Priority, 130, 70),
        &income_table(),
    )
    .expect("ceiling resolves");

    assert!(check.passed);
    assert_eq!(check.ceiling, 11_545_000);
    assert_eq!(check.ratio, 70);
    assert_eq!(check.tier, IncomeTier::Priority);
}

#[test]
fn income_equal_to_ceiling_passes() {
    let check = check_income(
        &input(11_545_000),
        &tier(IncomeTier::Priority, 130, 70),
        &income_table(),
    )
    .expect("ceiling resolves");

    assert!(check.passed);
}

#[test]
fn scan_falls_through_to_general_tier() {
    let tiers = vec![
        tier(IncomeTier::Priority, 130, 70),
        tier(IncomeTier::General, 140, 30),
    ];

    let verdict = scan_income_tiers(&input(12_000_000), &tiers, &income_table());

    let matched = verdict.matched.expect("general tier clears");
    assert_eq!(matched.tier, IncomeTier::General);
    assert_eq!(matched.ceiling, 12_433_000);
    assert_eq!(matched.ratio, 30);
    assert_eq!(verdict.failures.len(), 1);
    assert!(verdict.failures[0].contains("PRIORITY"));
}

#[test]
fn scan_stops_at_first_cleared_tier() {
    let tiers = vec![
        tier(IncomeTier::Priority, 130, 70),
        tier(IncomeTier::General, 140, 30),
    ];

    let verdict = scan_income_tiers(&input(9_000_000), &tiers, &income_table());

    assert_eq!(
        verdict.matched.map(|check| check.tier),
        Some(IncomeTier::Priority)
    );
    assert!(verdict.failures.is_empty());
}

#[test]
fn scan_with_no_tiers_clears_nothing() {
    let verdict = scan_income_tiers(&input(1), &[], &income_table());

    assert!(verdict.matched.is_none());
    assert_eq!(verdict.failures.len(), 1);
}

#[test]
fn dual_income_uses_its_own_percentage() {
    let standard = IncomeStandard {
        tier: IncomeTier::Priority,
        percentage: 100,
        dual_income_percentage: Some(120),
        ratio: 70,
    };
    let mut dual = input(10_000_000);

    let single = check_income(&dual, &standard, &income_table()).expect("ceiling resolves");
    assert!(!single.passed);

    dual.is_dual_income = true;
    let check = check_income(&dual, &standard, &income_table()).expect("ceiling resolves");
    assert!(check.passed);
    assert_eq!(check.percentage, 120);
    assert_eq!(check.ceiling, 10_657_000);
}

#[test]
fn percentage_without_bucket_is_rejected() {
    let error = check_income(
        &input(1),
        &tier(IncomeTier::Priority, 150, 70),
        &income_table(),
    )
    .expect_err("no 150% bucket");

    assert_eq!(
        error,
        IncomeLookupError::UnsupportedPercentage { percentage: 150 }
    );
}

#[test]
fn missing_year_row_is_a_lookup_miss() {
    let mut future = input(1);
    future.year = 2031;

    let error = check_income(
        &future,
        &tier(IncomeTier::General, 100, 100),
        &income_table(),
    )
    .expect_err("no 2031 table");

    assert_eq!(
        error,
        IncomeLookupError::MissingStandard {
            year: 2031,
            household_size: 4
        }
    );
}

#[test]
fn lookup_is_exact_on_household_size() {
    let mut large = input(1);
    large.household_size = 9;

    let verdict = scan_income_tiers(
        &large,
        &[tier(IncomeTier::General, 100, 100)],
        &income_table(),
    );

    assert!(verdict.matched.is_none());
    assert!(verdict.failures[0].contains("not evaluable"));
}

#[test]
fn unpublished_bucket_is_reported() {
    let table = NationalIncomeTable::from(vec![NationalIncomeStandard {
        year: 2024,
        household_size: 4,
        standard_100: 8_881_000,
        standard_120: None,
        standard_130: None,
        standard_140: None,
        standard_200: None,
    }]);

    assert_eq!(table.ceiling(2024, 4, 100), Ok(8_881_000));
    assert_eq!(
        table.ceiling(2024, 4, 130),
        Err(IncomeLookupError::BucketUnavailable {
            year: 2024,
            household_size: 4,
            percentage: 130
        })
    );
}

#[test]
fn standard_table_covers_one_to_eight_person_households() {
    let table = income_table();

    assert_eq!(table.len(), 8);
    for size in 1..=8 {
        let row = table.lookup(2024, size).expect("row present");
        assert!(row.ceiling(IncomeBucket::Standard200) > row.ceiling(IncomeBucket::Standard100));
    }
}

#[test]
fn table_round_trips_through_json_rows() {
    let table = income_table();
    let encoded = serde_json::to_string(&table).expect("serializes");
    let decoded: NationalIncomeTable = serde_json::from_str(&encoded).expect("deserializes");

    assert_eq!(decoded, table);
}
