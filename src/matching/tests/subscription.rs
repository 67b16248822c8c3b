use super::common::*;
use crate::matching::domain::AccountType;
use crate::matching::evaluation::{check_subscription, SubscriptionRequirement};

#[test]
fn empty_requirement_only_needs_an_account() {
    let profile = profile();
    let check = check_subscription(
        &profile.subscription,
        &SubscriptionRequirement::default(),
        as_of(),
    );

    assert!(check.passed);
    assert!(check.failures.is_empty());
}

#[test]
fn missing_account_fails() {
    let mut profile = profile();
    profile.subscription.has_account = false;

    let check = check_subscription(
        &profile.subscription,
        &SubscriptionRequirement::default(),
        as_of(),
    );

    assert!(!check.passed);
    assert_eq!(check.failures, vec!["no subscription account".to_string()]);
}

#[test]
fn thresholds_report_each_shortfall() {
    let profile = profile();
    let requirement = SubscriptionRequirement {
        min_tenure_months: Some(24),
        min_deposit_count: Some(36),
        min_deposit_amount: Some(6_000_000),
        ..SubscriptionRequirement::default()
    };

    let check = check_subscription(&profile.subscription, &requirement, as_of());

    assert!(!check.passed);
    assert_eq!(check.satisfied.len(), 1);
    assert_eq!(check.failures.len(), 2);
    assert!(check.failures[0].contains("deposit count 30"));
    assert!(check.failures[1].contains("deposit amount 3000000"));
}

#[test]
fn tenure_derives_from_open_date_when_not_recorded() {
    let mut profile = profile();
    profile.subscription.tenure_months = None;
    let requirement = SubscriptionRequirement {
        min_tenure_months: Some(30),
        ..SubscriptionRequirement::default()
    };

    let check = check_subscription(&profile.subscription, &requirement, as_of());

    assert!(check.passed, "{:?}", check.failures);

    profile.subscription.opened_on = None;
    let check = check_subscription(&profile.subscription, &requirement, as_of());
    assert!(!check.passed);
    assert!(check.failures[0].contains("not recorded"));
}

#[test]
fn allowed_account_types_are_enforced() {
    let profile = profile();
    let requirement = SubscriptionRequirement {
        allowed_account_types: Some(vec![AccountType::YouthHousing]),
        ..SubscriptionRequirement::default()
    };

    let check = check_subscription(&profile.subscription, &requirement, as_of());

    assert!(!check.passed);
    assert!(check.failures[0].contains("HOUSING_SUBSCRIPTION"));
}

#[test]
fn empty_allowed_list_is_unconstrained() {
    let profile = profile();
    let requirement = SubscriptionRequirement {
        allowed_account_types: Some(Vec::new()),
        ..SubscriptionRequirement::default()
    };

    assert!(check_subscription(&profile.subscription, &requirement, as_of()).passed);
}

#[test]
fn housing_type_limit_must_match_account() {
    let mut profile = profile();
    let requirement = SubscriptionRequirement {
        housing_type_limit: Some("85㎡ 초과".to_string()),
        ..SubscriptionRequirement::default()
    };

    let check = check_subscription(&profile.subscription, &requirement, as_of());

    assert!(!check.passed);
    assert_eq!(
        check.failures,
        vec!["housing type limit 85㎡ 이하 does not match required 85㎡ 초과".to_string()]
    );

    profile.subscription.housing_type_limit = Some(" 85㎡ 초과 ".to_string());
    let check = check_subscription(&profile.subscription, &requirement, as_of());
    assert!(check.passed, "{:?}", check.failures);
    assert_eq!(check.satisfied.len(), 1);
}

#[test]
fn housing_type_limit_without_account_record_fails() {
    let mut profile = profile();
    profile.subscription.housing_type_limit = None;
    let requirement = SubscriptionRequirement {
        housing_type_limit: Some("85㎡ 이하".to_string()),
        ..SubscriptionRequirement::default()
    };

    let check = check_subscription(&profile.subscription, &requirement, as_of());

    assert!(!check.passed);
    assert!(check.failures[0].starts_with("housing type limit not recorded"));
}
