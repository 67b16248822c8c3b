use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::matching::domain::{AccountType, SubscriptionAccount};

/// Minimum account standing for a supply type; absent thresholds are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionRequirement {
    pub min_tenure_months: Option<u32>,
    pub min_deposit_count: Option<u32>,
    pub min_deposit_amount: Option<u64>,
    /// An empty list is treated the same as no restriction.
    pub allowed_account_types: Option<Vec<AccountType>>,
    /// Compared verbatim (whitespace-trimmed) against the account's own limit.
    pub housing_type_limit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionCheck {
    pub passed: bool,
    pub satisfied: Vec<String>,
    pub failures: Vec<String>,
}

pub fn check_subscription(
    account: &SubscriptionAccount,
    requirement: &SubscriptionRequirement,
    as_of: NaiveDate,
) -> SubscriptionCheck {
    if !account.has_account {
        return SubscriptionCheck {
            passed: false,
            satisfied: Vec::new(),
            failures: vec!["no subscription account".to_string()],
        };
    }

    let mut check = SubscriptionCheck::default();

    if let Some(required) = requirement.min_tenure_months {
        match account.effective_tenure_months(as_of) {
            Some(months) if months >= required => check.satisfied.push(format!(
                "subscription tenure {months} months meets {required}"
            )),
            Some(months) => check.failures.push(format!(
                "subscription tenure {months} months below required {required}"
            )),
            None => check
                .failures
                .push("subscription tenure not recorded".to_string()),
        }
    }

    if let Some(required) = requirement.min_deposit_count {
        match account.deposit_count {
            Some(count) if count >= required => check
                .satisfied
                .push(format!("deposit count {count} meets {required}")),
            Some(count) => check
                .failures
                .push(format!("deposit count {count} below required {required}")),
            None => check.failures.push("deposit count not recorded".to_string()),
        }
    }

    if let Some(required) = requirement.min_deposit_amount {
        match account.deposit_amount {
            Some(amount) if amount >= required => check
                .satisfied
                .push(format!("deposit amount {amount} meets {required}")),
            Some(amount) => check
                .failures
                .push(format!("deposit amount {amount} below required {required}")),
            None => check
                .failures
                .push("deposit amount not recorded".to_string()),
        }
    }

    if let Some(allowed) = requirement
        .allowed_account_types
        .as_ref()
        .filter(|allowed| !allowed.is_empty())
    {
        match account.account_type {
            Some(account_type) if allowed.contains(&account_type) => check
                .satisfied
                .push(format!("account type {} accepted", account_type.label())),
            Some(account_type) => check.failures.push(format!(
                "account type {} not accepted for this supply",
                account_type.label()
            )),
            None => check.failures.push("account type not recorded".to_string()),
        }
    }

    if let Some(required) = requirement
        .housing_type_limit
        .as_deref()
        .map(str::trim)
        .filter(|limit| !limit.is_empty())
    {
        match account.housing_type_limit.as_deref().map(str::trim) {
            Some(limit) if limit == required => check
                .satisfied
                .push(format!("housing type limit {limit} matches")),
            Some(limit) => check.failures.push(format!(
                "housing type limit {limit} does not match required {required}"
            )),
            None => check
                .failures
                .push(format!("housing type limit not recorded, {required} required")),
        }
    }

    check.passed = check.failures.is_empty();
    check
}
