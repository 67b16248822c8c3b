use serde::{Deserialize, Serialize};

use super::config::MatchingConfig;
use super::domain::{Announcement, ApplicantProfile, SupplyType, SupplyTypeId};
use super::evaluation::{
    check_assets, check_subscription, evaluate_condition, scan_income_tiers, ConditionClass,
    IncomeInput, IncomeTier, NationalIncomeTable, ProfileView,
};
use super::policy::{estimate_competition, recommend, CompetitionLevel, RecommendationLevel};
use super::priority::{calculate_priority_score, PriorityScore};
use super::regional::RegionalOutcome;

/// Verdict for one applicant against one supply type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyTypeQualification {
    pub supply_type_id: SupplyTypeId,
    pub subcategory_code: String,
    pub subcategory_name: String,
    pub is_eligible: bool,
    pub eligibility_reasons: Vec<String>,
    /// Blocking reasons only.
    pub ineligibility_reasons: Vec<String>,
    /// Unmet PREFERRED/BONUS conditions.
    pub advisories: Vec<String>,
    pub estimated_competition: CompetitionLevel,
    pub matched_income_tier: Option<IncomeTier>,
    pub quota_ratio: f64,
    pub bonus_points: i32,
    pub priority_score: Option<PriorityScore>,
    pub priority_rank: Option<u32>,
    pub recommendation_level: RecommendationLevel,
}

/// Everything a single supply-type evaluation reads; all borrowed, nothing mutated.
#[derive(Debug, Clone, Copy)]
pub(crate) struct QualificationContext<'a> {
    pub profile: &'a ApplicantProfile,
    pub announcement: &'a Announcement,
    pub regional: &'a RegionalOutcome,
    pub income_table: &'a NationalIncomeTable,
    pub config: &'a MatchingConfig,
}

#[derive(Default)]
struct Ledger {
    eligibility: Vec<String>,
    ineligibility: Vec<String>,
    advisories: Vec<String>,
    bonus_points: i32,
    unmet_preferred: bool,
}

pub(crate) fn qualify(ctx: &QualificationContext<'_>, supply: &SupplyType) -> SupplyTypeQualification {
    let QualificationContext {
        profile,
        announcement,
        regional,
        income_table,
        config,
    } = *ctx;
    let subcategory = &supply.subcategory;
    let policy = &config.policy;
    let mut ledger = Ledger::default();

    if !supply.is_available {
        ledger
            .ineligibility
            .push(format!("supply type {} is not open for applications", supply.id.0));
    }

    if policy.enforce_rewinning_restriction {
        if let Some(end) = profile
            .history
            .rewinning_restriction_end
            .filter(|end| *end > config.as_of)
        {
            ledger
                .ineligibility
                .push(format!("re-winning restriction in effect until {end}"));
        }
    }

    let year = config.income_year_for(announcement);
    let household_size = profile.personal.household_size;
    let view = ProfileView {
        profile,
        as_of: config.as_of,
        income_baseline: income_table.ceiling(year, household_size, 100).ok(),
    };

    for condition in &supply.conditions {
        let outcome = evaluate_condition(condition, &view, &policy.attributes);
        match (outcome.class, outcome.is_satisfied()) {
            (ConditionClass::Required, true) => ledger.eligibility.push(outcome.reason),
            (ConditionClass::Required, false) => ledger.ineligibility.push(outcome.reason),
            (_, true) => {
                ledger.bonus_points = ledger.bonus_points.saturating_add(outcome.score_points);
                ledger.eligibility.push(outcome.reason);
            }
            (class, false) => {
                ledger.unmet_preferred |= class == ConditionClass::Preferred;
                ledger.advisories.push(outcome.reason);
            }
        }
    }

    let mut matched_income = None;
    if subcategory.requires_income_standard {
        let input = IncomeInput {
            monthly_income: profile.income.household_monthly,
            household_size,
            year,
            is_dual_income: profile.income.is_dual_income,
        };
        let verdict = scan_income_tiers(&input, &supply.income_standards, income_table);
        match verdict.matched {
            Some(check) => {
                ledger.eligibility.push(check.reason());
                matched_income = Some(check);
            }
            None => ledger.ineligibility.extend(verdict.failures),
        }
    }

    if subcategory.requires_asset_standard && !supply.asset_standards.is_empty() {
        let violations: Vec<String> = supply
            .asset_standards
            .iter()
            .flat_map(|standard| check_assets(&profile.assets, standard).reasons())
            .collect();
        if violations.is_empty() {
            ledger
                .eligibility
                .push("assets within every declared ceiling".to_string());
        } else {
            ledger.ineligibility.extend(violations);
        }
    }

    if subcategory.requires_subscription {
        match &supply.subscription_requirement {
            Some(requirement) => {
                let check = check_subscription(&profile.subscription, requirement, config.as_of);
                ledger.eligibility.extend(check.satisfied);
                ledger.ineligibility.extend(check.failures);
            }
            None if profile.subscription.has_account => ledger
                .eligibility
                .push("subscription account held".to_string()),
            None => ledger
                .ineligibility
                .push("no subscription account".to_string()),
        }
    }

    let quota_ratio = matched_income
        .as_ref()
        .map(|check| f64::from(check.ratio))
        .unwrap_or_else(|| unit_share(supply, announcement));
    let estimated_competition = estimate_competition(quota_ratio, policy);
    let is_eligible = ledger.ineligibility.is_empty();

    let priority_score = subcategory.requires_priority_ranking.then(|| {
        calculate_priority_score(profile, regional.tier, config.as_of, &policy.priority)
    });
    let recommendation_level = recommend(is_eligible, estimated_competition, ledger.unmet_preferred);

    tracing::debug!(
        supply_type = %supply.id.0,
        subcategory = %subcategory.code,
        is_eligible,
        competition = %estimated_competition,
        recommendation = %recommendation_level,
        "supply type evaluated"
    );

    SupplyTypeQualification {
        supply_type_id: supply.id.clone(),
        subcategory_code: subcategory.code.clone(),
        subcategory_name: subcategory.name.clone(),
        is_eligible,
        eligibility_reasons: ledger.eligibility,
        ineligibility_reasons: ledger.ineligibility,
        advisories: ledger.advisories,
        estimated_competition,
        matched_income_tier: matched_income.map(|check| check.tier),
        quota_ratio,
        bonus_points: ledger.bonus_points,
        priority_rank: priority_score.map(|score| score.total()),
        priority_score,
        recommendation_level,
    }
}

/// Percentage of the announcement's units offered through this supply type.
fn unit_share(supply: &SupplyType, announcement: &Announcement) -> f64 {
    let total = if announcement.total_units > 0 {
        announcement.total_units
    } else {
        announcement
            .supply_types
            .iter()
            .map(|supply| supply.units)
            .fold(0, u32::saturating_add)
    };

    if total == 0 {
        0.0
    } else {
        f64::from(supply.units) * 100.0 / f64::from(total)
    }
}
