use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::config::MatchingConfig;
use super::domain::{Announcement, AnnouncementId, ApplicantId, ApplicantProfile, SupplyTypeId};
use super::evaluation::NationalIncomeTable;
use super::policy::RecommendationLevel;
use super::qualification::{qualify, QualificationContext, SupplyTypeQualification};
use super::ranking::TopK;
use super::regional::{resolve_regional_priority, RegionalOutcome};
use super::statistics::MatchingStatistics;

/// Outcome for one (applicant, announcement) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingResult {
    pub applicant_id: ApplicantId,
    pub announcement_id: AnnouncementId,
    pub title: String,
    pub location: String,
    pub application_start_date: Option<NaiveDate>,
    pub application_end_date: Option<NaiveDate>,
    pub overall_recommendation: RecommendationLevel,
    pub matching_score: f64,
    pub regional: RegionalOutcome,
    pub qualifications: Vec<SupplyTypeQualification>,
    pub summary: String,
    pub next_steps: Vec<String>,
}

impl MatchingResult {
    pub fn is_eligible(&self) -> bool {
        self.overall_recommendation != RecommendationLevel::NotEligible
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("announcement {announcement} has no supply type {supply_type}")]
    UnknownSupplyType {
        announcement: String,
        supply_type: String,
    },
}

/// Stateless matcher over borrowed reference data.
pub struct MatchingEngine<'a> {
    income_table: &'a NationalIncomeTable,
    config: &'a MatchingConfig,
}

impl<'a> MatchingEngine<'a> {
    pub fn new(income_table: &'a NationalIncomeTable, config: &'a MatchingConfig) -> Self {
        Self {
            income_table,
            config,
        }
    }

    pub fn match_one(
        &self,
        profile: &ApplicantProfile,
        announcement: &Announcement,
    ) -> MatchingResult {
        let regional = self.regional(profile, announcement);
        let ctx = self.context(profile, announcement, &regional);

        let qualifications: Vec<SupplyTypeQualification> = announcement
            .supply_types
            .iter()
            .map(|supply| qualify(&ctx, supply))
            .collect();

        let overall_recommendation = qualifications
            .iter()
            .map(|q| q.recommendation_level)
            .max()
            .unwrap_or(RecommendationLevel::NotEligible);
        let matching_score = self.score(&qualifications, &regional);
        let summary = summarize(announcement, &qualifications, overall_recommendation);
        let next_steps = next_steps(profile, announcement, &qualifications);

        MatchingResult {
            applicant_id: profile.applicant_id.clone(),
            announcement_id: announcement.id.clone(),
            title: announcement.title.clone(),
            location: announcement.location.clone(),
            application_start_date: announcement.application_start_date,
            application_end_date: announcement.application_end_date,
            overall_recommendation,
            matching_score,
            regional,
            qualifications,
            summary,
            next_steps,
        }
    }

    /// Rank announcements for one applicant, applying the configured filters and cap.
    pub fn match_many(
        &self,
        profile: &ApplicantProfile,
        announcements: &[Announcement],
    ) -> Vec<MatchingResult> {
        let filters = &self.config.filters;
        if filters.max_results == Some(0) {
            tracing::info!(checked = 0, returned = 0, "matching skipped for zero result cap");
            return Vec::new();
        }

        let top = announcements
            .par_iter()
            .map(|announcement| self.match_one(profile, announcement))
            .filter(|result| filters.admits(result.overall_recommendation))
            .fold(
                || TopK::new(filters.max_results),
                |mut top, result| {
                    top.push(result);
                    top
                },
            )
            .reduce(|| TopK::new(filters.max_results), TopK::merge);

        let results = top.into_sorted_vec();
        tracing::info!(
            applicant = %profile.applicant_id.0,
            checked = announcements.len(),
            returned = results.len(),
            "announcements matched"
        );
        results
    }

    pub fn match_many_with_statistics(
        &self,
        profile: &ApplicantProfile,
        announcements: &[Announcement],
    ) -> (Vec<MatchingResult>, MatchingStatistics) {
        let filters = &self.config.filters;
        let all: Vec<MatchingResult> = announcements
            .par_iter()
            .map(|announcement| self.match_one(profile, announcement))
            .collect();
        let statistics = MatchingStatistics::from_results(&all);

        let mut top = TopK::new(filters.max_results);
        for result in all {
            if filters.admits(result.overall_recommendation) {
                top.push(result);
            }
        }

        let results = top.into_sorted_vec();
        tracing::info!(
            applicant = %profile.applicant_id.0,
            checked = statistics.checked,
            eligible = statistics.eligible,
            returned = results.len(),
            "announcements matched with statistics"
        );
        (results, statistics)
    }

    pub fn check_supply_type(
        &self,
        profile: &ApplicantProfile,
        announcement: &Announcement,
        supply_type_id: &SupplyTypeId,
    ) -> Result<SupplyTypeQualification, MatchError> {
        let supply = announcement
            .supply_type(supply_type_id)
            .ok_or_else(|| MatchError::UnknownSupplyType {
                announcement: announcement.id.0.clone(),
                supply_type: supply_type_id.0.clone(),
            })?;

        let regional = self.regional(profile, announcement);
        let ctx = self.context(profile, announcement, &regional);
        Ok(qualify(&ctx, supply))
    }

    fn regional(&self, profile: &ApplicantProfile, announcement: &Announcement) -> RegionalOutcome {
        resolve_regional_priority(
            &profile.residence.current_address,
            &announcement.location,
            announcement.regional_priority.as_ref(),
        )
    }

    fn context<'c>(
        &'c self,
        profile: &'c ApplicantProfile,
        announcement: &'c Announcement,
        regional: &'c RegionalOutcome,
    ) -> QualificationContext<'c> {
        QualificationContext {
            profile,
            announcement,
            regional,
            income_table: self.income_table,
            config: self.config,
        }
    }

    /// Weighted sum of eligibility, competition, priority and regional components, 2 decimals.
    fn score(&self, qualifications: &[SupplyTypeQualification], regional: &RegionalOutcome) -> f64 {
        let eligible: Vec<&SupplyTypeQualification> =
            qualifications.iter().filter(|q| q.is_eligible).collect();
        if eligible.is_empty() {
            return 0.0;
        }

        let weights = &self.config.weights;
        let competition = eligible
            .iter()
            .map(|q| q.estimated_competition.inverse_score())
            .fold(0.0, f64::max);
        let max_priority = self.config.policy.priority.max_total();
        let priority = if max_priority == 0 {
            0.0
        } else {
            let best = eligible
                .iter()
                .filter_map(|q| q.priority_rank)
                .max()
                .unwrap_or(0);
            f64::from(best) / f64::from(max_priority)
        };
        let regional = if regional.is_eligible {
            (f64::from(regional.ratio) / 100.0).min(1.0)
        } else {
            0.0
        };

        let raw = weights.eligibility
            + weights.competition * competition
            + weights.priority * priority
            + weights.regional * regional;
        (raw * 100.0).round() / 100.0
    }
}

pub fn match_one(
    profile: &ApplicantProfile,
    announcement: &Announcement,
    income_table: &NationalIncomeTable,
    config: &MatchingConfig,
) -> MatchingResult {
    MatchingEngine::new(income_table, config).match_one(profile, announcement)
}

pub fn match_many(
    profile: &ApplicantProfile,
    announcements: &[Announcement],
    income_table: &NationalIncomeTable,
    config: &MatchingConfig,
) -> Vec<MatchingResult> {
    MatchingEngine::new(income_table, config).match_many(profile, announcements)
}

pub fn match_many_with_statistics(
    profile: &ApplicantProfile,
    announcements: &[Announcement],
    income_table: &NationalIncomeTable,
    config: &MatchingConfig,
) -> (Vec<MatchingResult>, MatchingStatistics) {
    MatchingEngine::new(income_table, config).match_many_with_statistics(profile, announcements)
}

pub fn check_supply_type(
    profile: &ApplicantProfile,
    announcement: &Announcement,
    supply_type_id: &SupplyTypeId,
    income_table: &NationalIncomeTable,
    config: &MatchingConfig,
) -> Result<SupplyTypeQualification, MatchError> {
    MatchingEngine::new(income_table, config).check_supply_type(
        profile,
        announcement,
        supply_type_id,
    )
}

fn summarize(
    announcement: &Announcement,
    qualifications: &[SupplyTypeQualification],
    overall: RecommendationLevel,
) -> String {
    let eligible: Vec<&str> = qualifications
        .iter()
        .filter(|q| q.is_eligible)
        .map(|q| q.subcategory_name.as_str())
        .collect();

    if eligible.is_empty() {
        format!(
            "Not eligible for any of {} supply type(s) in {}",
            qualifications.len(),
            announcement.title
        )
    } else {
        format!(
            "Eligible for {} of {} supply type(s) in {} ({}); overall recommendation {}",
            eligible.len(),
            qualifications.len(),
            announcement.title,
            eligible.join(", "),
            overall
        )
    }
}

fn next_steps(
    profile: &ApplicantProfile,
    announcement: &Announcement,
    qualifications: &[SupplyTypeQualification],
) -> Vec<String> {
    let mut steps = Vec::new();
    let eligible: Vec<&SupplyTypeQualification> =
        qualifications.iter().filter(|q| q.is_eligible).collect();

    if eligible.is_empty() {
        steps.push("Review the ineligibility reasons listed for each supply type".to_string());
        if !profile.subscription.has_account {
            steps.push("Open a housing subscription account to build tenure".to_string());
        }
        steps.push("Look for announcements whose supply types fit the household".to_string());
        return steps;
    }

    for q in &eligible {
        steps.push(format!(
            "Prepare supporting documents for {} ({})",
            q.subcategory_name, q.supply_type_id.0
        ));
    }
    if eligible.iter().any(|q| !q.advisories.is_empty()) {
        steps.push("Review advisories on unmet preferred conditions".to_string());
    }
    match (
        announcement.application_start_date,
        announcement.application_end_date,
    ) {
        (Some(start), Some(end)) => {
            steps.push(format!("Submit the application between {start} and {end}"))
        }
        (None, Some(end)) => steps.push(format!("Submit the application by {end}")),
        _ => steps.push("Check the announcement for the application period".to_string()),
    }

    steps
}
