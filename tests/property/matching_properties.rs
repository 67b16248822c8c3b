#[path = "../support/mod.rs"]
mod support;

use housing_match::matching::evaluation::{
    check_assets, check_income, AssetCategory, AssetStandard, IncomeInput, IncomeTier,
};
use housing_match::matching::{
    match_many, AssetProfile, MatchingConfig, NationalIncomeTable, SupplyKind,
};
use proptest::prelude::*;
use support::*;

const PERCENTAGES: [u16; 5] = [100, 120, 130, 140, 200];

fn ceiling_strategy() -> impl Strategy<Value = Option<u64>> {
    prop::option::of(0u64..500_000_000)
}

proptest! {
    #[test]
    fn income_check_is_monotonic(
        low in 0u64..30_000_000,
        delta in 0u64..30_000_000,
        size in 1u8..=8,
        bucket in 0usize..PERCENTAGES.len(),
    ) {
        let table = NationalIncomeTable::standard_2024();
        let standard = income_tier(IncomeTier::General, PERCENTAGES[bucket], 50);
        let input = |monthly_income| IncomeInput {
            monthly_income,
            household_size: size,
            year: 2024,
            is_dual_income: false,
        };

        let lower = check_income(&input(low), &standard, &table).expect("bucket exists");
        let higher = check_income(&input(low + delta), &standard, &table).expect("bucket exists");

        prop_assert!(!higher.passed || lower.passed, "raising income turned a failing tier passing");
    }

    #[test]
    fn asset_reasons_track_present_ceilings(
        real_estate in 0u64..500_000_000,
        financial in 0u64..500_000_000,
        vehicle in 0u64..100_000_000,
        max_real_estate in ceiling_strategy(),
        max_vehicle in ceiling_strategy(),
        max_financial_assets in ceiling_strategy(),
        max_total_assets in ceiling_strategy(),
    ) {
        let assets = AssetProfile {
            real_estate,
            financial,
            vehicle,
            total: real_estate + financial + vehicle,
        };
        let standard = AssetStandard {
            max_real_estate,
            max_vehicle,
            max_financial_assets,
            max_total_assets,
        };

        let check = check_assets(&assets, &standard);

        for (category, value, ceiling) in [
            (AssetCategory::RealEstate, assets.real_estate, max_real_estate),
            (AssetCategory::Vehicle, assets.vehicle, max_vehicle),
            (AssetCategory::Financial, assets.financial, max_financial_assets),
            (AssetCategory::Total, assets.total, max_total_assets),
        ] {
            let reported = check.violations.iter().any(|violation| violation.category == category);
            match ceiling {
                Some(ceiling) => prop_assert_eq!(reported, value > ceiling),
                None => prop_assert!(!reported),
            }
        }
        prop_assert_eq!(check.passed(), check.violations.is_empty());
    }

    #[test]
    fn match_many_is_sorted_by_score_then_end_date(
        specs in prop::collection::vec((1u32..100, 1u32..28, any::<bool>()), 1..12),
    ) {
        let announcements: Vec<_> = specs
            .iter()
            .enumerate()
            .map(|(index, (units, day, with_newlywed))| {
                let mut supply_types = vec![supply("general", SupplyKind::General, *units)];
                if *with_newlywed {
                    let mut newlywed = supply("newlywed", SupplyKind::Newlywed, 10);
                    newlywed.income_standards = vec![income_tier(IncomeTier::Priority, 130, 70)];
                    supply_types.push(newlywed);
                }
                announcement(&format!("ann-{index:02}"), date(2024, 5, *day), supply_types)
            })
            .collect();

        let results = match_many(
            &applicant(9_000_000, false),
            &announcements,
            &NationalIncomeTable::standard_2024(),
            &MatchingConfig::new(date(2024, 4, 20)),
        );

        prop_assert_eq!(results.len(), announcements.len());
        for pair in results.windows(2) {
            let (first, second) = (&pair[0], &pair[1]);
            prop_assert!(first.matching_score >= second.matching_score);
            if first.matching_score == second.matching_score {
                prop_assert!(first.application_end_date <= second.application_end_date);
                if first.application_end_date == second.application_end_date {
                    prop_assert!(first.announcement_id < second.announcement_id);
                }
            }
        }
    }
}
