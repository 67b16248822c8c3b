use serde::{Deserialize, Serialize};

use crate::matching::domain::AssetProfile;

/// Ceilings per asset category; an absent ceiling leaves the category unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetStandard {
    pub max_real_estate: Option<u64>,
    pub max_vehicle: Option<u64>,
    pub max_financial_assets: Option<u64>,
    pub max_total_assets: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetCategory {
    RealEstate,
    Vehicle,
    Financial,
    Total,
}

impl AssetCategory {
    pub const fn label(self) -> &'static str {
        match self {
            AssetCategory::RealEstate => "real estate assets",
            AssetCategory::Vehicle => "vehicle assets",
            AssetCategory::Financial => "financial assets",
            AssetCategory::Total => "total assets",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetViolation {
    pub category: AssetCategory,
    pub value: u64,
    pub ceiling: u64,
}

impl AssetViolation {
    pub fn reason(&self) -> String {
        format!(
            "{} {} exceed ceiling {}",
            self.category.label(),
            self.value,
            self.ceiling
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCheck {
    pub violations: Vec<AssetViolation>,
}

impl AssetCheck {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn reasons(&self) -> Vec<String> {
        self.violations.iter().map(AssetViolation::reason).collect()
    }
}

pub fn check_assets(assets: &AssetProfile, standard: &AssetStandard) -> AssetCheck {
    let checks = [
        (AssetCategory::RealEstate, assets.real_estate, standard.max_real_estate),
        (AssetCategory::Vehicle, assets.vehicle, standard.max_vehicle),
        (AssetCategory::Financial, assets.financial, standard.max_financial_assets),
        (AssetCategory::Total, assets.total, standard.max_total_assets),
    ];

    let violations = checks
        .into_iter()
        .filter_map(|(category, value, ceiling)| {
            ceiling
                .filter(|ceiling| value > *ceiling)
                .map(|ceiling| AssetViolation {
                    category,
                    value,
                    ceiling,
                })
        })
        .collect();

    AssetCheck { violations }
}
