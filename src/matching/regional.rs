use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-announcement quota ratios reserved for each residence tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionalPriority {
    pub local_city_ratio: Option<u16>,
    pub local_province_ratio: Option<u16>,
    pub other_region_ratio: Option<u16>,
}

impl RegionalPriority {
    /// Ratio reserved for a tier; an undeclared ratio reserves nothing.
    pub fn ratio_for(&self, tier: PriorityTier) -> u16 {
        match tier {
            PriorityTier::LocalCity => self.local_city_ratio,
            PriorityTier::LocalProvince => self.local_province_ratio,
            PriorityTier::OtherRegion => self.other_region_ratio,
        }
        .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityTier {
    LocalCity,
    LocalProvince,
    OtherRegion,
}

impl PriorityTier {
    pub const fn label(self) -> &'static str {
        match self {
            PriorityTier::LocalCity => "LOCAL_CITY",
            PriorityTier::LocalProvince => "LOCAL_PROVINCE",
            PriorityTier::OtherRegion => "OTHER_REGION",
        }
    }

    pub const fn is_local(self) -> bool {
        matches!(self, PriorityTier::LocalCity | PriorityTier::LocalProvince)
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Province and city/county tokens extracted from a free-form address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionKey {
    pub province: String,
    pub district: Option<String>,
}

const PROVINCE_SUFFIXES: [&str; 6] = ["특별자치시", "특별자치도", "특별시", "광역시", "도", "시"];

/// Provinces whose everyday short name is not the stem of the formal one.
const PROVINCE_ALIASES: [(&str, &str); 6] = [
    ("충청북", "충북"),
    ("충청남", "충남"),
    ("전라북", "전북"),
    ("전라남", "전남"),
    ("경상북", "경북"),
    ("경상남", "경남"),
];

impl RegionKey {
    /// Leading token is the province, the next one the city/county; `None` for a blank address.
    pub fn parse(address: &str) -> Option<Self> {
        let mut tokens = address.split_whitespace();
        let province = normalize_province(tokens.next()?);
        let district = tokens.next().map(str::to_string);

        Some(Self { province, district })
    }
}

/// "서울특별시", "서울시" and "서울" name the same province, as do "전라북도" and "전북".
fn normalize_province(token: &str) -> String {
    let stem = PROVINCE_SUFFIXES
        .iter()
        .find_map(|suffix| {
            token
                .strip_suffix(suffix)
                .filter(|stem| !stem.is_empty())
        })
        .unwrap_or(token);

    PROVINCE_ALIASES
        .iter()
        .find(|(formal, _)| *formal == stem)
        .map_or(stem, |&(_, short)| short)
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalOutcome {
    pub tier: PriorityTier,
    pub ratio: u16,
    pub is_eligible: bool,
    pub reason: String,
}

pub fn classify_residence(address: &str, location: &str) -> PriorityTier {
    let (Some(applicant), Some(site)) = (RegionKey::parse(address), RegionKey::parse(location))
    else {
        return PriorityTier::OtherRegion;
    };

    if applicant.province != site.province {
        return PriorityTier::OtherRegion;
    }

    match (&applicant.district, &site.district) {
        (Some(lhs), Some(rhs)) if lhs == rhs => PriorityTier::LocalCity,
        _ => PriorityTier::LocalProvince,
    }
}

/// Place the applicant's residence in a quota tier relative to the announcement site.
pub fn resolve_regional_priority(
    address: &str,
    location: &str,
    priority: Option<&RegionalPriority>,
) -> RegionalOutcome {
    let tier = classify_residence(address, location);
    let ratio = priority.map(|priority| priority.ratio_for(tier)).unwrap_or(0);
    let is_eligible = ratio > 0;

    let reason = if is_eligible {
        format!("{tier} priority applies with {ratio}% of units reserved")
    } else if priority.is_none() {
        format!("{tier} residence; announcement declares no regional quota")
    } else {
        format!("{tier} residence; announcement reserves no units for this tier")
    };

    RegionalOutcome {
        tier,
        ratio,
        is_eligible,
        reason,
    }
}
