use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Successive income bands within a supply type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncomeTier {
    Priority,
    General,
    Lottery,
}

impl IncomeTier {
    pub const fn label(self) -> &'static str {
        match self {
            IncomeTier::Priority => "PRIORITY",
            IncomeTier::General => "GENERAL",
            IncomeTier::Lottery => "LOTTERY",
        }
    }
}

impl fmt::Display for IncomeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One tier row: a ceiling expressed as a percentage of the national standard plus its quota.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStandard {
    pub tier: IncomeTier,
    pub percentage: u16,
    #[serde(default)]
    pub dual_income_percentage: Option<u16>,
    pub ratio: u16,
}

/// Percentage columns published in the national income table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncomeBucket {
    Standard100,
    Standard120,
    Standard130,
    Standard140,
    Standard200,
}

impl IncomeBucket {
    pub fn from_percentage(percentage: u16) -> Result<Self, IncomeLookupError> {
        match percentage {
            100 => Ok(IncomeBucket::Standard100),
            120 => Ok(IncomeBucket::Standard120),
            130 => Ok(IncomeBucket::Standard130),
            140 => Ok(IncomeBucket::Standard140),
            200 => Ok(IncomeBucket::Standard200),
            other => Err(IncomeLookupError::UnsupportedPercentage { percentage: other }),
        }
    }

    pub const fn percentage(self) -> u16 {
        match self {
            IncomeBucket::Standard100 => 100,
            IncomeBucket::Standard120 => 120,
            IncomeBucket::Standard130 => 130,
            IncomeBucket::Standard140 => 140,
            IncomeBucket::Standard200 => 200,
        }
    }
}

/// Absolute monthly ceilings for one (year, household size).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalIncomeStandard {
    pub year: i32,
    pub household_size: u8,
    pub standard_100: u64,
    #[serde(default)]
    pub standard_120: Option<u64>,
    #[serde(default)]
    pub standard_130: Option<u64>,
    #[serde(default)]
    pub standard_140: Option<u64>,
    #[serde(default)]
    pub standard_200: Option<u64>,
}

impl NationalIncomeStandard {
    pub fn ceiling(&self, bucket: IncomeBucket) -> Option<u64> {
        match bucket {
            IncomeBucket::Standard100 => Some(self.standard_100),
            IncomeBucket::Standard120 => self.standard_120,
            IncomeBucket::Standard130 => self.standard_130,
            IncomeBucket::Standard140 => self.standard_140,
            IncomeBucket::Standard200 => self.standard_200,
        }
    }
}

/// National income standards keyed exactly by (year, household size).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<NationalIncomeStandard>", into = "Vec<NationalIncomeStandard>")]
pub struct NationalIncomeTable {
    rows: BTreeMap<(i32, u8), NationalIncomeStandard>,
}

impl NationalIncomeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row, returning the row it replaced.
    pub fn insert(&mut self, row: NationalIncomeStandard) -> Option<NationalIncomeStandard> {
        self.rows.insert((row.year, row.household_size), row)
    }

    pub fn lookup(
        &self,
        year: i32,
        household_size: u8,
    ) -> Result<&NationalIncomeStandard, IncomeLookupError> {
        self.rows
            .get(&(year, household_size))
            .ok_or(IncomeLookupError::MissingStandard {
                year,
                household_size,
            })
    }

    pub fn ceiling(
        &self,
        year: i32,
        household_size: u8,
        percentage: u16,
    ) -> Result<u64, IncomeLookupError> {
        let bucket = IncomeBucket::from_percentage(percentage)?;
        self.lookup(year, household_size)?
            .ceiling(bucket)
            .ok_or(IncomeLookupError::BucketUnavailable {
                year,
                household_size,
                percentage,
            })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 2024 urban-worker monthly average income table for households of one to eight.
    pub fn standard_2024() -> Self {
        const ROWS: [(u8, [u64; 5]); 8] = [
            (1, [3_803_000, 4_564_000, 4_944_000, 5_324_000, 7_606_000]),
            (2, [6_295_000, 7_554_000, 8_184_000, 8_813_000, 12_590_000]),
            (3, [8_088_000, 9_706_000, 10_514_000, 11_323_000, 16_176_000]),
            (4, [8_881_000, 10_657_000, 11_545_000, 12_433_000, 17_762_000]),
            (5, [9_674_000, 11_609_000, 12_576_000, 13_543_000, 19_348_000]),
            (6, [10_467_000, 12_560_000, 13_607_000, 14_654_000, 20_934_000]),
            (7, [11_260_000, 13_512_000, 14_638_000, 15_764_000, 22_520_000]),
            (8, [12_053_000, 14_464_000, 15_669_000, 16_874_000, 24_106_000]),
        ];

        ROWS.into_iter()
            .map(|(household_size, [s100, s120, s130, s140, s200])| NationalIncomeStandard {
                year: 2024,
                household_size,
                standard_100: s100,
                standard_120: Some(s120),
                standard_130: Some(s130),
                standard_140: Some(s140),
                standard_200: Some(s200),
            })
            .collect::<Vec<_>>()
            .into()
    }
}

impl From<Vec<NationalIncomeStandard>> for NationalIncomeTable {
    fn from(rows: Vec<NationalIncomeStandard>) -> Self {
        let mut table = NationalIncomeTable::new();
        for row in rows {
            table.insert(row);
        }
        table
    }
}

impl From<NationalIncomeTable> for Vec<NationalIncomeStandard> {
    fn from(table: NationalIncomeTable) -> Self {
        table.rows.into_values().collect()
    }
}

/// Lookup failures; each fails the tier closed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IncomeLookupError {
    #[error("no national income bucket for {percentage}%")]
    UnsupportedPercentage { percentage: u16 },
    #[error("no national income standard for {year} and household size {household_size}")]
    MissingStandard { year: i32, household_size: u8 },
    #[error("national income standard for {year}, household size {household_size} has no {percentage}% column")]
    BucketUnavailable {
        year: i32,
        household_size: u8,
        percentage: u16,
    },
}

/// Inputs shared by every tier check for one applicant.
#[derive(Debug, Clone, Copy)]
pub struct IncomeInput {
    pub monthly_income: u64,
    pub household_size: u8,
    pub year: i32,
    pub is_dual_income: bool,
}

/// Outcome of testing one tier row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeCheck {
    pub tier: IncomeTier,
    pub passed: bool,
    pub income: u64,
    pub ceiling: u64,
    pub percentage: u16,
    pub ratio: u16,
}

impl IncomeCheck {
    pub fn reason(&self) -> String {
        if self.passed {
            format!(
                "income {} within {} tier ceiling {} ({}%)",
                self.income, self.tier, self.ceiling, self.percentage
            )
        } else {
            format!(
                "income {} exceeds {} tier ceiling {} ({}%)",
                self.income, self.tier, self.ceiling, self.percentage
            )
        }
    }
}

pub fn check_income(
    input: &IncomeInput,
    standard: &IncomeStandard,
    table: &NationalIncomeTable,
) -> Result<IncomeCheck, IncomeLookupError> {
    let percentage = match (input.is_dual_income, standard.dual_income_percentage) {
        (true, Some(dual)) => dual,
        _ => standard.percentage,
    };
    let ceiling = table.ceiling(input.year, input.household_size, percentage)?;

    Ok(IncomeCheck {
        tier: standard.tier,
        passed: input.monthly_income <= ceiling,
        income: input.monthly_income,
        ceiling,
        percentage,
        ratio: standard.ratio,
    })
}

/// Tier scan result: the first tier cleared (if any) and a reason per tier attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeVerdict {
    pub matched: Option<IncomeCheck>,
    pub failures: Vec<String>,
}

/// Test tiers in declaration order, stopping at the first one the applicant clears.
pub fn scan_income_tiers(
    input: &IncomeInput,
    standards: &[IncomeStandard],
    table: &NationalIncomeTable,
) -> IncomeVerdict {
    let mut failures = Vec::new();

    for standard in standards {
        match check_income(input, standard, table) {
            Ok(check) if check.passed => {
                return IncomeVerdict {
                    matched: Some(check),
                    failures,
                };
            }
            Ok(check) => failures.push(check.reason()),
            Err(error) => {
                tracing::warn!(tier = %standard.tier, %error, "income tier not evaluable");
                failures.push(format!("{} tier not evaluable: {error}", standard.tier));
            }
        }
    }

    if standards.is_empty() {
        failures.push("income standard required but no tiers are defined".to_string());
    }

    IncomeVerdict {
        matched: None,
        failures,
    }
}
