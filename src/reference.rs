//! Loading of national income standards published as CSV.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::matching::{NationalIncomeStandard, NationalIncomeTable};

#[derive(Debug)]
pub enum ReferenceDataError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: u64, detail: String },
}

impl std::fmt::Display for ReferenceDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceDataError::Io(err) => write!(f, "failed to read income table: {}", err),
            ReferenceDataError::Csv(err) => write!(f, "invalid income table CSV: {}", err),
            ReferenceDataError::InvalidRow { line, detail } => {
                write!(f, "income table row {line} rejected: {detail}")
            }
        }
    }
}

impl std::error::Error for ReferenceDataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReferenceDataError::Io(err) => Some(err),
            ReferenceDataError::Csv(err) => Some(err),
            ReferenceDataError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for ReferenceDataError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ReferenceDataError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct IncomeRow {
    year: i32,
    household_size: u8,
    standard_100: u64,
    #[serde(default)]
    standard_120: Option<u64>,
    #[serde(default)]
    standard_130: Option<u64>,
    #[serde(default)]
    standard_140: Option<u64>,
    #[serde(default)]
    standard_200: Option<u64>,
}

pub fn load_income_table(path: impl AsRef<Path>) -> Result<NationalIncomeTable, ReferenceDataError> {
    let file = File::open(path)?;
    income_table_from_reader(file)
}

/// Columns: `year,household_size,standard_100,standard_120,standard_130,standard_140,standard_200`.
/// Blank percentage columns are treated as unpublished.
pub fn income_table_from_reader<R: Read>(
    reader: R,
) -> Result<NationalIncomeTable, ReferenceDataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut table = NationalIncomeTable::new();

    for (index, record) in csv_reader.deserialize::<IncomeRow>().enumerate() {
        let row = record?;
        // header is line 1
        let line = index as u64 + 2;

        if row.household_size == 0 {
            return Err(ReferenceDataError::InvalidRow {
                line,
                detail: "household_size must be at least 1".to_string(),
            });
        }
        if row.standard_100 == 0 {
            return Err(ReferenceDataError::InvalidRow {
                line,
                detail: "standard_100 must be positive".to_string(),
            });
        }

        let replaced = table.insert(NationalIncomeStandard {
            year: row.year,
            household_size: row.household_size,
            standard_100: row.standard_100,
            standard_120: row.standard_120,
            standard_130: row.standard_130,
            standard_140: row.standard_140,
            standard_200: row.standard_200,
        });
        if replaced.is_some() {
            return Err(ReferenceDataError::InvalidRow {
                line,
                detail: format!(
                    "duplicate entry for {} household size {}",
                    row.year, row.household_size
                ),
            });
        }
    }

    tracing::debug!(rows = table.len(), "income table loaded");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
year,household_size,standard_100,standard_120,standard_130,standard_140,standard_200
2024,3,8088000,9706000,10514000,11323000,16176000
2024,4,8881000,10657000,11545000,,17762000
";

    #[test]
    fn reads_rows_and_blank_columns() {
        let table = income_table_from_reader(SAMPLE.as_bytes()).expect("csv parses");

        assert_eq!(table.len(), 2);
        assert_eq!(table.ceiling(2024, 4, 130), Ok(11_545_000));
        assert!(table.ceiling(2024, 4, 140).is_err());
        assert_eq!(table.ceiling(2024, 3, 140), Ok(11_323_000));
    }

    #[test]
    fn rejects_duplicate_rows() {
        let csv = format!("{SAMPLE}2024,3,1,1,1,1,1\n");
        match income_table_from_reader(csv.as_bytes()) {
            Err(ReferenceDataError::InvalidRow { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected duplicate row rejection, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_household_size() {
        let csv = "year,household_size,standard_100\n2024,0,100\n";
        match income_table_from_reader(csv.as_bytes()) {
            Err(ReferenceDataError::InvalidRow { line, detail }) => {
                assert_eq!(line, 2);
                assert!(detail.contains("household_size"));
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }
}
