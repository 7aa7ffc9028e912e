use std::collections::BTreeSet;
use std::io::Read;

use pulse_core::{ConfigError, TaxBracket, TaxTable};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading tax bracket data.
#[derive(Debug, Error, PartialEq)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("No brackets for tax year {requested} (file has {available:?})")]
    TaxYearNotFound { requested: i32, available: Vec<i32> },

    #[error("Invalid bracket table for tax year {tax_year}")]
    InvalidTable {
        tax_year: i32,
        #[source]
        source: ConfigError,
    },
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a tax brackets CSV file.
///
/// - `tax_year`: first calendar year of the year of assessment (e.g. 2024)
/// - `min_income`: annual income where the bracket starts
/// - `max_income`: annual income where the bracket ends (empty for unlimited)
/// - `base_tax`: tax owed at `min_income`
/// - `rate`: marginal tax rate as a decimal (e.g. 0.18 for 18%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub tax_year: i32,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub base_tax: Decimal,
    pub rate: Decimal,
}

impl From<&TaxBracketRecord> for TaxBracket {
    fn from(record: &TaxBracketRecord) -> Self {
        TaxBracket {
            min_income: record.min_income,
            max_income: record.max_income,
            tax_rate: record.rate,
            base_tax: record.base_tax,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for tax bracket tables from CSV files.
///
/// A single file may hold several tax years; [`BracketLoader::table_for_year`]
/// picks one out and validates it.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse tax bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or a
    /// string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxBracketRecord>, BracketLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Tax years present in `records`, ascending.
    pub fn tax_years(records: &[TaxBracketRecord]) -> Vec<i32> {
        records
            .iter()
            .map(|r| r.tax_year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Builds the validated bracket table for `tax_year`.
    ///
    /// Rows may appear in any order; they are sorted by `min_income` first.
    pub fn table_for_year(
        records: &[TaxBracketRecord],
        tax_year: i32,
    ) -> Result<TaxTable, BracketLoaderError> {
        let mut brackets: Vec<TaxBracket> = records
            .iter()
            .filter(|r| r.tax_year == tax_year)
            .map(TaxBracket::from)
            .collect();

        if brackets.is_empty() {
            return Err(BracketLoaderError::TaxYearNotFound {
                requested: tax_year,
                available: Self::tax_years(records),
            });
        }

        brackets.sort_by(|a, b| a.min_income.cmp(&b.min_income));
        debug!(tax_year, count = brackets.len(), "Building tax bracket table");

        TaxTable::new(brackets)
            .map_err(|source| BracketLoaderError::InvalidTable { tax_year, source })
    }
}
