//! Sources of the three input tables.
//!
//! A `DataSource` hands back a table as rows of strings with the header row first, the same shape
//! whether the rows come from CSV files on disk or from the built-in sample data. `load` turns the
//! three tables into a checked `Dataset`.

mod csv_source;
mod sample_source;

pub use csv_source::CsvSource;
pub use sample_source::SampleSource;
pub(crate) use sample_source::{SAMPLE_DEPARTMENTS, SAMPLE_EXPENSE_CATEGORIES, SAMPLE_TRANSACTIONS};

use crate::model::{Dataset, DEPARTMENTS, EXPENSE_CATEGORIES, TRANSACTIONS};
use crate::{Config, Result};
use anyhow::Context;
use std::io::Cursor;
use tracing::debug;

/// Env var that, when set and non-empty, makes the CLI use the built-in sample data instead of
/// the CSV files in the data directory.
pub const SAMPLE_DATA_ENV: &str = "FINWIN_SAMPLE_DATA";

/// Provides raw table rows.
#[async_trait::async_trait]
pub trait DataSource: Send {
    /// Returns all rows of `table`, header row first.
    async fn get(&mut self, table: &str) -> Result<Vec<Vec<String>>>;
}

/// Selects where the input tables come from.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    /// CSV files in the configured data directory.
    #[default]
    Files,
    /// The built-in sample dataset.
    Sample,
}

impl Mode {
    /// `Mode::Sample` when `FINWIN_SAMPLE_DATA` is set and non-empty, otherwise `Mode::Files`.
    pub fn from_env() -> Self {
        match std::env::var(SAMPLE_DATA_ENV) {
            Ok(v) if !v.is_empty() => Mode::Sample,
            _ => Mode::Files,
        }
    }
}

/// Creates the `DataSource` for `mode`.
pub fn source(config: &Config, mode: Mode) -> Box<dyn DataSource> {
    match mode {
        Mode::Files => Box::new(CsvSource::new(config.data_dir())),
        Mode::Sample => Box::new(SampleSource::default()),
    }
}

/// Reads the three tables from `source` and builds a `Dataset`.
pub async fn load(source: &mut dyn DataSource) -> Result<Dataset> {
    let departments = source.get(DEPARTMENTS).await?;
    let expense_categories = source.get(EXPENSE_CATEGORIES).await?;
    let transactions = source.get(TRANSACTIONS).await?;
    debug!(
        "Read {} department rows, {} expense category rows and {} transaction rows",
        departments.len().saturating_sub(1),
        expense_categories.len().saturating_sub(1),
        transactions.len().saturating_sub(1)
    );
    Dataset::parse(departments, expense_categories, transactions)
}

/// Splits CSV text into rows of strings. The header row is returned as the first row.
pub(crate) fn parse_csv(csv_data: &str) -> Result<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(csv_data.as_bytes()));

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (ix, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Malformed CSV at line {}", ix + 1))?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }
    Ok(rows)
}
