//! Implements `DataSource` over a directory of CSV files, one file per table.

use crate::source::{parse_csv, DataSource};
use crate::{utils, Result};
use anyhow::Context;
use std::path::PathBuf;
use tracing::trace;

/// Reads `<dir>/<table>.csv`.
#[derive(Debug, Clone)]
pub struct CsvSource {
    dir: PathBuf,
}

impl CsvSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The path of the CSV file for `table`.
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{table}.csv"))
    }
}

#[async_trait::async_trait]
impl DataSource for CsvSource {
    async fn get(&mut self, table: &str) -> Result<Vec<Vec<String>>> {
        let path = self.table_path(table);
        trace!("Reading table {table} from {}", path.display());
        let content = utils::read(&path)
            .await
            .with_context(|| format!("Unable to read the {table} table"))?;
        parse_csv(&content).with_context(|| format!("Unable to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{load, SAMPLE_DEPARTMENTS, SAMPLE_EXPENSE_CATEGORIES, SAMPLE_TRANSACTIONS};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_csv_source_reads_tables() {
        let dir = TempDir::new().unwrap();
        utils::write(dir.path().join("departments.csv"), SAMPLE_DEPARTMENTS)
            .await
            .unwrap();
        utils::write(
            dir.path().join("expense_categories.csv"),
            SAMPLE_EXPENSE_CATEGORIES,
        )
        .await
        .unwrap();
        utils::write(dir.path().join("transactions.csv"), SAMPLE_TRANSACTIONS)
            .await
            .unwrap();

        let mut source = CsvSource::new(dir.path());
        let rows = source.get("departments").await.unwrap();
        assert_eq!(rows[0], vec!["department_id", "department_name", "region"]);

        let dataset = load(&mut source).await.unwrap();
        assert_eq!(dataset.transactions().len(), 9);
    }

    #[tokio::test]
    async fn test_csv_source_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut source = CsvSource::new(dir.path());
        let err = source.get("transactions").await.unwrap_err();
        assert!(err.to_string().contains("transactions"));
    }
}
