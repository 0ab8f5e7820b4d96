//! Implements `DataSource` with in-memory data.
//!
//! By default it is seeded with a small demonstration dataset: four departments, five expense
//! categories and nine transactions across January and February 2024. `init` also writes these
//! tables to the data directory so a fresh install has something to report on.

use crate::model::{DEPARTMENTS, EXPENSE_CATEGORIES, TRANSACTIONS};
use crate::source::{parse_csv, DataSource};
use crate::Result;
use anyhow::Context;
use std::collections::HashMap;

/// A `DataSource` that holds tables in memory, keyed by table name.
pub struct SampleSource {
    data: HashMap<String, Vec<Vec<String>>>,
}

impl SampleSource {
    pub fn new(data: HashMap<String, Vec<Vec<String>>>) -> Self {
        Self { data }
    }
}

#[async_trait::async_trait]
impl DataSource for SampleSource {
    async fn get(&mut self, table: &str) -> Result<Vec<Vec<String>>> {
        self.data
            .get(table)
            .with_context(|| format!("Table '{table}' not found"))
            .cloned()
    }
}

impl Default for SampleSource {
    /// Loads the sample tables from this module.
    fn default() -> Self {
        Self::new(sample_data())
    }
}

fn sample_data() -> HashMap<String, Vec<Vec<String>>> {
    [
        (DEPARTMENTS, SAMPLE_DEPARTMENTS),
        (EXPENSE_CATEGORIES, SAMPLE_EXPENSE_CATEGORIES),
        (TRANSACTIONS, SAMPLE_TRANSACTIONS),
    ]
    .into_iter()
    .filter_map(|(table, csv)| parse_csv(csv).ok().map(|rows| (table.to_string(), rows)))
    .collect()
}

/// Sample departments.
pub(crate) const SAMPLE_DEPARTMENTS: &str = "\
department_id,department_name,region
1,Finance,North
2,Marketing,East
3,HR,West
4,IT,South
";

/// Sample expense categories.
pub(crate) const SAMPLE_EXPENSE_CATEGORIES: &str = "\
expense_id,expense_name,category
1,Salaries,Payroll
2,Software Licenses,Technology
3,Business Travel,Operations
4,Digital Advertising,Marketing
5,Office Supplies,Operations
";

/// Sample transactions. January totals 75,000.00 and February 82,000.00.
pub(crate) const SAMPLE_TRANSACTIONS: &str = "\
transaction_id,department_id,expense_id,transaction_date,amount
1,1,1,2024-01-05,40000.00
2,2,4,2024-01-10,18000.00
3,3,1,2024-01-15,12000.00
4,4,2,2024-01-20,5000.00
5,1,1,2024-02-05,42000.00
6,1,3,2024-02-12,4000.00
7,2,4,2024-02-14,20000.00
8,3,1,2024-02-15,10000.00
9,4,2,2024-02-20,6000.00
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_tables_present() {
        let data = sample_data();
        assert_eq!(data.len(), 3);
        assert_eq!(data[TRANSACTIONS].len(), 10);
    }

    #[tokio::test]
    async fn test_unknown_table() {
        let mut source = SampleSource::default();
        assert!(source.get("budgets").await.is_err());
    }
}
