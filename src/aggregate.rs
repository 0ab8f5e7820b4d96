//! Grouping and summing of transactions.
//!
//! The aggregator collapses the transaction set into one row per grouping key. It is the only
//! place where rows are merged; everything in `window` produces exactly one output per input.

use crate::error::AnalyticsError;
use crate::model::{Dataset, Department, Transaction, YearMonth};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::{debug, trace};

/// One row per distinct key, holding the sum of the amounts of the transactions with that key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group<K> {
    pub key: K,
    pub total: Decimal,
    pub count: usize,
}

/// Sums transaction amounts per key. Transactions that share a key are merged into a single
/// group. The output is ordered by key ascending.
///
/// Returns an `UndefinedValue` error when a group's total does not fit in a `Decimal`.
pub fn group_by<'a, K, F>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    key: F,
) -> Result<Vec<Group<K>>, AnalyticsError>
where
    K: Ord + Clone + Display,
    F: Fn(&Transaction) -> K,
{
    let mut groups: BTreeMap<K, (Decimal, usize)> = BTreeMap::new();
    for transaction in transactions {
        let k = key(transaction);
        let entry = groups.entry(k.clone()).or_insert((Decimal::ZERO, 0));
        entry.0 = entry
            .0
            .checked_add(transaction.amount().value())
            .ok_or_else(|| AnalyticsError::UndefinedValue(format!("sum for {k} overflowed")))?;
        entry.1 += 1;
    }
    Ok(groups
        .into_iter()
        .map(|(key, (total, count))| Group { key, total, count })
        .collect())
}

/// Total revenue for one department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentTotal<'a> {
    pub department: &'a Department,
    pub total: Decimal,
}

/// Sums transaction amounts per department, ordered by department id. Departments without any
/// transactions are not included.
pub fn by_department(dataset: &Dataset) -> Result<Vec<DepartmentTotal<'_>>, AnalyticsError> {
    let groups = group_by(dataset.transactions(), Transaction::department_id)?;
    let mut out = Vec::with_capacity(groups.len());
    for group in groups {
        let department = dataset.department(group.key).ok_or_else(|| {
            let transaction_id = dataset
                .transactions()
                .iter()
                .find(|t| t.department_id() == group.key)
                .map(Transaction::id)
                .unwrap_or_default();
            AnalyticsError::MissingDepartment {
                transaction_id,
                department_id: group.key,
            }
        })?;
        trace!(
            "Department {} ({}) total {} over {} transactions",
            department.id(),
            department.name(),
            group.total,
            group.count
        );
        out.push(DepartmentTotal {
            department,
            total: group.total,
        });
    }
    debug!("Aggregated revenue for {} departments", out.len());
    Ok(out)
}

/// Sums transaction amounts per calendar month, ordered chronologically.
pub fn by_month(dataset: &Dataset) -> Result<Vec<Group<YearMonth>>, AnalyticsError> {
    let groups = group_by(dataset.transactions(), Transaction::year_month)?;
    debug!("Aggregated {} monthly totals", groups.len());
    Ok(groups)
}
