//! The in-memory record store.
//!
//! A `Dataset` holds the three input tables after they have been checked for referential
//! integrity. Once built it is read-only; every report is derived from it without mutation.

use crate::error::AnalyticsError;
use crate::model::mapping::parse_rows;
use crate::model::{Department, ExpenseCategory, Transaction};
use crate::Result;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::department::DEPARTMENTS;
use super::expense::EXPENSE_CATEGORIES;
use super::transaction::TRANSACTIONS;

/// Departments, expense categories and transactions that are known to be consistent with each
/// other. Transactions keep the order they were loaded in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    departments: BTreeMap<u32, Department>,
    expense_categories: BTreeMap<u32, ExpenseCategory>,
    transactions: Vec<Transaction>,
}

/// A transaction joined with the department and expense category it references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub transaction: &'a Transaction,
    pub department: &'a Department,
    pub expense: &'a ExpenseCategory,
}

impl Dataset {
    /// Builds a `Dataset`, rejecting duplicate identifiers, negative amounts and transactions that
    /// reference a department or expense category that does not exist.
    pub fn new(
        departments: Vec<Department>,
        expense_categories: Vec<ExpenseCategory>,
        transactions: Vec<Transaction>,
    ) -> std::result::Result<Self, AnalyticsError> {
        let mut department_map = BTreeMap::new();
        for department in departments {
            let id = department.id();
            if department_map.insert(id, department).is_some() {
                return Err(AnalyticsError::DuplicateId {
                    table: DEPARTMENTS,
                    id,
                });
            }
        }

        let mut expense_map = BTreeMap::new();
        for expense in expense_categories {
            let id = expense.id();
            if expense_map.insert(id, expense).is_some() {
                return Err(AnalyticsError::DuplicateId {
                    table: EXPENSE_CATEGORIES,
                    id,
                });
            }
        }

        let mut seen = BTreeSet::new();
        for transaction in &transactions {
            let id = transaction.id();
            if !seen.insert(id) {
                return Err(AnalyticsError::DuplicateId {
                    table: TRANSACTIONS,
                    id,
                });
            }
            if !department_map.contains_key(&transaction.department_id()) {
                return Err(AnalyticsError::MissingDepartment {
                    transaction_id: id,
                    department_id: transaction.department_id(),
                });
            }
            if !expense_map.contains_key(&transaction.expense_id()) {
                return Err(AnalyticsError::MissingExpenseCategory {
                    transaction_id: id,
                    expense_id: transaction.expense_id(),
                });
            }
            if transaction.amount().is_negative() {
                return Err(AnalyticsError::NegativeAmount {
                    transaction_id: id,
                    amount: transaction.amount().value().to_string(),
                });
            }
        }

        debug!(
            "Loaded {} departments, {} expense categories and {} transactions",
            department_map.len(),
            expense_map.len(),
            transactions.len()
        );

        Ok(Self {
            departments: department_map,
            expense_categories: expense_map,
            transactions,
        })
    }

    /// Parses the three tables from rows of strings (header row first) and builds a `Dataset`.
    pub fn parse<S, R>(
        departments: impl IntoIterator<Item = R>,
        expense_categories: impl IntoIterator<Item = R>,
        transactions: impl IntoIterator<Item = R>,
    ) -> Result<Self>
    where
        S: Into<String>,
        R: IntoIterator<Item = S>,
    {
        let departments = parse_rows(departments)?;
        let expense_categories = parse_rows(expense_categories)?;
        let transactions = parse_rows(transactions)?;
        Dataset::new(departments, expense_categories, transactions)
            .context("The input data failed the integrity check")
    }

    pub fn departments(&self) -> impl Iterator<Item = &Department> {
        self.departments.values()
    }

    pub fn department(&self, id: u32) -> Option<&Department> {
        self.departments.get(&id)
    }

    pub fn expense_categories(&self) -> impl Iterator<Item = &ExpenseCategory> {
        self.expense_categories.values()
    }

    pub fn expense_category(&self, id: u32) -> Option<&ExpenseCategory> {
        self.expense_categories.get(&id)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Joins `transaction` with its department and expense category.
    pub fn record<'a>(
        &'a self,
        transaction: &'a Transaction,
    ) -> std::result::Result<Record<'a>, AnalyticsError> {
        let department = self.department(transaction.department_id()).ok_or(
            AnalyticsError::MissingDepartment {
                transaction_id: transaction.id(),
                department_id: transaction.department_id(),
            },
        )?;
        let expense = self.expense_category(transaction.expense_id()).ok_or(
            AnalyticsError::MissingExpenseCategory {
                transaction_id: transaction.id(),
                expense_id: transaction.expense_id(),
            },
        )?;
        Ok(Record {
            transaction,
            department,
            expense,
        })
    }

    /// Every transaction joined with its lookups, in load order.
    pub fn records(&self) -> std::result::Result<Vec<Record<'_>>, AnalyticsError> {
        self.transactions.iter().map(|t| self.record(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn departments() -> Vec<Department> {
        vec![
            Department::new(1, "Finance", "North"),
            Department::new(2, "IT", "South"),
        ]
    }

    fn expenses() -> Vec<ExpenseCategory> {
        vec![ExpenseCategory::new(1, "Salaries", "Payroll")]
    }

    fn tx(id: u32, department_id: u32, expense_id: u32, amount: i64) -> Transaction {
        Transaction::new(
            id,
            department_id,
            expense_id,
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            Amount::new(Decimal::from(amount)),
        )
    }

    #[test]
    fn test_valid_dataset_joins() {
        let dataset = Dataset::new(
            departments(),
            expenses(),
            vec![tx(1, 2, 1, 100), tx(2, 1, 1, 50)],
        )
        .unwrap();
        let records = dataset.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].department.name(), "IT");
        assert_eq!(records[1].department.name(), "Finance");
        assert_eq!(records[1].expense.name(), "Salaries");
    }

    #[test]
    fn test_unknown_department_rejected() {
        let err = Dataset::new(departments(), expenses(), vec![tx(1, 9, 1, 100)]).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::MissingDepartment {
                transaction_id: 1,
                department_id: 9
            }
        );
        assert!(err.is_integrity());
    }

    #[test]
    fn test_unknown_expense_rejected() {
        let err = Dataset::new(departments(), expenses(), vec![tx(1, 1, 4, 100)]).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::MissingExpenseCategory {
                transaction_id: 1,
                expense_id: 4
            }
        );
    }

    #[test]
    fn test_duplicate_transaction_rejected() {
        let err = Dataset::new(
            departments(),
            expenses(),
            vec![tx(1, 1, 1, 100), tx(1, 2, 1, 100)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::DuplicateId {
                table: "transactions",
                id: 1
            }
        );
    }

    #[test]
    fn test_duplicate_department_rejected() {
        let mut d = departments();
        d.push(Department::new(1, "Finance Again", "East"));
        let err = Dataset::new(d, expenses(), Vec::new()).unwrap_err();
        assert!(matches!(err, AnalyticsError::DuplicateId { table: "departments", id: 1 }));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = Dataset::new(departments(), expenses(), vec![tx(3, 1, 1, -5)]).unwrap_err();
        assert!(matches!(err, AnalyticsError::NegativeAmount { transaction_id: 3, .. }));
    }

    #[test]
    fn test_parse_reports_integrity_error() {
        let err = Dataset::parse(
            vec![vec!["department_id", "department_name", "region"], vec!["1", "Finance", "North"]],
            vec![vec!["expense_id", "expense_name", "category"], vec!["1", "Salaries", "Payroll"]],
            vec![
                vec!["transaction_id", "department_id", "expense_id", "transaction_date", "amount"],
                vec!["1", "2", "1", "2024-01-01", "10"],
            ],
        )
        .unwrap_err();
        let integrity = err.downcast_ref::<AnalyticsError>().unwrap();
        assert!(integrity.is_integrity());
    }
}
