use crate::model::mapping::{parse_id, required, FromRow};
use crate::model::{Amount, YearMonth};
use crate::error::AnalyticsError;
use crate::Result;
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The date format used by the transactions table.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A row of the transactions table. Each transaction belongs to exactly one department and one
/// expense category.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub(crate) transaction_id: u32,
    pub(crate) department_id: u32,
    pub(crate) expense_id: u32,
    pub(crate) transaction_date: NaiveDate,
    pub(crate) amount: Amount,
}

impl Transaction {
    pub fn new(
        transaction_id: u32,
        department_id: u32,
        expense_id: u32,
        transaction_date: NaiveDate,
        amount: Amount,
    ) -> Self {
        Self {
            transaction_id,
            department_id,
            expense_id,
            transaction_date,
            amount,
        }
    }

    pub fn id(&self) -> u32 {
        self.transaction_id
    }

    pub fn department_id(&self) -> u32 {
        self.department_id
    }

    pub fn expense_id(&self) -> u32 {
        self.expense_id
    }

    pub fn date(&self) -> NaiveDate {
        self.transaction_date
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth::from(self.transaction_date)
    }
}

impl FromRow for Transaction {
    const TABLE: &'static str = TRANSACTIONS;

    fn columns() -> &'static [&'static str] {
        &[
            TRANSACTION_ID_COL,
            DEPARTMENT_ID_COL,
            EXPENSE_ID_COL,
            TRANSACTION_DATE_COL,
            AMOUNT_COL,
        ]
    }

    fn from_values(values: &[&str]) -> Result<Self> {
        let transaction_id = parse_id(values[0], TRANSACTION_ID_COL)?;
        let reference = |value: &str, column: &'static str| -> Result<u32> {
            if value.is_empty() {
                return Err(AnalyticsError::NullReference {
                    transaction_id,
                    column,
                }
                .into());
            }
            parse_id(value, column)
        };
        let department_id = reference(values[1], DEPARTMENT_ID_COL)?;
        let expense_id = reference(values[2], EXPENSE_ID_COL)?;
        let date_str = required(values[3], TRANSACTION_DATE_COL)?;
        let transaction_date = NaiveDate::parse_from_str(date_str, DATE_FORMAT)
            .with_context(|| format!("Unable to parse '{date_str}' as a YYYY-MM-DD date"))?;
        let amount = Amount::from_str(required(values[4], AMOUNT_COL)?)?;
        Ok(Transaction::new(
            transaction_id,
            department_id,
            expense_id,
            transaction_date,
            amount,
        ))
    }
}

pub(crate) const TRANSACTIONS: &str = "transactions";
const TRANSACTION_ID_COL: &str = "transaction_id";
const DEPARTMENT_ID_COL: &str = "department_id";
const EXPENSE_ID_COL: &str = "expense_id";
const TRANSACTION_DATE_COL: &str = "transaction_date";
const AMOUNT_COL: &str = "amount";
