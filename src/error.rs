//! Error types shared across the crate.
//!
//! Most functions return `anyhow::Result`. Failures that callers need to tell apart (integrity
//! problems in the loaded data, undefined values, empty partitions) are raised as
//! `AnalyticsError` so they can be matched or downcast.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The failure modes of loading and analyzing a dataset.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AnalyticsError {
    /// A transaction references a department that does not exist.
    MissingDepartment {
        transaction_id: u32,
        department_id: u32,
    },
    /// A transaction references an expense category that does not exist.
    MissingExpenseCategory {
        transaction_id: u32,
        expense_id: u32,
    },
    /// A transaction leaves a department or expense category reference empty.
    NullReference {
        transaction_id: u32,
        column: &'static str,
    },
    /// Two rows of the same table share an identifier.
    DuplicateId { table: &'static str, id: u32 },
    /// An amount that must be non-negative was negative.
    NegativeAmount { transaction_id: u32, amount: String },
    /// A value could not be computed, e.g. growth against an absent or zero previous value.
    UndefinedValue(String),
    /// A window function was asked to operate on zero rows.
    EmptyPartition(String),
}

impl AnalyticsError {
    /// True for the errors that mean the loaded data violates referential integrity.
    pub fn is_integrity(&self) -> bool {
        matches!(
            self,
            AnalyticsError::MissingDepartment { .. }
                | AnalyticsError::MissingExpenseCategory { .. }
                | AnalyticsError::NullReference { .. }
                | AnalyticsError::DuplicateId { .. }
        )
    }
}

impl Display for AnalyticsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyticsError::MissingDepartment {
                transaction_id,
                department_id,
            } => write!(
                f,
                "Transaction '{transaction_id}' references unknown department '{department_id}'"
            ),
            AnalyticsError::MissingExpenseCategory {
                transaction_id,
                expense_id,
            } => write!(
                f,
                "Transaction '{transaction_id}' references unknown expense category '{expense_id}'"
            ),
            AnalyticsError::NullReference {
                transaction_id,
                column,
            } => write!(f, "Transaction '{transaction_id}' has an empty '{column}'"),
            AnalyticsError::DuplicateId { table, id } => {
                write!(f, "Duplicate id '{id}' in table '{table}'")
            }
            AnalyticsError::NegativeAmount {
                transaction_id,
                amount,
            } => write!(
                f,
                "Transaction '{transaction_id}' has a negative amount '{amount}'"
            ),
            AnalyticsError::UndefinedValue(what) => write!(f, "Undefined value: {what}"),
            AnalyticsError::EmptyPartition(what) => write!(f, "Empty partition: {what}"),
        }
    }
}

impl std::error::Error for AnalyticsError {}

/// Broad categories used to label errors that leave a command handler.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The home directory or `config.json` could not be created or loaded.
    Config,
    /// The input tables could not be read or failed validation.
    Data,
    /// A report could not be computed or rendered.
    Report,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// Attaches an `ErrorType` label to an error on its way out of a command.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| e.into().context(format!("{error_type} error")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pub_result_keeps_source() {
        let r: std::result::Result<(), AnalyticsError> =
            Err(AnalyticsError::EmptyPartition(String::from("2024")));
        let e = r.pub_result(ErrorType::Report).unwrap_err();
        assert_eq!(e.to_string(), "report error");
        let inner = e.downcast_ref::<AnalyticsError>().unwrap();
        assert_eq!(
            inner,
            &AnalyticsError::EmptyPartition(String::from("2024"))
        );
    }

    #[test]
    fn test_integrity_classification() {
        let missing = AnalyticsError::MissingDepartment {
            transaction_id: 1,
            department_id: 9,
        };
        assert!(missing.is_integrity());
        assert!(!AnalyticsError::UndefinedValue(String::from("x")).is_integrity());
        assert_eq!(
            missing.to_string(),
            "Transaction '1' references unknown department '9'"
        );
    }
}
