//! Types that represent the core data model: `Department`, `ExpenseCategory`, `Transaction` and
//! the `Dataset` that holds them.
mod amount;
mod dataset;
mod department;
mod expense;
pub(crate) mod mapping;
mod period;
mod transaction;

pub use amount::{round_half_up, to_cents, Amount, AmountError};
pub use dataset::{Dataset, Record};
pub use department::Department;
pub use expense::ExpenseCategory;
pub use period::YearMonth;
pub use transaction::Transaction;

pub(crate) use department::DEPARTMENTS;
pub(crate) use expense::EXPENSE_CATEGORIES;
pub(crate) use transaction::TRANSACTIONS;
