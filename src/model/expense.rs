use crate::model::mapping::{parse_id, required, FromRow};
use crate::Result;
use serde::{Deserialize, Serialize};

/// A row of the expense_categories table. `category` is the broader label an expense belongs to,
/// e.g. the expense "Cloud Hosting" in the category "Technology".
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub(crate) expense_id: u32,
    pub(crate) expense_name: String,
    pub(crate) category: String,
}

impl ExpenseCategory {
    pub fn new(
        expense_id: u32,
        expense_name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            expense_id,
            expense_name: expense_name.into(),
            category: category.into(),
        }
    }

    pub fn id(&self) -> u32 {
        self.expense_id
    }

    pub fn name(&self) -> &str {
        &self.expense_name
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

impl FromRow for ExpenseCategory {
    const TABLE: &'static str = EXPENSE_CATEGORIES;

    fn columns() -> &'static [&'static str] {
        &[EXPENSE_ID_COL, EXPENSE_NAME_COL, CATEGORY_COL]
    }

    fn from_values(values: &[&str]) -> Result<Self> {
        Ok(ExpenseCategory::new(
            parse_id(values[0], EXPENSE_ID_COL)?,
            required(values[1], EXPENSE_NAME_COL)?,
            values[2],
        ))
    }
}

pub(crate) const EXPENSE_CATEGORIES: &str = "expense_categories";
pub(crate) const EXPENSE_ID_COL: &str = "expense_id";
pub(crate) const EXPENSE_NAME_COL: &str = "expense_name";
pub(crate) const CATEGORY_COL: &str = "category";
