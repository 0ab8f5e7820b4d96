use crate::model::mapping::{parse_id, required, FromRow};
use crate::Result;
use serde::{Deserialize, Serialize};

/// A row of the departments table.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub(crate) department_id: u32,
    pub(crate) department_name: String,
    pub(crate) region: String,
}

impl Department {
    pub fn new(
        department_id: u32,
        department_name: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            department_id,
            department_name: department_name.into(),
            region: region.into(),
        }
    }

    pub fn id(&self) -> u32 {
        self.department_id
    }

    pub fn name(&self) -> &str {
        &self.department_name
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

impl FromRow for Department {
    const TABLE: &'static str = DEPARTMENTS;

    fn columns() -> &'static [&'static str] {
        &[DEPARTMENT_ID_COL, DEPARTMENT_NAME_COL, REGION_COL]
    }

    fn from_values(values: &[&str]) -> Result<Self> {
        Ok(Department::new(
            parse_id(values[0], DEPARTMENT_ID_COL)?,
            required(values[1], DEPARTMENT_NAME_COL)?,
            values[2],
        ))
    }
}

pub(crate) const DEPARTMENTS: &str = "departments";
pub(crate) const DEPARTMENT_ID_COL: &str = "department_id";
pub(crate) const DEPARTMENT_NAME_COL: &str = "department_name";
pub(crate) const REGION_COL: &str = "region";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mapping::parse_rows;

    #[test]
    fn test_parse_departments() {
        let rows = vec![
            vec!["department_id", "department_name", "region"],
            vec!["1", "Finance", "North"],
            vec!["2", "Marketing", ""],
        ];
        let departments: Vec<Department> = parse_rows(rows).unwrap();
        assert_eq!(departments.len(), 2);
        assert_eq!(departments[0], Department::new(1, "Finance", "North"));
        assert_eq!(departments[1].region(), "");
    }

    #[test]
    fn test_department_name_required() {
        let rows = vec![
            vec!["department_id", "department_name", "region"],
            vec!["1", "", "North"],
        ];
        let err = parse_rows::<Department, _, _>(rows).unwrap_err();
        assert!(format!("{err:#}").contains("department_name"));
    }
}
