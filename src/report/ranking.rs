use crate::aggregate;
use crate::error::AnalyticsError;
use crate::format::{Cell, Tabular};
use crate::model::{Amount, Dataset};
use crate::window::rank;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// A department's total revenue along with its position in the revenue ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedDepartmentRevenue {
    /// Tie-break key only. Not part of the report's columns.
    #[serde(skip)]
    pub department_id: u32,
    pub department_name: String,
    pub region: String,
    pub total_revenue: Amount,
    pub row_num: usize,
    pub rank_num: usize,
    pub dense_rank_num: usize,
}

/// Ranks departments by total revenue, highest first. Departments with equal revenue are ordered
/// by department id so that `row_num` is reproducible.
///
/// When `top_n` is given, only rows with `row_num <= top_n` are returned; ranks are computed over
/// all departments before the cut.
pub fn department_ranking(
    dataset: &Dataset,
    top_n: Option<usize>,
) -> Result<Vec<RankedDepartmentRevenue>, AnalyticsError> {
    let mut totals = aggregate::by_department(dataset)?;
    totals.sort_by_key(|t| (Reverse(t.total), t.department.id()));
    let ranks = rank(&totals, |t| t.total);

    Ok(totals
        .iter()
        .zip(ranks)
        .map(|(t, r)| RankedDepartmentRevenue {
            department_id: t.department.id(),
            department_name: t.department.name().to_string(),
            region: t.department.region().to_string(),
            total_revenue: Amount::new(t.total),
            row_num: r.row_number,
            rank_num: r.rank,
            dense_rank_num: r.dense_rank,
        })
        .filter(|row| top_n.map_or(true, |n| row.row_num <= n))
        .collect())
}

impl Tabular for RankedDepartmentRevenue {
    fn headers() -> &'static [&'static str] {
        &[
            "department_name",
            "region",
            "total_revenue",
            "row_num",
            "rank_num",
            "dense_rank_num",
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(&self.department_name),
            Cell::text(&self.region),
            Cell::money(Some(self.total_revenue)),
            Cell::number(self.row_num),
            Cell::number(self.rank_num),
            Cell::number(self.dense_rank_num),
        ]
    }
}
