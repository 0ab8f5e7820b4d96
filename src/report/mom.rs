use crate::aggregate;
use crate::error::AnalyticsError;
use crate::format::{Cell, Tabular};
use crate::model::{Amount, Dataset};
use crate::window::{growth_percent, lag, lead, Trend};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A month's total compared with the months on either side of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthOverMonthDelta {
    pub year: i32,
    pub month: u32,
    pub current_month_amount: Amount,
    /// `None` for the first month.
    pub previous_month_amount: Option<Amount>,
    /// `None` for the last month.
    pub next_month_amount: Option<Amount>,
    /// `None` when there is no previous month or the previous month's total is zero.
    pub mom_growth_percent: Option<Decimal>,
    pub mom_trend: Trend,
}

/// Compares each month with the previous and next month in chronological order. Months without
/// transactions do not appear, so "previous" is the previous month that has data.
///
/// Returns an `UndefinedValue` error when a monthly total does not fit in a `Decimal`.
pub fn month_over_month(
    dataset: &Dataset,
) -> Result<Vec<MonthOverMonthDelta>, AnalyticsError> {
    let months = aggregate::by_month(dataset)?;
    let totals: Vec<Decimal> = months.iter().map(|m| m.total).collect();
    let previous = lag(&totals);
    let next = lead(&totals);

    Ok(months
        .iter()
        .zip(previous)
        .zip(next)
        .map(|((m, previous), next)| {
            let growth = match growth_percent(m.total, previous) {
                Ok(g) => Some(g),
                Err(e) => {
                    trace!("No growth for {}: {e}", m.key);
                    None
                }
            };
            MonthOverMonthDelta {
                year: m.key.year(),
                month: m.key.month(),
                current_month_amount: Amount::new(m.total),
                previous_month_amount: previous.map(Amount::new),
                next_month_amount: next.map(Amount::new),
                mom_growth_percent: growth,
                mom_trend: Trend::between(m.total, previous),
            }
        })
        .collect())
}

impl Tabular for MonthOverMonthDelta {
    fn headers() -> &'static [&'static str] {
        &[
            "year",
            "month",
            "current_month_amount",
            "previous_month_amount",
            "next_month_amount",
            "mom_growth_percent",
            "mom_trend",
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::number(self.year),
            Cell::number(self.month),
            Cell::money(Some(self.current_month_amount)),
            Cell::money(self.previous_month_amount),
            Cell::money(self.next_month_amount),
            Cell::decimal(self.mom_growth_percent),
            Cell::text(&self.mom_trend),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{render, OutputFormat};
    use crate::model::{Department, ExpenseCategory, Transaction};
    use crate::test::sample_dataset;
    use chrono::NaiveDate;
    use std::str::FromStr;

    #[test]
    fn test_sample_month_over_month() {
        let rows = month_over_month(&sample_dataset()).unwrap();
        assert_eq!(rows.len(), 2);

        let jan = &rows[0];
        assert_eq!(jan.previous_month_amount, None);
        assert_eq!(jan.next_month_amount, Some(Amount::new(Decimal::from(82000))));
        assert_eq!(jan.mom_growth_percent, None);
        assert_eq!(jan.mom_trend, Trend::NoChange);

        let feb = &rows[1];
        assert_eq!(feb.previous_month_amount, Some(Amount::new(Decimal::from(75000))));
        assert_eq!(feb.next_month_amount, None);
        assert_eq!(feb.mom_growth_percent, Some(Decimal::from_str("9.33").unwrap()));
        assert_eq!(feb.mom_trend, Trend::Increase);
    }

    #[test]
    fn test_cells_render_absent_values_as_null() {
        let rows = month_over_month(&sample_dataset()).unwrap();
        let csv = render(&rows, OutputFormat::Csv).unwrap().to_string();
        let mut lines = csv.lines().skip(1);
        assert_eq!(
            lines.next(),
            Some("2024,1,75000.00,NULL,82000.00,NULL,No Change")
        );
        assert_eq!(
            lines.next(),
            Some("2024,2,82000.00,75000.00,NULL,9.33,Increase")
        );
    }

    #[test]
    fn test_zero_previous_month_has_no_growth() {
        let date = |m: u32| NaiveDate::from_ymd_opt(2024, m, 1).unwrap();
        let amount = |v: i64| Amount::new(Decimal::from(v));
        let dataset = Dataset::new(
            vec![Department::new(1, "Finance", "North")],
            vec![ExpenseCategory::new(1, "Salaries", "Payroll")],
            vec![
                Transaction::new(1, 1, 1, date(3), amount(0)),
                Transaction::new(2, 1, 1, date(4), amount(10)),
                Transaction::new(3, 1, 1, date(5), amount(4)),
            ],
        )
        .unwrap();
        let rows = month_over_month(&dataset).unwrap();
        assert_eq!(rows[1].mom_growth_percent, None);
        assert_eq!(rows[1].mom_trend, Trend::Increase);
        assert_eq!(rows[2].mom_growth_percent, Some(Decimal::from(-60)));
        assert_eq!(rows[2].mom_trend, Trend::Decrease);
    }

    #[test]
    fn test_lag_lead_symmetry() {
        let rows = month_over_month(&sample_dataset()).unwrap();
        for pair in rows.windows(2) {
            assert_eq!(pair[1].previous_month_amount, Some(pair[0].current_month_amount));
            assert_eq!(pair[0].next_month_amount, Some(pair[1].current_month_amount));
        }
    }
}
