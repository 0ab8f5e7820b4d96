use crate::aggregate;
use crate::error::AnalyticsError;
use crate::format::{Cell, Tabular};
use crate::model::{Amount, Dataset};
use crate::window::{moving_average, partition_min_max, running_sum};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use tracing::debug;

/// A month's total with its cumulative and smoothed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub year: i32,
    pub month: u32,
    pub monthly_amount: Amount,
    /// Sum of all monthly amounts up to and including this month.
    pub running_total: Amount,
    /// Average of this month and the preceding months in the window, rounded to cents. The name
    /// stays `moving_avg_3m` whatever width is configured.
    pub moving_avg_3m: Amount,
    /// Smallest monthly amount in this month's year.
    pub min_monthly_year: Amount,
    /// Largest monthly amount in this month's year.
    pub max_monthly_year: Amount,
}

/// Computes the monthly trend in chronological order. `window` is the number of months the
/// moving average covers, including the current one.
///
/// Returns an `EmptyPartition` error when the dataset has no transactions and an `UndefinedValue`
/// error when a total does not fit in a `Decimal`.
pub fn monthly_trend(
    dataset: &Dataset,
    window: NonZeroUsize,
) -> Result<Vec<MonthlyTrend>, AnalyticsError> {
    let months = aggregate::by_month(dataset)?;
    let totals: Vec<_> = months.iter().map(|m| m.total).collect();

    let ranges = partition_min_max(&months, |m| m.key.year(), |m| m.total)?;
    let running = running_sum(&totals)?;
    let averages = moving_average(&totals, window)?;
    debug!(
        "Computed trend over {} months with a {}-month moving average",
        months.len(),
        window
    );

    Ok(months
        .iter()
        .zip(running)
        .zip(averages)
        .zip(ranges)
        .map(|(((m, running_total), moving_avg), range)| MonthlyTrend {
            year: m.key.year(),
            month: m.key.month(),
            monthly_amount: Amount::new(m.total),
            running_total: Amount::new(running_total),
            moving_avg_3m: Amount::new(moving_avg),
            min_monthly_year: Amount::new(range.min),
            max_monthly_year: Amount::new(range.max),
        })
        .collect())
}

impl Tabular for MonthlyTrend {
    fn headers() -> &'static [&'static str] {
        &[
            "year",
            "month",
            "monthly_amount",
            "running_total",
            "moving_avg_3m",
            "min_monthly_year",
            "max_monthly_year",
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::number(self.year),
            Cell::number(self.month),
            Cell::money(Some(self.monthly_amount)),
            Cell::money(Some(self.running_total)),
            Cell::money(Some(self.moving_avg_3m)),
            Cell::money(Some(self.min_monthly_year)),
            Cell::money(Some(self.max_monthly_year)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Department, ExpenseCategory, Transaction};
    use crate::test::sample_dataset;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn three() -> NonZeroUsize {
        NonZeroUsize::new(3).unwrap()
    }

    #[test]
    fn test_sample_trend() {
        let rows = monthly_trend(&sample_dataset(), three()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].year, rows[0].month), (2024, 1));
        assert_eq!(rows[0].running_total.value(), Decimal::from(75000));
        assert_eq!(rows[0].moving_avg_3m.value(), Decimal::from(75000));
        assert_eq!((rows[1].year, rows[1].month), (2024, 2));
        assert_eq!(rows[1].running_total.value(), Decimal::from(157000));
        assert_eq!(rows[1].moving_avg_3m.value(), Decimal::from(78500));
        for row in &rows {
            assert_eq!(row.min_monthly_year.value(), Decimal::from(75000));
            assert_eq!(row.max_monthly_year.value(), Decimal::from(82000));
        }
    }

    fn multi_year_dataset() -> Dataset {
        let amount = |v: i64| Amount::new(Decimal::from(v));
        let date = |y: i32, m: u32| NaiveDate::from_ymd_opt(y, m, 10).unwrap();
        Dataset::new(
            vec![Department::new(1, "Finance", "North")],
            vec![ExpenseCategory::new(1, "Salaries", "Payroll")],
            vec![
                Transaction::new(1, 1, 1, date(2023, 11), amount(100)),
                Transaction::new(2, 1, 1, date(2023, 12), amount(300)),
                Transaction::new(3, 1, 1, date(2024, 1), amount(200)),
                Transaction::new(4, 1, 1, date(2024, 1), amount(50)),
                Transaction::new(5, 1, 1, date(2024, 2), amount(400)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_year_partitions_and_window_crossing_years() {
        let rows = monthly_trend(&multi_year_dataset(), three()).unwrap();
        let amounts: Vec<Decimal> = rows.iter().map(|r| r.monthly_amount.value()).collect();
        assert_eq!(
            amounts,
            vec![
                Decimal::from(100),
                Decimal::from(300),
                Decimal::from(250),
                Decimal::from(400)
            ]
        );
        assert_eq!(rows[0].min_monthly_year.value(), Decimal::from(100));
        assert_eq!(rows[1].max_monthly_year.value(), Decimal::from(300));
        assert_eq!(rows[2].min_monthly_year.value(), Decimal::from(250));
        assert_eq!(rows[3].max_monthly_year.value(), Decimal::from(400));
        // The moving average frame follows the month ordering across the year boundary.
        assert_eq!(rows[2].moving_avg_3m.value(), Decimal::from_str_exact("216.67").unwrap());
        assert_eq!(rows[3].running_total.value(), Decimal::from(1050));
        for row in &rows {
            assert!(row.min_monthly_year <= row.monthly_amount);
            assert!(row.monthly_amount <= row.max_monthly_year);
        }
    }

    #[test]
    fn test_running_total_overflow_is_an_error() {
        let date = |m: u32| NaiveDate::from_ymd_opt(2024, m, 10).unwrap();
        let dataset = Dataset::new(
            vec![Department::new(1, "Finance", "North")],
            vec![ExpenseCategory::new(1, "Salaries", "Payroll")],
            vec![
                Transaction::new(1, 1, 1, date(1), Amount::new(Decimal::MAX)),
                Transaction::new(2, 1, 1, date(2), Amount::new(Decimal::ONE)),
            ],
        )
        .unwrap();
        let err = monthly_trend(&dataset, three()).unwrap_err();
        assert!(matches!(err, AnalyticsError::UndefinedValue(_)));
    }

    #[test]
    fn test_empty_dataset() {
        let err = monthly_trend(&Dataset::default(), three()).unwrap_err();
        assert!(matches!(err, AnalyticsError::EmptyPartition(_)));
    }
}
