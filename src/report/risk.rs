use crate::error::AnalyticsError;
use crate::format::{Cell, Tabular};
use crate::model::{Amount, Dataset};
use crate::window::ntile;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::debug;

/// The number of risk buckets.
pub const QUARTILES: usize = 4;

/// The label attached to each risk quartile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Medium-High Risk")]
    MediumHigh,
    #[serde(rename = "Medium-Low Risk")]
    MediumLow,
    #[serde(rename = "Low Risk")]
    Low,
}

serde_plain::derive_display_from_serialize!(RiskLabel);
serde_plain::derive_fromstr_from_deserialize!(RiskLabel);

impl RiskLabel {
    /// Maps a quartile number (1 holds the largest amounts) to its label. Values outside `1..=4`
    /// have no label.
    pub fn from_quartile(quartile: usize) -> Option<Self> {
        match quartile {
            1 => Some(RiskLabel::High),
            2 => Some(RiskLabel::MediumHigh),
            3 => Some(RiskLabel::MediumLow),
            4 => Some(RiskLabel::Low),
            _ => None,
        }
    }
}

/// A transaction with the risk quartile its amount falls in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSegment {
    pub transaction_id: u32,
    pub department_name: String,
    pub expense_name: String,
    pub transaction_date: NaiveDate,
    pub amount: Amount,
    pub risk_quartile: usize,
    pub risk_segment: RiskLabel,
}

/// Splits all transactions into four equally sized groups by amount, largest first. Equal amounts
/// are ordered by transaction id. The output is in that same order.
///
/// Returns an `EmptyPartition` error when the dataset has no transactions.
pub fn risk_segments(dataset: &Dataset) -> Result<Vec<RiskSegment>, AnalyticsError> {
    let mut records = dataset.records()?;
    records.sort_by_key(|r| (Reverse(r.transaction.amount()), r.transaction.id()));
    let quartiles = ntile(records.len(), QUARTILES)?;

    let rows = records
        .iter()
        .zip(quartiles)
        .map(|(r, quartile)| -> Result<RiskSegment, AnalyticsError> {
            let risk_segment = RiskLabel::from_quartile(quartile).ok_or_else(|| {
                AnalyticsError::UndefinedValue(format!("no risk label for quartile {quartile}"))
            })?;
            Ok(RiskSegment {
                transaction_id: r.transaction.id(),
                department_name: r.department.name().to_string(),
                expense_name: r.expense.name().to_string(),
                transaction_date: r.transaction.date(),
                amount: r.transaction.amount(),
                risk_quartile: quartile,
                risk_segment,
            })
        })
        .collect::<Result<Vec<_>, AnalyticsError>>()?;
    debug!("Segmented {} transactions into {QUARTILES} quartiles", rows.len());
    Ok(rows)
}

impl Tabular for RiskSegment {
    fn headers() -> &'static [&'static str] {
        &[
            "transaction_id",
            "department_name",
            "expense_name",
            "transaction_date",
            "amount",
            "risk_quartile",
            "risk_segment",
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::number(self.transaction_id),
            Cell::text(&self.department_name),
            Cell::text(&self.expense_name),
            Cell::text(self.transaction_date),
            Cell::money(Some(self.amount)),
            Cell::number(self.risk_quartile),
            Cell::text(&self.risk_segment),
        ]
    }
}
