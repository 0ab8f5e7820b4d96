//! The four analyses, each a pure function from a `Dataset` to a list of rows.
//!
//! | report  | grouping       | window functions                                   |
//! |---------|----------------|----------------------------------------------------|
//! | ranking | department     | `row_number`, `rank`, `dense_rank`                 |
//! | trend   | calendar month | running sum, moving average, yearly min/max        |
//! | mom     | calendar month | `lag`, `lead`, growth percentage, trend label      |
//! | risk    | none           | `ntile(4)` over transaction amounts                |

mod mom;
mod ranking;
mod risk;
mod trend;

pub use mom::{month_over_month, MonthOverMonthDelta};
pub use ranking::{department_ranking, RankedDepartmentRevenue};
pub use risk::{risk_segments, RiskLabel, RiskSegment, QUARTILES};
pub use trend::{monthly_trend, MonthlyTrend};

use serde::{Deserialize, Serialize};

/// Names the available reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Departments ranked by total revenue.
    Ranking,
    /// Monthly totals with running total, moving average and yearly range.
    Trend,
    /// Month-over-month change.
    Mom,
    /// Transactions split into risk quartiles by amount.
    Risk,
}

serde_plain::derive_display_from_serialize!(ReportKind);
serde_plain::derive_fromstr_from_deserialize!(ReportKind);

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Ranking,
        ReportKind::Trend,
        ReportKind::Mom,
        ReportKind::Risk,
    ];

    /// A human readable title.
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Ranking => "Department Revenue Ranking",
            ReportKind::Trend => "Monthly Expense Trend",
            ReportKind::Mom => "Month-over-Month Analysis",
            ReportKind::Risk => "Transaction Risk Segmentation",
        }
    }
}
