use crate::error::AnalyticsError;
use crate::model::round_half_up;
use rust_decimal::Decimal;
use std::num::NonZeroUsize;
use std::ops::Range;

/// Returns the row positions covered by a `ROWS BETWEEN <preceding> PRECEDING AND <following>
/// FOLLOWING` frame around `position` in a sequence of `len` rows. `None` means unbounded. The
/// frame is clipped to the sequence.
pub fn rows_frame(
    position: usize,
    len: usize,
    preceding: Option<usize>,
    following: Option<usize>,
) -> Range<usize> {
    if len == 0 {
        return 0..0;
    }
    let start = match preceding {
        None => 0,
        Some(n) => position.saturating_sub(n),
    };
    let end = match following {
        None => len,
        Some(n) => position.saturating_add(n).saturating_add(1).min(len),
    };
    start..end.max(start)
}

/// Prefix sums: each output is the sum of all values from the first row up to and including the
/// current row (`ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW`).
pub fn running_sum(values: &[Decimal]) -> Result<Vec<Decimal>, AnalyticsError> {
    let mut total = Decimal::ZERO;
    values
        .iter()
        .map(|value| -> Result<Decimal, AnalyticsError> {
            total = checked_sum(total, *value)?;
            Ok(total)
        })
        .collect()
}

/// Averages each value with up to `width - 1` immediately preceding values
/// (`ROWS BETWEEN width - 1 PRECEDING AND CURRENT ROW`), rounded half-up to 2 decimals. Rows near
/// the start average over however many values are available.
pub fn moving_average(
    values: &[Decimal],
    width: NonZeroUsize,
) -> Result<Vec<Decimal>, AnalyticsError> {
    let preceding = width.get() - 1;
    (0..values.len())
        .map(|position| -> Result<Decimal, AnalyticsError> {
            let frame = &values[rows_frame(position, values.len(), Some(preceding), Some(0))];
            let sum = frame
                .iter()
                .try_fold(Decimal::ZERO, |total, value| checked_sum(total, *value))?;
            Ok(round_half_up(sum / Decimal::from(frame.len()), 2))
        })
        .collect()
}

fn checked_sum(total: Decimal, value: Decimal) -> Result<Decimal, AnalyticsError> {
    total
        .checked_add(value)
        .ok_or_else(|| AnalyticsError::UndefinedValue(String::from("window sum overflowed")))
}
