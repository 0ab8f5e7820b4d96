use crate::error::AnalyticsError;
use crate::model::round_half_up;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetDirection {
    Backward,
    Forward,
}

/// Looks up the value `distance` rows before (`Backward`) or after (`Forward`) each row. Rows
/// whose target falls outside the sequence get `None`.
pub fn offset<V: Clone>(
    values: &[V],
    distance: usize,
    direction: OffsetDirection,
) -> Vec<Option<V>> {
    (0..values.len())
        .map(|position| {
            let target = match direction {
                OffsetDirection::Backward => position.checked_sub(distance),
                OffsetDirection::Forward => position.checked_add(distance),
            };
            target.and_then(|ix| values.get(ix)).cloned()
        })
        .collect()
}

/// `LAG(value, 1)`: the previous row's value.
pub fn lag<V: Clone>(values: &[V]) -> Vec<Option<V>> {
    offset(values, 1, OffsetDirection::Backward)
}

/// `LEAD(value, 1)`: the next row's value.
pub fn lead<V: Clone>(values: &[V]) -> Vec<Option<V>> {
    offset(values, 1, OffsetDirection::Forward)
}

/// `(current - previous) / previous * 100`, rounded half-up to 2 decimals.
///
/// A missing or zero `previous` is an `UndefinedValue` error, never a numeric zero.
pub fn growth_percent(
    current: Decimal,
    previous: Option<Decimal>,
) -> Result<Decimal, AnalyticsError> {
    let previous = previous.ok_or_else(|| {
        AnalyticsError::UndefinedValue(String::from("growth with no previous value"))
    })?;
    if previous.is_zero() {
        return Err(AnalyticsError::UndefinedValue(String::from(
            "growth against a previous value of zero",
        )));
    }
    let ratio = current
        .checked_sub(previous)
        .and_then(|d| d.checked_div(previous))
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| AnalyticsError::UndefinedValue(String::from("growth overflowed")))?;
    Ok(round_half_up(ratio, 2))
}

/// Direction of change from the previous value to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Increase,
    Decrease,
    #[serde(rename = "No Change")]
    NoChange,
}

serde_plain::derive_display_from_serialize!(Trend);
serde_plain::derive_fromstr_from_deserialize!(Trend);

impl Trend {
    /// `NoChange` when the values are equal or there is no previous value.
    pub fn between(current: Decimal, previous: Option<Decimal>) -> Self {
        match previous {
            Some(p) if current > p => Trend::Increase,
            Some(p) if current < p => Trend::Decrease,
            _ => Trend::NoChange,
        }
    }
}
