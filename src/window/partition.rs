use crate::error::AnalyticsError;
use std::collections::BTreeMap;
use std::fmt::Display;

/// The minimum and maximum value of the partition a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinMax<V> {
    pub min: V,
    pub max: V,
}

/// Computes `MIN(value) OVER (PARTITION BY key)` and `MAX(value) OVER (PARTITION BY key)` and
/// broadcasts the result to every row. Rows of a partition do not need to be adjacent.
///
/// Returns an `EmptyPartition` error when `rows` is empty.
pub fn partition_min_max<T, K, V, FK, FV>(
    rows: &[T],
    key: FK,
    value: FV,
) -> Result<Vec<MinMax<V>>, AnalyticsError>
where
    K: Ord + Display,
    V: Ord + Copy,
    FK: Fn(&T) -> K,
    FV: Fn(&T) -> V,
{
    if rows.is_empty() {
        return Err(AnalyticsError::EmptyPartition(String::from(
            "min/max requested over zero rows",
        )));
    }

    let mut partitions: BTreeMap<K, MinMax<V>> = BTreeMap::new();
    for row in rows {
        let v = value(row);
        partitions
            .entry(key(row))
            .and_modify(|mm| {
                mm.min = mm.min.min(v);
                mm.max = mm.max.max(v);
            })
            .or_insert(MinMax { min: v, max: v });
    }

    rows.iter()
        .map(|row| {
            let k = key(row);
            partitions
                .get(&k)
                .copied()
                .ok_or_else(|| AnalyticsError::EmptyPartition(format!("partition {k}")))
        })
        .collect()
}
