use crate::error::AnalyticsError;

/// Assigns each of `len` ordered rows to one of `buckets` groups numbered from 1, as `NTILE` does.
///
/// When `len` does not divide evenly, the first `len % buckets` groups get one extra row. Groups
/// are filled in order, so the output is non-decreasing. With fewer rows than buckets, the
/// trailing buckets are empty.
///
/// Returns an `EmptyPartition` error when `len` or `buckets` is zero.
pub fn ntile(len: usize, buckets: usize) -> Result<Vec<usize>, AnalyticsError> {
    if len == 0 {
        return Err(AnalyticsError::EmptyPartition(String::from(
            "bucketing requested over zero rows",
        )));
    }
    if buckets == 0 {
        return Err(AnalyticsError::EmptyPartition(String::from(
            "bucketing requested into zero buckets",
        )));
    }

    let base_size = len / buckets;
    let remainder = len % buckets;
    let mut out = Vec::with_capacity(len);
    let mut current_bucket = 1usize;
    let mut rows_in_current_bucket = 0usize;

    for _ in 0..len {
        out.push(current_bucket);
        rows_in_current_bucket += 1;
        let bucket_size = if current_bucket <= remainder {
            base_size + 1
        } else {
            base_size
        };
        if rows_in_current_bucket >= bucket_size && current_bucket < buckets {
            current_bucket += 1;
            rows_in_current_bucket = 0;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(assignments: &[usize], buckets: usize) -> Vec<usize> {
        (1..=buckets)
            .map(|b| assignments.iter().filter(|a| **a == b).count())
            .collect()
    }

    #[test]
    fn test_even_split() {
        assert_eq!(ntile(8, 4).unwrap(), vec![1, 1, 2, 2, 3, 3, 4, 4]);
    }

    #[test]
    fn test_remainder_goes_to_first_buckets() {
        assert_eq!(ntile(9, 4).unwrap(), vec![1, 1, 1, 2, 2, 3, 3, 4, 4]);
        assert_eq!(sizes(&ntile(11, 4).unwrap(), 4), vec![3, 3, 3, 2]);
    }

    #[test]
    fn test_fewer_rows_than_buckets() {
        assert_eq!(ntile(3, 4).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_sizes_differ_by_at_most_one() {
        for len in 1..50 {
            let assignments = ntile(len, 4).unwrap();
            assert_eq!(assignments.len(), len);
            let s = sizes(&assignments, 4);
            assert_eq!(s.iter().sum::<usize>(), len);
            let max = s.iter().max().unwrap();
            let min = s.iter().min().unwrap();
            assert!(max - min <= 1, "len {len} gave sizes {s:?}");
        }
    }

    #[test]
    fn test_empty_is_error() {
        assert!(matches!(ntile(0, 4), Err(AnalyticsError::EmptyPartition(_))));
        assert!(matches!(ntile(4, 0), Err(AnalyticsError::EmptyPartition(_))));
    }
}
