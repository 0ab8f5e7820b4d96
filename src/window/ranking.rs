/// The three ranking variants for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ranks {
    /// Position in the ordering, starting at 1. Unique per row.
    pub row_number: usize,
    /// Shared by peers; the next distinct value skips past the peers (1, 2, 2, 4).
    pub rank: usize,
    /// Shared by peers; the next distinct value is one more (1, 2, 2, 3).
    pub dense_rank: usize,
}

/// Ranks `ordered`, which must already be sorted in ranking order. Two adjacent rows are peers
/// when `value` returns equal values for them.
pub fn rank<T, V, F>(ordered: &[T], value: F) -> Vec<Ranks>
where
    V: PartialEq,
    F: Fn(&T) -> V,
{
    let mut out = Vec::with_capacity(ordered.len());
    let mut current_rank = 1usize;
    let mut current_dense = 1usize;
    let mut previous: Option<V> = None;

    for (position, row) in ordered.iter().enumerate() {
        let current = value(row);
        if let Some(prev) = &previous {
            if *prev != current {
                current_rank = position + 1;
                current_dense += 1;
            }
        }
        out.push(Ranks {
            row_number: position + 1,
            rank: current_rank,
            dense_rank: current_dense,
        });
        previous = Some(current);
    }
    out
}
