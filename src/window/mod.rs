//! Analytic window functions over ordered rows.
//!
//! Every function here takes rows that the caller has already put in the window's order and
//! returns exactly one output per input row, in the same order. Nothing is merged or dropped:
//! grouping happens in `aggregate`, before the window functions run.
//!
//! - `ranking`: `row_number`, `rank` and `dense_rank`
//! - `frame`: running sums and bounded moving averages over a `ROWS` frame
//! - `partition`: per-partition minimum and maximum, broadcast to each row
//! - `offset`: `lag`/`lead`, growth percentage and trend labels
//! - `ntile`: equal-sized bucket assignment

mod frame;
mod ntile;
mod offset;
mod partition;
mod ranking;

pub use frame::{moving_average, rows_frame, running_sum};
pub use ntile::ntile;
pub use offset::{growth_percent, lag, lead, offset, OffsetDirection, Trend};
pub use partition::{partition_min_max, MinMax};
pub use ranking::{rank, Ranks};
