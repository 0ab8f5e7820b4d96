//! finwin computes window-function analytics over department expense data.
//!
//! The engine is a set of pure functions: `model` holds the checked input tables, `aggregate`
//! groups and sums transactions, `window` provides ranking, frame, offset, partition and ntile
//! functions, and `report` combines them into the four analyses. `format` renders report rows,
//! while `source`, `config` and `commands` form the CLI shell around the engine.

pub mod aggregate;
pub mod args;
pub mod commands;
mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod report;
pub mod source;
mod utils;
pub mod window;


pub use config::Config;
pub use error::{AnalyticsError, Error, Result};
pub use model::{Amount, Dataset};
pub use source::Mode;
