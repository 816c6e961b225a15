//! spendboard-core
//!
//! Aggregation engine, selection state and date-range handling for the
//! spending dashboard. Depends on spendboard-domain. No CLI, no terminal I/O,
//! no network access: every function here works on plain record lists.

pub mod aggregation;
pub mod date_range;
pub mod error;
pub mod format;
pub mod ordered_set;
pub mod selection;
pub mod summary_service;
pub mod time;

pub use aggregation::*;
pub use date_range::DateRange;
pub use error::CoreError;
pub use format::{CurrencyFormatter, DateFormatter};
pub use ordered_set::OrderedKeySet;
pub use selection::SelectionState;
pub use summary_service::*;
pub use time::{Clock, FixedClock};

#[cfg(test)]
mod tests;
