//! spendboard-domain
//!
//! Pure record models (expenses, limits, reference data, pages) as returned by
//! the Record Store. No I/O, no CLI, no HTTP. Only data types and shared traits.

pub mod common;
pub mod expense;
pub mod limit;
pub mod page;
pub mod reference;

pub use common::*;
pub use expense::*;
pub use limit::*;
pub use page::*;
pub use reference::*;
