#![doc(test(attr(deny(warnings))))]

//! Spendboard aggregates expense and limit records from a Record Store API
//! into per-category spend, limit and remaining series plus top-N rankings,
//! and renders them in a terminal dashboard.

pub mod cli;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod utils;

use std::sync::Once;

pub use client::{HttpRecordStore, RecordStore};
pub use dashboard::{DashboardController, LoadOutcome, RequestSequencer};
pub use errors::{CliError, DashboardError, Result};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Spendboard tracing initialized.");
    });
}
