//! Per-category spending limits.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::*;

/// Budget ceiling for one category. At most one per category is expected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LimitRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub category: CategoryKey,
    pub amount: f64,
    #[serde(
        default,
        deserialize_with = "deserialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
}

impl LimitRecord {
    pub fn new(id: impl Into<String>, category: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            amount,
            created_at: None,
        }
    }
}

impl Categorized for LimitRecord {
    fn category(&self) -> &str {
        &self.category
    }
}

impl Amounted for LimitRecord {
    fn amount(&self) -> f64 {
        self.amount
    }
}
