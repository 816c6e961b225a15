//! Reference data: categories, payment methods and payment owners.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::*;

/// A `{ key, display_name }` entry served by the reference endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceEntry {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    pub key: String,
    pub display_name: String,
    #[serde(
        default,
        deserialize_with = "deserialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
}

impl ReferenceEntry {
    pub fn new(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            id: key.clone(),
            key,
            display_name: display_name.into(),
            created_at: None,
        }
    }
}

/// Which reference endpoint an entry list came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Category,
    PaymentMethod,
    PaymentOwner,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReferenceKind::Category => "Category",
            ReferenceKind::PaymentMethod => "Payment method",
            ReferenceKind::PaymentOwner => "Payment owner",
        };
        f.write_str(label)
    }
}

/// Resolves keys to display names; unknown keys resolve to themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelMap {
    labels: HashMap<String, String>,
}

impl LabelMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a ReferenceEntry>,
    {
        let labels = entries
            .into_iter()
            .map(|entry| (entry.key.clone(), entry.display_name.clone()))
            .collect();
        Self { labels }
    }

    pub fn insert(&mut self, key: impl Into<String>, display_name: impl Into<String>) {
        self.labels.insert(key.into(), display_name.into());
    }

    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.labels.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
