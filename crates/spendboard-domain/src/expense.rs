//! Expense ("spent") records as delivered by the Record Store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::*;

/// A single recorded expense. Never mutated after it is fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub category: CategoryKey,
    pub amount: f64,
    pub payment_method: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub payment_owner: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub item_bought: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub location: String,
    #[serde(
        default,
        deserialize_with = "deserialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
}

impl ExpenseRecord {
    pub fn new(id: impl Into<String>, category: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            amount,
            payment_method: String::new(),
            payment_owner: String::new(),
            item_bought: String::new(),
            location: String::new(),
            created_at: None,
        }
    }

    pub fn with_payment_method(mut self, payment_method: impl Into<String>) -> Self {
        self.payment_method = payment_method.into();
        self
    }

    pub fn with_payment_owner(mut self, payment_owner: impl Into<String>) -> Self {
        self.payment_owner = payment_owner.into();
        self
    }

    pub fn with_item(mut self, item_bought: impl Into<String>) -> Self {
        self.item_bought = item_bought.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

impl Categorized for ExpenseRecord {
    fn category(&self) -> &str {
        &self.category
    }
}

impl Amounted for ExpenseRecord {
    fn amount(&self) -> f64 {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::ExpenseRecord;

    #[test]
    fn deserializes_api_payload_with_integer_id() {
        let json = r#"{
            "id": 42,
            "category": "food",
            "amount": 12.5,
            "payment_method": "nubank",
            "payment_owner": "joao_lucas",
            "item_bought": "coffee",
            "location": null,
            "created_at": "2024-05-02T08:15:00"
        }"#;

        let record: ExpenseRecord = serde_json::from_str(json).expect("deserialize");
        assert_eq!(record.id, "42");
        assert_eq!(record.category, "food");
        assert_eq!(record.location, "");
        assert!(record.created_at.is_some());
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let json = r#"{"id":"a1","category":"transport","amount":3.0,"payment_method":"c6"}"#;
        let record: ExpenseRecord = serde_json::from_str(json).expect("deserialize");
        assert!(record.item_bought.is_empty());
        assert!(record.payment_owner.is_empty());
        assert!(record.created_at.is_none());
    }
}
