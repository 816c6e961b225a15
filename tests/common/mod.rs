#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use spendboard::errors::{DashboardError, Result};
use spendboard::RecordStore;
use spendboard_core::{DateRange, FixedClock};
use spendboard_domain::{ExpenseRecord, LimitRecord, ReferenceEntry};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique config directory for one test.
pub fn temp_config_dir() -> std::path::PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn march_clock() -> FixedClock {
    FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date"))
}

pub fn sample_expenses() -> Vec<ExpenseRecord> {
    vec![
        ExpenseRecord::new("1", "food", 30.0)
            .with_payment_method("pix")
            .with_item("groceries"),
        ExpenseRecord::new("2", "food", 50.0)
            .with_payment_method("credit")
            .with_item("restaurant"),
        ExpenseRecord::new("3", "transport", 20.0)
            .with_payment_method("pix")
            .with_item("bus"),
    ]
}

pub fn sample_limits() -> Vec<LimitRecord> {
    vec![
        LimitRecord::new("10", "food", 100.0),
        LimitRecord::new("11", "transport", 10.0),
    ]
}

/// Record Store double that serves queued responses and records the ranges it saw.
#[derive(Default)]
pub struct ScriptedStore {
    expenses: Mutex<VecDeque<Result<Vec<ExpenseRecord>>>>,
    limits: Mutex<VecDeque<Result<Vec<LimitRecord>>>>,
    categories: Mutex<Option<Result<Vec<ReferenceEntry>>>>,
    payment_methods: Mutex<Option<Result<Vec<ReferenceEntry>>>>,
    pub seen_ranges: Mutex<Vec<DateRange>>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_records(&self, expenses: Vec<ExpenseRecord>, limits: Vec<LimitRecord>) {
        self.expenses.lock().unwrap().push_back(Ok(expenses));
        self.limits.lock().unwrap().push_back(Ok(limits));
    }

    pub fn push_failure(&self) {
        self.expenses
            .lock()
            .unwrap()
            .push_back(Err(DashboardError::Status {
                endpoint: "spents".into(),
                status: 500,
            }));
        self.limits.lock().unwrap().push_back(Ok(Vec::new()));
    }

    pub fn set_categories(&self, result: Result<Vec<ReferenceEntry>>) {
        *self.categories.lock().unwrap() = Some(result);
    }

    pub fn set_payment_methods(&self, result: Result<Vec<ReferenceEntry>>) {
        *self.payment_methods.lock().unwrap() = Some(result);
    }
}

fn take_reference(slot: &Mutex<Option<Result<Vec<ReferenceEntry>>>>) -> Result<Vec<ReferenceEntry>> {
    slot.lock().unwrap().take().unwrap_or_else(|| Ok(Vec::new()))
}

#[async_trait]
impl RecordStore for ScriptedStore {
    async fn expenses(&self, range: &DateRange) -> Result<Vec<ExpenseRecord>> {
        self.seen_ranges.lock().unwrap().push(*range);
        self.expenses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn limits(&self) -> Result<Vec<LimitRecord>> {
        self.limits
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn categories(&self) -> Result<Vec<ReferenceEntry>> {
        take_reference(&self.categories)
    }

    async fn payment_methods(&self) -> Result<Vec<ReferenceEntry>> {
        take_reference(&self.payment_methods)
    }

    async fn payment_owners(&self) -> Result<Vec<ReferenceEntry>> {
        Ok(Vec::new())
    }
}

pub fn page(items: Value) -> Value {
    let total = items.as_array().map_or(0, Vec::len);
    json!({ "items": items, "total": total, "page": 1, "size": 1000, "pages": 1 })
}

pub fn expenses_json() -> Value {
    json!([
        {
            "id": 1,
            "category": "food",
            "amount": 30.0,
            "payment_method": "pix",
            "payment_owner": "ana",
            "item_bought": "groceries",
            "location": null,
            "created_at": "2024-03-02T10:15:00"
        },
        {
            "id": 2,
            "category": "transport",
            "amount": 20.0,
            "payment_method": "credit",
            "payment_owner": null,
            "item_bought": "bus",
            "location": "center",
            "created_at": "2024-03-05T08:00:00.123456"
        }
    ])
}

pub fn limits_json() -> Value {
    json!([
        { "id": 7, "category": "food", "amount": 100.0, "created_at": "2024-01-01T00:00:00" }
    ])
}

/// Mounts every Record Store listing on `server` with the sample payloads.
pub async fn mount_record_store(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/spents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(expenses_json())))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/limits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(limits_json())))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/categories/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
            { "id": 1, "key": "food", "display_name": "Food" },
            { "id": 2, "key": "transport", "display_name": "Transport" }
        ]))))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/payment-methods"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
            { "id": 1, "key": "pix", "display_name": "PIX" }
        ]))))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/payment-owners"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([]))))
        .mount(server)
        .await;
}
