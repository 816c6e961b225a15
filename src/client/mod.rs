//! Access to the Record Store REST API.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use spendboard_config::Config;
use spendboard_core::DateRange;
use spendboard_domain::{ExpenseRecord, LimitRecord, Page, ReferenceEntry};
use tracing::{debug, warn};
use url::Url;

use crate::errors::{DashboardError, Result};

pub const SPENTS_PATH: &str = "spents";
pub const LIMITS_PATH: &str = "limits";
pub const CATEGORIES_PATH: &str = "categories/";
pub const PAYMENT_METHODS_PATH: &str = "payment-methods";
pub const PAYMENT_OWNERS_PATH: &str = "payment-owners";

/// Source of the record lists the dashboard aggregates.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Expenses inside `range`; unset boundaries are not sent.
    async fn expenses(&self, range: &DateRange) -> Result<Vec<ExpenseRecord>>;

    async fn limits(&self) -> Result<Vec<LimitRecord>>;

    async fn categories(&self) -> Result<Vec<ReferenceEntry>>;

    async fn payment_methods(&self) -> Result<Vec<ReferenceEntry>>;

    async fn payment_owners(&self) -> Result<Vec<ReferenceEntry>>;
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    async fn expenses(&self, range: &DateRange) -> Result<Vec<ExpenseRecord>> {
        (**self).expenses(range).await
    }

    async fn limits(&self) -> Result<Vec<LimitRecord>> {
        (**self).limits().await
    }

    async fn categories(&self) -> Result<Vec<ReferenceEntry>> {
        (**self).categories().await
    }

    async fn payment_methods(&self) -> Result<Vec<ReferenceEntry>> {
        (**self).payment_methods().await
    }

    async fn payment_owners(&self) -> Result<Vec<ReferenceEntry>> {
        (**self).payment_owners().await
    }
}

/// HTTP implementation of [`RecordStore`]. Constructed explicitly and passed
/// to whoever needs it.
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    base_url: String,
    client: reqwest::Client,
    page_size: u32,
}

impl HttpRecordStore {
    /// Builds a client from the configured base URL, page size and timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Self::with_client(&config.api_base_url, client, config.page_size)
    }

    pub fn with_client(base_url: &str, client: reqwest::Client, page_size: u32) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url)?;
        Ok(Self {
            base_url,
            client,
            page_size,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Full URL for `path` with `query` appended in order.
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path.trim_start_matches('/')))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn size_query(&self) -> Vec<(&'static str, String)> {
        vec![("size", self.page_size.to_string())]
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = self.endpoint(path, query)?;
        debug!(%url, "requesting record page");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let page: Page<T> =
            serde_json::from_slice(&body).map_err(|err| DashboardError::Decode {
                endpoint: path.to_string(),
                message: err.to_string(),
            })?;
        if page.is_truncated() {
            warn!(
                endpoint = path,
                received = page.items.len(),
                total = page.total,
                "record list truncated by page size"
            );
        }
        Ok(page.into_items())
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn expenses(&self, range: &DateRange) -> Result<Vec<ExpenseRecord>> {
        let mut query = self.size_query();
        query.extend(range.query_pairs());
        self.get_page(SPENTS_PATH, &query).await
    }

    async fn limits(&self) -> Result<Vec<LimitRecord>> {
        self.get_page(LIMITS_PATH, &self.size_query()).await
    }

    async fn categories(&self) -> Result<Vec<ReferenceEntry>> {
        self.get_page(CATEGORIES_PATH, &[]).await
    }

    async fn payment_methods(&self) -> Result<Vec<ReferenceEntry>> {
        self.get_page(PAYMENT_METHODS_PATH, &self.size_query()).await
    }

    async fn payment_owners(&self) -> Result<Vec<ReferenceEntry>> {
        self.get_page(PAYMENT_OWNERS_PATH, &self.size_query()).await
    }
}
