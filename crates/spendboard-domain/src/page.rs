use serde::{Deserialize, Serialize};

/// Paginated list envelope used by every Record Store listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub pages: u64,
}

impl<T> Page<T> {
    pub fn from_items(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self {
            items,
            total,
            page: 1,
            size: total,
            pages: u64::from(total > 0),
        }
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns `true` when the server reports more items than this page carries.
    pub fn is_truncated(&self) -> bool {
        self.total > self.items.len() as u64 && self.pages > 1
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::from_items(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn only_items_are_required() {
        let page: Page<u32> = serde_json::from_str(r#"{"items":[1,2,3]}"#).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total, 0);
        assert!(!page.is_truncated());
    }

    #[test]
    fn reports_truncation_when_total_exceeds_items() {
        let page: Page<u32> =
            serde_json::from_str(r#"{"items":[1],"total":5,"page":1,"size":1,"pages":5}"#)
                .unwrap();
        assert!(page.is_truncated());
    }
}
