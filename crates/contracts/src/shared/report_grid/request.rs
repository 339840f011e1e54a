use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a filtered report request
///
/// `filters` holds one entry per applied column, keyed by the column's
/// backend key. A column without a filter is absent, never `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportQuery {
    pub filters: Map<String, Value>,
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
}

impl ReportQuery {
    /// Returns a copy with `scope` entries merged into `filters`.
    /// Existing filter keys win over scope keys.
    pub fn with_scope(&self, scope: &Map<String, Value>) -> ReportQuery {
        let mut filters = scope.clone();
        for (key, value) in &self.filters {
            filters.insert(key.clone(), value.clone());
        }
        ReportQuery {
            filters,
            page: self.page,
            limit: self.limit,
        }
    }
}
