use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Envelope returned by the report endpoints
///
/// On success `data` is present; on failure `error` (or `message`) carries
/// the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse<R> {
    pub success: bool,
    pub data: Option<ReportResponseData<R>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<R> ReportResponse<R> {
    /// Failure reason carried by the envelope, if any
    pub fn failure_reason(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// Payload of a successful report response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponseData<R> {
    pub report_data: ReportRows<R>,
    /// Distinct values per facet key, computed by the server for the current filters
    #[serde(default)]
    pub available_filters: BTreeMap<String, Vec<FacetEntry>>,
    #[serde(default)]
    pub filter_summary: Option<FilterSummary>,
}

/// Rows of the requested page plus the pagination block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRows<R> {
    #[serde(alias = "ticket_items")]
    pub rows: Vec<R>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Server-side summary of the filters it applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSummary {
    pub total_applied_filters: u32,
    pub active_filters: Vec<String>,
}

/// One entry of an `available_filters` list
///
/// The server sends either `{id, name}` pairs (reference columns) or plain
/// scalars (free-form columns such as `action`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetEntry {
    Labeled { id: Value, name: String },
    Plain(Value),
}

impl FacetEntry {
    /// Normalizes the entry into a filter option; `null`, arrays and
    /// objects yield `None`.
    pub fn into_option(self) -> Option<FilterOption> {
        match self {
            FacetEntry::Labeled { id, name } => {
                let value = scalar_to_string(&id)?;
                Some(FilterOption { value, label: name })
            }
            FacetEntry::Plain(v) => {
                let value = scalar_to_string(&v)?;
                if value.is_empty() {
                    return None;
                }
                Some(FilterOption {
                    label: value.clone(),
                    value,
                })
            }
        }
    }
}

fn scalar_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Option shown in a filter dropdown
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FilterOption {
    /// Value stored in the filter and sent to the backend
    pub value: String,
    /// Text shown to the user
    pub label: String,
}

/// Body of a non-2xx response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
