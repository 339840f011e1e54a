use super::error::ReportGridError;
use crate::system::auth::storage;
use async_trait::async_trait;
use contracts::shared::report_grid::{
    ErrorBody, FacetEntry, FilterOption, FilterSummary, ReportQuery, ReportResponse,
};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

pub const SESSION_EXPIRED: &str = "Authentication token expired. Please log in again.";

/// One page of report rows plus everything the server computed alongside it
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPage<R> {
    pub rows: Vec<R>,
    pub page: u32,
    pub total_count: u64,
    pub page_count: u32,
    pub has_next: bool,
    pub has_previous: bool,
    /// Facet key -> distinct values available under the current filters
    pub facets: BTreeMap<String, Vec<FilterOption>>,
    pub summary: Option<FilterSummary>,
}

impl<R> ReportPage<R> {
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            page: 1,
            total_count: 0,
            page_count: 0,
            has_next: false,
            has_previous: false,
            facets: BTreeMap::new(),
            summary: None,
        }
    }
}

/// Source of report pages (the REST endpoint in the browser)
#[async_trait(?Send)]
pub trait ReportDataSource<R> {
    async fn fetch(&self, query: &ReportQuery) -> Result<ReportPage<R>, ReportGridError>;
}

/// Turns a decoded response envelope into a page, or a `QueryFailure`.
pub fn decode_response<R>(response: ReportResponse<R>) -> Result<ReportPage<R>, ReportGridError> {
    if !response.success {
        let reason = response.failure_reason().unwrap_or("API request failed");
        return Err(ReportGridError::QueryFailure(reason.to_string()));
    }
    let data = response
        .data
        .ok_or_else(|| ReportGridError::QueryFailure("Failed to fetch data".to_string()))?;

    let facets = data
        .available_filters
        .into_iter()
        .map(|(key, entries)| {
            let mut seen = HashSet::new();
            let options: Vec<FilterOption> = entries
                .into_iter()
                .filter_map(FacetEntry::into_option)
                .filter(|o| seen.insert(o.value.clone()))
                .collect();
            (key, options)
        })
        .collect();

    let pagination = data.report_data.pagination;
    Ok(ReportPage {
        rows: data.report_data.rows,
        page: pagination.page,
        total_count: pagination.total,
        page_count: pagination.total_pages,
        has_next: pagination.has_next,
        has_previous: pagination.has_previous,
        facets,
        summary: data.filter_summary,
    })
}

/// Report endpoint reached with an authenticated `POST`
///
/// `scope` entries (e.g. `companyId`) are merged into every request's
/// filters; they are not user filters and never show up in filter state.
#[derive(Debug, Clone)]
pub struct HttpReportDataSource {
    url: String,
    scope: Map<String, Value>,
}

impl HttpReportDataSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            scope: Map::new(),
        }
    }

    pub fn with_scope(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.scope.insert(key.to_string(), value.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn get_auth_header() -> Option<String> {
    storage::get_access_token().map(|token| format!("Bearer {}", token))
}

#[async_trait(?Send)]
impl<R> ReportDataSource<R> for HttpReportDataSource
where
    R: DeserializeOwned + 'static,
{
    async fn fetch(&self, query: &ReportQuery) -> Result<ReportPage<R>, ReportGridError> {
        let body = query.with_scope(&self.scope);

        let mut request = Request::post(&self.url);
        if let Some(auth_header) = get_auth_header() {
            request = request.header("Authorization", &auth_header);
        }

        let response = request
            .json(&body)
            .map_err(|e| ReportGridError::QueryFailure(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| ReportGridError::QueryFailure(format!("Failed to send request: {}", e)))?;

        if response.status() == 401 {
            log::warn!("report request rejected with 401, clearing session");
            storage::clear_session();
            return Err(ReportGridError::QueryFailure(SESSION_EXPIRED.to_string()));
        }

        if !response.ok() {
            let status = response.status();
            let body: ErrorBody = response.json().await.unwrap_or_default();
            let message = body
                .error
                .or(body.message)
                .unwrap_or_else(|| format!("HTTP error! status: {}", status));
            return Err(ReportGridError::QueryFailure(message));
        }

        let envelope: ReportResponse<R> = response
            .json()
            .await
            .map_err(|e| ReportGridError::QueryFailure(format!("Failed to parse response: {}", e)))?;

        decode_response(envelope)
    }
}
