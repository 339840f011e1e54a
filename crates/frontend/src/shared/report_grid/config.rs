use super::pagination::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS};
use serde::{Deserialize, Serialize};

/// Settings of one report grid instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportGridConfig {
    /// Namespace of the persisted filter state (e.g. "p950_ticket_items_report")
    pub report_id: String,
    /// Endpoint path, relative to the API base (e.g. "/api/reports/ticket-items")
    pub endpoint: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<u32>,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_page_size_options() -> Vec<u32> {
    DEFAULT_PAGE_SIZE_OPTIONS.to_vec()
}

impl ReportGridConfig {
    pub fn new(report_id: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            report_id: report_id.into(),
            endpoint: endpoint.into(),
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        if page_size > 0 {
            self.default_page_size = page_size;
        }
        self
    }

    /// Page size options in ascending order, always including the default size
    pub fn page_size_options(&self) -> Vec<u32> {
        let mut options: Vec<u32> = self
            .page_size_options
            .iter()
            .copied()
            .filter(|&n| n > 0)
            .collect();
        if !options.contains(&self.default_page_size) {
            options.push(self.default_page_size);
        }
        options.sort_unstable();
        options.dedup();
        options
    }
}
