//! Column set of the ticket-items report

use crate::shared::report_grid::{ColumnRegistry, ReportGridConfig, ReportGridError};
use contracts::shared::report_grid::{ChoiceDef, ColumnDef, FilterKind, ValueDomain};

pub const REPORT_ID: &str = "p950_ticket_items_report";
pub const ENDPOINT: &str = "/api/reports/ticket-items";
pub const EXPORT_FILENAME: &str = "ticket-report-export.csv";

/// Key under which the company scope is merged into every request
pub const COMPANY_SCOPE_KEY: &str = "companyId";

pub const TICKET_STATUSES: &[ChoiceDef] = &[
    ChoiceDef { value: "0", label: "Open" },
    ChoiceDef { value: "1", label: "Closed" },
];

const fn column(
    id: &'static str,
    name: &'static str,
    filter_kind: FilterKind,
    backend_key: &'static str,
    value_domain: ValueDomain,
    facet_key: Option<&'static str>,
) -> ColumnDef {
    ColumnDef {
        id,
        name,
        filter_kind,
        backend_key,
        value_domain,
        filterable: true,
        facet_key,
        choices: &[],
    }
}

const fn display_only(id: &'static str, name: &'static str) -> ColumnDef {
    ColumnDef {
        id,
        name,
        filter_kind: FilterKind::Text,
        backend_key: id,
        value_domain: ValueDomain::String,
        filterable: false,
        facet_key: None,
        choices: &[],
    }
}

const fn multi(id: &'static str, name: &'static str, backend_key: &'static str, facet: &'static str) -> ColumnDef {
    column(id, name, FilterKind::MultiSelect, backend_key, ValueDomain::Number, Some(facet))
}

const fn yes_no(id: &'static str, name: &'static str, backend_key: &'static str) -> ColumnDef {
    column(id, name, FilterKind::Boolean, backend_key, ValueDomain::Boolean, None)
}

/// Table columns in display order
pub const TICKET_ITEM_COLUMNS: &[ColumnDef] = &[
    display_only("ticket_item_id", "ID"),
    multi("customer_name", "Customer", "customerIds", "customers"),
    // the backend spells the key "governomate"
    multi("governorate_name", "Governorate", "governomateIds", "governorates"),
    multi("city_name", "City", "cityIds", "cities"),
    multi("ticket_id", "Ticket ID", "ticketIds", "tickets"),
    multi("ticket_category_name", "Category", "ticketCatIds", "ticket_categories"),
    ColumnDef {
        id: "ticket_status",
        name: "Status",
        filter_kind: FilterKind::SingleChoice,
        backend_key: "ticketStatus",
        value_domain: ValueDomain::String,
        filterable: true,
        facet_key: Some("ticket_statuses"),
        choices: TICKET_STATUSES,
    },
    multi("product_name", "Product", "productIds", "products"),
    display_only("product_size", "Size"),
    multi("request_reason_name", "Request Reason", "requestReasonIds", "request_reasons"),
    yes_no("inspected", "Inspected", "inspected"),
    column(
        "inspection_date",
        "Inspection Date",
        FilterKind::DateRange,
        "inspectionDate",
        ValueDomain::Date,
        None,
    ),
    yes_no("client_approval", "Client Approval", "clientApproval"),
    // the backend takes one action string
    column("action", "Action", FilterKind::SingleChoice, "action", ValueDomain::String, Some("actions")),
    yes_no("pulled_status", "Pulled Status", "pulledStatus"),
    yes_no("delivered_status", "Delivered Status", "deliveredStatus"),
];

/// Column ids of the CSV export, in file order
pub const EXPORT_COLUMNS: &[&str] = &[
    "ticket_id",
    "ticket_status",
    "customer_name",
    "governorate_name",
    "city_name",
    "ticket_category_name",
    "product_name",
    "product_size",
    "request_reason_name",
    "inspected",
    "inspection_date",
    "client_approval",
    "action",
    "pulled_status",
    "delivered_status",
];

pub fn registry() -> Result<ColumnRegistry, ReportGridError> {
    ColumnRegistry::new(TICKET_ITEM_COLUMNS.to_vec())
}

pub fn export_columns(registry: &ColumnRegistry) -> Result<Vec<ColumnDef>, ReportGridError> {
    EXPORT_COLUMNS
        .iter()
        .map(|id| registry.get_config(id).cloned())
        .collect()
}

pub fn grid_config() -> ReportGridConfig {
    ReportGridConfig::new(REPORT_ID, ENDPOINT)
}
