//! Filtering / pagination / selection engine behind the report grids.
//!
//! Nothing in this module touches the DOM: the Leptos pages bind a
//! [`ReportGridController`] to signals and drive requests with `spawn_local`.

pub mod config;
pub mod controller;
pub mod data_source;
pub mod error;
pub mod filter_store;
pub mod filter_value;
pub mod format;
pub mod pagination;
pub mod persistence;
pub mod query_builder;
pub mod registry;
pub mod selection;

pub use config::ReportGridConfig;
pub use controller::{
    dispatch, Completion, GridSnapshot, GridState, GridStatus, PendingRequest, ReportGridController,
};
pub use data_source::{HttpReportDataSource, ReportDataSource, ReportPage};
pub use error::ReportGridError;
pub use filter_store::{FilterState, FilterValueStore};
pub use filter_value::{DateRange, FilterValue};
pub use pagination::{PaginationController, PaginationView};
pub use persistence::{FilterStorage, LocalFilterStorage, MemoryFilterStorage};
pub use query_builder::QueryBuilder;
pub use registry::ColumnRegistry;
pub use selection::SelectionController;
