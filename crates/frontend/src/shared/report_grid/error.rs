use contracts::shared::report_grid::FilterKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportGridError {
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("column '{0}' is registered twice")]
    DuplicateColumn(String),

    #[error("column '{column}' expects a {expected} filter, got {actual}")]
    InvalidFilterValue {
        column: String,
        expected: FilterKind,
        actual: FilterKind,
    },

    #[error("invalid pagination: page {page}, page size {page_size}")]
    InvalidPagination { page: u32, page_size: u32 },

    #[error("{0}")]
    QueryFailure(String),

    #[error("stored filter state is corrupt: {0}")]
    PersistenceCorrupt(String),
}
