use std::fmt::Debug;
use std::hash::Hash;

/// Value of a single report cell, as extracted for display
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Bool(bool),
    /// ISO date or datetime string
    Date(String),
    /// Missing value (rendered as "-")
    Empty,
}

/// A report row the grid can render and select
///
/// The grid never interprets rows beyond these two accessors.
pub trait ReportRow {
    type Id: Clone + Eq + Hash + Debug;

    /// Identifier used by row selection
    fn row_id(&self) -> Self::Id;

    /// Value of the column with the given id; unknown ids yield `Empty`
    fn cell(&self, column_id: &str) -> CellValue;
}
