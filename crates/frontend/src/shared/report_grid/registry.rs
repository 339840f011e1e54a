use super::error::ReportGridError;
use contracts::shared::report_grid::ColumnDef;
use std::collections::HashSet;

/// Static column configuration of one report grid
///
/// Built once when the report view mounts and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ColumnRegistry {
    columns: Vec<ColumnDef>,
}

impl ColumnRegistry {
    /// Builds a registry from columns in display order.
    ///
    /// Column ids and request keys of filterable columns must be unique.
    pub fn new(columns: Vec<ColumnDef>) -> Result<Self, ReportGridError> {
        let mut ids = HashSet::new();
        let mut keys = HashSet::new();
        for col in &columns {
            if !ids.insert(col.id) {
                return Err(ReportGridError::DuplicateColumn(col.id.to_string()));
            }
            if !col.filterable {
                continue;
            }
            for key in col.request_keys() {
                if !keys.insert(key.clone()) {
                    return Err(ReportGridError::DuplicateColumn(key));
                }
            }
        }
        Ok(Self { columns })
    }

    pub fn get_config(&self, column: &str) -> Result<&ColumnDef, ReportGridError> {
        self.columns
            .iter()
            .find(|c| c.id == column)
            .ok_or_else(|| ReportGridError::UnknownColumn(column.to_string()))
    }

    /// Columns that render a filter icon, in display order
    pub fn list_filterable_columns(&self) -> Vec<&ColumnDef> {
        self.columns.iter().filter(|c| c.filterable).collect()
    }

    /// Every column in display order
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c.id == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::report_grid::{FilterKind, ValueDomain};

    fn col(id: &'static str, key: &'static str, filterable: bool) -> ColumnDef {
        ColumnDef {
            id,
            name: id,
            filter_kind: FilterKind::Text,
            backend_key: key,
            value_domain: ValueDomain::String,
            filterable,
            facet_key: None,
            choices: &[],
        }
    }

    #[test]
    fn test_lookup_and_filterable_order() {
        let reg = ColumnRegistry::new(vec![
            col("ticket_item_id", "", false),
            col("customer_name", "customerIds", true),
            col("product_size", "", false),
            col("action", "action", true),
        ])
        .unwrap();

        assert_eq!(reg.get_config("action").unwrap().backend_key, "action");
        assert_eq!(
            reg.get_config("nope"),
            Err(ReportGridError::UnknownColumn("nope".into()))
        );

        let ids: Vec<_> = reg.list_filterable_columns().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["customer_name", "action"]);
        assert_eq!(reg.columns().len(), 4);
    }

    #[test]
    fn test_duplicates_rejected() {
        let err = ColumnRegistry::new(vec![col("a", "x", true), col("a", "y", true)]).unwrap_err();
        assert_eq!(err, ReportGridError::DuplicateColumn("a".into()));

        let err = ColumnRegistry::new(vec![col("a", "x", true), col("b", "x", true)]).unwrap_err();
        assert_eq!(err, ReportGridError::DuplicateColumn("x".into()));

        let mut range = col("d", "inspectionDate", true);
        range.filter_kind = FilterKind::DateRange;
        let err = ColumnRegistry::new(vec![range, col("e", "inspectionDateTo", true)]).unwrap_err();
        assert_eq!(err, ReportGridError::DuplicateColumn("inspectionDateTo".into()));

        // non-filterable columns may share an empty backend key
        assert!(ColumnRegistry::new(vec![col("a", "", false), col("b", "", false)]).is_ok());
    }
}
