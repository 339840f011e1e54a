use super::error::ReportGridError;
use super::filter_store::FilterState;
use super::filter_value::FilterValue;
use super::registry::ColumnRegistry;
use contracts::shared::report_grid::{ColumnDef, ReportQuery, ValueDomain};
use chrono::NaiveDate;
use serde_json::{Map, Number, Value};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Turns applied filters and the page cursor into a request body
pub struct QueryBuilder<'a> {
    registry: &'a ColumnRegistry,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(registry: &'a ColumnRegistry) -> Self {
        Self { registry }
    }

    /// Builds the query. Every applied column writes its value under its
    /// backend key (a date range writes `<key>From` and/or `<key>To`);
    /// columns without a filter contribute nothing.
    pub fn build(
        &self,
        applied: &FilterState,
        page: u32,
        page_size: u32,
    ) -> Result<ReportQuery, ReportGridError> {
        if page == 0 || page_size == 0 {
            return Err(ReportGridError::InvalidPagination { page, page_size });
        }

        let mut filters = Map::new();
        for (column, value) in applied {
            let config = self.registry.get_config(column)?;
            filters.extend(serialize_entries(config, value));
        }

        Ok(ReportQuery {
            filters,
            page,
            limit: page_size,
        })
    }
}

/// Request entries of a filter value; empty when the value does not
/// constrain anything.
pub fn serialize_entries(column: &ColumnDef, value: &FilterValue) -> Vec<(String, Value)> {
    if !value.is_meaningful() {
        return Vec::new();
    }
    let key = column.backend_key.to_string();
    let domain = column.value_domain;
    match value {
        FilterValue::MultiSelect(set) => {
            vec![(key, Value::Array(set.iter().map(|v| scalar(domain, v)).collect()))]
        }
        FilterValue::Text(s) => vec![(key, Value::String(s.trim().to_string()))],
        FilterValue::Boolean(b) => b.map(|b| (key, Value::Bool(b))).into_iter().collect(),
        FilterValue::DateRange(range) => {
            let from = range.from.map(|d| (column.range_from_key(), iso_date(d)));
            let to = range.to.map(|d| (column.range_to_key(), iso_date(d)));
            from.into_iter().chain(to).collect()
        }
        FilterValue::SingleChoice(choice) => choice
            .as_deref()
            .map(|c| (key, scalar(domain, c)))
            .into_iter()
            .collect(),
    }
}

fn iso_date(date: NaiveDate) -> Value {
    Value::String(date.format(DATE_FORMAT).to_string())
}

/// Converts an option value to the column's value domain, keeping the raw
/// string when it does not parse.
fn scalar(domain: ValueDomain, raw: &str) -> Value {
    match domain {
        ValueDomain::Number => {
            if let Ok(n) = raw.parse::<i64>() {
                return Value::Number(n.into());
            }
            raw.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(raw.to_string()))
        }
        ValueDomain::Boolean => match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Value::Bool(true),
            "false" | "no" | "0" => Value::Bool(false),
            _ => Value::String(raw.to_string()),
        },
        ValueDomain::String | ValueDomain::Date => Value::String(raw.to_string()),
    }
}
