//! Display formatting of report cells

use contracts::shared::report_grid::{CellValue, ColumnDef};

/// Placeholder for missing values
pub const EMPTY_CELL: &str = "-";

/// "Yes" / "No", or "-" when unknown
pub fn format_boolean(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "Yes",
        Some(false) => "No",
        None => EMPTY_CELL,
    }
}

/// Format ISO date or datetime string to DD/MM/YYYY
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15/03/2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}/{}/{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// Text shown in a table cell (and written to the CSV export)
pub fn display_cell(column: &ColumnDef, cell: &CellValue) -> String {
    match cell {
        CellValue::Text(s) if s.is_empty() => EMPTY_CELL.to_string(),
        CellValue::Text(s) => column.choice_label(s).to_string(),
        CellValue::Integer(n) => n.to_string(),
        CellValue::Bool(b) => format_boolean(Some(*b)).to_string(),
        CellValue::Date(d) => format_date(d),
        CellValue::Empty => EMPTY_CELL.to_string(),
    }
}

/// Raw value of a cell as a filter option value; `None` for empty cells
pub fn cell_key(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Text(s) | CellValue::Date(s) if !s.is_empty() => Some(s.clone()),
        CellValue::Integer(n) => Some(n.to_string()),
        CellValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::report_grid::{ChoiceDef, FilterKind, ValueDomain};

    const STATUS: &[ChoiceDef] = &[
        ChoiceDef { value: "0", label: "Open" },
        ChoiceDef { value: "1", label: "Closed" },
    ];

    fn column(choices: &'static [ChoiceDef]) -> ColumnDef {
        ColumnDef {
            id: "c",
            name: "C",
            filter_kind: FilterKind::SingleChoice,
            backend_key: "c",
            value_domain: ValueDomain::String,
            filterable: true,
            facet_key: None,
            choices,
        }
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_format_boolean() {
        assert_eq!(format_boolean(Some(true)), "Yes");
        assert_eq!(format_boolean(Some(false)), "No");
        assert_eq!(format_boolean(None), "-");
    }

    #[test]
    fn test_display_cell() {
        let status = column(STATUS);
        assert_eq!(display_cell(&status, &CellValue::Text("1".into())), "Closed");
        assert_eq!(display_cell(&status, &CellValue::Text("7".into())), "7");

        let plain = column(&[]);
        assert_eq!(display_cell(&plain, &CellValue::Empty), "-");
        assert_eq!(display_cell(&plain, &CellValue::Text(String::new())), "-");
        assert_eq!(display_cell(&plain, &CellValue::Integer(42)), "42");
        assert_eq!(display_cell(&plain, &CellValue::Bool(false)), "No");
        assert_eq!(display_cell(&plain, &CellValue::Date("2023-12-01T00:00:00Z".into())), "01/12/2023");
    }

    #[test]
    fn test_cell_key() {
        assert_eq!(cell_key(&CellValue::Text("Giza".into())), Some("Giza".into()));
        assert_eq!(cell_key(&CellValue::Integer(3)), Some("3".into()));
        assert_eq!(cell_key(&CellValue::Text(String::new())), None);
        assert_eq!(cell_key(&CellValue::Empty), None);
    }
}
