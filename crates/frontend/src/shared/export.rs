//! CSV export of report rows
use crate::shared::report_grid::format::display_cell;
use contracts::shared::report_grid::{ColumnDef, ReportRow};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

const SEPARATOR: char = ',';

/// Builds CSV text: a header line with the column names, then one line per
/// row with the cells formatted as on screen.
pub fn build_csv<R: ReportRow>(columns: &[ColumnDef], rows: &[&R]) -> String {
    let mut csv_content = String::new();

    // UTF-8 BOM so spreadsheet apps pick the right encoding
    csv_content.push('\u{FEFF}');

    let headers: Vec<String> = columns.iter().map(|c| escape_csv_cell(c.name)).collect();
    csv_content.push_str(&headers.join(&SEPARATOR.to_string()));
    csv_content.push('\n');

    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|col| escape_csv_cell(&display_cell(col, &row.cell(col.id))))
            .collect();
        csv_content.push_str(&cells.join(&SEPARATOR.to_string()));
        csv_content.push('\n');
    }
    csv_content
}

/// Exports rows to a CSV file and starts the download.
pub fn export_to_csv<R: ReportRow>(columns: &[ColumnDef], rows: &[&R], filename: &str) -> Result<(), String> {
    if rows.is_empty() {
        return Err("No data to export".to_string());
    }

    let blob = create_csv_blob(&build_csv(columns, rows))?;
    download_blob(&blob, filename)?;
    log::info!("exported {} rows to {}", rows.len(), filename);
    Ok(())
}

/// Quotes a cell containing the separator, quotes or line breaks
fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(SEPARATOR) || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        let escaped = cell.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        cell.to_string()
    }
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

/// Downloads a blob through a temporary anchor element
fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::report_grid::{CellValue, FilterKind, ValueDomain};

    struct Item {
        id: i64,
        name: &'static str,
        done: bool,
    }

    impl ReportRow for Item {
        type Id = i64;

        fn row_id(&self) -> i64 {
            self.id
        }

        fn cell(&self, column_id: &str) -> CellValue {
            match column_id {
                "id" => CellValue::Integer(self.id),
                "name" => CellValue::Text(self.name.to_string()),
                "done" => CellValue::Bool(self.done),
                _ => CellValue::Empty,
            }
        }
    }

    fn column(id: &'static str, name: &'static str) -> ColumnDef {
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

    #[test]
    fn test_escape_csv_cell() {
        assert_eq!(escape_csv_cell("plain"), "plain");
        assert_eq!(escape_csv_cell("a,b"), "\"a,b\"");
        assert_eq!(escape_csv_cell("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_build_csv() {
        let columns = [column("id", "Ticket ID"), column("name", "Customer"), column("done", "Inspected")];
        let a = Item { id: 1, name: "Smith, J", done: true };
        let b = Item { id: 2, name: "", done: false };

        let csv = build_csv(&columns, &[&a, &b]);
        let lines: Vec<&str> = csv.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(
            lines,
            vec!["Ticket ID,Customer,Inspected", "1,\"Smith, J\",Yes", "2,-,No"]
        );
    }
}
