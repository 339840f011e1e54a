use crate::shared::report_grid::{CellValue, ReportRow};
use serde::{Deserialize, Deserializer, Serialize};

/// Row of the ticket-items report (one row per ticket item)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketItemDto {
    pub ticket_item_id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    // the backend column is spelled "governomate_id"
    #[serde(rename = "governomate_id")]
    pub governorate_id: i64,
    pub governorate_name: String,
    pub city_id: i64,
    pub city_name: String,
    pub ticket_id: i64,
    pub company_id: i64,
    pub ticket_cat_id: i64,
    pub ticket_category_name: String,
    /// "0"/"1" or "open"/"closed" depending on the endpoint version
    #[serde(deserialize_with = "string_or_number")]
    pub ticket_status: String,
    pub product_id: i64,
    pub product_name: String,
    #[serde(default)]
    pub product_size: Option<String>,
    pub request_reason_id: i64,
    pub request_reason_name: String,
    pub inspected: bool,
    #[serde(default)]
    pub inspection_date: Option<String>,
    pub client_approval: bool,
    #[serde(default)]
    pub action: Option<String>,
    pub pulled_status: bool,
    pub delivered_status: bool,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

fn text(s: &str) -> CellValue {
    if s.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(s.to_string())
    }
}

fn opt_text(s: &Option<String>) -> CellValue {
    s.as_deref().map(text).unwrap_or(CellValue::Empty)
}

/// Status as the "0"/"1" code the status filter works with
fn status_code(raw: &str) -> &str {
    match raw.to_ascii_lowercase().as_str() {
        "open" => "0",
        "closed" => "1",
        _ => raw,
    }
}

impl ReportRow for TicketItemDto {
    type Id = i64;

    fn row_id(&self) -> i64 {
        self.ticket_item_id
    }

    fn cell(&self, column_id: &str) -> CellValue {
        match column_id {
            "ticket_item_id" => CellValue::Integer(self.ticket_item_id),
            "customer_name" => text(&self.customer_name),
            "governorate_name" => text(&self.governorate_name),
            "city_name" => text(&self.city_name),
            "ticket_id" => CellValue::Integer(self.ticket_id),
            "ticket_category_name" => text(&self.ticket_category_name),
            "ticket_status" => text(status_code(&self.ticket_status)),
            "product_name" => text(&self.product_name),
            "product_size" => opt_text(&self.product_size),
            "request_reason_name" => text(&self.request_reason_name),
            "inspected" => CellValue::Bool(self.inspected),
            "inspection_date" => self
                .inspection_date
                .as_ref()
                .filter(|d| !d.is_empty())
                .map(|d| CellValue::Date(d.clone()))
                .unwrap_or(CellValue::Empty),
            "client_approval" => CellValue::Bool(self.client_approval),
            "action" => opt_text(&self.action),
            "pulled_status" => CellValue::Bool(self.pulled_status),
            "delivered_status" => CellValue::Bool(self.delivered_status),
            _ => CellValue::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_item() -> serde_json::Value {
        json!({
            "ticket_item_id": 11,
            "customer_id": 5,
            "customer_name": "Mona Adel",
            "governomate_id": 1,
            "governorate_name": "Cairo",
            "city_id": 7,
            "city_name": "Nasr City",
            "ticket_id": 300,
            "company_id": 1,
            "ticket_cat_id": 2,
            "ticket_category_name": "Maintenance",
            "ticket_status": 0,
            "product_id": 9,
            "product_name": "Ortho Mattress",
            "product_size": "160x200",
            "request_reason_id": 4,
            "request_reason_name": "Sagging",
            "inspected": true,
            "inspection_date": "2024-03-15T00:00:00.000Z",
            "client_approval": false,
            "action": null,
            "pulled_status": false,
            "delivered_status": false
        })
    }

    #[test]
    fn test_deserialize_numeric_status_and_typo_key() {
        let item: TicketItemDto = serde_json::from_value(raw_item()).unwrap();
        assert_eq!(item.ticket_status, "0");
        assert_eq!(item.governorate_id, 1);
        assert_eq!(item.action, None);
    }

    #[test]
    fn test_textual_status_is_normalized() {
        let mut raw = raw_item();
        raw["ticket_status"] = json!("Closed");
        let item: TicketItemDto = serde_json::from_value(raw).unwrap();
        assert_eq!(item.ticket_status, "Closed");
        assert_eq!(item.cell("ticket_status"), CellValue::Text("1".into()));
    }

    #[test]
    fn test_cells() {
        let item: TicketItemDto = serde_json::from_value(raw_item()).unwrap();
        assert_eq!(item.row_id(), 11);
        assert_eq!(item.cell("customer_name"), CellValue::Text("Mona Adel".into()));
        assert_eq!(item.cell("inspected"), CellValue::Bool(true));
        assert_eq!(
            item.cell("inspection_date"),
            CellValue::Date("2024-03-15T00:00:00.000Z".into())
        );
        assert_eq!(item.cell("action"), CellValue::Empty);
        assert_eq!(item.cell("ticket_status"), CellValue::Text("0".into()));
        assert_eq!(item.cell("no_such_column"), CellValue::Empty);
    }
}
