use serde::{Deserialize, Serialize};

/// Kind of filter editor a report column exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Checkbox list of facet options
    MultiSelect,
    /// Free text
    Text,
    /// Yes / No / All
    Boolean,
    /// From / To dates
    DateRange,
    /// One of a fixed list of choices, or "All"
    SingleChoice,
}

impl FilterKind {
    pub fn label(&self) -> &'static str {
        match self {
            FilterKind::MultiSelect => "multi-select",
            FilterKind::Text => "text",
            FilterKind::Boolean => "boolean",
            FilterKind::DateRange => "date range",
            FilterKind::SingleChoice => "single choice",
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Type of the values the backend expects for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueDomain {
    String,
    Number,
    Boolean,
    Date,
}

/// Fixed choice of a single-choice column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceDef {
    /// Value sent to the backend (e.g. "0")
    pub value: &'static str,
    /// Text shown next to the radio button (e.g. "Open")
    pub label: &'static str,
}

/// Definition of a single report column (static version)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column identifier, equal to the row field it renders (e.g. "customer_name")
    pub id: &'static str,
    /// Header text (e.g. "Customer")
    pub name: &'static str,
    /// Filter editor for this column
    pub filter_kind: FilterKind,
    /// Key of the column in the request `filters` map (e.g. "customerIds");
    /// date-range columns send `<key>From` and `<key>To` instead
    pub backend_key: &'static str,
    /// Value type the backend expects under `backend_key`
    pub value_domain: ValueDomain,
    /// When false the header renders without a filter icon
    pub filterable: bool,
    /// Entry of `available_filters` that feeds the option list
    pub facet_key: Option<&'static str>,
    /// Choices of a single-choice column, empty otherwise
    pub choices: &'static [ChoiceDef],
}

impl ColumnDef {
    /// Lower bound key of a date-range column (e.g. "inspectionDateFrom")
    pub fn range_from_key(&self) -> String {
        format!("{}From", self.backend_key)
    }

    /// Upper bound key of a date-range column (e.g. "inspectionDateTo")
    pub fn range_to_key(&self) -> String {
        format!("{}To", self.backend_key)
    }

    /// Every request key this column may write
    pub fn request_keys(&self) -> Vec<String> {
        match self.filter_kind {
            FilterKind::DateRange => vec![self.range_from_key(), self.range_to_key()],
            _ => vec![self.backend_key.to_string()],
        }
    }

    /// Label of a single-choice value, falling back to the raw value
    pub fn choice_label<'a>(&self, value: &'a str) -> &'a str {
        self.choices
            .iter()
            .find(|c| c.value == value)
            .map(|c| c.label)
            .unwrap_or(value)
    }
}

/// Owned version of ColumnDef for API responses and persisted layouts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefOwned {
    pub id: String,
    pub name: String,
    pub filter_kind: FilterKind,
    pub backend_key: String,
    pub value_domain: ValueDomain,
    pub filterable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_key: Option<String>,
}

impl From<&ColumnDef> for ColumnDefOwned {
    fn from(col: &ColumnDef) -> Self {
        Self {
            id: col.id.to_string(),
            name: col.name.to_string(),
            filter_kind: col.filter_kind,
            backend_key: col.backend_key.to_string(),
            value_domain: col.value_domain,
            filterable: col.filterable,
            facet_key: col.facet_key.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS_CHOICES: &[ChoiceDef] = &[
        ChoiceDef { value: "0", label: "Open" },
        ChoiceDef { value: "1", label: "Closed" },
    ];

    fn status_column() -> ColumnDef {
        ColumnDef {
            id: "ticket_status",
            name: "Status",
            filter_kind: FilterKind::SingleChoice,
            backend_key: "ticketStatus",
            value_domain: ValueDomain::String,
            filterable: true,
            facet_key: None,
            choices: STATUS_CHOICES,
        }
    }

    #[test]
    fn test_choice_label() {
        let col = status_column();
        assert_eq!(col.choice_label("0"), "Open");
        assert_eq!(col.choice_label("1"), "Closed");
        assert_eq!(col.choice_label("2"), "2");
    }

    #[test]
    fn test_date_range_uses_two_request_keys() {
        let col = ColumnDef {
            id: "inspection_date",
            name: "Inspection Date",
            filter_kind: FilterKind::DateRange,
            backend_key: "inspectionDate",
            value_domain: ValueDomain::Date,
            filterable: true,
            facet_key: None,
            choices: &[],
        };
        assert_eq!(col.request_keys(), vec!["inspectionDateFrom", "inspectionDateTo"]);
        assert_eq!(status_column().request_keys(), vec!["ticketStatus"]);
    }

    #[test]
    fn test_filter_kind_serde_name() {
        let json = serde_json::to_string(&FilterKind::DateRange).unwrap();
        assert_eq!(json, "\"date_range\"");
        let owned = ColumnDefOwned::from(&status_column());
        assert_eq!(owned.backend_key, "ticketStatus");
        assert!(owned.facet_key.is_none());
    }
}
