use chrono::NaiveDate;
use contracts::shared::report_grid::{ColumnDef, FilterKind, FilterOption};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive date bounds; either side may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Filter value of one column, tagged by filter kind
///
/// `Boolean(None)` and `SingleChoice(None)` are the explicit "All" choices;
/// a column that has never been touched simply has no entry in the state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
    MultiSelect(BTreeSet<String>),
    Text(String),
    Boolean(Option<bool>),
    DateRange(DateRange),
    SingleChoice(Option<String>),
}

impl FilterValue {
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterValue::MultiSelect(_) => FilterKind::MultiSelect,
            FilterValue::Text(_) => FilterKind::Text,
            FilterValue::Boolean(_) => FilterKind::Boolean,
            FilterValue::DateRange(_) => FilterKind::DateRange,
            FilterValue::SingleChoice(_) => FilterKind::SingleChoice,
        }
    }

    /// The "no constraint" value of a filter kind
    pub fn empty(kind: FilterKind) -> Self {
        match kind {
            FilterKind::MultiSelect => FilterValue::MultiSelect(BTreeSet::new()),
            FilterKind::Text => FilterValue::Text(String::new()),
            FilterKind::Boolean => FilterValue::Boolean(None),
            FilterKind::DateRange => FilterValue::DateRange(DateRange::default()),
            FilterKind::SingleChoice => FilterValue::SingleChoice(None),
        }
    }

    /// Whether applying this value constrains the query
    pub fn is_meaningful(&self) -> bool {
        match self {
            FilterValue::MultiSelect(set) => !set.is_empty(),
            FilterValue::Text(s) => !s.trim().is_empty(),
            FilterValue::Boolean(b) => b.is_some(),
            FilterValue::DateRange(r) => !r.is_open(),
            FilterValue::SingleChoice(c) => c.is_some(),
        }
    }

    /// Short human-readable form used in filter tags, e.g. "Status: Open"
    ///
    /// Option values resolve to their label through the column's fixed
    /// choices, then through `options` (the column's facet options).
    pub fn display_text(&self, column: &ColumnDef, options: &[FilterOption]) -> String {
        let name = column.name;
        match self {
            FilterValue::MultiSelect(set) => match set.len() {
                0 => format!("{}: all", name),
                1 => match set.iter().next() {
                    Some(v) => format!("{}: {}", name, option_label(column, options, v)),
                    None => format!("{}: all", name),
                },
                n => format!("{}: {} selected", name, n),
            },
            FilterValue::Text(s) => format!("{} contains \"{}\"", name, s.trim()),
            FilterValue::Boolean(Some(true)) => format!("{}: Yes", name),
            FilterValue::Boolean(Some(false)) => format!("{}: No", name),
            FilterValue::Boolean(None) => format!("{}: all", name),
            FilterValue::DateRange(r) => match (r.from, r.to) {
                (Some(f), Some(t)) => format!("{}: {} – {}", name, f, t),
                (Some(f), None) => format!("{} ≥ {}", name, f),
                (None, Some(t)) => format!("{} ≤ {}", name, t),
                (None, None) => format!("{}: any date", name),
            },
            FilterValue::SingleChoice(Some(v)) => {
                format!("{}: {}", name, option_label(column, options, v))
            }
            FilterValue::SingleChoice(None) => format!("{}: all", name),
        }
    }
}

fn option_label<'a>(column: &ColumnDef, options: &'a [FilterOption], value: &'a str) -> &'a str {
    if column.choices.iter().any(|c| c.value == value) {
        return column.choice_label(value);
    }
    options
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label.as_str())
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::report_grid::{ChoiceDef, ValueDomain};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_values_are_not_meaningful() {
        for kind in [
            FilterKind::MultiSelect,
            FilterKind::Text,
            FilterKind::Boolean,
            FilterKind::DateRange,
            FilterKind::SingleChoice,
        ] {
            let v = FilterValue::empty(kind);
            assert_eq!(v.kind(), kind);
            assert!(!v.is_meaningful(), "{kind} empty value must not be meaningful");
        }
    }

    #[test]
    fn test_meaningful_values() {
        assert!(FilterValue::Text("  x ".into()).is_meaningful());
        assert!(!FilterValue::Text("   ".into()).is_meaningful());
        assert!(FilterValue::Boolean(Some(false)).is_meaningful());
        assert!(FilterValue::DateRange(DateRange::new(None, Some(date("2024-01-31")))).is_meaningful());
        assert!(FilterValue::SingleChoice(Some("0".into())).is_meaningful());
        assert!(FilterValue::MultiSelect(["a".to_string()].into()).is_meaningful());
    }

    #[test]
    fn test_persisted_shape() {
        let v = FilterValue::DateRange(DateRange::new(Some(date("2024-03-01")), None));
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "date_range", "value": {"from": "2024-03-01", "to": null}})
        );
        let back: FilterValue = serde_json::from_value(json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_display_text() {
        const CHOICES: &[ChoiceDef] = &[ChoiceDef { value: "1", label: "Closed" }];
        let col = ColumnDef {
            id: "ticket_status",
            name: "Status",
            filter_kind: FilterKind::SingleChoice,
            backend_key: "ticketStatus",
            value_domain: ValueDomain::String,
            filterable: true,
            facet_key: None,
            choices: CHOICES,
        };
        assert_eq!(
            FilterValue::SingleChoice(Some("1".into())).display_text(&col, &[]),
            "Status: Closed"
        );
        let many: BTreeSet<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(FilterValue::MultiSelect(many).display_text(&col, &[]), "Status: 3 selected");
    }

    #[test]
    fn test_single_option_tag_shows_facet_label() {
        let col = ColumnDef {
            id: "customer_name",
            name: "Customer",
            filter_kind: FilterKind::MultiSelect,
            backend_key: "customerIds",
            value_domain: ValueDomain::Number,
            filterable: true,
            facet_key: Some("customers"),
            choices: &[],
        };
        let options = vec![
            FilterOption { value: "5".into(), label: "Acme Stores".into() },
            FilterOption { value: "6".into(), label: "Nile Retail".into() },
        ];
        let one = FilterValue::MultiSelect(["5".to_string()].into());
        assert_eq!(one.display_text(&col, &options), "Customer: Acme Stores");
        // unknown ids fall back to the raw value
        assert_eq!(one.display_text(&col, &[]), "Customer: 5");
    }
}
