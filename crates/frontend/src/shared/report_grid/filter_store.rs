use super::error::ReportGridError;
use super::filter_value::FilterValue;
use super::persistence::{FilterStorage, StorageKeys};
use super::registry::ColumnRegistry;
use contracts::shared::report_grid::{ColumnDef, FilterKind, FilterOption, FilterSummary};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Column id -> filter value
pub type FilterState = BTreeMap<String, FilterValue>;

/// Pending and applied filter values of one report view
///
/// The only mutator of filter state. Both maps are written to storage after
/// every change and read back when the store is created.
pub struct FilterValueStore {
    registry: Rc<ColumnRegistry>,
    storage: Box<dyn FilterStorage>,
    keys: StorageKeys,
    pending: FilterState,
    applied: FilterState,
    open_dropdown: Option<String>,
}

impl FilterValueStore {
    pub fn new(registry: Rc<ColumnRegistry>, storage: Box<dyn FilterStorage>, report_id: &str) -> Self {
        let keys = StorageKeys::for_report(report_id);
        let mut applied = rehydrate(&registry, storage.as_ref(), &keys.applied);
        // applied only ever holds values that constrain the query
        applied.retain(|column, value| {
            let keep = value.is_meaningful();
            if !keep {
                log::debug!("dropping stored empty filter for '{}'", column);
            }
            keep
        });
        let pending = rehydrate(&registry, storage.as_ref(), &keys.pending);
        Self {
            registry,
            storage,
            keys,
            pending,
            applied,
            open_dropdown: None,
        }
    }

    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    pub fn applied(&self) -> &FilterState {
        &self.applied
    }

    pub fn pending_state(&self) -> &FilterState {
        &self.pending
    }

    pub fn pending(&self, column: &str) -> Option<&FilterValue> {
        self.pending.get(column)
    }

    pub fn applied_value(&self, column: &str) -> Option<&FilterValue> {
        self.applied.get(column)
    }

    pub fn is_filtered(&self, column: &str) -> bool {
        self.applied.contains_key(column)
    }

    /// Overwrites the pending value of `column`.
    pub fn set_pending(&mut self, column: &str, value: FilterValue) -> Result<(), ReportGridError> {
        let config = self.registry.get_config(column)?;
        check_kind(config, value.kind())?;
        self.pending.insert(column.to_string(), value);
        self.persist();
        Ok(())
    }

    /// Promotes the pending value of `column` to applied, or removes the
    /// column from applied when the pending value does not constrain
    /// anything. Closes the column's dropdown.
    ///
    /// Returns whether the applied state changed.
    pub fn apply(&mut self, column: &str) -> Result<bool, ReportGridError> {
        let config = self.registry.get_config(column)?;
        let value = self
            .pending
            .get(column)
            .cloned()
            .unwrap_or_else(|| FilterValue::empty(config.filter_kind));

        let changed = if value.is_meaningful() {
            let changed = self.applied.get(column) != Some(&value);
            self.applied.insert(column.to_string(), value);
            changed
        } else {
            self.applied.remove(column).is_some()
        };

        self.close_dropdown_of(column);
        self.persist();
        Ok(changed)
    }

    /// Removes `column` from pending and applied. Returns whether the
    /// applied state changed.
    pub fn clear(&mut self, column: &str) -> Result<bool, ReportGridError> {
        self.registry.get_config(column)?;
        self.pending.remove(column);
        let changed = self.applied.remove(column).is_some();
        self.close_dropdown_of(column);
        self.persist();
        Ok(changed)
    }

    /// Removes every filter. Returns whether the applied state changed.
    pub fn clear_all(&mut self) -> bool {
        let changed = !self.applied.is_empty();
        self.applied.clear();
        self.pending.clear();
        self.open_dropdown = None;
        self.persist();
        changed
    }

    /// Checks or unchecks one option of a multi-select dropdown.
    pub fn toggle_option(&mut self, column: &str, option: &str, checked: bool) -> Result<(), ReportGridError> {
        let config = self.registry.get_config(column)?;
        check_kind(config, FilterKind::MultiSelect)?;

        let entry = self
            .pending
            .entry(column.to_string())
            .or_insert_with(|| FilterValue::empty(FilterKind::MultiSelect));
        if let FilterValue::MultiSelect(set) = entry {
            if checked {
                set.insert(option.to_string());
            } else {
                set.remove(option);
            }
        }
        self.persist();
        Ok(())
    }

    /// "Select all" checkbox of a multi-select dropdown.
    pub fn set_all_options(
        &mut self,
        column: &str,
        checked: bool,
        options: &[FilterOption],
    ) -> Result<(), ReportGridError> {
        let config = self.registry.get_config(column)?;
        check_kind(config, FilterKind::MultiSelect)?;

        let set = if checked {
            options.iter().map(|o| o.value.clone()).collect()
        } else {
            Default::default()
        };
        self.pending.insert(column.to_string(), FilterValue::MultiSelect(set));
        self.persist();
        Ok(())
    }

    /// Opens the dropdown of `column` (closing any other) or closes it when
    /// already open. Returns whether it is open afterwards.
    pub fn toggle_dropdown(&mut self, column: &str) -> Result<bool, ReportGridError> {
        let config = self.registry.get_config(column)?;
        if !config.filterable {
            return Ok(false);
        }
        if self.open_dropdown.as_deref() == Some(column) {
            self.open_dropdown = None;
            return Ok(false);
        }
        if !self.pending.contains_key(column) {
            if let Some(applied) = self.applied.get(column).cloned() {
                self.pending.insert(column.to_string(), applied);
            }
        }
        self.open_dropdown = Some(column.to_string());
        Ok(true)
    }

    pub fn close_all_dropdowns(&mut self) {
        self.open_dropdown = None;
    }

    pub fn is_dropdown_open(&self, column: &str) -> bool {
        self.open_dropdown.as_deref() == Some(column)
    }

    pub fn open_dropdown(&self) -> Option<&str> {
        self.open_dropdown.as_deref()
    }

    /// Count and display text of the applied filters, in column order
    pub fn summary(&self) -> FilterSummary {
        let active_filters: Vec<String> = self
            .registry
            .columns()
            .iter()
            .filter_map(|col| self.applied.get(col.id).map(|v| v.display_text(col, &[])))
            .collect();
        FilterSummary {
            total_applied_filters: active_filters.len() as u32,
            active_filters,
        }
    }

    fn close_dropdown_of(&mut self, column: &str) {
        if self.open_dropdown.as_deref() == Some(column) {
            self.open_dropdown = None;
        }
    }

    fn persist(&self) {
        save_state(self.storage.as_ref(), &self.keys.applied, &self.applied);
        save_state(self.storage.as_ref(), &self.keys.pending, &self.pending);
    }
}

fn check_kind(config: &ColumnDef, actual: FilterKind) -> Result<(), ReportGridError> {
    if config.filter_kind != actual {
        return Err(ReportGridError::InvalidFilterValue {
            column: config.id.to_string(),
            expected: config.filter_kind,
            actual,
        });
    }
    Ok(())
}

fn save_state(storage: &dyn FilterStorage, key: &str, state: &FilterState) {
    match serde_json::to_string(state) {
        Ok(raw) => storage.save(key, &raw),
        Err(e) => log::warn!("failed to serialize filter state '{}': {}", key, e),
    }
}

fn rehydrate(registry: &ColumnRegistry, storage: &dyn FilterStorage, key: &str) -> FilterState {
    let Some(raw) = storage.load(key) else {
        return FilterState::new();
    };
    match parse_state(registry, &raw) {
        Ok(state) => state,
        Err(e) => {
            log::warn!("{} ('{}'), starting with empty filters", e, key);
            storage.remove(key);
            FilterState::new()
        }
    }
}

/// Parses a persisted filter map. Entries naming unknown columns or carrying
/// a value of the wrong kind are dropped; malformed JSON is an error.
pub fn parse_state(registry: &ColumnRegistry, raw: &str) -> Result<FilterState, ReportGridError> {
    let entries: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(raw).map_err(|e| ReportGridError::PersistenceCorrupt(e.to_string()))?;

    let mut state = FilterState::new();
    for (column, raw_value) in entries {
        let Ok(config) = registry.get_config(&column) else {
            log::debug!("dropping stored filter for unknown column '{}'", column);
            continue;
        };
        match serde_json::from_value::<FilterValue>(raw_value) {
            Ok(value) if value.kind() == config.filter_kind => {
                state.insert(column, value);
            }
            _ => log::debug!("dropping stored filter with invalid value for '{}'", column),
        }
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::report_grid::filter_value::DateRange;
    use crate::shared::report_grid::persistence::MemoryFilterStorage;
    use contracts::shared::report_grid::{ChoiceDef, ValueDomain};
    use std::collections::BTreeSet;

    const STATUS: &[ChoiceDef] = &[
        ChoiceDef { value: "0", label: "Open" },
        ChoiceDef { value: "1", label: "Closed" },
    ];

    fn column(id: &'static str, kind: FilterKind, key: &'static str) -> ColumnDef {
        ColumnDef {
            id,
            name: id,
            filter_kind: kind,
            backend_key: key,
            value_domain: ValueDomain::String,
            filterable: true,
            facet_key: None,
            choices: if kind == FilterKind::SingleChoice { STATUS } else { &[] },
        }
    }

    fn registry() -> Rc<ColumnRegistry> {
        Rc::new(
            ColumnRegistry::new(vec![
                column("city_name", FilterKind::MultiSelect, "cityIds"),
                column("action", FilterKind::Text, "action"),
                column("inspected", FilterKind::Boolean, "inspected"),
                column("inspection_date", FilterKind::DateRange, "inspectionDate"),
                column("ticket_status", FilterKind::SingleChoice, "ticketStatus"),
            ])
            .unwrap(),
        )
    }

    fn store_with(storage: &MemoryFilterStorage) -> FilterValueStore {
        FilterValueStore::new(registry(), Box::new(storage.clone()), "test_report")
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut store = store_with(&MemoryFilterStorage::new());
        store
            .set_pending("ticket_status", FilterValue::SingleChoice(Some("0".into())))
            .unwrap();
        assert!(store.apply("ticket_status").unwrap());
        assert!(!store.apply("ticket_status").unwrap());
        assert_eq!(
            store.applied_value("ticket_status"),
            Some(&FilterValue::SingleChoice(Some("0".into())))
        );
    }

    #[test]
    fn test_applying_empty_value_clears_every_kind() {
        let meaningful = [
            ("city_name", FilterValue::MultiSelect(set(&["4"]))),
            ("action", FilterValue::Text("Replace".into())),
            ("inspected", FilterValue::Boolean(Some(true))),
            (
                "inspection_date",
                FilterValue::DateRange(DateRange::new(
                    chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
                    None,
                )),
            ),
            ("ticket_status", FilterValue::SingleChoice(Some("1".into()))),
        ];
        let mut store = store_with(&MemoryFilterStorage::new());

        for (column, value) in meaningful {
            let kind = value.kind();
            store.set_pending(column, value).unwrap();
            assert!(store.apply(column).unwrap());
            assert!(store.is_filtered(column));

            store.set_pending(column, FilterValue::empty(kind)).unwrap();
            assert!(store.apply(column).unwrap(), "{column}: clearing must report a change");
            assert!(!store.is_filtered(column), "{column} must be removed from applied");
        }
        assert!(store.applied().is_empty());
    }

    #[test]
    fn test_whitespace_text_is_not_meaningful() {
        let mut store = store_with(&MemoryFilterStorage::new());
        store.set_pending("action", FilterValue::Text("   ".into())).unwrap();
        assert!(!store.apply("action").unwrap());
        assert!(!store.is_filtered("action"));
    }

    #[test]
    fn test_kind_mismatch_and_unknown_column() {
        let mut store = store_with(&MemoryFilterStorage::new());
        let err = store
            .set_pending("inspected", FilterValue::Text("yes".into()))
            .unwrap_err();
        assert_eq!(
            err,
            ReportGridError::InvalidFilterValue {
                column: "inspected".into(),
                expected: FilterKind::Boolean,
                actual: FilterKind::Text,
            }
        );
        assert!(store.pending("inspected").is_none());

        assert_eq!(
            store.apply("missing"),
            Err(ReportGridError::UnknownColumn("missing".into()))
        );
        assert!(store.toggle_option("action", "x", true).is_err());
    }

    #[test]
    fn test_clear_removes_pending_and_applied() {
        let mut store = store_with(&MemoryFilterStorage::new());
        store.toggle_option("city_name", "4", true).unwrap();
        store.apply("city_name").unwrap();

        assert!(store.clear("city_name").unwrap());
        assert!(store.pending("city_name").is_none());
        assert!(!store.is_filtered("city_name"));
        assert!(!store.clear("city_name").unwrap());
    }

    #[test]
    fn test_toggle_and_select_all_options() {
        let mut store = store_with(&MemoryFilterStorage::new());
        store.toggle_option("city_name", "4", true).unwrap();
        store.toggle_option("city_name", "7", true).unwrap();
        store.toggle_option("city_name", "4", false).unwrap();
        assert_eq!(store.pending("city_name"), Some(&FilterValue::MultiSelect(set(&["7"]))));

        let options = vec![
            FilterOption { value: "4".into(), label: "Giza".into() },
            FilterOption { value: "7".into(), label: "Nasr City".into() },
        ];
        store.set_all_options("city_name", true, &options).unwrap();
        assert_eq!(
            store.pending("city_name"),
            Some(&FilterValue::MultiSelect(set(&["4", "7"])))
        );
        store.set_all_options("city_name", false, &options).unwrap();
        assert!(!store.apply("city_name").unwrap());
    }

    #[test]
    fn test_dropdowns() {
        let mut store = store_with(&MemoryFilterStorage::new());
        store
            .set_pending("inspected", FilterValue::Boolean(Some(false)))
            .unwrap();
        store.apply("inspected").unwrap();
        store.clear_pending_for_test("inspected");

        assert!(store.toggle_dropdown("inspected").unwrap());
        // opening seeds pending from applied
        assert_eq!(store.pending("inspected"), Some(&FilterValue::Boolean(Some(false))));
        assert!(store.toggle_dropdown("action").unwrap());
        assert!(!store.is_dropdown_open("inspected"));
        assert!(store.is_dropdown_open("action"));

        store.apply("action").unwrap();
        assert_eq!(store.open_dropdown(), None);

        store.toggle_dropdown("action").unwrap();
        store.close_all_dropdowns();
        assert_eq!(store.open_dropdown(), None);
    }

    #[test]
    fn test_state_survives_reload() {
        let storage = MemoryFilterStorage::new();
        {
            let mut store = store_with(&storage);
            store
                .set_pending("ticket_status", FilterValue::SingleChoice(Some("1".into())))
                .unwrap();
            store.apply("ticket_status").unwrap();
            store.set_pending("action", FilterValue::Text("Repl".into())).unwrap();
        }

        let store = store_with(&storage);
        assert_eq!(
            store.applied_value("ticket_status"),
            Some(&FilterValue::SingleChoice(Some("1".into())))
        );
        assert_eq!(store.pending("action"), Some(&FilterValue::Text("Repl".into())));
        assert!(!store.is_filtered("action"));
    }

    #[test]
    fn test_corrupt_storage_falls_back_to_empty() {
        let storage = MemoryFilterStorage::new();
        storage.save("test_report_applied_filters_v1", "{not json");
        storage.save(
            "test_report_pending_filters_v1",
            r#"{"gone": {"kind": "text", "value": "x"},
                "inspected": {"kind": "text", "value": "x"},
                "action": {"kind": "text", "value": "kept"}}"#,
        );

        let store = store_with(&storage);
        assert!(store.applied().is_empty());
        assert_eq!(store.pending_state().len(), 1);
        assert_eq!(store.pending("action"), Some(&FilterValue::Text("kept".into())));
        // the corrupt entry was discarded; the next write replaces it
        assert!(storage.load("test_report_applied_filters_v1").is_none());
    }

    #[test]
    fn test_stored_empty_applied_values_are_dropped() {
        let storage = MemoryFilterStorage::new();
        storage.save(
            "test_report_applied_filters_v1",
            r#"{"inspected": {"kind": "boolean", "value": null},
                "city_name": {"kind": "multi_select", "value": []},
                "action": {"kind": "text", "value": "  "},
                "ticket_status": {"kind": "single_choice", "value": "0"}}"#,
        );

        let mut store = store_with(&storage);
        assert!(!store.is_filtered("inspected"));
        assert!(!store.is_filtered("city_name"));
        assert!(!store.is_filtered("action"));
        assert!(store.is_filtered("ticket_status"));
        assert_eq!(store.summary().total_applied_filters, 1);

        store.set_pending("inspected", FilterValue::Boolean(None)).unwrap();
        assert!(!store.apply("inspected").unwrap());
    }

    #[test]
    fn test_parse_state_reports_corruption() {
        let reg = registry();
        assert!(matches!(
            parse_state(&reg, "[1, 2"),
            Err(ReportGridError::PersistenceCorrupt(_))
        ));
        assert!(parse_state(&reg, "{}").unwrap().is_empty());
    }

    #[test]
    fn test_summary_in_column_order() {
        let mut store = store_with(&MemoryFilterStorage::new());
        store
            .set_pending("ticket_status", FilterValue::SingleChoice(Some("0".into())))
            .unwrap();
        store.apply("ticket_status").unwrap();
        store.toggle_option("city_name", "4", true).unwrap();
        store.apply("city_name").unwrap();

        let summary = store.summary();
        assert_eq!(summary.total_applied_filters, 2);
        assert_eq!(
            summary.active_filters,
            vec!["city_name: 4".to_string(), "ticket_status: Open".to_string()]
        );

        assert!(store.clear_all());
        assert!(!store.clear_all());
        assert_eq!(store.summary().total_applied_filters, 0);
    }

    impl FilterValueStore {
        fn clear_pending_for_test(&mut self, column: &str) {
            self.pending.remove(column);
        }
    }
}
