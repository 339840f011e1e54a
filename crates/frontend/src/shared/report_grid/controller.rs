use super::config::ReportGridConfig;
use super::data_source::{ReportDataSource, ReportPage};
use super::error::ReportGridError;
use super::filter_store::{FilterState, FilterValueStore};
use super::filter_value::FilterValue;
use super::format::cell_key;
use super::pagination::{PaginationController, PaginationView};
use super::persistence::FilterStorage;
use super::query_builder::QueryBuilder;
use super::registry::ColumnRegistry;
use super::selection::SelectionController;
use contracts::shared::report_grid::{FilterOption, FilterSummary, ReportQuery, ReportRow};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::rc::Rc;

/// Lifecycle of the grid's data
///
/// While a request is in flight (or after it failed) the last loaded page
/// stays available as `stale` so the table does not blank out.
#[derive(Debug, Clone, PartialEq)]
pub enum GridState<R> {
    Idle,
    Loading { stale: Option<ReportPage<R>> },
    Loaded(ReportPage<R>),
    Error { message: String, stale: Option<ReportPage<R>> },
}

/// `GridState` without the rows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GridStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

impl<R> GridState<R> {
    pub fn status(&self) -> GridStatus {
        match self {
            GridState::Idle => GridStatus::Idle,
            GridState::Loading { .. } => GridStatus::Loading,
            GridState::Loaded(_) => GridStatus::Loaded,
            GridState::Error { message, .. } => GridStatus::Error(message.clone()),
        }
    }

    /// Page currently on screen, fresh or stale
    pub fn visible_page(&self) -> Option<&ReportPage<R>> {
        match self {
            GridState::Idle => None,
            GridState::Loaded(page) => Some(page),
            GridState::Loading { stale } | GridState::Error { stale, .. } => stale.as_ref(),
        }
    }

    fn into_visible_page(self) -> Option<ReportPage<R>> {
        match self {
            GridState::Idle => None,
            GridState::Loaded(page) => Some(page),
            GridState::Loading { stale } | GridState::Error { stale, .. } => stale,
        }
    }
}

/// A query the caller must hand to the data source, tagged with the id that
/// `ReportGridController::complete` expects back
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub id: u64,
    pub query: ReportQuery,
}

/// Outcome of feeding a response back into the controller
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The page is now on screen. `follow_up` is set when the current page
    /// fell outside the new page count and had to be re-requested.
    Applied { follow_up: Option<PendingRequest> },
    /// The request failed; the grid is in the error state.
    Failed(String),
    /// A newer request superseded this one; nothing changed.
    Discarded,
}

/// Everything the view needs to render the grid, detached from the controller
#[derive(Debug, Clone, PartialEq)]
pub struct GridSnapshot<R: ReportRow> {
    pub status: GridStatus,
    pub rows: Vec<R>,
    /// Column id -> filter options for its dropdown
    pub options: BTreeMap<String, Vec<FilterOption>>,
    pub pagination: PaginationView,
    pub selected: HashSet<R::Id>,
    pub all_selected: bool,
    pub partially_selected: bool,
    pub pending: FilterState,
    pub applied: FilterState,
    pub open_dropdown: Option<String>,
    pub summary: FilterSummary,
}

impl<R: ReportRow> GridSnapshot<R> {
    pub fn is_loading(&self) -> bool {
        self.status == GridStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            GridStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }
}

/// Coordinates filters, pagination, selection and data loading of one report
///
/// The controller never performs I/O. Every operation that needs fresh data
/// returns a `PendingRequest`; the caller fetches it and reports back through
/// `complete`. Only the most recently issued request is ever applied.
pub struct ReportGridController<R: ReportRow> {
    config: ReportGridConfig,
    registry: Rc<ColumnRegistry>,
    filters: FilterValueStore,
    pagination: PaginationController,
    selection: SelectionController<R::Id>,
    state: GridState<R>,
    last_request_id: u64,
    in_flight: Option<u64>,
}

impl<R: ReportRow> ReportGridController<R> {
    pub fn new(config: ReportGridConfig, registry: Rc<ColumnRegistry>, storage: Box<dyn FilterStorage>) -> Self {
        let filters = FilterValueStore::new(registry.clone(), storage, &config.report_id);
        let pagination = PaginationController::new(config.default_page_size);
        Self {
            config,
            registry,
            filters,
            pagination,
            selection: SelectionController::new(),
            state: GridState::Idle,
            last_request_id: 0,
            in_flight: None,
        }
    }

    pub fn config(&self) -> &ReportGridConfig {
        &self.config
    }

    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    pub fn state(&self) -> &GridState<R> {
        &self.state
    }

    pub fn filters(&self) -> &FilterValueStore {
        &self.filters
    }

    pub fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    pub fn selection(&self) -> &SelectionController<R::Id> {
        &self.selection
    }

    pub fn rows(&self) -> &[R] {
        self.state.visible_page().map(|p| p.rows.as_slice()).unwrap_or(&[])
    }

    /// Requests the current page with the applied filters.
    pub fn load(&mut self) -> Result<PendingRequest, ReportGridError> {
        let query = QueryBuilder::new(&self.registry).build(
            self.filters.applied(),
            self.pagination.page(),
            self.pagination.page_size(),
        )?;

        self.last_request_id += 1;
        let id = self.last_request_id;
        self.in_flight = Some(id);

        let previous = std::mem::replace(&mut self.state, GridState::Idle);
        self.state = GridState::Loading {
            stale: previous.into_visible_page(),
        };

        log::debug!(
            "{}: request #{} page {} size {} ({} filters)",
            self.config.report_id,
            id,
            query.page,
            query.limit,
            query.filters.len()
        );
        Ok(PendingRequest { id, query })
    }

    /// Re-issues the query after a failure. `None` unless the grid is in the
    /// error state.
    pub fn retry(&mut self) -> Result<Option<PendingRequest>, ReportGridError> {
        match self.state {
            GridState::Error { .. } => self.load().map(Some),
            _ => Ok(None),
        }
    }

    /// Feeds the data source's answer for request `id` back into the grid.
    pub fn complete(&mut self, id: u64, result: Result<ReportPage<R>, ReportGridError>) -> Completion {
        if self.in_flight != Some(id) {
            log::debug!(
                "{}: discarding response #{} (latest is #{})",
                self.config.report_id,
                id,
                self.last_request_id
            );
            return Completion::Discarded;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                let moved = self.pagination.sync_total(page.total_count);
                self.selection.reset(page.rows.iter().map(R::row_id).collect());
                self.state = GridState::Loaded(page);

                let follow_up = if moved {
                    log::debug!(
                        "{}: page out of range, moving to page {}",
                        self.config.report_id,
                        self.pagination.page()
                    );
                    self.load().ok()
                } else {
                    None
                };
                Completion::Applied { follow_up }
            }
            Err(e) => {
                let message = e.to_string();
                log::error!("{}: failed to load report: {}", self.config.report_id, message);
                let previous = std::mem::replace(&mut self.state, GridState::Idle);
                self.state = GridState::Error {
                    message: message.clone(),
                    stale: previous.into_visible_page(),
                };
                Completion::Failed(message)
            }
        }
    }

    // ---- filters ----

    pub fn set_pending(&mut self, column: &str, value: FilterValue) -> Result<(), ReportGridError> {
        self.filters.set_pending(column, value)
    }

    pub fn toggle_option(&mut self, column: &str, option: &str, checked: bool) -> Result<(), ReportGridError> {
        self.filters.toggle_option(column, option, checked)
    }

    /// Checks or unchecks every option currently offered for `column`.
    pub fn select_all_options(&mut self, column: &str, checked: bool) -> Result<(), ReportGridError> {
        let options = self.filter_options(column)?;
        self.filters.set_all_options(column, checked, &options)
    }

    pub fn toggle_dropdown(&mut self, column: &str) -> Result<bool, ReportGridError> {
        self.filters.toggle_dropdown(column)
    }

    pub fn close_all_dropdowns(&mut self) {
        self.filters.close_all_dropdowns();
    }

    /// Applies the pending value of `column`. Requeries from page 1 only
    /// when the applied filters actually changed.
    pub fn apply_filter(&mut self, column: &str) -> Result<Option<PendingRequest>, ReportGridError> {
        let changed = self.filters.apply(column)?;
        self.requery_if(changed)
    }

    pub fn clear_filter(&mut self, column: &str) -> Result<Option<PendingRequest>, ReportGridError> {
        let changed = self.filters.clear(column)?;
        self.requery_if(changed)
    }

    pub fn clear_all_filters(&mut self) -> Result<Option<PendingRequest>, ReportGridError> {
        let changed = self.filters.clear_all();
        self.requery_if(changed)
    }

    fn requery_if(&mut self, changed: bool) -> Result<Option<PendingRequest>, ReportGridError> {
        if !changed {
            return Ok(None);
        }
        self.pagination.reset();
        self.load().map(Some)
    }

    /// Options of a filter dropdown: the server facet when one is known,
    /// the fixed choices of a single-choice column, otherwise the distinct
    /// values of the rows on screen.
    pub fn filter_options(&self, column: &str) -> Result<Vec<FilterOption>, ReportGridError> {
        let config = self.registry.get_config(column)?;

        if !config.choices.is_empty() {
            return Ok(config
                .choices
                .iter()
                .map(|c| FilterOption {
                    value: c.value.to_string(),
                    label: c.label.to_string(),
                })
                .collect());
        }

        let page = self.state.visible_page();
        if let Some(key) = config.facet_key {
            return Ok(page
                .and_then(|p| p.facets.get(key))
                .cloned()
                .unwrap_or_default());
        }

        let distinct: BTreeSet<String> = self
            .rows()
            .iter()
            .filter_map(|row| cell_key(&row.cell(config.id)))
            .collect();
        Ok(distinct
            .into_iter()
            .map(|value| FilterOption {
                label: value.clone(),
                value,
            })
            .collect())
    }

    // ---- pagination ----

    pub fn go_to_page(&mut self, page: i64) -> Result<PendingRequest, ReportGridError> {
        self.pagination.go_to_page(page);
        self.load()
    }

    pub fn next_page(&mut self) -> Result<PendingRequest, ReportGridError> {
        self.pagination.next_page();
        self.load()
    }

    pub fn previous_page(&mut self) -> Result<PendingRequest, ReportGridError> {
        self.pagination.previous_page();
        self.load()
    }

    pub fn first_page(&mut self) -> Result<PendingRequest, ReportGridError> {
        self.pagination.first_page();
        self.load()
    }

    pub fn last_page(&mut self) -> Result<PendingRequest, ReportGridError> {
        self.pagination.last_page();
        self.load()
    }

    pub fn change_page_size(&mut self, page_size: u32) -> Result<PendingRequest, ReportGridError> {
        self.pagination.change_page_size(page_size)?;
        self.load()
    }

    // ---- selection ----

    pub fn toggle_all(&mut self, checked: bool) {
        self.selection.toggle_all(checked);
    }

    pub fn toggle_row(&mut self, id: &R::Id, checked: bool) {
        self.selection.toggle_row(id, checked);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected rows in display order
    pub fn selected_rows(&self) -> Vec<&R> {
        self.rows()
            .iter()
            .filter(|row| self.selection.is_selected(&row.row_id()))
            .collect()
    }
}

impl<R: ReportRow + Clone> ReportGridController<R> {
    pub fn snapshot(&self) -> GridSnapshot<R> {
        let options = self
            .registry
            .list_filterable_columns()
            .into_iter()
            .filter_map(|col| {
                self.filter_options(col.id)
                    .ok()
                    .map(|options| (col.id.to_string(), options))
            })
            .collect();

        GridSnapshot {
            status: self.state.status(),
            rows: self.rows().to_vec(),
            options,
            pagination: self.pagination.view(),
            selected: self.selection.selected_set().clone(),
            all_selected: self.selection.is_all_selected(),
            partially_selected: self.selection.is_partially_selected(),
            pending: self.filters.pending_state().clone(),
            applied: self.filters.applied().clone(),
            open_dropdown: self.filters.open_dropdown().map(str::to_string),
            summary: self.filters.summary(),
        }
    }
}

/// Runs `request` against `source` and feeds the answer back.
///
/// The controller is only borrowed after the fetch resolves, so other
/// operations may run while the request is in flight.
pub async fn dispatch<R, S>(
    controller: &RefCell<ReportGridController<R>>,
    source: &S,
    request: PendingRequest,
) -> Completion
where
    R: ReportRow,
    S: ReportDataSource<R> + ?Sized,
{
    let result = source.fetch(&request.query).await;
    controller.borrow_mut().complete(request.id, result)
}
