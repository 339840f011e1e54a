use crate::projections::p950_ticket_items_report::columns::{self, COMPANY_SCOPE_KEY, EXPORT_FILENAME};
use crate::shared::api_utils::api_url;
use crate::shared::export::export_to_csv;
use crate::shared::report_grid::{
    dispatch, Completion, FilterValue, GridSnapshot, HttpReportDataSource, LocalFilterStorage,
    PendingRequest, ReportGridController, ReportGridError,
};
use crate::system::auth::storage;
use contracts::projections::p950_ticket_items_report::TicketItemDto;
use contracts::shared::report_grid::ColumnDef;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cell::RefCell;
use std::rc::Rc;

type Controller = ReportGridController<TicketItemDto>;

/// Reactive handle of the ticket-items report
///
/// The controller lives outside the reactive graph; every change publishes a
/// fresh `GridSnapshot` that the view reads.
#[derive(Clone, Copy)]
pub struct TicketReportState {
    controller: StoredValue<Rc<RefCell<Controller>>, LocalStorage>,
    source: StoredValue<Rc<HttpReportDataSource>, LocalStorage>,
    export_columns: StoredValue<Vec<ColumnDef>>,
    pub snapshot: RwSignal<GridSnapshot<TicketItemDto>>,
}

impl TicketReportState {
    pub fn new() -> Result<Self, ReportGridError> {
        let registry = Rc::new(columns::registry()?);
        let export_columns = columns::export_columns(&registry)?;
        let config = columns::grid_config();

        let mut source = HttpReportDataSource::new(api_url(&config.endpoint));
        match storage::current_company_id() {
            Some(company_id) => source = source.with_scope(COMPANY_SCOPE_KEY, company_id),
            None => log::warn!("{}: no company in the stored session", config.report_id),
        }

        let controller = Controller::new(config, registry, Box::new(LocalFilterStorage));
        let snapshot = RwSignal::new(controller.snapshot());

        Ok(Self {
            controller: StoredValue::new_local(Rc::new(RefCell::new(controller))),
            source: StoredValue::new_local(Rc::new(source)),
            export_columns: StoredValue::new(export_columns),
            snapshot,
        })
    }

    pub fn page_size_options(&self) -> Vec<u32> {
        self.with_controller(|c| c.config().page_size_options())
    }

    fn with_controller<T>(&self, f: impl FnOnce(&mut Controller) -> T) -> T {
        self.controller.with_value(|cell| f(&mut cell.borrow_mut()))
    }

    fn publish(&self) {
        let snapshot = self.with_controller(|c| c.snapshot());
        self.snapshot.set(snapshot);
    }

    /// Runs an operation; invalid input is logged and dropped.
    fn act<T>(&self, f: impl FnOnce(&mut Controller) -> Result<T, ReportGridError>) -> Option<T> {
        match self.with_controller(f) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("ticket report: {}", e);
                None
            }
        }
    }

    /// Publishes the new state and sends `request` when there is one.
    fn after(&self, request: Option<PendingRequest>) {
        self.publish();
        if let Some(request) = request {
            self.send(request);
        }
    }

    fn send(&self, request: PendingRequest) {
        let this = *self;
        let controller = self.controller.get_value();
        let source = self.source.get_value();
        spawn_local(async move {
            let completion = dispatch(controller.as_ref(), source.as_ref(), request).await;
            this.publish();
            if let Completion::Applied { follow_up: Some(next) } = completion {
                this.send(next);
            }
        });
    }

    // ---- data ----

    pub fn load(&self) {
        let request = self.act(|c| c.load());
        self.after(request);
    }

    pub fn retry(&self) {
        let request = self.act(|c| c.retry()).flatten();
        self.after(request);
    }

    // ---- filters ----

    pub fn toggle_dropdown(&self, column: &str) {
        self.act(|c| c.toggle_dropdown(column));
        self.publish();
    }

    pub fn close_all_dropdowns(&self) {
        if self.snapshot.with_untracked(|s| s.open_dropdown.is_none()) {
            return;
        }
        self.with_controller(|c| c.close_all_dropdowns());
        self.publish();
    }

    pub fn set_pending(&self, column: &str, value: FilterValue) {
        self.act(|c| c.set_pending(column, value));
        self.publish();
    }

    pub fn toggle_option(&self, column: &str, option: &str, checked: bool) {
        self.act(|c| c.toggle_option(column, option, checked));
        self.publish();
    }

    pub fn select_all_options(&self, column: &str, checked: bool) {
        self.act(|c| c.select_all_options(column, checked));
        self.publish();
    }

    pub fn apply_filter(&self, column: &str) {
        let request = self.act(|c| c.apply_filter(column)).flatten();
        self.after(request);
    }

    pub fn clear_filter(&self, column: &str) {
        let request = self.act(|c| c.clear_filter(column)).flatten();
        self.after(request);
    }

    pub fn clear_all_filters(&self) {
        let request = self.act(|c| c.clear_all_filters()).flatten();
        self.after(request);
    }

    // ---- pagination ----

    pub fn go_to_page(&self, page: i64) {
        let request = self.act(|c| c.go_to_page(page));
        self.after(request);
    }

    pub fn change_page_size(&self, page_size: u32) {
        let request = self.act(|c| c.change_page_size(page_size));
        self.after(request);
    }

    // ---- selection ----

    pub fn toggle_all(&self, checked: bool) {
        self.with_controller(|c| c.toggle_all(checked));
        self.publish();
    }

    pub fn toggle_row(&self, id: i64, checked: bool) {
        self.with_controller(|c| c.toggle_row(&id, checked));
        self.publish();
    }

    /// Downloads the selected rows, or the whole page when nothing is selected.
    pub fn export_csv(&self) -> Result<(), String> {
        let columns = self.export_columns.get_value();
        self.with_controller(|c| {
            let selected = c.selected_rows();
            let rows: Vec<&TicketItemDto> = if selected.is_empty() {
                c.rows().iter().collect()
            } else {
                selected
            };
            export_to_csv(&columns, &rows, EXPORT_FILENAME)
        })
    }
}
