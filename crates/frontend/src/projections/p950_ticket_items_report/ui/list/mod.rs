pub mod state;

use crate::projections::p950_ticket_items_report::columns::TICKET_ITEM_COLUMNS;
use crate::shared::components::column_filter::{ColumnFilterActions, ColumnFilterHeader};
use crate::shared::components::filter_panel::{ActiveFilterTag, ActiveFilters};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::icons::icon;
use crate::shared::report_grid::format::display_cell;
use crate::shared::report_grid::FilterValue;
use contracts::projections::p950_ticket_items_report::TicketItemDto;
use contracts::shared::report_grid::{ColumnDef, ReportRow};
use leptos::prelude::*;
use state::TicketReportState;
use thaw::*;

#[component]
pub fn TicketItemsReport() -> impl IntoView {
    let state = match TicketReportState::new() {
        Ok(state) => state,
        Err(e) => {
            log::error!("ticket report misconfigured: {}", e);
            return view! {
                <div class="report-grid__error">{format!("Report unavailable: {}", e)}</div>
            }
            .into_any();
        }
    };
    state.load();

    let snapshot = state.snapshot;
    let is_loading = Signal::derive(move || snapshot.with(|s| s.is_loading()));
    let (export_error, set_export_error) = signal(None::<String>);

    let active_tags = Signal::derive(move || {
        snapshot.with(|s| {
            TICKET_ITEM_COLUMNS
                .iter()
                .filter_map(|col| {
                    s.applied.get(col.id).map(|value| {
                        let options = s.options.get(col.id).map(Vec::as_slice).unwrap_or(&[]);
                        ActiveFilterTag {
                            column: col.id.to_string(),
                            label: value.display_text(col, options),
                        }
                    })
                })
                .collect::<Vec<_>>()
        })
    });

    let on_export = move |_: leptos::ev::MouseEvent| match state.export_csv() {
        Ok(()) => set_export_error.set(None),
        Err(e) => {
            log::warn!("ticket report export failed: {}", e);
            set_export_error.set(Some(e));
        }
    };

    view! {
        <div class="report-grid" on:click=move |_| state.close_all_dropdowns()>
            <div class="report-grid__header">
                <h1 class="report-grid__title">"Ticket Items Report"</h1>
                <div class="report-grid__toolbar">
                    <Button
                        appearance=ButtonAppearance::Subtle
                        disabled=move || active_tags.get().is_empty()
                        on_click=move |_| state.clear_all_filters()
                    >
                        "Clear Filters"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=move || snapshot.with(|s| s.rows.is_empty())
                        on_click=on_export
                    >
                        {icon("download")}
                        {move || {
                            let selected = snapshot.with(|s| s.selected_count());
                            if selected > 0 {
                                format!("Export CSV ({})", selected)
                            } else {
                                "Export CSV".to_string()
                            }
                        }}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=move || is_loading.get()
                        loading=move || is_loading.get()
                        on_click=move |_| state.load()
                    >
                        {icon("refresh")}
                        "Refresh"
                    </Button>
                </div>
            </div>

            <ActiveFilters
                tags=active_tags
                on_remove=Callback::new(move |column: String| state.clear_filter(&column))
                on_clear_all=Callback::new(move |_: ()| state.clear_all_filters())
            />

            {move || export_error.get().map(|e| view! {
                <div class="report-grid__notice">{e}</div>
            })}

            {move || snapshot.with(|s| s.error().map(str::to_string)).map(|message| view! {
                <div class="report-grid__error">
                    {icon("alert")}
                    <span>{message}</span>
                    <Button size=ButtonSize::Small on_click=move |_| state.retry()>
                        "Retry"
                    </Button>
                </div>
            })}

            <div class="report-grid__table-wrapper">
                <Show when=move || is_loading.get()>
                    <div class="report-grid__loading">
                        <Spinner />
                        <span>"Loading..."</span>
                    </div>
                </Show>
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCheckbox
                                all_selected=Signal::derive(move || snapshot.with(|s| s.all_selected))
                                partially_selected=Signal::derive(move || snapshot.with(|s| s.partially_selected))
                                on_change=Callback::new(move |checked: bool| state.toggle_all(checked))
                            />
                            {TICKET_ITEM_COLUMNS
                                .iter()
                                .map(|col| column_header(state, col.clone()))
                                .collect_view()}
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || snapshot.with(|s| s.rows.clone())
                            key=|row| row.row_id()
                            children=move |row| ticket_row(state, row)
                        />
                    </TableBody>
                </Table>
                <Show when=move || snapshot.with(|s| !s.is_loading() && s.error().is_none() && s.rows.is_empty())>
                    <div class="report-grid__empty">"No ticket items match the current filters"</div>
                </Show>
            </div>

            <div class="report-grid__footer">
                <span class="report-grid__total">
                    {move || snapshot.with(|s| {
                        let mut text = format!("Total records: {}", s.pagination.total_count);
                        if s.selected_count() > 0 {
                            text.push_str(&format!(" | {} selected", s.selected_count()));
                        }
                        text
                    })}
                </span>
                <PaginationControls
                    pagination=Signal::derive(move || snapshot.with(|s| s.pagination))
                    on_page_change=Callback::new(move |page: i64| state.go_to_page(page))
                    on_page_size_change=Callback::new(move |size: u32| state.change_page_size(size))
                    page_size_options=state.page_size_options()
                    disabled=is_loading
                />
            </div>
        </div>
    }
    .into_any()
}

fn column_header(state: TicketReportState, column: ColumnDef) -> impl IntoView {
    let snapshot = state.snapshot;
    let id = column.id;

    let actions = ColumnFilterActions {
        on_toggle: Callback::new(move |_: ()| state.toggle_dropdown(id)),
        on_change: Callback::new(move |value: FilterValue| state.set_pending(id, value)),
        on_toggle_option: Callback::new(move |(option, checked): (String, bool)| {
            state.toggle_option(id, &option, checked)
        }),
        on_select_all: Callback::new(move |checked: bool| state.select_all_options(id, checked)),
        on_apply: Callback::new(move |_: ()| state.apply_filter(id)),
        on_clear: Callback::new(move |_: ()| state.clear_filter(id)),
    };

    view! {
        <ColumnFilterHeader
            column=column
            is_open=Signal::derive(move || snapshot.with(|s| s.open_dropdown.as_deref() == Some(id)))
            is_filtered=Signal::derive(move || snapshot.with(|s| s.applied.contains_key(id)))
            pending=Signal::derive(move || snapshot.with(|s| s.pending.get(id).cloned()))
            options=Signal::derive(move || snapshot.with(|s| s.options.get(id).cloned().unwrap_or_default()))
            actions=actions
        />
    }
}

fn ticket_row(state: TicketReportState, row: TicketItemDto) -> impl IntoView {
    let snapshot = state.snapshot;
    let id = row.row_id();

    view! {
        <TableRow>
            <TableCellCheckbox
                checked=Signal::derive(move || snapshot.with(|s| s.selected.contains(&id)))
                on_change=Callback::new(move |checked: bool| state.toggle_row(id, checked))
            />
            {TICKET_ITEM_COLUMNS
                .iter()
                .map(|col| {
                    let text = display_cell(col, &row.cell(col.id));
                    view! {
                        <TableCell>{text}</TableCell>
                    }
                })
                .collect_view()}
        </TableRow>
    }
}
