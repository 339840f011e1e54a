use crate::shared::icons::icon;
use crate::shared::report_grid::PaginationView;
use leptos::prelude::*;

/// "Showing 51 to 75 of 230 results" (or "No results")
pub fn results_text(view: &PaginationView) -> String {
    match view.visible_range {
        Some((start, end)) => format!("Showing {} to {} of {} results", start, end, view.total_count),
        None => "No results".to_string(),
    }
}

/// PaginationControls component - first / previous / next / last buttons,
/// page indicator and page size select
///
/// Pages are 1-based; buttons are disabled instead of clamping silently.
#[component]
pub fn PaginationControls(
    #[prop(into)] pagination: Signal<PaginationView>,

    /// Callback with the requested page
    on_page_change: Callback<i64>,

    /// Callback with the new page size
    on_page_size_change: Callback<u32>,

    page_size_options: Vec<u32>,

    /// Disables every control (e.g. while a request is in flight)
    #[prop(into, optional)]
    disabled: Signal<bool>,
) -> impl IntoView {
    let at_start = move || disabled.get() || !pagination.get().has_previous;
    let at_end = move || disabled.get() || !pagination.get().has_next;

    view! {
        <div class="pagination-controls">
            <span class="pagination-results">{move || results_text(&pagination.get())}</span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=at_start
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(pagination.get_untracked().page as i64 - 1)
                disabled=at_start
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || {
                    let v = pagination.get();
                    format!("Page {} of {}", v.page, v.page_count.max(1))
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(pagination.get_untracked().page as i64 + 1)
                disabled=at_end
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(pagination.get_untracked().page_count as i64)
                disabled=at_end
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || pagination.get().page_size.to_string()
                disabled=move || disabled.get()
            >
                {page_size_options.into_iter().map(|size| {
                    view! {
                        <option value=size.to_string() selected=move || pagination.get().page_size == size>
                            {format!("{} per page", size)}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
