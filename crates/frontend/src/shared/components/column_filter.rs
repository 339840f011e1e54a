//! Table header cell with a per-column filter dropdown

use crate::shared::components::date_input::{parse_input_date, to_input_date, DateInput};
use crate::shared::icons::icon;
use crate::shared::report_grid::{DateRange, FilterValue};
use contracts::shared::report_grid::{ColumnDef, FilterKind, FilterOption};
use leptos::prelude::*;
use thaw::*;

/// Callbacks of a column filter dropdown
#[derive(Clone, Copy)]
pub struct ColumnFilterActions {
    /// Open or close this column's dropdown
    pub on_toggle: Callback<()>,
    /// Replace the pending value
    pub on_change: Callback<FilterValue>,
    /// Check or uncheck one multi-select option
    pub on_toggle_option: Callback<(String, bool)>,
    /// "Select all" of a multi-select dropdown
    pub on_select_all: Callback<bool>,
    pub on_apply: Callback<()>,
    pub on_clear: Callback<()>,
}

/// Header cell: column name, filter icon (highlighted while a filter is
/// applied) and, when open, the editor matching the column's filter kind.
#[component]
pub fn ColumnFilterHeader(
    column: ColumnDef,
    #[prop(into)] is_open: Signal<bool>,
    #[prop(into)] is_filtered: Signal<bool>,
    /// Pending (not yet applied) value
    #[prop(into)]
    pending: Signal<Option<FilterValue>>,
    /// Options of a multi-select or single-choice column
    #[prop(into)]
    options: Signal<Vec<FilterOption>>,
    actions: ColumnFilterActions,
) -> impl IntoView {
    if !column.filterable {
        return view! {
            <TableHeaderCell resizable=true min_width=100.0>
                {column.name}
            </TableHeaderCell>
        }
        .into_any();
    }

    let name = column.name;
    let kind = column.filter_kind;
    let icon_class = move || {
        if is_filtered.get() {
            "column-filter__icon column-filter__icon--active"
        } else {
            "column-filter__icon"
        }
    };

    view! {
        <TableHeaderCell resizable=true min_width=120.0>
            <div class="column-filter">
                <span class="column-filter__name">{name}</span>
                <span
                    class=icon_class
                    title=format!("Filter by {}", name)
                    on:click=move |e| {
                        e.stop_propagation();
                        actions.on_toggle.run(());
                    }
                >
                    {icon("filter")}
                </span>
                <Show when=move || is_open.get()>
                    <div class="column-filter__dropdown" on:click=|e| e.stop_propagation()>
                        <div class="column-filter__title">{format!("Filter {}", name)}</div>
                        {move || match kind {
                            FilterKind::MultiSelect => {
                                view! { <MultiSelectEditor pending=pending options=options actions=actions /> }.into_any()
                            }
                            FilterKind::Text => view! { <TextEditor pending=pending actions=actions /> }.into_any(),
                            FilterKind::Boolean => view! { <BooleanEditor pending=pending actions=actions /> }.into_any(),
                            FilterKind::DateRange => view! { <DateRangeEditor pending=pending actions=actions /> }.into_any(),
                            FilterKind::SingleChoice => {
                                view! { <SingleChoiceEditor pending=pending options=options actions=actions /> }.into_any()
                            }
                        }}
                        <div class="column-filter__actions">
                            <Button
                                size=ButtonSize::Small
                                appearance=ButtonAppearance::Subtle
                                on_click=move |_| actions.on_clear.run(())
                            >
                                "Clear"
                            </Button>
                            <Button
                                size=ButtonSize::Small
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| actions.on_apply.run(())
                            >
                                "Apply"
                            </Button>
                        </div>
                    </div>
                </Show>
            </div>
        </TableHeaderCell>
    }
    .into_any()
}

/// Options whose label contains `search` (case-insensitive)
pub fn matching_options(options: &[FilterOption], search: &str) -> Vec<FilterOption> {
    let needle = search.trim().to_lowercase();
    options
        .iter()
        .filter(|o| needle.is_empty() || o.label.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[component]
fn MultiSelectEditor(
    pending: Signal<Option<FilterValue>>,
    options: Signal<Vec<FilterOption>>,
    actions: ColumnFilterActions,
) -> impl IntoView {
    let search = RwSignal::new(String::new());
    let is_checked = move |value: &str| match pending.get() {
        Some(FilterValue::MultiSelect(set)) => set.contains(value),
        _ => false,
    };
    let all_checked = move || {
        let opts = options.get();
        !opts.is_empty() && opts.iter().all(|o| is_checked(&o.value))
    };

    view! {
        <input
            type="text"
            class="column-filter__search"
            placeholder="Search..."
            prop:value=move || search.get()
            on:input=move |ev| search.set(event_target_value(&ev))
        />
        <label class="column-filter__option column-filter__option--all">
            <input
                type="checkbox"
                prop:checked=all_checked
                on:change=move |ev| actions.on_select_all.run(event_target_checked(&ev))
            />
            "Select all"
        </label>
        <div class="column-filter__options">
            <For
                each=move || matching_options(&options.get(), &search.get())
                key=|o| o.value.clone()
                children=move |option| {
                    let value = option.value.clone();
                    let value_for_change = option.value.clone();
                    view! {
                        <label class="column-filter__option">
                            <input
                                type="checkbox"
                                prop:checked=move || is_checked(&value)
                                on:change=move |ev| {
                                    actions
                                        .on_toggle_option
                                        .run((value_for_change.clone(), event_target_checked(&ev)))
                                }
                            />
                            {option.label}
                        </label>
                    }
                }
            />
            <Show when=move || options.get().is_empty()>
                <div class="column-filter__empty">"No values available"</div>
            </Show>
        </div>
    }
}

#[component]
fn TextEditor(pending: Signal<Option<FilterValue>>, actions: ColumnFilterActions) -> impl IntoView {
    let text = move || match pending.get() {
        Some(FilterValue::Text(s)) => s,
        _ => String::new(),
    };

    view! {
        <input
            type="text"
            class="column-filter__text"
            placeholder="Contains..."
            prop:value=text
            on:input=move |ev| actions.on_change.run(FilterValue::Text(event_target_value(&ev)))
            on:keydown=move |ev| {
                if ev.key() == "Enter" {
                    actions.on_apply.run(());
                }
            }
        />
    }
}

#[component]
fn BooleanEditor(pending: Signal<Option<FilterValue>>, actions: ColumnFilterActions) -> impl IntoView {
    let current = move || match pending.get() {
        Some(FilterValue::Boolean(b)) => b,
        _ => None,
    };
    let choices: [(&'static str, Option<bool>); 3] = [("All", None), ("Yes", Some(true)), ("No", Some(false))];

    view! {
        <div class="column-filter__options">
            {choices
                .into_iter()
                .map(|(label, value)| {
                    view! {
                        <label class="column-filter__option">
                            <input
                                type="radio"
                                prop:checked=move || current() == value
                                on:change=move |_| actions.on_change.run(FilterValue::Boolean(value))
                            />
                            {label}
                        </label>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn DateRangeEditor(pending: Signal<Option<FilterValue>>, actions: ColumnFilterActions) -> impl IntoView {
    let range = move || match pending.get() {
        Some(FilterValue::DateRange(r)) => r,
        _ => DateRange::default(),
    };
    let from = Signal::derive(move || to_input_date(range().from));
    let to = Signal::derive(move || to_input_date(range().to));

    view! {
        <div class="column-filter__dates">
            <DateInput
                label="From"
                value=from
                on_change=move |raw: String| {
                    let current = range();
                    actions
                        .on_change
                        .run(FilterValue::DateRange(DateRange::new(parse_input_date(&raw), current.to)));
                }
            />
            <DateInput
                label="To"
                value=to
                on_change=move |raw: String| {
                    let current = range();
                    actions
                        .on_change
                        .run(FilterValue::DateRange(DateRange::new(current.from, parse_input_date(&raw))));
                }
            />
        </div>
    }
}

#[component]
fn SingleChoiceEditor(
    pending: Signal<Option<FilterValue>>,
    options: Signal<Vec<FilterOption>>,
    actions: ColumnFilterActions,
) -> impl IntoView {
    let current = move || match pending.get() {
        Some(FilterValue::SingleChoice(c)) => c,
        _ => None,
    };

    view! {
        <div class="column-filter__options">
            <label class="column-filter__option">
                <input
                    type="radio"
                    prop:checked=move || current().is_none()
                    on:change=move |_| actions.on_change.run(FilterValue::SingleChoice(None))
                />
                "All"
            </label>
            {move || {
                options
                    .get()
                    .into_iter()
                    .map(|option| {
                        let value = option.value.clone();
                        let selected = option.value.clone();
                        view! {
                            <label class="column-filter__option">
                                <input
                                    type="radio"
                                    prop:checked=move || current().as_deref() == Some(selected.as_str())
                                    on:change=move |_| {
                                        actions.on_change.run(FilterValue::SingleChoice(Some(value.clone())))
                                    }
                                />
                                {option.label}
                            </label>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
