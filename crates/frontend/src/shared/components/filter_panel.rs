use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Applied filter shown as a removable chip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilterTag {
    pub column: String,
    pub label: String,
}

/// Bar of active filter chips with a "Clear all" action; hidden when no
/// filter is applied
#[component]
pub fn ActiveFilters(
    #[prop(into)] tags: Signal<Vec<ActiveFilterTag>>,

    /// Callback with the column id whose chip was removed
    on_remove: Callback<String>,

    on_clear_all: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || !tags.get().is_empty()>
            <div class="active-filters">
                {icon("filter")}
                <span class="active-filters__title">
                    {move || format!("Filters ({})", tags.get().len())}
                </span>
                <For
                    each=move || tags.get()
                    key=|tag| tag.column.clone()
                    children=move |tag| {
                        let column = tag.column.clone();
                        view! {
                            <FilterTag
                                label=tag.label
                                on_remove=Callback::new(move |_| on_remove.run(column.clone()))
                            />
                        }
                    }
                />
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| on_clear_all.run(())
                >
                    "Clear all"
                </Button>
            </div>
        </Show>
    }
}

/// FilterTag component - individual filter tag/chip
#[component]
pub fn FilterTag(
    /// Tag label
    #[prop(into)]
    label: String,

    /// Callback when remove is clicked
    on_remove: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filter-tag">
            <span>{label}</span>
            <span
                class="filter-tag__remove"
                title="Remove filter"
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                {icon("x")}
            </span>
        </div>
    }
}
