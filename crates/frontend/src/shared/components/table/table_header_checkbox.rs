//! "Select all" checkbox in the table header

use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

/// Header checkbox with three states: unchecked, checked and indeterminate
/// (some but not all rows of the page selected)
#[component]
pub fn TableHeaderCheckbox(
    /// Every rendered row is selected
    #[prop(into)]
    all_selected: Signal<bool>,

    /// Some, but not all, rendered rows are selected
    #[prop(into)]
    partially_selected: Signal<bool>,

    /// true = select all rows of the page, false = clear the selection
    on_change: Callback<bool>,
) -> impl IntoView {
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    // `indeterminate` is a DOM property only, there is no attribute for it
    Effect::new(move |_| {
        let indeterminate = partially_selected.get();
        if let Some(input) = checkbox_ref.get() {
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(indeterminate);
            }
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                aria-label="Select all rows"
                prop:checked=move || all_selected.get()
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}
