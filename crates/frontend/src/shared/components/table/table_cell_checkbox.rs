//! Row selection checkbox

use leptos::prelude::*;
use thaw::*;

/// Checkbox cell of a single row
///
/// Stops click propagation so selecting does not trigger the row's own click.
#[component]
pub fn TableCellCheckbox(
    #[prop(into)] checked: Signal<bool>,

    /// Callback with the new checked state
    on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                aria-label="Select row"
                prop:checked=move || checked.get()
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableCell>
    }
}
