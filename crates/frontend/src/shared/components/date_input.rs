use chrono::NaiveDate;
use leptos::prelude::*;

const INPUT_FORMAT: &str = "%Y-%m-%d";

/// Value of a native date input; `None` for an empty or partial date
pub fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), INPUT_FORMAT).ok()
}

pub fn to_input_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(INPUT_FORMAT).to_string()).unwrap_or_default()
}

/// DateInput component with native date picker
/// The browser displays the date in the user's locale format
#[component]
pub fn DateInput(
    /// The date value in yyyy-mm-dd format
    #[prop(into)]
    value: Signal<String>,
    /// Callback when the date changes (receives yyyy-mm-dd format, or "" when cleared)
    on_change: impl Fn(String) + 'static,
    #[prop(optional, into)] label: Option<String>,
) -> impl IntoView {
    view! {
        <label class="date-input">
            {label.map(|l| view! { <span class="date-input__label">{l}</span> })}
            <input
                type="date"
                class="date-input__field"
                prop:value=value
                on:input=move |ev| {
                    on_change(event_target_value(&ev));
                }
            />
        </label>
    }
}
