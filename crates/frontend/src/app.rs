use crate::projections::p950_ticket_items_report::ui::list::TicketItemsReport;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ConfigProvider>
            <main class="app">
                <TicketItemsReport />
            </main>
        </ConfigProvider>
    }
}
