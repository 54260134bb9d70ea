//! Demo application hosting a single picker.

use chrono::{Days, Local, NaiveDate};
use leptos::prelude::*;

use weekmonth_common::config::PickerConfig;

use crate::components::date_picker::DatePicker;

/// The root `<App/>` component.
#[component]
pub fn App() -> impl IntoView {
    let today = Local::now().date_naive();
    let (selected, set_selected) = signal(today);

    let marked_dates = [3, 8, 15]
        .into_iter()
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .collect();
    let config = PickerConfig {
        max_future_days: 180,
        marked_dates,
        ..PickerConfig::default()
    };

    view! {
        <main class="main-content">
            <p class="wm-selected">"Selected: " {move || selected.get().to_string()}</p>
            <DatePicker
                config=config
                selected_date=selected
                on_date_change=move |date: NaiveDate| set_selected.set(date)
            />
        </main>
    }
}
