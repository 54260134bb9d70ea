//! Horizontally paged strip of days.

use leptos::prelude::*;

use weekmonth_common::calendar::CalendarDay;

use crate::components::day_cell::DayCell;

/// Days laid out in one row, shifted so the day at `offset` is the first
/// visible cell.  Each cell is `--wm-cell-width` wide (a seventh of the strip).
#[component]
pub fn WeekStrip(
    #[prop(into)] days: Signal<Vec<CalendarDay>>,
    #[prop(into)] offset: Signal<usize>,
) -> impl IntoView {
    view! {
        <div class="wm-week-strip">
            <div class="wm-week-track" style=move || track_style(offset.get())>
                {move || {
                    days.get()
                        .into_iter()
                        .map(|day| view! { <DayCell day=day show_weekday=true/> })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

fn track_style(offset: usize) -> String {
    format!("transform: translateX(calc(var(--wm-cell-width) * -{offset}))")
}
