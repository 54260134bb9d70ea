//! A single tappable day.

use chrono::Datelike;
use leptos::prelude::*;

use weekmonth_common::calendar::CalendarDay;
use weekmonth_common::date::{day_number, weekday_labels};
use weekmonth_common::theme::{DayAppearance, Theme};

use crate::components::date_picker::PickerHandle;

#[component]
pub fn DayCell(
    day: CalendarDay,
    /// Show the weekday initial above the number.
    #[prop(optional)]
    show_weekday: bool,
) -> impl IntoView {
    let picker = expect_context::<PickerHandle>();
    let theme = use_context::<Theme>().unwrap_or_default();
    let date = day.date;
    let look = DayAppearance::resolve(&day, picker.is_today(date), picker.is_marked(date), &theme);

    let background = look
        .background
        .map(|color| color.to_string())
        .unwrap_or_else(|| "transparent".into());
    let style = format!("color: {}; background-color: {background}", look.text);

    let weekday = show_weekday.then(|| {
        let labels = weekday_labels(&picker.locale());
        let initial: String = labels[date.weekday().num_days_from_monday() as usize]
            .chars()
            .take(1)
            .collect();
        view! { <span class="wm-day-char">{initial}</span> }
    });

    view! {
        <div class="wm-day">
            {weekday}
            <button
                class="wm-day-number"
                style=style
                disabled=day.is_disabled
                on:click=move |_| picker.press(date)
            >
                {day_number(date)}
            </button>
            {look.dot.map(|dot| view! {
                <span class="wm-dot" style=format!("background-color: {dot}")></span>
            })}
        </div>
    }
}
