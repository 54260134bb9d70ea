//! Vertically scrolling month blocks with Monday-start padding.

use leptos::html::Div;
use leptos::prelude::*;

use weekmonth_common::calendar::CalendarMonth;
use weekmonth_common::date::{month_label, weekday_labels};
use weekmonth_common::picker::Command;
use weekmonth_common::window::is_close_to_bottom;

use crate::components::date_picker::PickerHandle;
use crate::components::day_cell::DayCell;

#[component]
pub fn MonthGrid(
    #[prop(into)] months: Signal<Vec<CalendarMonth>>,
    #[prop(into)] fully_loaded: Signal<bool>,
    /// Scroll container, so the picker can jump back to the top.
    scroll_ref: NodeRef<Div>,
) -> impl IntoView {
    let picker = expect_context::<PickerHandle>();

    let on_scroll = move |_| {
        if fully_loaded.get_untracked() {
            return;
        }
        if let Some(grid) = scroll_ref.get_untracked() {
            if is_close_to_bottom(
                f64::from(grid.client_height()),
                f64::from(grid.scroll_top()),
                f64::from(grid.scroll_height()),
            ) {
                picker.dispatch(Command::ReachedBottom);
            }
        }
    };

    view! {
        <div class="wm-month-grid" node_ref=scroll_ref on:scroll=on_scroll>
            {move || {
                months.get()
                    .into_iter()
                    .map(|month| view! { <MonthBlock month=month/> })
                    .collect_view()
            }}
            <Show when=move || !fully_loaded.get()>
                <button class="wm-load-more" on:click=move |_| picker.dispatch(Command::ReachedBottom)>
                    "Load more…"
                </button>
            </Show>
        </div>
    }
}

/// One month: title, weekday header, then the padded day grid.
#[component]
fn MonthBlock(month: CalendarMonth) -> impl IntoView {
    let picker = expect_context::<PickerHandle>();
    let locale = picker.locale();
    let title = format!("{} {}", month_label(month.first_date(), &locale), month.year());

    let header = weekday_labels(&locale)
        .into_iter()
        .map(|label| view! { <span>{label}</span> })
        .collect_view();

    // Empty cells for padding before the 1st
    let padding = (0..month.leading_blanks())
        .map(|_| view! { <div class="wm-day empty"></div> })
        .collect_view();

    let cells = month
        .into_days()
        .into_iter()
        .map(|day| view! { <DayCell day=day/> })
        .collect_view();

    view! {
        <section class="wm-month">
            <h3 class="wm-month-title">{title}</h3>
            <div class="wm-weekdays">{header}</div>
            <div class="wm-days">
                {padding}
                {cells}
            </div>
        </section>
    }
}
