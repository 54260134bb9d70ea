//! The picker shell: a toggle button over either the week strip or the month grid.

use chrono::{Local, NaiveDate};
use leptos::html::Div;
use leptos::prelude::*;

use weekmonth_common::config::PickerConfig;
use weekmonth_common::picker::{Command, DatePicker as PickerState, Event, ViewMode};

use crate::components::month_grid::MonthGrid;
use crate::components::week_strip::WeekStrip;

/// Shared by every component inside a [`DatePicker`] through context.
#[derive(Clone, Copy)]
pub struct PickerHandle {
    state: RwSignal<PickerState>,
    dispatch: Callback<Command>,
    locale: StoredValue<String>,
}

impl PickerHandle {
    pub fn dispatch(&self, command: Command) {
        self.dispatch.run(command);
    }

    pub fn press(&self, date: NaiveDate) {
        self.dispatch(Command::PressDate(date));
    }

    pub fn is_today(&self, date: NaiveDate) -> bool {
        self.state.with_untracked(|state| state.is_today(date))
    }

    pub fn is_marked(&self, date: NaiveDate) -> bool {
        self.state.with_untracked(|state| state.is_marked(date))
    }

    pub fn locale(&self) -> String {
        self.locale.get_value()
    }
}

/// Week/month date picker.
///
/// The selected date belongs to the caller: taps are reported through
/// `on_date_change` and only show up once `selected_date` changes.
#[component]
pub fn DatePicker(
    /// Range, disabled/marked dates, locale and theme.
    config: PickerConfig,
    /// Currently selected date, owned by the caller.
    #[prop(into)]
    selected_date: Signal<NaiveDate>,
    /// Called with the tapped date.
    #[prop(into)]
    on_date_change: Callback<NaiveDate>,
) -> impl IntoView {
    let today = Local::now().date_naive();
    provide_context(config.theme);

    let mut initial = PickerState::new(&config, today);
    initial.handle(Command::SetSelectedDate(selected_date.get_untracked()));
    let strip_offset = RwSignal::new(initial.initial_scroll().unwrap_or(0));
    let state = RwSignal::new(initial);
    let month_ref = NodeRef::<Div>::new();

    let dispatch = Callback::new(move |command: Command| {
        let events = state.try_update(|s| s.handle(command)).unwrap_or_default();
        for event in events {
            match event {
                Event::DateChanged(date) => on_date_change.run(date),
                Event::ScrollWeekStrip { index } => strip_offset.set(index),
                Event::ScrollMonthGridToTop => {
                    if let Some(grid) = month_ref.get_untracked() {
                        grid.set_scroll_top(0);
                    }
                }
                Event::ViewChanged(_) | Event::MonthsLoaded { .. } => {}
            }
        }
    });

    provide_context(PickerHandle {
        state,
        dispatch,
        locale: StoredValue::new(config.locale.clone()),
    });

    // Mirror the caller's selection into the picker.
    Effect::new(move |_| {
        let date = selected_date.get();
        state.update(|s| {
            s.handle(Command::SetSelectedDate(date));
        });
    });

    let view_mode = Memo::new(move |_| state.with(|s| s.view_mode()));
    let week_days = Memo::new(move |_| state.with(|s| s.week_strip()));
    let months = Memo::new(move |_| state.with(|s| s.months()));
    let fully_loaded = Memo::new(move |_| state.with(|s| s.is_fully_loaded()));

    view! {
        <div class="wm-picker">
            {move || match view_mode.get() {
                ViewMode::Week => view! {
                    <WeekStrip days=week_days offset=strip_offset/>
                }.into_any(),
                ViewMode::Month => view! {
                    <MonthGrid months=months fully_loaded=fully_loaded scroll_ref=month_ref/>
                }.into_any(),
            }}
            <button class="wm-toggle" on:click=move |_| dispatch.run(Command::ToggleView)>
                {move || toggle_label(view_mode.get())}
            </button>
        </div>
    }
}

fn toggle_label(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Week => "Show month",
        ViewMode::Month => "Show week",
    }
}
