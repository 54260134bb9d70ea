pub mod date_picker;
pub mod day_cell;
pub mod month_grid;
pub mod week_strip;
