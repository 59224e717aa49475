//! Charts module - plot building for the detail view

mod plotter;

pub use plotter::{ChartPlotter, CountrySeries};
