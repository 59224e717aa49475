//! Stats module - aggregation, ranking and selection

mod selection;
mod summary;

pub use selection::{select, CountrySelection, SelectionError, SelectionRef};
pub use summary::{
    rank, summarize, worldwide_delta, worldwide_totals, CountrySummary, WorldwideDelta,
    WorldwideTotals,
};
