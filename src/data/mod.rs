//! Data module - CSV loading and the cleaned dataset model

mod loader;
mod model;

pub use loader::{DatasetLoader, LoaderError};
pub use model::{date_from_days, date_to_days, CovidDataset, Metric, Observation};
