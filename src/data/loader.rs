//! CSV Loader Module
//! Reads the per-country daily metrics snapshot with Polars, validates the
//! schema, applies the cleaning filters and materializes typed rows.

use crate::data::model::{date_from_days, CovidDataset, Observation};
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Columns the source schema must provide, besides the country column.
const REQUIRED_COLUMNS: [&str; 7] = [
    "continent",
    "date",
    "population",
    "total_cases",
    "new_cases",
    "total_deaths",
    "new_deaths",
];

/// Accepted names for the country column. OWID snapshots call it `location`.
const COUNTRY_COLUMNS: [&str; 2] = ["country", "location"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("failed to read CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("required column '{0}' is missing from the source")]
    MissingColumn(&'static str),
    #[error("column '{column}' has unexpected type {dtype}")]
    WrongType { column: &'static str, dtype: String },
}

/// Loads and cleans the dataset. Stateless; callers keep the result.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Read the CSV once and produce the cleaned dataset.
    ///
    /// Cleaning drops, in order: rows without a continent classification,
    /// then rows where both total_cases and new_cases are null. Row order
    /// and all retained columns are preserved. Schema problems are fatal.
    pub fn load_and_clean(path: &Path) -> Result<CovidDataset, LoaderError> {
        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10_000))
            .with_ignore_errors(true)
            .with_try_parse_dates(true)
            .finish()?
            .collect()?;

        let country_col = Self::country_column(&df)?;
        for name in REQUIRED_COLUMNS {
            if df.column(name).is_err() {
                return Err(LoaderError::MissingColumn(name));
            }
        }

        let raw_rows = df.height();
        let cleaned = df
            .lazy()
            .filter(col("continent").is_not_null())
            .filter(
                col("total_cases")
                    .is_not_null()
                    .or(col("new_cases").is_not_null()),
            )
            .collect()?;

        log::info!(
            "loaded {} rows from {} ({} after cleaning)",
            raw_rows,
            path.display(),
            cleaned.height()
        );

        Self::extract(&cleaned, country_col)
    }

    fn country_column(df: &DataFrame) -> Result<&'static str, LoaderError> {
        COUNTRY_COLUMNS
            .iter()
            .copied()
            .find(|name| df.column(name).is_ok())
            .ok_or(LoaderError::MissingColumn("country"))
    }

    /// Convert the cleaned DataFrame into typed observations.
    fn extract(df: &DataFrame, country_col: &str) -> Result<CovidDataset, LoaderError> {
        let date_col = df.column("date")?;
        if !matches!(date_col.dtype(), DataType::Date) {
            return Err(LoaderError::WrongType {
                column: "date",
                dtype: date_col.dtype().to_string(),
            });
        }
        let days = date_col.cast(&DataType::Int32)?;
        let days = days.i32()?;

        let countries = df.column(country_col)?.as_materialized_series().str()?;
        let continents = df.column("continent")?.as_materialized_series().str()?;

        let populations = df.column("population")?.cast(&DataType::Float64)?;
        let populations = populations.f64()?;
        let total_cases = df.column("total_cases")?.cast(&DataType::Float64)?;
        let total_cases = total_cases.f64()?;
        let new_cases = df.column("new_cases")?.cast(&DataType::Float64)?;
        let new_cases = new_cases.f64()?;
        let total_deaths = df.column("total_deaths")?.cast(&DataType::Float64)?;
        let total_deaths = total_deaths.f64()?;
        let new_deaths = df.column("new_deaths")?.cast(&DataType::Float64)?;
        let new_deaths = new_deaths.f64()?;

        let mut observations = Vec::with_capacity(df.height());
        let mut undated = 0usize;

        for i in 0..df.height() {
            let (Some(country), Some(continent)) = (countries.get(i), continents.get(i)) else {
                continue;
            };
            // Rows without a parseable date cannot be charted or matched
            // against the reference date.
            let Some(date) = days.get(i).and_then(date_from_days) else {
                undated += 1;
                continue;
            };

            observations.push(Observation {
                country: country.to_string(),
                continent: continent.to_string(),
                date,
                population: populations.get(i).map(|p| p as u64),
                total_cases: total_cases.get(i),
                new_cases: new_cases.get(i),
                total_deaths: total_deaths.get(i),
                new_deaths: new_deaths.get(i),
            });
        }

        if undated > 0 {
            log::warn!("dropped {undated} rows without a parseable date");
        }

        Ok(CovidDataset::from_observations(observations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str =
        "iso_code,continent,location,date,population,total_cases,new_cases,total_deaths,new_deaths";

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn drops_rows_without_continent_or_case_counts() {
        let file = write_csv(&[
            // no continent: international aggregate row
            "OWID_INT,,International,2020-03-01,7000000,100,10,1,0",
            // both case columns empty
            "AFG,Asia,Afghanistan,2020-03-01,38928341,,,2,1",
            "AFG,Asia,Afghanistan,2020-03-02,38928341,5,5,2,0",
            "ALB,Europe,Albania,2020-03-02,2877800,,3,0,0",
        ]);

        let dataset = DatasetLoader::load_and_clean(file.path()).unwrap();

        assert_eq!(dataset.len(), 2);
        for obs in dataset.observations() {
            assert!(!obs.continent.is_empty());
            assert!(obs.total_cases.is_some() || obs.new_cases.is_some());
        }
        assert_eq!(dataset.countries(), ["Afghanistan", "Albania"]);
    }

    #[test]
    fn preserves_row_order_and_values() {
        let file = write_csv(&[
            "AFG,Asia,Afghanistan,2020-03-01,38928341,1,1,,",
            "AFG,Asia,Afghanistan,2020-03-02,38928341,5,4,1,1",
        ]);

        let dataset = DatasetLoader::load_and_clean(file.path()).unwrap();
        let rows: Vec<_> = dataset.rows_for("Afghanistan").collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].date,
            chrono::NaiveDate::from_ymd_opt(2020, 3, 1).unwrap()
        );
        assert_eq!(rows[0].total_deaths, None);
        assert_eq!(rows[1].total_cases, Some(5.0));
        assert_eq!(rows[1].population, Some(38_928_341));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        writeln!(file, "location,date,total_cases").unwrap();
        writeln!(file, "Afghanistan,2020-03-01,5").unwrap();
        file.flush().unwrap();

        let err = DatasetLoader::load_and_clean(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(_)));
    }

    #[test]
    fn unparsable_date_column_is_fatal() {
        let file = write_csv(&[
            "AFG,Asia,Afghanistan,not-a-date,38928341,5,5,2,0",
            "AFG,Asia,Afghanistan,also-bad,38928341,6,1,2,0",
        ]);

        let err = DatasetLoader::load_and_clean(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::WrongType { column: "date", .. }));
    }
}
