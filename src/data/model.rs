//! Dataset Model Module
//! Typed observation rows and the cleaned, immutable dataset.

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// Days between 0001-01-01 (chrono's CE epoch) and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Days since the Unix epoch for a calendar date.
pub fn date_to_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Calendar date from days since the Unix epoch.
pub fn date_from_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
}

/// One (country, date) row of the cleaned snapshot.
///
/// Cleaning guarantees a continent classification and at least one non-null
/// case count per row; the individual metric columns stay nullable.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub country: String,
    pub continent: String,
    pub date: NaiveDate,
    pub population: Option<u64>,
    pub total_cases: Option<f64>,
    pub new_cases: Option<f64>,
    pub total_deaths: Option<f64>,
    pub new_deaths: Option<f64>,
}

/// Metric columns the per-country detail charts can project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    TotalCases,
    NewCases,
    TotalDeaths,
    NewDeaths,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::TotalCases,
        Metric::NewCases,
        Metric::TotalDeaths,
        Metric::NewDeaths,
    ];

    /// Display name for chart titles and axis labels.
    pub fn label(self) -> &'static str {
        match self {
            Metric::TotalCases => "Total Cases",
            Metric::NewCases => "New Cases",
            Metric::TotalDeaths => "Total Deaths",
            Metric::NewDeaths => "New Deaths",
        }
    }

    /// Source column name, also used for widget ids.
    pub fn key(self) -> &'static str {
        match self {
            Metric::TotalCases => "total_cases",
            Metric::NewCases => "new_cases",
            Metric::TotalDeaths => "total_deaths",
            Metric::NewDeaths => "new_deaths",
        }
    }

    /// The metric's value on one observation.
    pub fn value(self, obs: &Observation) -> Option<f64> {
        match self {
            Metric::TotalCases => obs.total_cases,
            Metric::NewCases => obs.new_cases,
            Metric::TotalDeaths => obs.total_deaths,
            Metric::NewDeaths => obs.new_deaths,
        }
    }
}

/// Cleaned observations in source-file order with a per-country row index.
///
/// Immutable after construction. The app shares it behind an `Arc`, so any
/// number of readers may query it without locking. Within a country the row
/// order is the file order, which is chronological in the source snapshots.
#[derive(Debug, Clone, Default)]
pub struct CovidDataset {
    observations: Vec<Observation>,
    countries: Vec<String>,
    by_country: HashMap<String, Vec<usize>>,
}

impl CovidDataset {
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let mut countries: Vec<String> = Vec::new();
        let mut by_country: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, obs) in observations.iter().enumerate() {
            let rows = by_country.entry(obs.country.clone()).or_insert_with(|| {
                countries.push(obs.country.clone());
                Vec::new()
            });
            rows.push(i);
        }

        Self {
            observations,
            countries,
            by_country,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Distinct countries in first-seen order.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// The rows of one country, in chronological order. Empty for an unknown
    /// country name.
    pub fn rows_for<'a>(&'a self, country: &str) -> impl Iterator<Item = &'a Observation> + 'a {
        self.by_country
            .get(country)
            .into_iter()
            .flatten()
            .map(move |&i| &self.observations[i])
    }
}
