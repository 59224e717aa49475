//! Selection Module
//! Resolves the highlighted country and extracts its detail data.

use crate::data::{CovidDataset, Metric, Observation};
use crate::stats::CountrySummary;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SelectionError {
    #[error("no data for {country} on {date}")]
    NoDataForDate { country: String, date: NaiveDate },
}

/// How the UI refers to the country it wants highlighted.
///
/// A reference that does not resolve (unknown name, out-of-range rank) falls
/// back to the top-ranked country, so the dashboard always shows something.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SelectionRef {
    #[default]
    TopRanked,
    /// Position in the ranked summary list, the order every UI surface shows.
    Rank(usize),
    Name(String),
}

/// Everything the detail views need for one country.
#[derive(Debug, Clone)]
pub struct CountrySelection {
    pub summary: CountrySummary,
    observations: Vec<Observation>,
    /// Row matching the configured reference date, when one exists.
    pub reference: Option<Observation>,
}

/// Resolve `reference` against the ranked summaries and slice the selected
/// country's rows out of the dataset. `None` only for an empty dataset.
pub fn select(
    ranked: &[CountrySummary],
    dataset: &CovidDataset,
    reference: &SelectionRef,
    reference_date: Option<NaiveDate>,
) -> Option<CountrySelection> {
    let summary = resolve(ranked, reference)?;
    let observations: Vec<Observation> = dataset.rows_for(&summary.country).cloned().collect();

    let reference_row = reference_date.and_then(|date| {
        match snapshot_on(&observations, &summary.country, date) {
            Ok(row) => Some(row.clone()),
            Err(e) => {
                // Recovered by omitting the snapshot display.
                log::warn!("{e}");
                None
            }
        }
    });

    Some(CountrySelection {
        summary: summary.clone(),
        observations,
        reference: reference_row,
    })
}

fn resolve<'a>(
    ranked: &'a [CountrySummary],
    reference: &SelectionRef,
) -> Option<&'a CountrySummary> {
    let resolved = match reference {
        SelectionRef::TopRanked => None,
        SelectionRef::Rank(i) => ranked.get(*i),
        SelectionRef::Name(name) => ranked.iter().find(|s| &s.country == name),
    };
    resolved.or_else(|| ranked.first())
}

fn snapshot_on<'a>(
    observations: &'a [Observation],
    country: &str,
    date: NaiveDate,
) -> Result<&'a Observation, SelectionError> {
    observations
        .iter()
        .find(|o| o.date == date)
        .ok_or_else(|| SelectionError::NoDataForDate {
            country: country.to_string(),
            date,
        })
}

impl CountrySelection {
    /// The selected country's rows, chronological.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Project one metric as (date, value) pairs in chronological order,
    /// skipping rows where the metric is null.
    ///
    /// Recomputed from the stored rows on every call: the iterator is finite,
    /// restartable and shares no mutable state between consumers.
    pub fn series(&self, metric: Metric) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.observations
            .iter()
            .filter_map(move |obs| metric.value(obs).map(|v| (obs.date, v)))
    }

    /// The observation recorded on `date`, or a recoverable not-found error.
    pub fn snapshot_on(&self, date: NaiveDate) -> Result<&Observation, SelectionError> {
        snapshot_on(&self.observations, &self.summary.country, date)
    }
}
