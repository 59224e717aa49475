//! Dashboard Context Module
//! The immutable query context every UI surface reads from.

use crate::data::{CovidDataset, Metric};
use crate::stats::{
    self, CountrySelection, CountrySummary, SelectionRef, WorldwideDelta, WorldwideTotals,
};
use chrono::NaiveDate;

/// Dataset plus everything derived from it, computed once after load and
/// never mutated afterwards. Shared behind an `Arc`; concurrent readers need
/// no locking. Selection state lives with the caller, not here.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    dataset: CovidDataset,
    ranked: Vec<CountrySummary>,
    worldwide: WorldwideTotals,
    delta: Option<WorldwideDelta>,
    reference_date: Option<NaiveDate>,
}

impl DashboardContext {
    pub fn build(dataset: CovidDataset, reference_date: Option<NaiveDate>) -> Self {
        let summaries = stats::summarize(&dataset);
        let ranked = stats::rank(&summaries);
        let worldwide = stats::worldwide_totals(&summaries);
        let delta = reference_date.map(|date| stats::worldwide_delta(&dataset, date));
        Self {
            dataset,
            ranked,
            worldwide,
            delta,
            reference_date,
        }
    }

    pub fn dataset(&self) -> &CovidDataset {
        &self.dataset
    }

    /// Summaries sorted by total cases, descending.
    pub fn ranked(&self) -> &[CountrySummary] {
        &self.ranked
    }

    /// Fixed-size prefix of the ranking, for the top-N table.
    pub fn top(&self, n: usize) -> &[CountrySummary] {
        &self.ranked[..self.ranked.len().min(n)]
    }

    pub fn worldwide(&self) -> &WorldwideTotals {
        &self.worldwide
    }

    /// Movement on the configured reference date, `None` without one.
    pub fn worldwide_delta(&self) -> Option<&WorldwideDelta> {
        self.delta.as_ref()
    }

    pub fn reference_date(&self) -> Option<NaiveDate> {
        self.reference_date
    }

    /// One metric's series for each of the top `n` ranked countries, in rank
    /// order; feeds the multi-country overview chart.
    pub fn top_series(&self, n: usize, metric: Metric) -> Vec<(String, Vec<(NaiveDate, f64)>)> {
        self.top(n)
            .iter()
            .map(|summary| {
                let points = self
                    .dataset
                    .rows_for(&summary.country)
                    .filter_map(|obs| metric.value(obs).map(|v| (obs.date, v)))
                    .collect();
                (summary.country.clone(), points)
            })
            .collect()
    }

    /// Resolve a selection reference; recomputed per user interaction.
    pub fn select(&self, reference: &SelectionRef) -> Option<CountrySelection> {
        stats::select(&self.ranked, &self.dataset, reference, self.reference_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Observation;

    fn obs(country: &str, day: u32, total_cases: f64) -> Observation {
        Observation {
            country: country.to_string(),
            continent: "Europe".to_string(),
            date: NaiveDate::from_ymd_opt(2020, 3, day).unwrap(),
            population: Some(1_000_000),
            total_cases: Some(total_cases),
            new_cases: Some(1.0),
            total_deaths: Some(total_cases / 100.0),
            new_deaths: None,
        }
    }

    fn context() -> DashboardContext {
        DashboardContext::build(
            CovidDataset::from_observations(vec![
                obs("Albania", 1, 21_000.0),
                obs("Afghanistan", 1, 41_000.0),
                obs("Andorra", 1, 9_000.0),
            ]),
            None,
        )
    }

    #[test]
    fn ranking_and_top_prefix() {
        let ctx = context();
        let names: Vec<&str> = ctx.ranked().iter().map(|s| s.country.as_str()).collect();
        assert_eq!(names, ["Afghanistan", "Albania", "Andorra"]);
        assert_eq!(ctx.top(2).len(), 2);
        assert_eq!(ctx.top(10).len(), 3);
        assert_eq!(ctx.top(2)[0].country, "Afghanistan");
    }

    #[test]
    fn worldwide_is_precomputed_from_summaries() {
        let ctx = context();
        assert_eq!(ctx.worldwide().total_cases, 71_000.0);
    }

    #[test]
    fn top_series_follows_ranking_and_skips_nulls() {
        let mut rows = vec![
            obs("Albania", 1, 21_000.0),
            obs("Afghanistan", 1, 40_000.0),
            obs("Afghanistan", 2, 41_000.0),
            obs("Andorra", 1, 9_000.0),
        ];
        rows.push(Observation {
            total_cases: None,
            ..obs("Afghanistan", 3, 0.0)
        });
        let ctx = DashboardContext::build(CovidDataset::from_observations(rows), None);

        let series = ctx.top_series(2, Metric::TotalCases);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].0, "Afghanistan");
        assert_eq!(series[1].0, "Albania");

        // chronological, with the all-null day left out
        let values: Vec<f64> = series[0].1.iter().map(|&(_, v)| v).collect();
        assert_eq!(values, [40_000.0, 41_000.0]);
    }

    #[test]
    fn delta_is_precomputed_when_reference_date_is_set() {
        let date = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        let ctx = DashboardContext::build(
            CovidDataset::from_observations(vec![
                obs("Albania", 1, 21_000.0),
                obs("Afghanistan", 1, 41_000.0),
            ]),
            Some(date),
        );

        let delta = ctx.worldwide_delta().unwrap();
        assert_eq!(delta.new_cases, 2.0);
        assert_eq!(ctx.reference_date(), Some(date));

        assert!(context().worldwide_delta().is_none());
    }

    #[test]
    fn default_select_is_top_ranked() {
        let ctx = context();
        let sel = ctx.select(&SelectionRef::default()).unwrap();
        assert_eq!(sel.summary.country, "Afghanistan");
    }
}
