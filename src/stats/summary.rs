//! Country Summary Module
//! Per-country aggregation, ranking and worldwide totals.

use crate::data::CovidDataset;
use chrono::NaiveDate;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Aggregated maxima for one country.
///
/// `None` marks a column that was null in every row of the group. The marker
/// is kept as-is here; coercing unknown to zero is a display-layer convention
/// applied only in [`worldwide_totals`]. Note that `total_cases >=
/// total_deaths` is not guaranteed by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CountrySummary {
    pub country: String,
    pub total_cases: Option<f64>,
    pub total_deaths: Option<f64>,
    pub population: Option<u64>,
}

impl CountrySummary {
    /// Max cases normalized by population, `None` when either is unknown or
    /// the population is zero.
    pub fn cases_per_million(&self) -> Option<f64> {
        per_million(self.total_cases?, self.population?)
    }

    pub fn deaths_per_million(&self) -> Option<f64> {
        per_million(self.total_deaths?, self.population?)
    }
}

fn per_million(metric: f64, population: u64) -> Option<f64> {
    if population == 0 {
        None
    } else {
        Some(metric / population as f64 * 1_000_000.0)
    }
}

/// Worldwide figures for the summary banner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorldwideTotals {
    pub total_cases: f64,
    pub total_deaths: f64,
    pub cases_per_million: Option<f64>,
    pub deaths_per_million: Option<f64>,
}

/// One summary per distinct country, in the dataset's first-seen order.
///
/// Each aggregate takes the max of its own column independently, ignoring
/// nulls; a group that is all-null in a column yields `None` for it.
pub fn summarize(dataset: &CovidDataset) -> Vec<CountrySummary> {
    dataset
        .countries()
        .par_iter()
        .map(|country| {
            let mut summary = CountrySummary {
                country: country.clone(),
                total_cases: None,
                total_deaths: None,
                population: None,
            };
            for obs in dataset.rows_for(country) {
                summary.total_cases = max_f64(summary.total_cases, obs.total_cases);
                summary.total_deaths = max_f64(summary.total_deaths, obs.total_deaths);
                summary.population = max_u64(summary.population, obs.population);
            }
            summary
        })
        .collect()
}

fn max_f64(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

fn max_u64(a: Option<u64>, b: Option<u64>) -> Option<u64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

/// Stable descending sort by total cases; unknown sorts last, ties keep the
/// input order. Top-N views are a prefix of the result.
pub fn rank(summaries: &[CountrySummary]) -> Vec<CountrySummary> {
    let mut ranked = summaries.to_vec();
    ranked.sort_by(|a, b| match (a.total_cases, b.total_cases) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ranked
}

/// Day-over-day movement across all countries on one date, for the
/// "past 24 hrs" banner lines.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldwideDelta {
    pub date: NaiveDate,
    pub new_cases: f64,
    pub new_deaths: f64,
}

impl WorldwideDelta {
    /// The case delta as a percentage of the worldwide case total, `None`
    /// when the total is zero.
    pub fn cases_percent(&self, totals: &WorldwideTotals) -> Option<f64> {
        percent(self.new_cases, totals.total_cases)
    }

    /// The death delta as a percentage of the worldwide death total.
    pub fn deaths_percent(&self, totals: &WorldwideTotals) -> Option<f64> {
        percent(self.new_deaths, totals.total_deaths)
    }
}

fn percent(part: f64, whole: f64) -> Option<f64> {
    if whole == 0.0 {
        None
    } else {
        Some(part / whole * 100.0)
    }
}

/// Sum the daily-change columns across every row recorded on `date`,
/// treating unknown as zero like [`worldwide_totals`].
pub fn worldwide_delta(dataset: &CovidDataset, date: NaiveDate) -> WorldwideDelta {
    let mut delta = WorldwideDelta {
        date,
        new_cases: 0.0,
        new_deaths: 0.0,
    };
    for obs in dataset.observations().iter().filter(|o| o.date == date) {
        delta.new_cases += obs.new_cases.unwrap_or(0.0);
        delta.new_deaths += obs.new_deaths.unwrap_or(0.0);
    }
    delta
}

/// Sums across all summaries, treating unknown as zero for the summation.
/// Per-million rates are `None` when the summed population is zero.
pub fn worldwide_totals(summaries: &[CountrySummary]) -> WorldwideTotals {
    let total_cases: f64 = summaries.iter().filter_map(|s| s.total_cases).sum();
    let total_deaths: f64 = summaries.iter().filter_map(|s| s.total_deaths).sum();
    let population: u64 = summaries.iter().filter_map(|s| s.population).sum();

    WorldwideTotals {
        total_cases,
        total_deaths,
        cases_per_million: per_million(total_cases, population),
        deaths_per_million: per_million(total_deaths, population),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Observation;
    use chrono::NaiveDate;

    fn obs(
        country: &str,
        day: u32,
        population: Option<u64>,
        total_cases: Option<f64>,
        total_deaths: Option<f64>,
    ) -> Observation {
        Observation {
            country: country.to_string(),
            continent: "Asia".to_string(),
            date: NaiveDate::from_ymd_opt(2020, 3, day).unwrap(),
            population,
            total_cases,
            new_cases: Some(1.0),
            total_deaths,
            new_deaths: None,
        }
    }

    fn two_country_dataset() -> CovidDataset {
        CovidDataset::from_observations(vec![
            obs("Albania", 1, Some(2_877_800), Some(20_000.0), Some(500.0)),
            obs("Albania", 2, Some(2_877_800), Some(21_000.0), Some(550.0)),
            obs("Afghanistan", 1, Some(38_928_341), Some(40_000.0), None),
            obs("Afghanistan", 2, Some(38_928_341), Some(41_000.0), Some(1_500.0)),
        ])
    }

    #[test]
    fn summarize_takes_independent_maxima() {
        let summaries = summarize(&two_country_dataset());

        // first-seen order
        assert_eq!(summaries[0].country, "Albania");
        assert_eq!(summaries[0].total_cases, Some(21_000.0));
        assert_eq!(summaries[0].total_deaths, Some(550.0));
        assert_eq!(summaries[1].total_cases, Some(41_000.0));
        assert_eq!(summaries[1].total_deaths, Some(1_500.0));
        assert_eq!(summaries[1].population, Some(38_928_341));
    }

    #[test]
    fn all_null_column_stays_unknown() {
        let dataset = CovidDataset::from_observations(vec![
            obs("Nauru", 1, None, None, None),
            obs("Nauru", 2, None, None, None),
        ]);
        let summaries = summarize(&dataset);
        assert_eq!(summaries[0].total_cases, None);
        assert_eq!(summaries[0].total_deaths, None);
        assert_eq!(summaries[0].population, None);
    }

    #[test]
    fn rank_orders_by_cases_descending() {
        let ranked = rank(&summarize(&two_country_dataset()));
        assert_eq!(ranked[0].country, "Afghanistan");
        assert_eq!(ranked[1].country, "Albania");
    }

    #[test]
    fn rank_is_deterministic_and_puts_unknown_last() {
        let mut summaries = summarize(&two_country_dataset());
        summaries.push(CountrySummary {
            country: "Nauru".to_string(),
            total_cases: None,
            total_deaths: None,
            population: None,
        });

        let first = rank(&summaries);
        let second = rank(&summaries);
        assert_eq!(first, second);
        assert_eq!(first.last().unwrap().country, "Nauru");
    }

    #[test]
    fn worldwide_matches_summary_sums_with_unknown_as_zero() {
        let mut summaries = summarize(&two_country_dataset());
        summaries.push(CountrySummary {
            country: "Nauru".to_string(),
            total_cases: None,
            total_deaths: Some(3.0),
            population: None,
        });

        let totals = worldwide_totals(&summaries);
        assert_eq!(totals.total_cases, 62_000.0);
        assert_eq!(totals.total_deaths, 2_053.0);

        let population = (2_877_800 + 38_928_341) as f64;
        let expected = 62_000.0 / population * 1_000_000.0;
        assert!((totals.cases_per_million.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn worldwide_delta_sums_only_the_reference_date() {
        let dataset = two_country_dataset();
        let date = NaiveDate::from_ymd_opt(2020, 3, 2).unwrap();

        let delta = worldwide_delta(&dataset, date);
        // one row per country on the 2nd, new_cases 1.0 each
        assert_eq!(delta.new_cases, 2.0);
        // new_deaths is all-null: summed as zero
        assert_eq!(delta.new_deaths, 0.0);

        let totals = worldwide_totals(&summarize(&dataset));
        let pct = delta.cases_percent(&totals).unwrap();
        assert!((pct - 2.0 / 62_000.0 * 100.0).abs() < 1e-9);

        // zero worldwide total: percentage is unknown, not a division error
        assert_eq!(delta.deaths_percent(&WorldwideTotals::default()), None);

        let off_date = worldwide_delta(&dataset, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        assert_eq!(off_date.new_cases, 0.0);
    }

    #[test]
    fn zero_population_yields_unknown_rate() {
        let summaries = vec![CountrySummary {
            country: "Ghostland".to_string(),
            total_cases: Some(100.0),
            total_deaths: Some(1.0),
            population: Some(0),
        }];

        let totals = worldwide_totals(&summaries);
        assert_eq!(totals.cases_per_million, None);
        assert_eq!(totals.deaths_per_million, None);
        assert_eq!(summaries[0].cases_per_million(), None);
    }

    #[test]
    fn per_country_rates() {
        let summaries = summarize(&two_country_dataset());
        let albania = &summaries[0];
        let expected = 21_000.0 / 2_877_800.0 * 1_000_000.0;
        assert!((albania.cases_per_million().unwrap() - expected).abs() < 1e-9);
    }
}
