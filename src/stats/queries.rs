//! Mission Statistics Module
//! The eight launch queries: counts, rates, ranges, rankings.

use crate::data::{parse_launch_date, Dataset, MissionRecord, MissionStatus};
use crate::stats::{QueryOutcome, QueryWarning};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

/// Year of the first orbital launch; earlier years are rejected.
pub const FIRST_LAUNCH_YEAR: i64 = 1957;

/// Decimal places kept for rates and averages.
pub const RATE_PRECISION: i32 = 5;

/// Round to `places` decimals. Exact halves go to the even digit, so
/// 1/256 as a percentage (0.390625) becomes 0.39062.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Per-status mission counts over the four canonical statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCounts(BTreeMap<MissionStatus, usize>);

impl Default for StatusCounts {
    fn default() -> Self {
        Self(MissionStatus::ALL.into_iter().map(|s| (s, 0)).collect())
    }
}

impl StatusCounts {
    pub fn get(&self, status: MissionStatus) -> usize {
        self.0.get(&status).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MissionStatus, usize)> + '_ {
        self.0.iter().map(|(s, c)| (*s, *c))
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    fn record(&mut self, status: MissionStatus) {
        *self.0.entry(status).or_insert(0) += 1;
    }
}

/// Count non-empty values of a field, keyed alphabetically.
pub(crate) fn tally<'a, F>(data: &'a Dataset, field: F) -> BTreeMap<&'a str, usize>
where
    F: Fn(&'a MissionRecord) -> &'a str,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in data.records() {
        let key = field(record);
        if !key.is_empty() {
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    counts
}

/// Stateless launch queries over a borrowed dataset.
pub struct MissionStats;

impl MissionStats {
    /// Total missions flown by `company` (exact, case-sensitive match).
    pub fn mission_count_by_company(data: &Dataset, company: &str) -> QueryOutcome<usize> {
        let count = data.by_company(company).count();
        if count == 0 {
            return QueryOutcome::warn(0, QueryWarning::UnknownCompany(company.to_string()));
        }
        QueryOutcome::ok(count)
    }

    /// Percentage of `company`'s missions that succeeded, to 5 decimals.
    pub fn success_rate(data: &Dataset, company: &str) -> QueryOutcome<f64> {
        let (total, successes) = data
            .by_company(company)
            .fold((0usize, 0usize), |(total, successes), r| {
                (total + 1, successes + usize::from(r.is_success()))
            });

        if total == 0 {
            return QueryOutcome::warn(0.0, QueryWarning::UnknownCompany(company.to_string()));
        }

        let rate = successes as f64 / total as f64 * 100.0;
        QueryOutcome::ok(round_to(rate, RATE_PRECISION))
    }

    /// Mission names launched within `[start, end]`, oldest first.
    ///
    /// Records launched at the same instant keep file order.
    pub fn missions_by_date_range(data: &Dataset, start: &str, end: &str) -> QueryOutcome<Vec<String>> {
        let (Some(from), Some(to)) = (parse_launch_date(start), parse_launch_date(end)) else {
            return QueryOutcome::warn(
                Vec::new(),
                QueryWarning::InvalidDateRange {
                    start: start.to_string(),
                    end: end.to_string(),
                },
            );
        };

        if from > to {
            return QueryOutcome::warn(
                Vec::new(),
                QueryWarning::ReversedDateRange {
                    start: start.to_string(),
                    end: end.to_string(),
                },
            );
        }

        let mut hits: Vec<(NaiveDateTime, &str)> = data
            .records()
            .iter()
            .filter_map(|r| {
                r.launch_date()
                    .filter(|launched| (from..=to).contains(launched))
                    .map(|launched| (launched, r.mission.as_str()))
            })
            .collect();
        hits.sort_by_key(|(launched, _)| *launched);

        QueryOutcome::ok(hits.into_iter().map(|(_, m)| m.to_string()).collect())
    }

    /// The `n` companies with the most missions, ties in alphabetical order.
    pub fn top_companies_by_mission_count(data: &Dataset, n: i64) -> QueryOutcome<Vec<(String, usize)>> {
        if n <= 0 {
            return QueryOutcome::warn(Vec::new(), QueryWarning::NonPositiveLimit(n));
        }

        // Alphabetical first, then a stable sort on count
        let mut ranked: Vec<(String, usize)> = tally(data, |r| r.company.as_str())
            .into_iter()
            .map(|(company, count)| (company.to_string(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(usize::try_from(n).unwrap_or(usize::MAX));

        QueryOutcome::ok(ranked)
    }

    /// Counts for each canonical status. Other statuses are dropped.
    pub fn mission_status_count(data: &Dataset) -> QueryOutcome<StatusCounts> {
        let mut counts = StatusCounts::default();
        for status in data.records().iter().filter_map(|r| r.status()) {
            counts.record(status);
        }
        QueryOutcome::ok(counts)
    }

    /// Missions launched in calendar year `year`.
    pub fn missions_by_year(data: &Dataset, year: i64) -> QueryOutcome<usize> {
        if year < 0 {
            return QueryOutcome::warn(0, QueryWarning::NegativeYear(year));
        }
        if year < FIRST_LAUNCH_YEAR {
            return QueryOutcome::warn(0, QueryWarning::BeforeFirstLaunch(year));
        }

        let count = data
            .records()
            .iter()
            .filter(|r| r.launch_year().map(i64::from) == Some(year))
            .count();
        QueryOutcome::ok(count)
    }

    /// Rocket with the most missions; alphabetically first on a tie.
    pub fn most_used_rocket(data: &Dataset) -> QueryOutcome<String> {
        let counts = tally(data, |r| r.rocket.as_str());
        let Some(max) = counts.values().copied().max() else {
            return QueryOutcome::warn(String::new(), QueryWarning::NoRocketData);
        };

        // BTreeMap iterates alphabetically, so the first hit wins ties
        let rocket = counts
            .iter()
            .find(|(_, count)| **count == max)
            .map(|(rocket, _)| rocket.to_string())
            .unwrap_or_default();
        QueryOutcome::ok(rocket)
    }

    /// Mean missions per year over `[start_year, end_year]`, to 5 decimals.
    pub fn average_missions_per_year(data: &Dataset, start_year: i64, end_year: i64) -> QueryOutcome<f64> {
        if start_year > end_year {
            return QueryOutcome::warn(
                0.0,
                QueryWarning::ReversedYearRange {
                    start: start_year,
                    end: end_year,
                },
            );
        }
        if start_year < FIRST_LAUNCH_YEAR {
            return QueryOutcome::warn(0.0, QueryWarning::BeforeFirstLaunch(start_year));
        }

        let in_range = data
            .records()
            .iter()
            .filter_map(|r| r.launch_year())
            .filter(|year| (start_year..=end_year).contains(&i64::from(*year)))
            .count();
        let span = (end_year - start_year + 1) as f64;

        QueryOutcome::ok(round_to(in_range as f64 / span, RATE_PRECISION))
    }
}
