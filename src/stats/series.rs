//! Chart series for the dashboard views.
//!
//! Plain aggregates with no diagnostics: empty input gives empty output.

use crate::data::{Dataset, MissionRecord};
use crate::stats::queries::{round_to, tally, RATE_PRECISION};
use serde::Serialize;
use std::collections::BTreeMap;

/// Company and year-range selection for the success-rate view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeriesFilter {
    pub company: Option<String>,
    /// Inclusive (from, to) year bounds.
    pub years: Option<(i32, i32)>,
}

impl SeriesFilter {
    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn years(mut self, from: i32, to: i32) -> Self {
        self.years = Some((from, to));
        self
    }

    fn matches(&self, record: &MissionRecord, year: i32) -> bool {
        let company_ok = self
            .company
            .as_deref()
            .map_or(true, |company| record.company == company);
        let year_ok = self
            .years
            .map_or(true, |(from, to)| (from..=to).contains(&year));
        company_ok && year_ok
    }

    /// Human caption for the current selection. `bounds` fills in an
    /// open year range.
    pub fn caption(&self, bounds: Option<(i32, i32)>) -> String {
        let company = self.company.as_deref().unwrap_or("all companies");
        match self.years.or(bounds) {
            Some((from, to)) => format!(
                "Now showing mission success rate from {} to {} for {}.",
                from, to, company
            ),
            None => format!("Now showing mission success rate for {}.", company),
        }
    }
}

/// Success rate for one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRate {
    pub year: i32,
    pub missions: usize,
    pub successes: usize,
    /// Percentage, 0-100.
    pub success_rate: f64,
}

/// Missions for one (company, status) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyOutcome {
    pub company: String,
    pub status: String,
    pub count: usize,
}

/// Sort (name, count) pairs by count descending, ties alphabetical.
fn ranked(counts: BTreeMap<&str, usize>) -> Vec<(String, usize)> {
    let mut pairs: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs
}

/// Missions per company, busiest first.
pub fn missions_per_company(data: &Dataset) -> Vec<(String, usize)> {
    ranked(tally(data, |r| r.company.as_str()))
}

/// Yearly success rate, oldest year first. Undated records are skipped.
pub fn success_rate_by_year(data: &Dataset, filter: &SeriesFilter) -> Vec<YearRate> {
    let mut per_year: BTreeMap<i32, (usize, usize)> = BTreeMap::new();

    for record in data.records() {
        let Some(year) = record.launch_year() else {
            continue;
        };
        if !filter.matches(record, year) {
            continue;
        }
        let entry = per_year.entry(year).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += usize::from(record.is_success());
    }

    per_year
        .into_iter()
        .map(|(year, (missions, successes))| YearRate {
            year,
            missions,
            successes,
            success_rate: round_to(
                successes as f64 / missions as f64 * 100.0,
                RATE_PRECISION,
            ),
        })
        .collect()
}

/// Every status string present (canonical or not) with its count.
pub fn status_breakdown(data: &Dataset, company: Option<&str>) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in data.records() {
        if company.is_some_and(|c| record.company != c) || record.mission_status.is_empty() {
            continue;
        }
        *counts.entry(record.mission_status.as_str()).or_insert(0) += 1;
    }
    ranked(counts)
}

/// (company, status) counts sorted by company then status. An empty
/// selection means every company.
pub fn outcomes_by_company(data: &Dataset, companies: &[String]) -> Vec<CompanyOutcome> {
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for record in data.records() {
        if record.company.is_empty() || record.mission_status.is_empty() {
            continue;
        }
        if !companies.is_empty() && !companies.iter().any(|c| *c == record.company) {
            continue;
        }
        *counts
            .entry((record.company.as_str(), record.mission_status.as_str()))
            .or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((company, status), count)| CompanyOutcome {
            company: company.to_string(),
            status: status.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        [
            ("NASA", "1960-01-01", "Success"),
            ("NASA", "1960-06-01", "Failure"),
            ("NASA", "1961-01-01", "Success"),
            ("ESA", "1960-03-01", "Success"),
            ("ESA", "1961-03-01", "Scrubbed"),
            ("ESA", "unknown", "Success"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (company, date, status))| {
            MissionRecord::new(company, date, format!("M{i}"), status, "Rocket")
        })
        .collect()
    }

    #[test]
    fn per_company_is_ranked() {
        assert_eq!(
            missions_per_company(&sample()),
            vec![("ESA".to_string(), 3), ("NASA".to_string(), 3)]
        );
    }

    #[test]
    fn yearly_rates() {
        let all = success_rate_by_year(&sample(), &SeriesFilter::default());
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].year, 1960);
        assert_eq!(all[0].missions, 3);
        assert_eq!(all[0].success_rate, 66.66667);
        assert_eq!(all[1].success_rate, 50.0);

        let nasa = success_rate_by_year(&sample(), &SeriesFilter::default().company("NASA").years(1961, 1961));
        assert_eq!(nasa.len(), 1);
        assert_eq!(nasa[0].success_rate, 100.0);
    }

    #[test]
    fn breakdown_keeps_non_canonical_statuses() {
        let esa = status_breakdown(&sample(), Some("ESA"));
        assert_eq!(
            esa,
            vec![("Success".to_string(), 2), ("Scrubbed".to_string(), 1)]
        );
        let total: usize = status_breakdown(&sample(), None).iter().map(|(_, c)| c).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn outcomes_filter_by_selection() {
        let nasa = outcomes_by_company(&sample(), &["NASA".to_string()]);
        assert_eq!(nasa.len(), 2);
        assert_eq!(nasa[0].status, "Failure");
        assert_eq!(nasa[1].count, 2);
        assert_eq!(outcomes_by_company(&sample(), &[]).len(), 4);
    }

    #[test]
    fn captions() {
        let filter = SeriesFilter::default();
        assert_eq!(
            filter.caption(Some((1957, 2022))),
            "Now showing mission success rate from 1957 to 2022 for all companies."
        );
        assert_eq!(
            filter.company("NASA").years(1960, 1970).caption(None),
            "Now showing mission success rate from 1960 to 1970 for NASA."
        );
    }
}
