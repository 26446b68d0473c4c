//! Summary report combining the launch queries.

use crate::data::Dataset;
use crate::stats::{MissionStats, StatusCounts, FIRST_LAUNCH_YEAR};
use serde::Serialize;

/// One ranked company in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyRow {
    pub company: String,
    pub missions: usize,
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub total_missions: usize,
    pub companies: usize,
    pub year_bounds: Option<(i32, i32)>,
    pub status_counts: StatusCounts,
    pub most_used_rocket: String,
    pub top_companies: Vec<CompanyRow>,
    /// Over the dataset's own year bounds, clamped to the first launch year.
    pub average_missions_per_year: Option<f64>,
}

impl Report {
    pub fn build(data: &Dataset, top_n: i64) -> Self {
        let top_companies = MissionStats::top_companies_by_mission_count(data, top_n)
            .into_value()
            .into_iter()
            .map(|(company, missions)| {
                let success_rate = MissionStats::success_rate(data, &company).into_value();
                CompanyRow {
                    company,
                    missions,
                    success_rate,
                }
            })
            .collect();

        let year_bounds = data.year_bounds();
        let average_missions_per_year = year_bounds.map(|(from, to)| {
            let from = i64::from(from).max(FIRST_LAUNCH_YEAR);
            let to = i64::from(to).max(from);
            MissionStats::average_missions_per_year(data, from, to).into_value()
        });

        Self {
            total_missions: data.len(),
            companies: data.companies().len(),
            year_bounds,
            status_counts: MissionStats::mission_status_count(data).into_value(),
            most_used_rocket: MissionStats::most_used_rocket(data).into_value(),
            top_companies,
            average_missions_per_year,
        }
    }
}
