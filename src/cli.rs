//! Command line front end.

use crate::charts::ChartRenderer;
use crate::data::{DataLoader, Dataset, DEFAULT_DATA_PATH};
use crate::stats::{MissionStats, QueryOutcome, Report, SeriesFilter};
use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "space-dashboard")]
#[command(version, about = "Statistics over space launch records")]
pub struct Args {
    /// Launch records CSV
    #[arg(short, long, global = true, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Total missions for a company
    CountByCompany { company: String },
    /// Success rate (%) for a company
    SuccessRate { company: String },
    /// Missions launched between two dates, inclusive
    MissionsByDate { start: String, end: String },
    /// Companies ranked by mission count
    TopCompanies {
        #[arg(allow_negative_numbers = true)]
        n: i64,
    },
    /// Mission counts per canonical status
    StatusCount,
    /// Missions launched in a year
    MissionsByYear {
        #[arg(allow_negative_numbers = true)]
        year: i64,
    },
    /// Rocket used for the most missions
    MostUsedRocket,
    /// Average missions per year over an inclusive range
    AveragePerYear {
        #[arg(allow_negative_numbers = true)]
        start: i64,
        #[arg(allow_negative_numbers = true)]
        end: i64,
    },
    /// Distinct companies in the dataset
    Companies,
    /// Summary of every query
    Report {
        /// Companies to list in the ranking
        #[arg(long, default_value = "10")]
        top: i64,
    },
    /// Export the dashboard charts as PNG files
    Charts {
        #[arg(long, default_value = "charts")]
        out_dir: PathBuf,
        /// Restrict success rate, outcome pie and stacked bars to one company
        #[arg(long)]
        company: Option<String>,
        /// First year for the success rate line
        #[arg(long)]
        from: Option<i32>,
        /// Last year for the success rate line
        #[arg(long)]
        to: Option<i32>,
    },
}

/// Print an outcome's value; warnings were already logged.
fn emit<T: Serialize>(
    json: bool,
    outcome: &QueryOutcome<T>,
    text: impl FnOnce(&T) -> String,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        println!("{}", text(&outcome.value));
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn run(args: &Args) -> Result<()> {
    let data = DataLoader::new(&args.data).load();
    execute(&data, &args.command, args.json)
}

pub fn execute(data: &Dataset, command: &Command, json: bool) -> Result<()> {
    match command {
        Command::CountByCompany { company } => emit(
            json,
            &MissionStats::mission_count_by_company(data, company),
            |count| count.to_string(),
        ),
        Command::SuccessRate { company } => emit(
            json,
            &MissionStats::success_rate(data, company),
            |rate| format!("{rate}"),
        ),
        Command::MissionsByDate { start, end } => emit(
            json,
            &MissionStats::missions_by_date_range(data, start, end),
            |missions| missions.join("\n"),
        ),
        Command::TopCompanies { n } => emit(
            json,
            &MissionStats::top_companies_by_mission_count(data, *n),
            |ranked| {
                ranked
                    .iter()
                    .map(|(company, count)| format!("{company}\t{count}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            },
        ),
        Command::StatusCount => emit(json, &MissionStats::mission_status_count(data), |counts| {
            counts
                .iter()
                .map(|(status, count)| format!("{status}\t{count}"))
                .collect::<Vec<_>>()
                .join("\n")
        }),
        Command::MissionsByYear { year } => emit(
            json,
            &MissionStats::missions_by_year(data, *year),
            |count| count.to_string(),
        ),
        Command::MostUsedRocket => emit(json, &MissionStats::most_used_rocket(data), |rocket| {
            rocket.clone()
        }),
        Command::AveragePerYear { start, end } => emit(
            json,
            &MissionStats::average_missions_per_year(data, *start, *end),
            |avg| format!("{avg}"),
        ),
        Command::Companies => {
            let companies = data.companies();
            if json {
                print_json(&companies)
            } else {
                println!("{}", companies.join("\n"));
                Ok(())
            }
        }
        Command::Report { top } => {
            let report = Report::build(data, *top);
            if json {
                return print_json(&report);
            }
            println!("Missions:   {}", report.total_missions);
            println!("Companies:  {}", report.companies);
            if let Some((from, to)) = report.year_bounds {
                println!("Years:      {from}-{to}");
            }
            if let Some(avg) = report.average_missions_per_year {
                println!("Per year:   {avg}");
            }
            println!("Top rocket: {}", report.most_used_rocket);
            println!();
            for (status, count) in report.status_counts.iter() {
                println!("{status:<18} {count}");
            }
            println!();
            for row in &report.top_companies {
                println!("{:<24} {:>6} {:>10.2}%", row.company, row.missions, row.success_rate);
            }
            Ok(())
        }
        Command::Charts {
            out_dir,
            company,
            from,
            to,
        } => {
            let mut filter = SeriesFilter {
                company: company.clone(),
                years: None,
            };
            if from.is_some() || to.is_some() {
                let bounds = data.year_bounds().unwrap_or((0, 0));
                filter.years = Some((from.unwrap_or(bounds.0), to.unwrap_or(bounds.1)));
            }
            println!("{}", filter.caption(data.year_bounds()));

            let written = ChartRenderer::export_dashboard(data, &filter, out_dir)?;
            for path in written {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}
