//! Static Chart Renderer
//! Generates the dashboard charts as PNG images with plotters.
//!
//! Charts:
//! 1. Total missions by company (bar)
//! 2. Mission success rate over time (line + markers)
//! 3. Mission outcome breakdown (pie)
//! 4. Missions by company and outcome (stacked bar)

use crate::data::Dataset;
use crate::stats::series::{self, CompanyOutcome, SeriesFilter, YearRate};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

// Status colors, matching the outcome legend
const SUCCESS: RGBColor = RGBColor(0x6F, 0xCF, 0x97);
const FAILURE: RGBColor = RGBColor(0xEB, 0x57, 0x57);
const PARTIAL_FAILURE: RGBColor = RGBColor(0xF2, 0xC9, 0x4C);
const PRELAUNCH_FAILURE: RGBColor = RGBColor(0xB7, 0x7A, 0x50);
const LAVENDER: RGBColor = RGBColor(0xDF, 0xC5, 0xFE); // Fallback + line color

// Pastel palette for per-company bars
const PASTEL: [RGBColor; 8] = [
    RGBColor(0x66, 0xC5, 0xCC),
    RGBColor(0xF6, 0xCF, 0x71),
    RGBColor(0xF8, 0x9C, 0x74),
    RGBColor(0xDC, 0xB0, 0xF2),
    RGBColor(0x87, 0xC5, 0x5F),
    RGBColor(0x9E, 0xB9, 0xF3),
    RGBColor(0xFE, 0x88, 0xB1),
    RGBColor(0xC9, 0xDB, 0x74),
];

const CHART_SIZE: (u32, u32) = (1280, 720);

pub const COMPANY_BAR_FILE: &str = "missions_by_company.png";
pub const SUCCESS_LINE_FILE: &str = "success_rate_over_time.png";
pub const STATUS_PIE_FILE: &str = "outcome_breakdown.png";
pub const OUTCOME_STACK_FILE: &str = "missions_by_company_outcome.png";

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No data to chart")]
    NoData,
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Drawing(err.to_string())
    }
}

/// Color for a mission status string.
pub fn status_color(status: &str) -> RGBColor {
    match status {
        "Success" => SUCCESS,
        "Failure" => FAILURE,
        "Partial Failure" => PARTIAL_FAILURE,
        "Prelaunch Failure" => PRELAUNCH_FAILURE,
        _ => LAVENDER,
    }
}

/// Renders dashboard charts to PNG files.
pub struct ChartRenderer;

impl ChartRenderer {
    fn open(path: &Path) -> DrawingArea<BitMapBackend<'_>, Shift> {
        BitMapBackend::new(path, CHART_SIZE).into_drawing_area()
    }

    /// Y-axis ceiling with a little headroom above the tallest bar.
    fn headroom(max: f64) -> f64 {
        if max <= 0.0 {
            1.0
        } else {
            (max * 1.1).ceil()
        }
    }

    /// Bar chart of total missions per company.
    pub fn render_company_bar(counts: &[(String, usize)], path: &Path) -> Result<(), ChartError> {
        if counts.is_empty() {
            return Err(ChartError::NoData);
        }

        let root = Self::open(path);
        root.fill(&WHITE)?;

        let names: Vec<&str> = counts.iter().map(|(name, _)| name.as_str()).collect();
        let y_max = Self::headroom(counts.iter().map(|(_, c)| *c).max().unwrap_or(0) as f64);

        let mut chart = ChartBuilder::on(&root)
            .caption("Total Missions by Company", ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(140)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(counts.len() as f64 - 0.5), 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(counts.len())
            .x_label_formatter(&|x| Self::category_label(&names, *x))
            .x_label_style(
                ("sans-serif", 12)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .x_desc("Company")
            .y_desc("Missions")
            .draw()?;

        chart.draw_series(counts.iter().enumerate().map(|(i, (_, count))| {
            let x = i as f64;
            let color = PASTEL[i % PASTEL.len()];
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *count as f64)], color.filled())
        }))?;

        root.present()?;
        info!("Wrote {}", path.display());
        Ok(())
    }

    /// Line chart of yearly success rate.
    pub fn render_success_line(rates: &[YearRate], path: &Path) -> Result<(), ChartError> {
        let (Some(first), Some(last)) = (rates.first(), rates.last()) else {
            return Err(ChartError::NoData);
        };

        let root = Self::open(path);
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Mission Success Rate Through the Years", ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d((first.year - 1)..(last.year + 1), 0f64..105f64)?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Success Rate (%)")
            .draw()?;

        chart.draw_series(LineSeries::new(
            rates.iter().map(|r| (r.year, r.success_rate)),
            LAVENDER.stroke_width(2),
        ))?;
        chart.draw_series(
            rates
                .iter()
                .map(|r| Circle::new((r.year, r.success_rate), 4, LAVENDER.filled())),
        )?;

        root.present()?;
        info!("Wrote {}", path.display());
        Ok(())
    }

    /// Pie chart of mission outcomes.
    pub fn render_status_pie(breakdown: &[(String, usize)], path: &Path) -> Result<(), ChartError> {
        if breakdown.iter().all(|(_, count)| *count == 0) {
            return Err(ChartError::NoData);
        }

        let root = Self::open(path);
        root.fill(&WHITE)?;
        let area = root.titled("Mission Outcome Breakdown", ("sans-serif", 30))?;

        let (width, height) = area.dim_in_pixel();
        let center = (width as i32 / 2, height as i32 / 2);
        let radius = f64::from(width.min(height)) * 0.35;

        let sizes: Vec<f64> = breakdown.iter().map(|(_, count)| *count as f64).collect();
        let colors: Vec<RGBColor> = breakdown
            .iter()
            .map(|(status, _)| status_color(status))
            .collect();
        let labels: Vec<&str> = breakdown.iter().map(|(status, _)| status.as_str()).collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 18).into_font().color(&BLACK));
        pie.percentages(("sans-serif", 16).into_font().color(&BLACK));
        area.draw(&pie)?;

        root.present()?;
        info!("Wrote {}", path.display());
        Ok(())
    }

    /// Stacked bars per company, one layer per outcome.
    pub fn render_outcome_stack(outcomes: &[CompanyOutcome], path: &Path) -> Result<(), ChartError> {
        if outcomes.is_empty() {
            return Err(ChartError::NoData);
        }

        // Company order and per-company totals
        let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
        for o in outcomes {
            *totals.entry(o.company.as_str()).or_insert(0) += o.count;
        }
        let names: Vec<&str> = totals.keys().copied().collect();
        let y_max = Self::headroom(totals.values().copied().max().unwrap_or(0) as f64);

        let root = Self::open(path);
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Missions by Company and Outcome", ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(140)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(names.len() as f64 - 0.5), 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(names.len())
            .x_label_formatter(&|x| Self::category_label(&names, *x))
            .x_label_style(
                ("sans-serif", 12)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .x_desc("Company")
            .y_desc("Missions")
            .draw()?;

        let mut statuses: Vec<&str> = outcomes.iter().map(|o| o.status.as_str()).collect();
        statuses.sort_unstable();
        statuses.dedup();

        let mut stacked: Vec<f64> = vec![0.0; names.len()];
        for status in statuses {
            let color = status_color(status);
            let mut bars = Vec::new();
            for o in outcomes.iter().filter(|o| o.status == status) {
                let Some(i) = names.iter().position(|n| *n == o.company) else {
                    continue;
                };
                let x = i as f64;
                let bottom = stacked[i];
                let top = bottom + o.count as f64;
                stacked[i] = top;
                bars.push(Rectangle::new([(x - 0.4, bottom), (x + 0.4, top)], color.filled()));
            }

            chart
                .draw_series(bars)?
                .label(status)
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        info!("Wrote {}", path.display());
        Ok(())
    }

    fn category_label(names: &[&str], x: f64) -> String {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        names
            .get(idx as usize)
            .map(|name| name.to_string())
            .unwrap_or_default()
    }

    /// Write all four dashboard charts into `out_dir`. Returns the paths
    /// written. Charts with nothing to show are skipped.
    pub fn export_dashboard(
        data: &Dataset,
        filter: &SeriesFilter,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>, ChartError> {
        if data.is_empty() {
            return Err(ChartError::NoData);
        }
        fs::create_dir_all(out_dir)?;

        let company = filter.company.as_deref();
        let selection: Vec<String> = filter.company.iter().cloned().collect();

        let jobs: [(&str, Result<(), ChartError>); 4] = [
            (COMPANY_BAR_FILE, {
                let path = out_dir.join(COMPANY_BAR_FILE);
                Self::render_company_bar(&series::missions_per_company(data), &path)
            }),
            (SUCCESS_LINE_FILE, {
                let path = out_dir.join(SUCCESS_LINE_FILE);
                Self::render_success_line(&series::success_rate_by_year(data, filter), &path)
            }),
            (STATUS_PIE_FILE, {
                let path = out_dir.join(STATUS_PIE_FILE);
                Self::render_status_pie(&series::status_breakdown(data, company), &path)
            }),
            (OUTCOME_STACK_FILE, {
                let path = out_dir.join(OUTCOME_STACK_FILE);
                Self::render_outcome_stack(&series::outcomes_by_company(data, &selection), &path)
            }),
        ];

        let mut written = Vec::new();
        for (file, result) in jobs {
            match result {
                Ok(()) => written.push(out_dir.join(file)),
                Err(ChartError::NoData) => info!("Skipped {}: no data for selection", file),
                Err(e) => return Err(e),
            }
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_colors() {
        assert_eq!(status_color("Success"), SUCCESS);
        assert_eq!(status_color("Prelaunch Failure"), PRELAUNCH_FAILURE);
        assert_eq!(status_color("Scrubbed"), LAVENDER);
    }

    #[test]
    fn category_labels_only_on_integers() {
        let names = ["NASA", "SpaceX"];
        assert_eq!(ChartRenderer::category_label(&names, 0.0), "NASA");
        assert_eq!(ChartRenderer::category_label(&names, 1.0), "SpaceX");
        assert_eq!(ChartRenderer::category_label(&names, 0.5), "");
        assert_eq!(ChartRenderer::category_label(&names, 2.0), "");
        assert_eq!(ChartRenderer::category_label(&names, -1.0), "");
    }

    #[test]
    fn headroom_never_zero() {
        assert_eq!(ChartRenderer::headroom(0.0), 1.0);
        assert_eq!(ChartRenderer::headroom(10.0), 11.0);
    }

    #[test]
    fn empty_series_are_rejected_before_drawing() {
        let path = Path::new("never-written.png");
        assert!(matches!(
            ChartRenderer::render_company_bar(&[], path),
            Err(ChartError::NoData)
        ));
        assert!(matches!(
            ChartRenderer::render_success_line(&[], path),
            Err(ChartError::NoData)
        ));
        assert!(matches!(
            ChartRenderer::render_status_pie(&[("Success".into(), 0)], path),
            Err(ChartError::NoData)
        ));
        assert!(matches!(
            ChartRenderer::render_outcome_stack(&[], path),
            Err(ChartError::NoData)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn export_rejects_empty_dataset() {
        let dir = Path::new("never-created-dir");
        assert!(matches!(
            ChartRenderer::export_dashboard(&Dataset::default(), &SeriesFilter::default(), dir),
            Err(ChartError::NoData)
        ));
        assert!(!dir.exists());
    }

    fn launches() -> Dataset {
        use crate::data::MissionRecord;
        vec![
            MissionRecord::new("RVSN USSR", "1957-10-04", "Sputnik-1", "Success", "Sputnik 8K71PS"),
            MissionRecord::new("US Navy", "1957-12-06", "Vanguard TV3", "Failure", "Vanguard"),
            MissionRecord::new("AMBA", "1958-02-01", "Explorer 1", "Success", "Juno I"),
            MissionRecord::new("AMBA", "1958-03-05", "Explorer 2", "Failure", "Juno I"),
            MissionRecord::new("US Navy", "1958-03-17", "Vanguard 1", "Success", "Vanguard"),
            MissionRecord::new("Undated Co", "unknown", "Lost 1", "Partial Failure", "Mystery"),
            MissionRecord::new("Undated Co", "", "Lost 2", "Success", "Mystery"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn export_writes_all_four_charts() {
        let dir = tempfile::TempDir::new().unwrap();
        let written =
            ChartRenderer::export_dashboard(&launches(), &SeriesFilter::default(), dir.path())
                .unwrap();

        let expected: Vec<PathBuf> = [
            COMPANY_BAR_FILE,
            SUCCESS_LINE_FILE,
            STATUS_PIE_FILE,
            OUTCOME_STACK_FILE,
        ]
        .iter()
        .map(|file| dir.path().join(file))
        .collect();
        assert_eq!(written, expected);
        for path in &written {
            assert!(path.exists(), "{} missing", path.display());
        }
    }

    #[test]
    fn export_skips_empty_success_line() {
        let dir = tempfile::TempDir::new().unwrap();
        let filter = SeriesFilter::default().company("Undated Co");
        let written = ChartRenderer::export_dashboard(&launches(), &filter, dir.path()).unwrap();

        let line = dir.path().join(SUCCESS_LINE_FILE);
        assert!(!written.contains(&line));
        assert!(!line.exists());
        for file in [COMPANY_BAR_FILE, STATUS_PIE_FILE, OUTCOME_STACK_FILE] {
            let path = dir.path().join(file);
            assert!(written.contains(&path), "{file} not reported");
            assert!(path.exists(), "{file} not written");
        }
        assert_eq!(written.len(), 3);
    }
}
