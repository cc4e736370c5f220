//! The three reports and the six charts they draw.
//!
//! Each chart turns the shared [`Dataset`] into a summary table plus a plot.
//! A report renders its charts in order and stops at the first failure.

mod product;
mod profit;
mod trend;

use crate::output::Output;
use chart::{Bar, BarChart, ChartError, LineChart, RGBColor, ScatterChart};
use config::Style;
use dataset::{AggregateError, AggregatedResult, Dataset};
use log::{info, warn};
use polars::prelude::*;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Shown for the group of records without a key value.
pub const MISSING_LABEL: &str = "(missing)";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error(transparent)]
    Polars(#[from] PolarsError),
    #[error("cannot write {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Trend,
    Product,
    Profit,
}

impl Report {
    pub const ALL: [Report; 3] = [Report::Trend, Report::Product, Report::Profit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Report::Trend => "trend",
            Report::Product => "product",
            Report::Profit => "profit",
        }
    }

    /// `all` expands to every report in order.
    pub fn from_str(s: &str) -> Option<Vec<Report>> {
        match s {
            "all" => Some(Report::ALL.to_vec()),
            "trend" => Some(vec![Report::Trend]),
            "product" => Some(vec![Report::Product]),
            "profit" => Some(vec![Report::Profit]),
            _ => None,
        }
    }

    pub fn charts(&self) -> Vec<Box<dyn Chart>> {
        match self {
            Report::Trend => vec![Box::new(trend::MonthlyTrend), Box::new(trend::DeliveryByShipMode)],
            Report::Product => vec![Box::new(product::ProfitBySubCategory), Box::new(product::CostVsDemand)],
            Report::Profit => vec![Box::new(profit::DiscountVsProfit), Box::new(profit::LossStates)],
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub enum Plot {
    Line(LineChart),
    Bar(BarChart),
    Scatter(ScatterChart),
}

impl Plot {
    pub fn render(&self, path: &Path, style: &Style) -> Result<(), ChartError> {
        match self {
            Plot::Line(c) => c.render(path, style),
            Plot::Bar(c) => c.render(path, style),
            Plot::Scatter(c) => c.render(path, style),
        }
    }
}

/// What a chart needs drawn, and the table it was computed from.
pub struct Prepared {
    pub table: DataFrame,
    pub plot: Plot,
}

pub trait Chart {
    /// "Chart N", used in progress lines.
    fn name(&self) -> &'static str;
    fn file_name(&self) -> &'static str;
    fn prepare(&self, dataset: &Dataset) -> Result<Prepared, ReportError>;

    fn file_stem(&self) -> &'static str {
        self.file_name().trim_end_matches(".png")
    }
}

pub struct Context<'a> {
    pub dataset: &'a Dataset,
    pub images: &'a Path,
    pub style: &'a Style,
    pub outputs: &'a [Box<dyn Output>],
}

/// Renders every chart of `report`; the first failure ends the report.
pub fn run(report: Report, ctx: &Context) -> Result<Vec<PathBuf>, ReportError> {
    let charts = report.charts();
    info!("{} report: {} charts", report, charts.len());
    let mut saved = vec![];
    for chart in charts {
        let prepared = chart.prepare(ctx.dataset)?;
        for output in ctx.outputs {
            output.output(chart.file_stem(), &prepared.table)?;
        }
        let path = ctx.images.join(chart.file_name());
        prepared.plot.render(&path, ctx.style)?;
        info!("-> {} saved: {}", chart.name(), path.display());
        saved.push(path);
    }
    Ok(saved)
}

fn label_or_missing(label: Option<String>) -> String {
    label.unwrap_or_else(|| MISSING_LABEL.to_string())
}

/// One bar per group of a single-key summary, coloured by `color(index, value)`.
fn bars<F>(result: &AggregatedResult, alias: &str, color: F) -> Result<Vec<Bar>, ReportError>
where
    F: Fn(usize, f64) -> RGBColor,
{
    let key = result.keys().first().copied().unwrap_or_default();
    let labels = result.labels(key)?;
    let values = result.values(alias)?;
    if labels.iter().any(Option::is_none) {
        warn!("{}: records without a value are shown as {:?}", key, MISSING_LABEL);
    }
    let bars = labels
        .into_iter()
        .zip(values)
        .enumerate()
        .map(|(i, (label, value))| {
            let value = value.unwrap_or(f64::NAN);
            Bar {
                label: label_or_missing(label),
                value,
                color: color(i, value),
            }
        })
        .collect();
    Ok(bars)
}

#[cfg(test)]
pub(crate) mod fixture;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::get_outputs;
    use dataset::schema::{PROFIT, STATE};
    use dataset::Aggregation;
    use fixture::Row;
    use std::fs;

    #[test]
    fn test_report_from_str() {
        assert_eq!(Report::from_str("all").unwrap(), Report::ALL.to_vec());
        assert_eq!(Report::from_str("profit").unwrap(), vec![Report::Profit]);
        assert!(Report::from_str("sales").is_none());
    }

    #[test]
    fn test_every_chart_has_its_own_file() {
        let names: Vec<&str> = Report::ALL
            .iter()
            .flat_map(|r| r.charts())
            .map(|c| c.file_name())
            .collect();
        assert_eq!(
            names,
            vec![
                "Chart_1_Sales_Profit_Monthly.png",
                "Chart_2_Delivery_Days_by_Ship_Mode.png",
                "Chart_3_Profit_by_Sub_Category.png",
                "Chart_4_Price_vs_Quantity.png",
                "Chart_5_Discount_vs_Profit.png",
                "Chart_6_Profit_by_State.png",
            ]
        );
    }

    #[test]
    fn test_run_all_reports_twice() {
        let data = fixture::load(&fixture::sample());
        let style = Style::default();
        let images = tempfile::tempdir().unwrap();
        let detail = tempfile::tempdir().unwrap();
        let outputs = get_outputs(false, Some(detail.path().to_path_buf()));
        let ctx = Context {
            dataset: &data,
            images: images.path(),
            style: &style,
            outputs: &outputs,
        };

        let mut first = vec![];
        for report in Report::ALL {
            first.extend(run(report, &ctx).unwrap());
        }
        assert_eq!(first.len(), 6);
        let before: Vec<Vec<u8>> = first.iter().map(|p| fs::read(p).unwrap()).collect();
        for bytes in &before {
            assert_eq!(&bytes[1..4], b"PNG");
        }
        assert!(detail.path().join("Chart_6_Profit_by_State.csv").exists());

        for report in Report::ALL {
            run(report, &ctx).unwrap();
        }
        let after: Vec<Vec<u8>> = first.iter().map(|p| fs::read(p).unwrap()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_missing_key_is_labelled() {
        let rows = vec![
            Row { state: "Texas", profit: -5.0, ..Row::default() },
            Row { state: "", profit: 3.0, ..Row::default() },
        ];
        let result = Aggregation::by([STATE])
            .sum(PROFIT, "Profit")
            .run(&fixture::load(&rows))
            .unwrap();
        let bars = bars(&result, "Profit", |_, _| RGBColor(0, 0, 0)).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].label, "Texas");
        assert_eq!(bars[1].label, MISSING_LABEL);
        assert_eq!(bars[1].value, 3.0);
    }
}
