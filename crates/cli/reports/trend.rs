use super::{bars, Chart, Plot, Prepared, ReportError};
use chart::palette::{rgb, spread, viridis};
use chart::{BarChart, BarOrientation, Figure, LegendPosition, LineChart, RGBColor, ReferenceLine, TimeSeries};
use chrono::NaiveDate;
use dataset::schema::{DELIVERY_DAYS, ORDER_MONTH_START, PROFIT, SALES, SHIP_MODE};
use dataset::{Aggregation, Dataset, Direction};
use log::warn;

const TOTAL_SALES: &str = "Total_Sales";
const TOTAL_PROFIT: &str = "Total_Profit";

const SALES_COLOR: RGBColor = rgb(0x2c7bb6);
const PROFIT_COLOR: RGBColor = rgb(0xfdae61);
const ZERO_COLOR: RGBColor = rgb(0x808080);

/// Chart 1: sales and profit summed per order month.
pub struct MonthlyTrend;

/// Pairs months with values, skipping groups where either is missing.
fn month_points(months: &[Option<NaiveDate>], values: Vec<Option<f64>>) -> Vec<(NaiveDate, f64)> {
    let points: Vec<(NaiveDate, f64)> = months
        .iter()
        .zip(values)
        .filter_map(|(month, value)| Some(((*month)?, value?)))
        .collect();
    if points.len() < months.len() {
        warn!("{} months without a date or total left out", months.len() - points.len());
    }
    points
}

impl Chart for MonthlyTrend {
    fn name(&self) -> &'static str {
        "Chart 1"
    }

    fn file_name(&self) -> &'static str {
        "Chart_1_Sales_Profit_Monthly.png"
    }

    fn prepare(&self, dataset: &Dataset) -> Result<Prepared, ReportError> {
        let monthly = Aggregation::by([ORDER_MONTH_START])
            .sum(SALES, TOTAL_SALES)
            .sum(PROFIT, TOTAL_PROFIT)
            .run(dataset)?;
        let months = monthly.months(ORDER_MONTH_START)?;

        let chart = LineChart {
            title: "Chart 1: Monthly Sales and Profit Trend Analysis (Identifying Seasonality)".to_string(),
            x_desc: "Order Month".to_string(),
            y_desc: "Amount (USD)".to_string(),
            figure: Figure::new(14.0, 6.0),
            series: vec![
                TimeSeries {
                    label: "Total Sales (USD)".to_string(),
                    color: SALES_COLOR,
                    points: month_points(&months, monthly.values(TOTAL_SALES)?),
                },
                TimeSeries {
                    label: "Total Profit (USD)".to_string(),
                    color: PROFIT_COLOR,
                    points: month_points(&months, monthly.values(TOTAL_PROFIT)?),
                },
            ],
            hlines: vec![ReferenceLine::at(0.0).color(ZERO_COLOR).dashed()],
            legend: Some(LegendPosition::UpperLeft),
        };
        Ok(Prepared {
            table: monthly.frame().clone(),
            plot: Plot::Line(chart),
        })
    }
}

/// Chart 2: mean delivery days per ship mode, slowest first.
pub struct DeliveryByShipMode;

impl Chart for DeliveryByShipMode {
    fn name(&self) -> &'static str {
        "Chart 2"
    }

    fn file_name(&self) -> &'static str {
        "Chart_2_Delivery_Days_by_Ship_Mode.png"
    }

    fn prepare(&self, dataset: &Dataset) -> Result<Prepared, ReportError> {
        let delivery = Aggregation::by([SHIP_MODE])
            .mean(DELIVERY_DAYS, DELIVERY_DAYS)
            .sort_by(DELIVERY_DAYS, Direction::Descending)
            .run(dataset)?;
        let colors = spread(delivery.len(), viridis);

        let chart = BarChart {
            title: "Chart 2: Average Delivery Time by Shipping Mode".to_string(),
            x_desc: "Ship Mode".to_string(),
            y_desc: "Average Delivery Days".to_string(),
            figure: Figure::new(8.0, 5.0),
            orientation: BarOrientation::Vertical,
            bars: bars(&delivery, DELIVERY_DAYS, |i, _| colors[i])?,
            baseline: None,
        };
        Ok(Prepared {
            table: delivery.frame().clone(),
            plot: Plot::Bar(chart),
        })
    }
}
