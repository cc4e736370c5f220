use super::product::LOSS_COLOR;
use super::{bars, Chart, Plot, Prepared, ReportError};
use chart::palette::rgb;
use chart::scale::{extent, lerp_radius};
use chart::{BarChart, BarOrientation, Figure, LegendPosition, Point, PointGroup, RGBColor, ReferenceLine, ScatterChart, XScale};
use dataset::schema::{DISCOUNT, PROFIT, SALES, STATE};
use dataset::{Aggregation, Dataset, Direction};
use polars::prelude::*;

/// Discounts above this share tend to turn orders into losses.
pub const DISCOUNT_THRESHOLD: f64 = 0.20;
pub const LOSS_STATES: IdxSize = 15;

const PROFITABLE_COLOR: RGBColor = rgb(0x4575b4);
const THRESHOLD_COLOR: RGBColor = rgb(0xff0000);

const SALES_RADIUS: (u32, u32) = (2, 12);

/// Chart 5: every record, discount against profit.
pub struct DiscountVsProfit;

impl DiscountVsProfit {
    fn points(dataset: &Dataset) -> Result<(PointGroup, PointGroup), ReportError> {
        let discounts = dataset.floats(DISCOUNT)?;
        let profits = dataset.floats(PROFIT)?;
        let sales = dataset.floats(SALES)?;
        let domain = extent(sales.iter().flatten().copied()).unwrap_or((0.0, 0.0));

        let mut loss = vec![];
        let mut gain = vec![];
        for ((discount, profit), sale) in discounts.into_iter().zip(profits).zip(sales) {
            let profit = profit.unwrap_or(f64::NAN);
            let radius = match sale {
                Some(sale) => lerp_radius(sale, domain, SALES_RADIUS),
                None => SALES_RADIUS.0,
            };
            let point = Point {
                x: discount.unwrap_or(f64::NAN),
                y: profit,
                radius,
                color: if profit < 0.0 { LOSS_COLOR } else { PROFITABLE_COLOR },
            };
            if profit < 0.0 {
                loss.push(point);
            } else {
                gain.push(point);
            }
        }
        let gain = PointGroup {
            label: Some("Is Loss? False".to_string()),
            alpha: 0.5,
            points: gain,
        };
        let loss = PointGroup {
            label: Some("Is Loss? True".to_string()),
            alpha: 0.5,
            points: loss,
        };
        Ok((gain, loss))
    }
}

impl Chart for DiscountVsProfit {
    fn name(&self) -> &'static str {
        "Chart 5"
    }

    fn file_name(&self) -> &'static str {
        "Chart_5_Discount_vs_Profit.png"
    }

    fn prepare(&self, dataset: &Dataset) -> Result<Prepared, ReportError> {
        let table = dataset
            .lazy()
            .select([
                col(DISCOUNT),
                col(PROFIT),
                col(SALES),
                col(PROFIT).lt(lit(0.0)).alias("Is Loss"),
            ])
            .collect()?;
        let (gain, loss) = Self::points(dataset)?;

        let chart = ScatterChart {
            title: "Chart 5: Discount Impact on Profitability".to_string(),
            x_desc: "Discount Percentage".to_string(),
            y_desc: "Profit (USD)".to_string(),
            figure: Figure::new(10.0, 6.0),
            x_scale: XScale::Linear,
            groups: vec![gain, loss],
            hlines: vec![ReferenceLine::at(0.0).dashed()],
            vlines: vec![ReferenceLine::at(DISCOUNT_THRESHOLD)
                .color(THRESHOLD_COLOR)
                .width(2)
                .dotted()
                .label("20% Discount Threshold")],
            legend: Some(LegendPosition::LowerLeft),
        };
        Ok(Prepared {
            table,
            plot: Plot::Scatter(chart),
        })
    }
}

/// Chart 6: the states with the lowest cumulative profit.
pub struct LossStates;

impl Chart for LossStates {
    fn name(&self) -> &'static str {
        "Chart 6"
    }

    fn file_name(&self) -> &'static str {
        "Chart_6_Profit_by_State.png"
    }

    fn prepare(&self, dataset: &Dataset) -> Result<Prepared, ReportError> {
        let states = Aggregation::by([STATE])
            .sum(PROFIT, PROFIT)
            .sort_by(PROFIT, Direction::Ascending)
            .limit(LOSS_STATES)
            .run(dataset)?;

        let chart = BarChart {
            title: "Chart 6: Top 15 States with the Largest Cumulative Profit Loss".to_string(),
            x_desc: "Total Profit (USD)".to_string(),
            y_desc: "State".to_string(),
            figure: Figure::new(10.0, 7.0),
            orientation: BarOrientation::Horizontal,
            // all red, even when a listed state made money overall
            bars: bars(&states, PROFIT, |_, _| LOSS_COLOR)?,
            baseline: Some(ReferenceLine::at(0.0)),
        };
        Ok(Prepared {
            table: states.frame().clone(),
            plot: Plot::Bar(chart),
        })
    }
}
