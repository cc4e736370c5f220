use super::{bars, Chart, Plot, Prepared, ReportError};
use chart::palette::{coolwarm, rgb};
use chart::scale::{extent, lerp_radius, normalize};
use chart::{BarChart, BarOrientation, Figure, Point, PointGroup, RGBColor, ReferenceLine, ScatterChart, XScale};
use dataset::schema::{PROFIT, QUANTITY, SUB_CATEGORY, UNIT_COST};
use dataset::{Aggregation, Dataset, Direction};
use polars::prelude::*;

pub const LOSS_COLOR: RGBColor = rgb(0xd73027);
pub const GAIN_COLOR: RGBColor = rgb(0x1a9850);

const AVG_UNIT_COST: &str = "Avg_Unit_Cost";
const TOTAL_QUANTITY: &str = "Total_Quantity";

/// Marker radius range in pixels, smallest to largest demand.
const DEMAND_RADIUS: (u32, u32) = (4, 14);

/// Red for a strictly negative total, green otherwise.
pub fn sign_color(value: f64) -> RGBColor {
    if value < 0.0 {
        LOSS_COLOR
    } else {
        GAIN_COLOR
    }
}

/// Chart 3: total profit per sub-category, most profitable first.
pub struct ProfitBySubCategory;

impl Chart for ProfitBySubCategory {
    fn name(&self) -> &'static str {
        "Chart 3"
    }

    fn file_name(&self) -> &'static str {
        "Chart_3_Profit_by_Sub_Category.png"
    }

    fn prepare(&self, dataset: &Dataset) -> Result<Prepared, ReportError> {
        let profit = Aggregation::by([SUB_CATEGORY])
            .sum(PROFIT, PROFIT)
            .sort_by(PROFIT, Direction::Descending)
            .run(dataset)?;

        let chart = BarChart {
            title: "Chart 3: Total Profit by Sub-Category (Identifying Losers)".to_string(),
            x_desc: "Total Profit (USD)".to_string(),
            y_desc: "Sub-Category".to_string(),
            figure: Figure::new(10.0, 8.0),
            orientation: BarOrientation::Horizontal,
            bars: bars(&profit, PROFIT, |_, v| sign_color(v))?,
            baseline: Some(ReferenceLine::at(0.0)),
        };
        Ok(Prepared {
            table: profit.frame().clone(),
            plot: Plot::Bar(chart),
        })
    }
}

/// Chart 4: average unit cost against units sold, per sub-category.
pub struct CostVsDemand;

impl Chart for CostVsDemand {
    fn name(&self) -> &'static str {
        "Chart 4"
    }

    fn file_name(&self) -> &'static str {
        "Chart_4_Price_vs_Quantity.png"
    }

    fn prepare(&self, dataset: &Dataset) -> Result<Prepared, ReportError> {
        let demand = Aggregation::by([SUB_CATEGORY])
            .filter(col(QUANTITY).gt(lit(0.0)))
            .mean(UNIT_COST, AVG_UNIT_COST)
            .sum(QUANTITY, TOTAL_QUANTITY)
            .run(dataset)?;
        let costs = demand.values(AVG_UNIT_COST)?;
        let quantities = demand.values(TOTAL_QUANTITY)?;
        let domain = extent(quantities.iter().flatten().copied()).unwrap_or((0.0, 0.0));

        let points = costs
            .into_iter()
            .zip(quantities)
            .map(|(cost, quantity)| {
                let quantity = quantity.unwrap_or(f64::NAN);
                Point {
                    x: cost.unwrap_or(f64::NAN),
                    y: quantity,
                    radius: lerp_radius(quantity, domain, DEMAND_RADIUS),
                    color: coolwarm(normalize(quantity, domain)),
                }
            })
            .collect();

        let chart = ScatterChart {
            title: "Chart 4: Sub-Category vs. Customer Demand (Avg. Unit Cost vs. Total Quantity)".to_string(),
            x_desc: "Average Sub-Category Unit Cost (USD) [Log Scale]".to_string(),
            y_desc: "Total Quantity Sold".to_string(),
            figure: Figure::new(10.0, 6.0),
            x_scale: XScale::Log,
            groups: vec![PointGroup {
                label: None,
                alpha: 0.6,
                points,
            }],
            hlines: vec![],
            vlines: vec![],
            legend: None,
        };
        Ok(Prepared {
            table: demand.frame().clone(),
            plot: Plot::Scatter(chart),
        })
    }
}
