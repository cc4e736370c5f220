use crate::loader::Dataset;
use crate::schema::*;
use polars::prelude::*;

#[derive(Debug, Clone)]
pub struct Row {
    pub month: (i32, i32),
    pub sales: f64,
    pub profit: f64,
    pub ship_mode: &'static str,
    pub delivery_days: f64,
    pub sub_category: &'static str,
    pub unit_cost: f64,
    pub quantity: f64,
    pub discount: f64,
    pub state: &'static str,
}

impl Default for Row {
    fn default() -> Self {
        Row {
            month: (2023, 1),
            sales: 100.0,
            profit: 10.0,
            ship_mode: "Standard Class",
            delivery_days: 4.0,
            sub_category: "Binders",
            unit_cost: 25.0,
            quantity: 4.0,
            discount: 0.0,
            state: "Texas",
        }
    }
}

pub fn frame(rows: &[Row]) -> DataFrame {
    let order_dates: Vec<String> = rows
        .iter()
        .map(|r| format!("{}-{:02}-03", r.month.0, r.month.1))
        .collect();
    let ship_dates: Vec<String> = rows
        .iter()
        .map(|r| format!("{}-{:02}-07", r.month.0, r.month.1))
        .collect();
    df!(
        ORDER_DATE => order_dates,
        SHIP_DATE => ship_dates,
        ORDER_YEAR => rows.iter().map(|r| r.month.0).collect::<Vec<_>>(),
        ORDER_MONTH => rows.iter().map(|r| r.month.1).collect::<Vec<_>>(),
        SALES => rows.iter().map(|r| r.sales).collect::<Vec<_>>(),
        PROFIT => rows.iter().map(|r| r.profit).collect::<Vec<_>>(),
        SHIP_MODE => rows.iter().map(|r| r.ship_mode).collect::<Vec<_>>(),
        DELIVERY_DAYS => rows.iter().map(|r| r.delivery_days).collect::<Vec<_>>(),
        SUB_CATEGORY => rows.iter().map(|r| r.sub_category).collect::<Vec<_>>(),
        UNIT_COST => rows.iter().map(|r| r.unit_cost).collect::<Vec<_>>(),
        QUANTITY => rows.iter().map(|r| r.quantity).collect::<Vec<_>>(),
        DISCOUNT => rows.iter().map(|r| r.discount).collect::<Vec<_>>(),
        STATE => rows.iter().map(|r| r.state).collect::<Vec<_>>(),
    )
    .unwrap()
}

pub fn dataset(rows: &[Row]) -> Dataset {
    Dataset::from_frame(frame(rows)).unwrap()
}
