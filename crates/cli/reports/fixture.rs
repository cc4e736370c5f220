use dataset::schema::*;
use dataset::Dataset;
use std::path::{Path, PathBuf};

/// One CSV line of test data. An empty text field is read back as null.
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
            month: (2016, 11),
            sales: 261.96,
            profit: 41.91,
            ship_mode: "Second Class",
            delivery_days: 3.0,
            sub_category: "Bookcases",
            unit_cost: 130.98,
            quantity: 2.0,
            discount: 0.0,
            state: "Kentucky",
        }
    }
}

pub fn write(dir: &Path, rows: &[Row]) -> PathBuf {
    let path = dir.join("superstore.csv");
    let mut wtr = csv::Writer::from_path(&path).unwrap();
    // same order as required_columns()
    wtr.write_record(required_columns()).unwrap();
    for r in rows {
        let (year, month) = r.month;
        wtr.write_record([
            format!("{:02}/08/{}", month, year),
            format!("{:02}/11/{}", month, year),
            year.to_string(),
            month.to_string(),
            r.sales.to_string(),
            r.profit.to_string(),
            r.delivery_days.to_string(),
            r.unit_cost.to_string(),
            r.quantity.to_string(),
            r.discount.to_string(),
            r.ship_mode.to_string(),
            r.sub_category.to_string(),
            r.state.to_string(),
        ])
        .unwrap();
    }
    wtr.flush().unwrap();
    path
}

pub fn load(rows: &[Row]) -> Dataset {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), rows);
    Dataset::load(path).unwrap()
}

const STATES: [&str; 20] = [
    "Texas", "Ohio", "Pennsylvania", "Illinois", "North Carolina", "Oregon", "Florida",
    "Arizona", "Tennessee", "Colorado", "New York", "California", "Washington", "Michigan",
    "Virginia", "Indiana", "Georgia", "Kentucky", "New Jersey", "Wisconsin",
];

const SUB_CATEGORIES: [&str; 6] = ["Tables", "Bookcases", "Supplies", "Binders", "Phones", "Paper"];

const SHIP_MODES: [(&str, f64); 4] = [
    ("Standard Class", 5.0),
    ("Second Class", 3.0),
    ("First Class", 2.0),
    ("Same Day", 0.0),
];

/// Two years of orders over every state, sub-category and ship mode.
pub fn sample() -> Vec<Row> {
    (0..48)
        .map(|i| {
            let discount = [0.0, 0.1, 0.2, 0.4, 0.7][i % 5];
            let sales = 20.0 + (i * 37 % 500) as f64;
            let (ship_mode, delivery_days) = SHIP_MODES[i % SHIP_MODES.len()];
            Row {
                month: (2016 + (i / 24) as i32, (i % 12) as i32 + 1),
                sales,
                profit: sales * (0.25 - discount),
                ship_mode,
                delivery_days: delivery_days + (i % 2) as f64,
                sub_category: SUB_CATEGORIES[i % SUB_CATEGORIES.len()],
                unit_cost: 5.0 + (i * 53 % 900) as f64,
                quantity: (1 + i % 7) as f64,
                discount,
                state: STATES[i % STATES.len()],
            }
        })
        .collect()
}
