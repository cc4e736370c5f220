use dataset::schema::{PROFIT, STATE};
use dataset::{Aggregation, Dataset, Direction};
use std::env;

fn main() {
    let path = env::args()
        .nth(1)
        .unwrap_or("cleaned_superstore.csv".to_string());
    let dataset = Dataset::load(&path).unwrap();

    let states = Aggregation::by([STATE])
        .sum(PROFIT, "Profit")
        .count("Orders")
        .sort_by("Profit", Direction::Ascending)
        .limit(5)
        .run(&dataset)
        .unwrap();

    println!("{}", states.frame())
}
