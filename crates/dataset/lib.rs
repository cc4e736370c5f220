pub mod aggregate;
#[cfg(test)]
mod fixture;
pub mod loader;
pub mod schema;

pub use aggregate::{AggregateError, AggregatedResult, Aggregation, Direction};
pub use loader::{Dataset, LoadError};
