//! Group-by summaries that feed the charts.
//!
//! An [`Aggregation`] describes one summary: the grouping keys, the measures
//! computed per group and the optional filter, ranking and cut-off. Running it
//! against a [`Dataset`] yields an [`AggregatedResult`].
//!
//! Groups always come out in ascending key order (nulls last). A ranking
//! re-sorts that output stably, so equal values keep their key order and
//! reruns on the same data give identical frames.

use crate::loader::Dataset;
use chrono::NaiveDate;
use log::debug;
use polars::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("unknown column {0:?}")]
    UnknownColumn(String),
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone)]
enum Measure {
    Sum { column: &'static str, alias: &'static str },
    Mean { column: &'static str, alias: &'static str },
    Count { alias: &'static str },
}

impl Measure {
    fn expr(&self) -> Expr {
        match self {
            Measure::Sum { column, alias } => col(column).sum().alias(alias),
            Measure::Mean { column, alias } => col(column).mean().alias(alias),
            Measure::Count { alias } => len().cast(DataType::Float64).alias(alias),
        }
    }

    fn column(&self) -> Option<&'static str> {
        match self {
            Measure::Sum { column, .. } | Measure::Mean { column, .. } => Some(*column),
            Measure::Count { .. } => None,
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            Measure::Sum { alias, .. } | Measure::Mean { alias, .. } | Measure::Count { alias } => *alias,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Aggregation {
    keys: Vec<&'static str>,
    measures: Vec<Measure>,
    filter: Option<Expr>,
    ranking: Option<(&'static str, Direction)>,
    limit: Option<IdxSize>,
}

impl Aggregation {
    pub fn by<I: IntoIterator<Item = &'static str>>(keys: I) -> Self {
        Aggregation {
            keys: keys.into_iter().collect(),
            measures: vec![],
            filter: None,
            ranking: None,
            limit: None,
        }
    }

    pub fn sum(mut self, column: &'static str, alias: &'static str) -> Self {
        self.measures.push(Measure::Sum { column, alias });
        self
    }

    pub fn mean(mut self, column: &'static str, alias: &'static str) -> Self {
        self.measures.push(Measure::Mean { column, alias });
        self
    }

    /// Number of records in each group.
    pub fn count(mut self, alias: &'static str) -> Self {
        self.measures.push(Measure::Count { alias });
        self
    }

    /// Keep only records matching `predicate` before grouping. Repeated calls are and-ed.
    pub fn filter(mut self, predicate: Expr) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn sort_by(mut self, alias: &'static str, direction: Direction) -> Self {
        self.ranking = Some((alias, direction));
        self
    }

    pub fn limit(mut self, n: IdxSize) -> Self {
        self.limit = Some(n);
        self
    }

    fn check_columns(&self, dataset: &Dataset) -> Result<(), AggregateError> {
        let referenced = self
            .keys
            .iter()
            .copied()
            .chain(self.measures.iter().filter_map(Measure::column));
        for column in referenced {
            if !dataset.has_column(column) {
                return Err(AggregateError::UnknownColumn(column.to_string()));
            }
        }
        if let Some((alias, _)) = self.ranking {
            let known = self.measures.iter().any(|m| m.alias() == alias);
            if !known {
                return Err(AggregateError::UnknownColumn(alias.to_string()));
            }
        }
        Ok(())
    }

    pub fn run(&self, dataset: &Dataset) -> Result<AggregatedResult, AggregateError> {
        self.check_columns(dataset)?;

        let mut q = dataset.lazy();
        if let Some(predicate) = &self.filter {
            q = q.filter(predicate.clone());
        }
        let keys: Vec<Expr> = self.keys.iter().map(|k| col(k)).collect();
        let aggs: Vec<Expr> = self.measures.iter().map(Measure::expr).collect();
        // one sort so ties on the measure fall back to ascending key order
        let (by, descending): (Vec<&str>, Vec<bool>) = match self.ranking {
            Some((alias, direction)) => std::iter::once((alias, direction == Direction::Descending))
                .chain(self.keys.iter().map(|k| (*k, false)))
                .unzip(),
            None => self.keys.iter().map(|k| (*k, false)).unzip(),
        };
        q = q.group_by(keys).agg(aggs).sort(
            by,
            SortMultipleOptions::default()
                .with_order_descending_multi(descending)
                .with_nulls_last(true)
                .with_maintain_order(true),
        );
        if let Some(n) = self.limit {
            q = q.limit(n);
        }

        let frame = q.collect()?;
        debug!("aggregation by {:?}: {} groups", self.keys, frame.height());
        Ok(AggregatedResult {
            frame,
            keys: self.keys.clone(),
        })
    }
}

/// One summary table: key columns first, then one column per measure alias.
#[derive(Debug, Clone)]
pub struct AggregatedResult {
    frame: DataFrame,
    keys: Vec<&'static str>,
}

impl AggregatedResult {
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Key values rendered as text, `None` for the null group.
    pub fn labels(&self, column: &str) -> Result<Vec<Option<String>>, AggregateError> {
        let series = self.frame.column(column)?.cast(&DataType::String)?;
        let labels = series
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();
        Ok(labels)
    }

    pub fn months(&self, column: &str) -> Result<Vec<Option<NaiveDate>>, AggregateError> {
        Ok(self.frame.column(column)?.date()?.as_date_iter().collect())
    }

    pub fn values(&self, column: &str) -> Result<Vec<Option<f64>>, AggregateError> {
        let series = self.frame.column(column)?.cast(&DataType::Float64)?;
        let values = series.f64()?.into_iter().collect();
        Ok(values)
    }

    /// Sum of a measure over all groups, nulls skipped.
    pub fn total(&self, column: &str) -> Result<f64, AggregateError> {
        Ok(self.values(column)?.into_iter().flatten().sum())
    }
}
