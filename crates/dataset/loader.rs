use crate::schema;
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info};
use polars::prelude::*;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("cannot open {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("cannot read {path:?}: {source}")]
    Read { path: PathBuf, source: PolarsError },
    #[error("missing column {0:?}")]
    MissingColumn(&'static str),
    #[error("column {column:?}: {reason}")]
    InvalidColumn { column: &'static str, reason: String },
    #[error("column {column:?} row {row}: cannot parse date {value:?}")]
    InvalidDate {
        column: &'static str,
        row: usize,
        value: String,
    },
    #[error("row {row}: year {year} / month {month} is not a calendar month")]
    InvalidMonth { row: usize, year: i32, month: i32 },
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// The validated sales records, one row per order line.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
}

impl Dataset {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Dataset, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .into_reader_with_file_handle(file)
            .finish()
            .map_err(|source| LoadError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        info!("read {} rows from {:?}", df.height(), path);
        Dataset::from_frame(df)
    }

    /// Checks the schema, normalises column types and derives `Order Month Start`.
    pub fn from_frame(mut df: DataFrame) -> Result<Dataset, LoadError> {
        for column in schema::required_columns() {
            if df.column(column).is_err() {
                return Err(LoadError::MissingColumn(column));
            }
        }
        for column in schema::NUMERIC_COLUMNS {
            cast_column(&mut df, column, &DataType::Float64)?;
        }
        for column in schema::INTEGER_COLUMNS {
            cast_column(&mut df, column, &DataType::Int32)?;
        }
        for column in schema::TEXT_COLUMNS {
            cast_column(&mut df, column, &DataType::String)?;
        }
        for column in schema::DATE_COLUMNS {
            let dates = to_dates(df.column(column)?, column)?;
            df.with_column(dates)?;
        }
        let month_start = month_start(&df)?;
        df.with_column(month_start)?;
        debug!("dataset schema: {:?}", df.schema());
        Ok(Dataset { df })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn lazy(&self) -> LazyFrame {
        self.df.clone().lazy()
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.df.column(column).is_ok()
    }

    /// Values of a numeric column in record order.
    pub fn floats(&self, column: &str) -> PolarsResult<Vec<Option<f64>>> {
        let series = self.df.column(column)?.cast(&DataType::Float64)?;
        Ok(series.f64()?.into_iter().collect())
    }
}

fn cast_column(df: &mut DataFrame, column: &'static str, dtype: &DataType) -> Result<(), LoadError> {
    let series = df.column(column)?;
    if series.dtype() == dtype {
        return Ok(());
    }
    let cast = series
        .strict_cast(dtype)
        .map_err(|e| LoadError::InvalidColumn {
            column,
            reason: format!("expected {}: {}", dtype, e),
        })?;
    df.with_column(cast)?;
    Ok(())
}

fn to_dates(series: &Series, column: &'static str) -> Result<Series, LoadError> {
    match series.dtype() {
        DataType::Date => Ok(series.clone()),
        DataType::Datetime(_, _) => Ok(series.cast(&DataType::Date)?),
        DataType::String => {
            let mut dates = Vec::with_capacity(series.len());
            for (row, value) in series.str()?.into_iter().enumerate() {
                let date = match value.map(str::trim) {
                    None | Some("") => None,
                    Some(text) => Some(parse_date(text).ok_or_else(|| LoadError::InvalidDate {
                        column,
                        row,
                        value: text.to_string(),
                    })?),
                };
                dates.push(date);
            }
            Ok(DateChunked::from_naive_date_options(column, dates).into_series())
        }
        other => Err(LoadError::InvalidColumn {
            column,
            reason: format!("expected a date, found {}", other),
        }),
    }
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    schema::DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// First day of the given month, `None` when the pair is not a calendar month.
pub fn first_of_month(year: i32, month: i32) -> Option<NaiveDate> {
    let month = u32::try_from(month).ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn month_start(df: &DataFrame) -> Result<Series, LoadError> {
    let years = df.column(schema::ORDER_YEAR)?.i32()?;
    let months = df.column(schema::ORDER_MONTH)?.i32()?;
    let mut starts = Vec::with_capacity(df.height());
    for (row, (year, month)) in years.into_iter().zip(months.into_iter()).enumerate() {
        let start = match (year, month) {
            (Some(year), Some(month)) => Some(
                first_of_month(year, month).ok_or(LoadError::InvalidMonth { row, year, month })?,
            ),
            _ => None,
        };
        starts.push(start);
    }
    Ok(DateChunked::from_naive_date_options(schema::ORDER_MONTH_START, starts).into_series())
}
