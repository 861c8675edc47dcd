//! Date column normalization.
//!
//! Raw price tables arrive with dates as integer epoch nanoseconds, strings,
//! native timestamps or native dates. All of them are reduced to a
//! timezone-naive calendar date: instants carrying an offset are converted
//! to UTC first, then the time of day is dropped.

use crate::error::{DataError, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use polars::prelude::*;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Naive layouts accepted for string dates, tried after RFC 3339.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Offset layouts with a space separator, which RFC 3339 parsing may reject.
const OFFSET_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Convert a raw date column into calendar dates, one per row.
///
/// Fails on the first null or unparseable value, and on any dtype that is not
/// an integer, string, `Date` or `Datetime`.
pub fn normalize_dates(series: &Series) -> Result<Vec<NaiveDate>> {
    match series.dtype() {
        DataType::Date => {
            let days = series.cast(&DataType::Int32)?;
            collect_dates(days.i32()?.into_iter(), days_to_date)
        }
        DataType::Datetime(unit, _) => {
            let unit = *unit;
            let raw = series.cast(&DataType::Int64)?;
            collect_dates(raw.i64()?.into_iter(), |v| epoch_to_date(v, unit))
        }
        DataType::String => {
            let strings = series.str()?;
            strings
                .into_iter()
                .enumerate()
                .map(|(row, value)| {
                    let value = value.ok_or_else(|| null_date(row))?;
                    parse_date_str(value).ok_or_else(|| DataError::Date {
                        row,
                        value: value.to_string(),
                    })
                })
                .collect()
        }
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32 => {
            let raw = series.cast(&DataType::Int64)?;
            collect_dates(raw.i64()?.into_iter(), |v| {
                epoch_to_date(v, TimeUnit::Nanoseconds)
            })
        }
        DataType::UInt64 => collect_dates(series.u64()?.into_iter(), |v| {
            epoch_to_date(i64::try_from(v).ok()?, TimeUnit::Nanoseconds)
        }),
        other => Err(DataError::Date {
            row: 0,
            value: format!("unsupported date column type {other}"),
        }),
    }
}

fn collect_dates<T, I, F>(values: I, convert: F) -> Result<Vec<NaiveDate>>
where
    T: Copy + std::fmt::Display,
    I: Iterator<Item = Option<T>>,
    F: Fn(T) -> Option<NaiveDate>,
{
    values
        .enumerate()
        .map(|(row, value)| {
            let value = value.ok_or_else(|| null_date(row))?;
            convert(value).ok_or_else(|| DataError::Date {
                row,
                value: value.to_string(),
            })
        })
        .collect()
}

fn null_date(row: usize) -> DataError {
    DataError::Date {
        row,
        value: "null".to_string(),
    }
}

/// Calendar date for a count of days since 1970-01-01.
pub fn days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

/// Days since 1970-01-01 for a calendar date.
pub fn date_to_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// UTC calendar date of an epoch timestamp expressed in `unit`.
pub fn epoch_to_date(value: i64, unit: TimeUnit) -> Option<NaiveDate> {
    let instant = match unit {
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
    }?;
    Some(instant.date_naive())
}

/// Parse a string date, accepting plain dates, naive timestamps and
/// offset timestamps. Offset timestamps are converted to UTC before the
/// time of day is dropped.
pub fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .or_else(|| {
            NAIVE_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}
