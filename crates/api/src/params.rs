//! Query-parameter coercion and range validation.
//!
//! Everything here runs before a request touches the store; malformed
//! input surfaces as [`Error::Validation`].

use time::{format_description::FormatItem, macros::format_description, Date, PrimitiveDateTime};

use crate::error::Error;

pub const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DATETIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const DATETIME_FORMAT_SPACE: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Maximum number of stations one comparison request may name
pub const MAX_COMPARISON_STATIONS: usize = 10;

/// Parse a `YYYY-MM-DD` date parameter.
pub fn parse_date(value: &str) -> Result<Date, Error> {
    Date::parse(value, DATE_FORMAT)
        .map_err(|_| Error::Validation(format!("invalid date '{}', expected YYYY-MM-DD", value)))
}

/// Parse a timestamp parameter, accepting `YYYY-MM-DDTHH:MM:SS` or the
/// space-separated variant.
pub fn parse_datetime(value: &str) -> Result<PrimitiveDateTime, Error> {
    PrimitiveDateTime::parse(value, DATETIME_FORMAT)
        .or_else(|_| PrimitiveDateTime::parse(value, DATETIME_FORMAT_SPACE))
        .map_err(|_| {
            Error::Validation(format!(
                "invalid datetime '{}', expected YYYY-MM-DDTHH:MM:SS",
                value
            ))
        })
}

/// Validate a `YYYY-MM` month parameter. Months are stored as text, so
/// the validated string itself is the comparison key.
pub fn parse_month(value: &str) -> Result<String, Error> {
    let invalid = || Error::Validation(format!("invalid month '{}', expected YYYY-MM", value));

    let (year, month) = value.split_once('-').ok_or_else(invalid)?;
    if year.len() != 4 || month.len() != 2 {
        return Err(invalid());
    }
    year.parse::<u16>().map_err(|_| invalid())?;
    let month_num: u8 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month_num) {
        return Err(invalid());
    }
    Ok(value.to_string())
}

/// Parse the comma-separated station-id list of the comparison
/// endpoint; bounded to [`MAX_COMPARISON_STATIONS`].
pub fn parse_station_ids(value: &str) -> Result<Vec<i32>, Error> {
    let ids: Vec<i32> = value
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<i32>()
                .map_err(|_| Error::Validation(format!("invalid station id '{}'", s.trim())))
        })
        .collect::<Result<_, _>>()?;

    if ids.is_empty() {
        return Err(Error::Validation("station id list is empty".to_string()));
    }
    if ids.len() > MAX_COMPARISON_STATIONS {
        return Err(Error::Validation(format!(
            "at most {} stations can be compared",
            MAX_COMPARISON_STATIONS
        )));
    }
    Ok(ids)
}

/// A closed date range with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    pub fn parse(start: &str, end: &str) -> Result<Self, Error> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn new(start: Date, end: Date) -> Result<Self, Error> {
        if start > end {
            return Err(Error::Validation(
                "start date must not be after end date".to_string(),
            ));
        }
        Ok(Self { start, end })
    }
}

/// An optionally bounded date range; ordering is still enforced when
/// both bounds are present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenDateRange {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl OpenDateRange {
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, Error> {
        let start = start.map(parse_date).transpose()?;
        let end = end.map(parse_date).transpose()?;
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(Error::Validation(
                    "start date must not be after end date".to_string(),
                ));
            }
        }
        Ok(Self { start, end })
    }
}

/// An optionally bounded timestamp range for the 10-minute data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateTimeRange {
    pub start: Option<PrimitiveDateTime>,
    pub end: Option<PrimitiveDateTime>,
}

impl DateTimeRange {
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, Error> {
        let start = start.map(parse_datetime).transpose()?;
        let end = end.map(parse_datetime).transpose()?;
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(Error::Validation(
                    "start datetime must not be after end datetime".to_string(),
                ));
            }
        }
        Ok(Self { start, end })
    }
}

/// A closed month range (`YYYY-MM` keys compare lexically)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthRange {
    pub start: String,
    pub end: String,
}

impl MonthRange {
    pub fn parse(start: &str, end: &str) -> Result<Self, Error> {
        let start = parse_month(start)?;
        let end = parse_month(end)?;
        if start > end {
            return Err(Error::Validation(
                "start month must not be after end month".to_string(),
            ));
        }
        Ok(Self { start, end })
    }
}
