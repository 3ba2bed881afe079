//! Aggregate report composition and rounding rules.
//!
//! The store returns raw single-pass aggregates; the functions here
//! apply the presentation rounding (2 decimals for temperature, wind
//! and rainfall, 1 decimal for humidity and sunshine) and resolve the
//! reported period. Null aggregates stay null.

use crate::models::{
    AggregateRow, ComparisonEntry, ComparisonRow, ReportPeriod, StationPeriod, Statistics,
};
use crate::params::OpenDateRange;

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Apply the rounding rules to a raw aggregate row.
pub fn statistics(agg: &AggregateRow) -> Statistics {
    Statistics {
        data_count: agg.data_count,
        avg_temp: agg.avg_temp.map(round2),
        max_temp: agg.max_temp,
        min_temp: agg.min_temp,
        total_rainfall: agg.total_rainfall.map(round2),
        avg_humidity: agg.avg_humidity.map(round1),
        avg_wind_speed: agg.avg_wind_speed.map(round2),
        total_sunshine: agg.total_sunshine.map(round1),
    }
}

/// The reported period echoes explicitly requested dates verbatim and
/// falls back to the station's full first/last observation dates.
pub fn report_period(range: OpenDateRange, period: Option<&StationPeriod>) -> ReportPeriod {
    ReportPeriod {
        start_date: range.start.or_else(|| period.and_then(|p| p.first_date)),
        end_date: range.end.or_else(|| period.and_then(|p| p.last_date)),
    }
}

/// Shape one station's comparison entry from its raw aggregate.
pub fn comparison_entry(stn_id: i32, row: ComparisonRow) -> ComparisonEntry {
    ComparisonEntry {
        stn_id,
        stn_nm: row.stn_nm,
        data_count: row.data_count,
        avg_temp: row.avg_temp.map(round2),
        max_temp: row.max_temp,
        min_temp: row.min_temp,
        total_rainfall: row.total_rainfall.map(round2),
        avg_humidity: row.avg_humidity.map(round1),
    }
}
