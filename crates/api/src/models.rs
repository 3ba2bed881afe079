//! Row and response types for the agweather API.
//!
//! Every endpoint returns one of these fixed shapes; the columns each
//! query selects are declared next to the struct they hydrate so the
//! generic list engine and the response type can never drift apart.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, PrimitiveDateTime};
use utoipa::ToSchema;

/// KMA ASOS daily summary record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AsosDaily {
    pub id: i32,
    /// Station id
    pub stn_id: i32,
    /// Station display name
    pub stn_nm: Option<String>,
    /// Observation date
    pub tm: Date,
    /// Mean temperature (°C)
    pub avg_ta: Option<f64>,
    /// Minimum temperature (°C)
    pub min_ta: Option<f64>,
    /// Maximum temperature (°C)
    pub max_ta: Option<f64>,
    /// Daily precipitation (mm)
    pub sum_rn: Option<f64>,
    /// Mean wind speed (m/s)
    pub avg_ws: Option<f64>,
    /// Mean relative humidity (%)
    pub avg_rhm: Option<i32>,
    /// Sunshine duration (hr)
    pub sum_ss_hr: Option<f64>,
    /// Global solar radiation (MJ/m²)
    pub sum_gsr: Option<f64>,
}

impl AsosDaily {
    pub const TABLE: &'static str = "asos_daily_data";
    pub const COLUMNS: &'static [&'static str] = &[
        "id", "stn_id", "stn_nm", "tm", "avg_ta", "min_ta", "max_ta", "sum_rn", "avg_ws",
        "avg_rhm", "sum_ss_hr", "sum_gsr",
    ];
}

/// One narrow KMA very-short-range ("realtime") observation row.
///
/// Rows sharing `(region_name, base_date, base_time)` differ only by
/// `category`; the pivot view folds them into [`RealtimePivot`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RealtimeObservation {
    pub id: i32,
    /// Province / metropolitan city
    pub sido: Option<String>,
    pub region_name: Option<String>,
    /// Forecast grid X
    pub nx: Option<i32>,
    /// Forecast grid Y
    pub ny: Option<i32>,
    /// Issue date
    pub base_date: Option<Date>,
    /// Issue time (HHMM)
    pub base_time: Option<String>,
    /// Category code (T1H, RN1, UUU, ...)
    pub category: Option<String>,
    /// Observed value
    pub obsrvalue: Option<f64>,
}

impl RealtimeObservation {
    pub const TABLE: &'static str = "weather_realtime";
    pub const COLUMNS: &'static [&'static str] = &[
        "id",
        "sido",
        "region_name",
        "nx",
        "ny",
        "base_date",
        "base_time",
        "category",
        "obsrvalue",
    ];
}

/// Key of one pivot group: a single issue timestamp for a region
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PivotKey {
    pub sido: Option<String>,
    pub region_name: String,
    pub base_date: Date,
    pub base_time: String,
}

/// The narrow form the pivot transformer consumes
#[derive(Debug, Clone, FromRow)]
pub struct NarrowObservation {
    pub region_name: String,
    pub base_date: Date,
    pub base_time: String,
    pub category: Option<String>,
    pub obsrvalue: Option<f64>,
}

/// Realtime observations pivoted to one row per issue timestamp.
///
/// Every declared category column is always present; categories with
/// no matching narrow row stay null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RealtimePivot {
    pub sido: Option<String>,
    pub region_name: String,
    pub base_date: Date,
    pub base_time: String,
    /// Temperature (°C)
    #[serde(rename = "T1H")]
    pub t1h: Option<f64>,
    /// 1-hour precipitation (mm)
    #[serde(rename = "RN1")]
    pub rn1: Option<f64>,
    /// East-west wind component (m/s)
    #[serde(rename = "UUU")]
    pub uuu: Option<f64>,
    /// North-south wind component (m/s)
    #[serde(rename = "VVV")]
    pub vvv: Option<f64>,
    /// Relative humidity (%)
    #[serde(rename = "REH")]
    pub reh: Option<f64>,
    /// Precipitation type
    #[serde(rename = "PTY")]
    pub pty: Option<f64>,
    /// Wind direction (deg)
    #[serde(rename = "VEC")]
    pub vec: Option<f64>,
    /// Wind speed (m/s)
    #[serde(rename = "WSD")]
    pub wsd: Option<f64>,
}

/// KMA short-term forecast value (narrow row)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ShortForecast {
    pub id: i32,
    pub region_name: Option<String>,
    pub nx: Option<i32>,
    pub ny: Option<i32>,
    /// Issue date
    pub base_date: Option<Date>,
    /// Issue time (HHMM)
    pub base_time: Option<String>,
    /// Forecast target date
    pub fcst_date: Option<Date>,
    /// Forecast target time (HHMM)
    pub fcst_time: Option<String>,
    /// Category code (TMP, POP, SKY, ...)
    pub category: Option<String>,
    pub fcst_value: Option<String>,
}

impl ShortForecast {
    pub const TABLE: &'static str = "weather_short_forecast";
    pub const COLUMNS: &'static [&'static str] = &[
        "id",
        "region_name",
        "nx",
        "ny",
        "base_date",
        "base_time",
        "fcst_date",
        "fcst_time",
        "category",
        "fcst_value",
    ];
}

/// KMA mid-term forecast record (wide row, 3-10 days out)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MidForecast {
    pub id: i32,
    /// Forecast zone code
    pub reg_id: Option<String>,
    pub region_name: Option<String>,
    /// Issue timestamp (YYYYMMDDHHMM)
    pub tm_fc: Option<String>,
    pub forecast_date: Option<Date>,
    /// Am, Pm or All
    pub time_period: Option<String>,
    /// Precipitation probability (%)
    pub rain_prob: Option<i32>,
    pub weather_condition: Option<String>,
    pub temp_min: Option<f64>,
    pub temp_min_low: Option<f64>,
    pub temp_min_high: Option<f64>,
    pub temp_max: Option<f64>,
    pub temp_max_low: Option<f64>,
    pub temp_max_high: Option<f64>,
}

impl MidForecast {
    pub const TABLE: &'static str = "weather_mid_forecast";
    pub const COLUMNS: &'static [&'static str] = &[
        "id",
        "reg_id",
        "region_name",
        "tm_fc",
        "forecast_date",
        "time_period",
        "rain_prob",
        "weather_condition",
        "temp_min",
        "temp_min_low",
        "temp_min_high",
        "temp_max",
        "temp_max_low",
        "temp_max_high",
    ];
}

/// RDA 10-minute interval agri-weather record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AgriMinutely {
    pub id: i32,
    /// Station code
    pub stn_cd: Option<String>,
    pub stn_name: Option<String>,
    /// Province / metropolitan city
    pub province: Option<String>,
    /// Observation timestamp
    pub datetime: Option<PrimitiveDateTime>,
    /// Temperature (°C)
    pub temp: Option<f64>,
    /// Maximum temperature (°C)
    pub hghst_artmp: Option<f64>,
    /// Minimum temperature (°C)
    pub lowst_artmp: Option<f64>,
    /// Humidity (%)
    pub hum: Option<f64>,
    /// Wind direction (deg)
    pub widdir: Option<f64>,
    /// Wind speed (m/s)
    pub wind: Option<f64>,
    /// Maximum wind speed (m/s)
    pub max_wind: Option<f64>,
    /// Precipitation (mm)
    pub rn: Option<f64>,
    /// Sunshine duration (min)
    pub sun_time: Option<f64>,
    /// Solar radiation (MJ/m²)
    pub srqty: Option<f64>,
    /// Condensation duration (min)
    pub condens_time: Option<f64>,
    /// Ground temperature (°C)
    pub gr_temp: Option<f64>,
    /// Soil temperature (°C)
    pub soil_temp: Option<f64>,
    /// Soil moisture (%)
    pub soil_wt: Option<f64>,
}

impl AgriMinutely {
    pub const TABLE: &'static str = "weather_data";
    pub const COLUMNS: &'static [&'static str] = &[
        "id",
        "stn_cd",
        "stn_name",
        "province",
        "datetime",
        "temp",
        "hghst_artmp",
        "lowst_artmp",
        "hum",
        "widdir",
        "wind",
        "max_wind",
        "rn",
        "sun_time",
        "srqty",
        "condens_time",
        "gr_temp",
        "soil_temp",
        "soil_wt",
    ];
}

/// RDA daily agri-weather record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AgriDaily {
    pub id: i32,
    pub stn_cd: Option<String>,
    pub stn_name: Option<String>,
    /// Observation date
    pub date: Option<Date>,
    /// Mean temperature (°C)
    pub temp: Option<f64>,
    pub hghst_artmp: Option<f64>,
    pub lowst_artmp: Option<f64>,
    pub hum: Option<f64>,
    pub widdir: Option<f64>,
    pub wind: Option<f64>,
    pub max_wind: Option<f64>,
    pub rn: Option<f64>,
    /// Sunshine duration (hr)
    pub sun_time: Option<f64>,
    pub srqty: Option<f64>,
    pub condens_time: Option<f64>,
    pub gr_temp: Option<f64>,
    pub soil_temp: Option<f64>,
    pub soil_wt: Option<f64>,
}

impl AgriDaily {
    pub const TABLE: &'static str = "weather_data_daily";
    pub const COLUMNS: &'static [&'static str] = &[
        "id",
        "stn_cd",
        "stn_name",
        "date",
        "temp",
        "hghst_artmp",
        "lowst_artmp",
        "hum",
        "widdir",
        "wind",
        "max_wind",
        "rn",
        "sun_time",
        "srqty",
        "condens_time",
        "gr_temp",
        "soil_temp",
        "soil_wt",
    ];
}

/// RDA monthly agri-weather record (month keyed as YYYY-MM)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AgriMonthly {
    pub id: i32,
    pub stn_cd: Option<String>,
    pub stn_name: Option<String>,
    /// Observation month (YYYY-MM)
    pub date: Option<String>,
    pub temp: Option<f64>,
    pub hghst_artmp: Option<f64>,
    pub lowst_artmp: Option<f64>,
    pub hum: Option<f64>,
    pub widdir: Option<f64>,
    pub wind: Option<f64>,
    pub max_wind: Option<f64>,
    pub rn: Option<f64>,
    pub sun_time: Option<f64>,
    pub srqty: Option<f64>,
    pub condens_time: Option<f64>,
    pub gr_temp: Option<f64>,
    pub soil_temp: Option<f64>,
    pub soil_wt: Option<f64>,
}

impl AgriMonthly {
    pub const TABLE: &'static str = "weather_data_monthly";
    // Same column set as the daily table, month keyed as text.
    pub const COLUMNS: &'static [&'static str] = AgriDaily::COLUMNS;
}

/// ASOS station summary (grouped over the daily table)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AsosStation {
    pub stn_id: i32,
    pub stn_nm: Option<String>,
    pub data_count: i64,
    pub first_date: Option<Date>,
    pub last_date: Option<Date>,
}

/// Realtime region summary with forecast grid coordinates
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RealtimeRegion {
    pub sido: Option<String>,
    pub region_name: Option<String>,
    pub nx: Option<i32>,
    pub ny: Option<i32>,
    pub data_count: i64,
    pub first_date: Option<Date>,
    pub last_date: Option<Date>,
}

/// Mid-term forecast zone summary
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MidForecastRegion {
    pub reg_id: Option<String>,
    pub region_name: Option<String>,
    pub data_count: i64,
}

/// RDA station summary (grouped over the daily table)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AgriStation {
    pub stn_cd: Option<String>,
    pub stn_name: Option<String>,
    pub data_count: i64,
    pub first_date: Option<Date>,
    pub last_date: Option<Date>,
}

/// RDA station summary for the 10-minute table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AgriRealtimeStation {
    pub province: Option<String>,
    pub stn_cd: Option<String>,
    pub stn_name: Option<String>,
    pub data_count: i64,
    pub first_datetime: Option<PrimitiveDateTime>,
    pub last_datetime: Option<PrimitiveDateTime>,
}

/// Raw single-pass aggregate over a station's daily records.
///
/// Unrounded; [`crate::db::stats`] applies the presentation rounding.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AggregateRow {
    pub data_count: i64,
    pub avg_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub total_rainfall: Option<f64>,
    pub avg_humidity: Option<f64>,
    pub avg_wind_speed: Option<f64>,
    pub total_sunshine: Option<f64>,
}

/// Station display name and full observation period, independent of
/// any requested date range
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct StationPeriod {
    pub name: Option<String>,
    pub first_date: Option<Date>,
    pub last_date: Option<Date>,
}

/// Raw per-station aggregate used by the comparison endpoint
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ComparisonRow {
    pub stn_nm: Option<String>,
    pub data_count: i64,
    pub avg_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub total_rainfall: Option<f64>,
    pub avg_humidity: Option<f64>,
}

/// Per-table record counts and coverage for the summary endpoint
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TableSummary {
    pub total_records: i64,
    pub first_date: Option<Date>,
    pub last_date: Option<Date>,
    pub station_count: i64,
}

/// Database-wide summary of both daily tables
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatsSummary {
    pub asos_daily: TableSummary,
    pub rda_daily: TableSummary,
}

/// Reported statistics period; echoes the requested dates when given,
/// otherwise the station's full first/last observation dates
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportPeriod {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// Rounded aggregate set reported by the statistics endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Statistics {
    pub data_count: i64,
    /// Mean temperature, 2 decimal places (°C)
    pub avg_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    /// Total precipitation, 2 decimal places (mm)
    pub total_rainfall: Option<f64>,
    /// Mean humidity, 1 decimal place (%)
    pub avg_humidity: Option<f64>,
    /// Mean wind speed, 2 decimal places (m/s)
    pub avg_wind_speed: Option<f64>,
    /// Total sunshine, 1 decimal place
    pub total_sunshine: Option<f64>,
}

/// Statistics report for one ASOS station
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AsosStationStats {
    pub stn_id: i32,
    pub stn_nm: Option<String>,
    pub period: ReportPeriod,
    pub statistics: Statistics,
}

/// Statistics report for one RDA station
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AgriStationStats {
    pub stn_cd: String,
    pub stn_name: Option<String>,
    pub period: ReportPeriod,
    pub statistics: Statistics,
}

/// One station's entry in the comparison report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ComparisonEntry {
    pub stn_id: i32,
    pub stn_nm: Option<String>,
    pub data_count: i64,
    pub avg_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub total_rainfall: Option<f64>,
    pub avg_humidity: Option<f64>,
}

/// Multi-station comparison report; stations with no data in range are
/// omitted entirely
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComparisonReport {
    pub period: ReportPeriod,
    pub stations: Vec<ComparisonEntry>,
}
