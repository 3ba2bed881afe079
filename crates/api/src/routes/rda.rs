//! RDA agri-weather endpoints: 10-minute, daily and monthly data.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::Error;
use crate::models::{AgriDaily, AgriMinutely, AgriMonthly, AgriRealtimeStation, AgriStation};
use crate::pagination::Paginated;
use crate::params::{parse_date, DateRange, DateTimeRange, MonthRange};
use crate::AppState;

#[derive(Clone, Deserialize, IntoParams)]
pub struct MinutelyLatestParams {
    /// Restrict to one station
    pub stn_cd: Option<String>,
    /// Up to the wide-view ceiling
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/rda/weather/realtime/latest",
    params(MinutelyLatestParams),
    responses(
        (status = OK, description = "Most recent 10-minute records, newest first", body = Vec<AgriMinutely>),
        (status = BAD_REQUEST, description = "Limit out of range")
    ))]
pub async fn agri_minutely_latest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MinutelyLatestParams>,
) -> Result<Json<Vec<AgriMinutely>>, Error> {
    let limit = state.limits.wide_latest(params.limit, 20)?;
    Ok(Json(
        state.store.agri_minutely_latest(params.stn_cd, limit).await?,
    ))
}

#[derive(Clone, Deserialize, IntoParams)]
pub struct MinutelyStationParams {
    /// Start of the window (YYYY-MM-DDTHH:MM:SS)
    pub start_datetime: Option<String>,
    /// End of the window (YYYY-MM-DDTHH:MM:SS)
    pub end_datetime: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/rda/weather/realtime/station/{stn_cd}",
    params(
        ("stn_cd" = String, Path, description = "Station code"),
        MinutelyStationParams,
    ),
    responses(
        (status = OK, description = "Paginated 10-minute records for the station, newest first", body = Paginated<AgriMinutely>),
        (status = BAD_REQUEST, description = "Malformed window or limit out of range"),
        (status = NOT_FOUND, description = "No data for the station")
    ))]
pub async fn agri_minutely_by_station(
    State(state): State<Arc<AppState>>,
    Path(stn_cd): Path<String>,
    Query(params): Query<MinutelyStationParams>,
) -> Result<Json<Paginated<AgriMinutely>>, Error> {
    let range = DateTimeRange::parse(
        params.start_datetime.as_deref(),
        params.end_datetime.as_deref(),
    )?;
    let page = state.limits.page(params.offset, params.limit)?;
    let result = state
        .store
        .agri_minutely_by_station(stn_cd.clone(), range, page)
        .await?;
    if result.total == 0 {
        return Err(Error::NotFound(format!(
            "no data for station '{}'",
            stn_cd
        )));
    }
    Ok(Json(result))
}

#[derive(Clone, Deserialize, IntoParams)]
pub struct DailyLatestParams {
    pub stn_cd: Option<String>,
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/rda/weather/daily/latest",
    params(DailyLatestParams),
    responses(
        (status = OK, description = "Most recent daily records, newest first", body = Vec<AgriDaily>),
        (status = BAD_REQUEST, description = "Limit out of range")
    ))]
pub async fn agri_daily_latest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DailyLatestParams>,
) -> Result<Json<Vec<AgriDaily>>, Error> {
    let limit = state.limits.latest(params.limit, 20)?;
    Ok(Json(
        state.store.agri_daily_latest(params.stn_cd, limit).await?,
    ))
}

#[derive(Clone, Deserialize, IntoParams)]
pub struct DailyByDateParams {
    pub stn_cd: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/rda/weather/daily/date/{target_date}",
    params(
        ("target_date" = String, Path, description = "Observation date (YYYY-MM-DD)"),
        DailyByDateParams,
    ),
    responses(
        (status = OK, description = "All daily records observed on the date", body = Vec<AgriDaily>),
        (status = BAD_REQUEST, description = "Malformed date"),
        (status = NOT_FOUND, description = "No data on that date")
    ))]
pub async fn agri_daily_by_date(
    State(state): State<Arc<AppState>>,
    Path(target_date): Path<String>,
    Query(params): Query<DailyByDateParams>,
) -> Result<Json<Vec<AgriDaily>>, Error> {
    let date = parse_date(&target_date)?;
    let rows = state.store.agri_daily_by_date(date, params.stn_cd).await?;
    if rows.is_empty() {
        return Err(Error::NotFound(format!("no data for date {}", target_date)));
    }
    Ok(Json(rows))
}

#[derive(Clone, Deserialize, IntoParams)]
pub struct DailyRangeParams {
    /// Start of the range (YYYY-MM-DD)
    pub start_date: String,
    /// End of the range (YYYY-MM-DD)
    pub end_date: String,
    pub stn_cd: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/rda/weather/daily/range",
    params(DailyRangeParams),
    responses(
        (status = OK, description = "Paginated daily records within the range, oldest first", body = Paginated<AgriDaily>),
        (status = BAD_REQUEST, description = "Malformed or inverted range, or limit out of range")
    ))]
pub async fn agri_daily_range(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DailyRangeParams>,
) -> Result<Json<Paginated<AgriDaily>>, Error> {
    let range = DateRange::parse(&params.start_date, &params.end_date)?;
    let page = state.limits.page(params.offset, params.limit)?;
    Ok(Json(
        state
            .store
            .agri_daily_range(range, params.stn_cd, page)
            .await?,
    ))
}

#[derive(Clone, Deserialize, IntoParams)]
pub struct MonthlyLatestParams {
    pub stn_cd: Option<String>,
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/rda/weather/monthly/latest",
    params(MonthlyLatestParams),
    responses(
        (status = OK, description = "Most recent monthly records, newest first", body = Vec<AgriMonthly>),
        (status = BAD_REQUEST, description = "Limit out of range")
    ))]
pub async fn agri_monthly_latest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthlyLatestParams>,
) -> Result<Json<Vec<AgriMonthly>>, Error> {
    let limit = state.limits.latest(params.limit, 20)?;
    Ok(Json(
        state
            .store
            .agri_monthly_latest(params.stn_cd, limit)
            .await?,
    ))
}

#[derive(Clone, Deserialize, IntoParams)]
pub struct MonthlyByYearParams {
    pub stn_cd: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/rda/weather/monthly/year/{year}",
    params(
        ("year" = i32, Path, description = "Calendar year"),
        MonthlyByYearParams,
    ),
    responses(
        (status = OK, description = "All monthly records of the year, oldest first", body = Vec<AgriMonthly>),
        (status = NOT_FOUND, description = "No data for that year")
    ))]
pub async fn agri_monthly_by_year(
    State(state): State<Arc<AppState>>,
    Path(year): Path<i32>,
    Query(params): Query<MonthlyByYearParams>,
) -> Result<Json<Vec<AgriMonthly>>, Error> {
    let rows = state.store.agri_monthly_by_year(year, params.stn_cd).await?;
    if rows.is_empty() {
        return Err(Error::NotFound(format!("no data for year {}", year)));
    }
    Ok(Json(rows))
}

#[derive(Clone, Deserialize, IntoParams)]
pub struct MonthlyRangeParams {
    /// Start of the range (YYYY-MM)
    pub start_month: String,
    /// End of the range (YYYY-MM)
    pub end_month: String,
    pub stn_cd: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/rda/weather/monthly/range",
    params(MonthlyRangeParams),
    responses(
        (status = OK, description = "Paginated monthly records within the range, oldest first", body = Paginated<AgriMonthly>),
        (status = BAD_REQUEST, description = "Malformed or inverted range, or limit out of range")
    ))]
pub async fn agri_monthly_range(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthlyRangeParams>,
) -> Result<Json<Paginated<AgriMonthly>>, Error> {
    let range = MonthRange::parse(&params.start_month, &params.end_month)?;
    let page = state.limits.page(params.offset, params.limit)?;
    Ok(Json(
        state
            .store
            .agri_monthly_range(range, params.stn_cd, page)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/rda/weather/stations",
    responses(
        (status = OK, description = "Every station with record count and coverage over the daily table", body = Vec<AgriStation>)
    ))]
pub async fn agri_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AgriStation>>, Error> {
    Ok(Json(state.store.agri_stations().await?))
}

#[derive(Clone, Deserialize, IntoParams)]
pub struct MinutelyStationsParams {
    /// Filter by province / metropolitan city
    pub province: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/rda/weather/realtime/stations",
    params(MinutelyStationsParams),
    responses(
        (status = OK, description = "Every station reporting 10-minute data, with coverage", body = Vec<AgriRealtimeStation>)
    ))]
pub async fn agri_minutely_stations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MinutelyStationsParams>,
) -> Result<Json<Vec<AgriRealtimeStation>>, Error> {
    Ok(Json(
        state.store.agri_minutely_stations(params.province).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/rda/weather/realtime/provinces",
    responses(
        (status = OK, description = "Distinct provinces with 10-minute data", body = Vec<String>)
    ))]
pub async fn agri_provinces(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, Error> {
    Ok(Json(state.store.agri_provinces().await?))
}
