//! KMA short-term and mid-term forecast endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::Error;
use crate::models::{MidForecast, MidForecastRegion, ShortForecast};
use crate::pagination::Paginated;
use crate::params::parse_date;
use crate::AppState;

#[derive(Clone, Deserialize, IntoParams)]
pub struct ShortLatestParams {
    pub region_name: Option<String>,
    /// Category code (TMP, POP, SKY, ...)
    pub category: Option<String>,
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/kma/forecast/short/latest",
    params(ShortLatestParams),
    responses(
        (status = OK, description = "Most recently issued short-term forecast values", body = Vec<ShortForecast>),
        (status = BAD_REQUEST, description = "Limit out of range")
    ))]
pub async fn short_forecast_latest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ShortLatestParams>,
) -> Result<Json<Vec<ShortForecast>>, Error> {
    let limit = state.limits.latest(params.limit, 50)?;
    Ok(Json(
        state
            .store
            .short_forecast_latest(params.region_name, params.category, limit)
            .await?,
    ))
}

#[derive(Clone, Deserialize, IntoParams)]
pub struct ShortRegionParams {
    /// Restrict to one forecast target date (YYYY-MM-DD)
    pub fcst_date: Option<String>,
    pub category: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/kma/forecast/short/region/{region_name}",
    params(
        ("region_name" = String, Path, description = "Region name"),
        ShortRegionParams,
    ),
    responses(
        (status = OK, description = "Paginated short-term forecast values for the region", body = Paginated<ShortForecast>),
        (status = BAD_REQUEST, description = "Malformed date or limit out of range"),
        (status = NOT_FOUND, description = "No forecast data for the region")
    ))]
pub async fn short_forecast_by_region(
    State(state): State<Arc<AppState>>,
    Path(region_name): Path<String>,
    Query(params): Query<ShortRegionParams>,
) -> Result<Json<Paginated<ShortForecast>>, Error> {
    let fcst_date = params.fcst_date.as_deref().map(parse_date).transpose()?;
    let page = state.limits.page_with(params.offset, params.limit, 50)?;
    let result = state
        .store
        .short_forecast_by_region(region_name.clone(), fcst_date, params.category, page)
        .await?;
    if result.total == 0 {
        return Err(Error::NotFound(format!(
            "no forecast data for region '{}'",
            region_name
        )));
    }
    Ok(Json(result))
}

#[derive(Clone, Deserialize, IntoParams)]
pub struct MidLatestParams {
    pub region_name: Option<String>,
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/kma/forecast/mid/latest",
    params(MidLatestParams),
    responses(
        (status = OK, description = "Most recently issued mid-term forecasts", body = Vec<MidForecast>),
        (status = BAD_REQUEST, description = "Limit out of range")
    ))]
pub async fn mid_forecast_latest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MidLatestParams>,
) -> Result<Json<Vec<MidForecast>>, Error> {
    let limit = state.limits.latest(params.limit, 50)?;
    Ok(Json(
        state
            .store
            .mid_forecast_latest(params.region_name, limit)
            .await?,
    ))
}

#[derive(Clone, Deserialize, IntoParams)]
pub struct MidRegionParams {
    /// Restrict to one forecast target date (YYYY-MM-DD)
    pub forecast_date: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/kma/forecast/mid/region/{region_name}",
    params(
        ("region_name" = String, Path, description = "Region name"),
        MidRegionParams,
    ),
    responses(
        (status = OK, description = "Paginated mid-term forecasts for the region", body = Paginated<MidForecast>),
        (status = BAD_REQUEST, description = "Malformed date or limit out of range"),
        (status = NOT_FOUND, description = "No mid-term forecast data for the region")
    ))]
pub async fn mid_forecast_by_region(
    State(state): State<Arc<AppState>>,
    Path(region_name): Path<String>,
    Query(params): Query<MidRegionParams>,
) -> Result<Json<Paginated<MidForecast>>, Error> {
    let forecast_date = params
        .forecast_date
        .as_deref()
        .map(parse_date)
        .transpose()?;
    let page = state.limits.page_with(params.offset, params.limit, 50)?;
    let result = state
        .store
        .mid_forecast_by_region(region_name.clone(), forecast_date, page)
        .await?;
    if result.total == 0 {
        return Err(Error::NotFound(format!(
            "no mid-term forecast data for region '{}'",
            region_name
        )));
    }
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/api/kma/forecast/mid/regions",
    responses(
        (status = OK, description = "Known mid-term forecast zones", body = Vec<MidForecastRegion>)
    ))]
pub async fn mid_forecast_regions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MidForecastRegion>>, Error> {
    Ok(Json(state.store.mid_forecast_regions().await?))
}
