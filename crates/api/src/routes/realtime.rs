//! KMA very-short-range ("realtime") observation endpoints, including
//! the pivoted wide view.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::Error;
use crate::models::{RealtimeObservation, RealtimePivot, RealtimeRegion};
use crate::pagination::Paginated;
use crate::params::parse_date;
use crate::AppState;

#[derive(Clone, Deserialize, IntoParams)]
pub struct RealtimeLatestParams {
    /// Restrict to one region
    pub region_name: Option<String>,
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/kma/realtime/latest",
    params(RealtimeLatestParams),
    responses(
        (status = OK, description = "Most recent narrow observation rows, newest first", body = Vec<RealtimeObservation>),
        (status = BAD_REQUEST, description = "Limit out of range")
    ))]
pub async fn realtime_latest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RealtimeLatestParams>,
) -> Result<Json<Vec<RealtimeObservation>>, Error> {
    let limit = state.limits.latest(params.limit, 50)?;
    Ok(Json(
        state.store.realtime_latest(params.region_name, limit).await?,
    ))
}

#[derive(Clone, Deserialize, IntoParams)]
pub struct RealtimePivotParams {
    /// Restrict to one province / metropolitan city
    pub sido: Option<String>,
    pub region_name: Option<String>,
    /// Number of (region, issue time) groups, up to the wide-view
    /// ceiling
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/kma/realtime/latest/pivot",
    params(RealtimePivotParams),
    responses(
        (status = OK, description = "Most recent observations, one wide row per region and issue time", body = Vec<RealtimePivot>),
        (status = BAD_REQUEST, description = "Limit out of range")
    ))]
pub async fn realtime_latest_pivot(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RealtimePivotParams>,
) -> Result<Json<Vec<RealtimePivot>>, Error> {
    let limit = state.limits.wide_latest(params.limit, 20)?;
    Ok(Json(
        state
            .store
            .realtime_latest_pivot(params.sido, params.region_name, limit)
            .await?,
    ))
}

#[derive(Clone, Deserialize, IntoParams)]
pub struct RealtimeRegionParams {
    /// Restrict to one issue date (YYYY-MM-DD)
    pub target_date: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/kma/realtime/region/{region_name}",
    params(
        ("region_name" = String, Path, description = "Region name"),
        RealtimeRegionParams,
    ),
    responses(
        (status = OK, description = "Paginated observations for the region, newest first", body = Paginated<RealtimeObservation>),
        (status = BAD_REQUEST, description = "Malformed date or limit out of range"),
        (status = NOT_FOUND, description = "No data for the region")
    ))]
pub async fn realtime_by_region(
    State(state): State<Arc<AppState>>,
    Path(region_name): Path<String>,
    Query(params): Query<RealtimeRegionParams>,
) -> Result<Json<Paginated<RealtimeObservation>>, Error> {
    let date = params.target_date.as_deref().map(parse_date).transpose()?;
    let page = state.limits.page(params.offset, params.limit)?;
    let result = state
        .store
        .realtime_by_region(region_name.clone(), date, page)
        .await?;
    if result.total == 0 {
        return Err(Error::NotFound(format!(
            "no data for region '{}'",
            region_name
        )));
    }
    Ok(Json(result))
}

#[derive(Clone, Deserialize, IntoParams)]
pub struct RealtimeRegionsParams {
    /// Filter by province / metropolitan city
    pub sido: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/kma/realtime/regions",
    params(RealtimeRegionsParams),
    responses(
        (status = OK, description = "Known regions with grid coordinates and coverage", body = Vec<RealtimeRegion>)
    ))]
pub async fn realtime_regions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RealtimeRegionsParams>,
) -> Result<Json<Vec<RealtimeRegion>>, Error> {
    Ok(Json(state.store.realtime_regions(params.sido).await?))
}

#[utoipa::path(
    get,
    path = "/api/kma/realtime/sidos",
    responses(
        (status = OK, description = "Distinct provinces with realtime data", body = Vec<String>)
    ))]
pub async fn realtime_sidos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, Error> {
    Ok(Json(state.store.realtime_sidos().await?))
}
