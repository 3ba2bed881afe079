//! KMA ASOS daily-summary endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::Error;
use crate::models::{AsosDaily, AsosStation};
use crate::pagination::Paginated;
use crate::params::{parse_date, DateRange};
use crate::AppState;

#[derive(Clone, Deserialize, IntoParams)]
pub struct AsosLatestParams {
    /// Restrict to one station
    pub stn_id: Option<i32>,
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/kma/asos/latest",
    params(AsosLatestParams),
    responses(
        (status = OK, description = "Most recent daily summaries, newest first", body = Vec<AsosDaily>),
        (status = BAD_REQUEST, description = "Limit out of range")
    ))]
pub async fn asos_latest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AsosLatestParams>,
) -> Result<Json<Vec<AsosDaily>>, Error> {
    let limit = state.limits.latest(params.limit, 20)?;
    Ok(Json(state.store.asos_latest(params.stn_id, limit).await?))
}

#[derive(Clone, Deserialize, IntoParams)]
pub struct AsosByDateParams {
    pub stn_id: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/kma/asos/date/{target_date}",
    params(
        ("target_date" = String, Path, description = "Observation date (YYYY-MM-DD)"),
        AsosByDateParams,
    ),
    responses(
        (status = OK, description = "All summaries observed on the date", body = Vec<AsosDaily>),
        (status = BAD_REQUEST, description = "Malformed date"),
        (status = NOT_FOUND, description = "No data on that date")
    ))]
pub async fn asos_by_date(
    State(state): State<Arc<AppState>>,
    Path(target_date): Path<String>,
    Query(params): Query<AsosByDateParams>,
) -> Result<Json<Vec<AsosDaily>>, Error> {
    let date = parse_date(&target_date)?;
    let rows = state.store.asos_by_date(date, params.stn_id).await?;
    if rows.is_empty() {
        return Err(Error::NotFound(format!("no data for date {}", target_date)));
    }
    Ok(Json(rows))
}

#[derive(Clone, Deserialize, IntoParams)]
pub struct AsosRangeParams {
    /// Start of the range (YYYY-MM-DD)
    pub start_date: String,
    /// End of the range (YYYY-MM-DD)
    pub end_date: String,
    pub stn_id: Option<i32>,
    pub offset: Option<u32>,
    /// Up to the bulk-export ceiling
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/kma/asos/range",
    params(AsosRangeParams),
    responses(
        (status = OK, description = "Paginated summaries within the range, oldest first", body = Paginated<AsosDaily>),
        (status = BAD_REQUEST, description = "Malformed or inverted range, or limit out of range")
    ))]
pub async fn asos_range(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AsosRangeParams>,
) -> Result<Json<Paginated<AsosDaily>>, Error> {
    let range = DateRange::parse(&params.start_date, &params.end_date)?;
    let page = state.limits.bulk_page(params.offset, params.limit)?;
    Ok(Json(
        state.store.asos_range(range, params.stn_id, page).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/kma/asos/stations",
    responses(
        (status = OK, description = "Every station with record count and coverage", body = Vec<AsosStation>)
    ))]
pub async fn asos_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AsosStation>>, Error> {
    Ok(Json(state.store.asos_stations().await?))
}
