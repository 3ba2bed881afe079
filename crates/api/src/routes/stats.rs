//! Aggregate statistics endpoints.
//!
//! Aggregation happens in single-pass SQL; these handlers compose the
//! report shapes and apply the 404 rule (zero matching records).

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::db::stats::{comparison_entry, report_period, statistics};
use crate::error::Error;
use crate::models::{
    AgriStationStats, AsosStationStats, ComparisonReport, ReportPeriod, StatsSummary,
};
use crate::params::{parse_station_ids, DateRange, OpenDateRange};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/stats/summary",
    responses(
        (status = OK, description = "Record counts and coverage of both daily tables", body = StatsSummary)
    ))]
pub async fn stats_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsSummary>, Error> {
    Ok(Json(state.store.stats_summary().await?))
}

#[derive(Clone, Deserialize, IntoParams)]
pub struct StationStatsParams {
    /// Start of the aggregation window (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// End of the aggregation window (YYYY-MM-DD)
    pub end_date: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/stats/kma/asos/station/{stn_id}",
    params(
        ("stn_id" = i32, Path, description = "ASOS station id"),
        StationStatsParams,
    ),
    responses(
        (status = OK, description = "Aggregated statistics for the station", body = AsosStationStats),
        (status = BAD_REQUEST, description = "Malformed or inverted window"),
        (status = NOT_FOUND, description = "No records for the station in the window")
    ))]
pub async fn asos_station_stats(
    State(state): State<Arc<AppState>>,
    Path(stn_id): Path<i32>,
    Query(params): Query<StationStatsParams>,
) -> Result<Json<AsosStationStats>, Error> {
    let range = OpenDateRange::parse(params.start_date.as_deref(), params.end_date.as_deref())?;
    let agg = state.store.asos_station_aggregates(stn_id, range).await?;
    if agg.data_count == 0 {
        return Err(Error::NotFound(format!("no data for station {}", stn_id)));
    }
    let period = state.store.asos_station_period(stn_id).await?;

    Ok(Json(AsosStationStats {
        stn_id,
        stn_nm: period.as_ref().and_then(|p| p.name.clone()),
        period: report_period(range, period.as_ref()),
        statistics: statistics(&agg),
    }))
}

#[utoipa::path(
    get,
    path = "/api/stats/rda/station/{stn_cd}",
    params(
        ("stn_cd" = String, Path, description = "RDA station code"),
        StationStatsParams,
    ),
    responses(
        (status = OK, description = "Aggregated statistics for the station", body = AgriStationStats),
        (status = BAD_REQUEST, description = "Malformed or inverted window"),
        (status = NOT_FOUND, description = "No records for the station in the window")
    ))]
pub async fn agri_station_stats(
    State(state): State<Arc<AppState>>,
    Path(stn_cd): Path<String>,
    Query(params): Query<StationStatsParams>,
) -> Result<Json<AgriStationStats>, Error> {
    let range = OpenDateRange::parse(params.start_date.as_deref(), params.end_date.as_deref())?;
    let agg = state
        .store
        .agri_station_aggregates(stn_cd.clone(), range)
        .await?;
    if agg.data_count == 0 {
        return Err(Error::NotFound(format!("no data for station '{}'", stn_cd)));
    }
    let period = state.store.agri_station_period(stn_cd.clone()).await?;

    Ok(Json(AgriStationStats {
        stn_cd,
        stn_name: period.as_ref().and_then(|p| p.name.clone()),
        period: report_period(range, period.as_ref()),
        statistics: statistics(&agg),
    }))
}

#[derive(Clone, Deserialize, IntoParams)]
pub struct ComparisonParams {
    /// Comma-separated ASOS station ids (e.g. 108,133,159), at most 10
    pub stn_ids: String,
    /// Start of the comparison window (YYYY-MM-DD)
    pub start_date: String,
    /// End of the comparison window (YYYY-MM-DD)
    pub end_date: String,
}

#[utoipa::path(
    get,
    path = "/api/stats/comparison",
    params(ComparisonParams),
    responses(
        (status = OK, description = "Side-by-side aggregates; stations without data in the window are omitted", body = ComparisonReport),
        (status = BAD_REQUEST, description = "Malformed id list or window")
    ))]
pub async fn comparison_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ComparisonParams>,
) -> Result<Json<ComparisonReport>, Error> {
    let stn_ids = parse_station_ids(&params.stn_ids)?;
    let range = DateRange::parse(&params.start_date, &params.end_date)?;

    // Requested order is preserved; stations that match nothing are
    // dropped rather than reported as empty.
    let mut stations = Vec::with_capacity(stn_ids.len());
    for stn_id in stn_ids {
        if let Some(row) = state.store.comparison_aggregates(stn_id, range).await? {
            if row.data_count > 0 {
                stations.push(comparison_entry(stn_id, row));
            }
        }
    }

    Ok(Json(ComparisonReport {
        period: ReportPeriod {
            start_date: Some(range.start),
            end_date: Some(range.end),
        },
        stations,
    }))
}
