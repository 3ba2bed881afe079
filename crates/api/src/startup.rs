use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::info;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::db::{Db, WeatherStore};
use crate::error::ErrorBody;
use crate::models;
use crate::pagination::{PageLimits, Paginated};
use crate::routes;
use crate::utils::Settings;

#[derive(Clone)]
pub struct AppState {
    pub limits: PageLimits,
    pub cors_origins: Vec<String>,
    pub store: Arc<dyn WeatherStore>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::meta::root,
        routes::meta::health,
        routes::asos::asos_latest,
        routes::asos::asos_by_date,
        routes::asos::asos_range,
        routes::asos::asos_stations,
        routes::realtime::realtime_latest,
        routes::realtime::realtime_latest_pivot,
        routes::realtime::realtime_by_region,
        routes::realtime::realtime_regions,
        routes::realtime::realtime_sidos,
        routes::forecast::short_forecast_latest,
        routes::forecast::short_forecast_by_region,
        routes::forecast::mid_forecast_latest,
        routes::forecast::mid_forecast_by_region,
        routes::forecast::mid_forecast_regions,
        routes::rda::agri_minutely_latest,
        routes::rda::agri_minutely_by_station,
        routes::rda::agri_daily_latest,
        routes::rda::agri_daily_by_date,
        routes::rda::agri_daily_range,
        routes::rda::agri_monthly_latest,
        routes::rda::agri_monthly_by_year,
        routes::rda::agri_monthly_range,
        routes::rda::agri_stations,
        routes::rda::agri_minutely_stations,
        routes::rda::agri_provinces,
        routes::stats::stats_summary,
        routes::stats::asos_station_stats,
        routes::stats::agri_station_stats,
        routes::stats::comparison_stats,
    ),
    components(
        schemas(
            routes::meta::ServiceInfo,
            routes::meta::HealthStatus,
            ErrorBody,
            models::AsosDaily,
            models::AsosStation,
            models::RealtimeObservation,
            models::RealtimePivot,
            models::RealtimeRegion,
            models::ShortForecast,
            models::MidForecast,
            models::MidForecastRegion,
            models::AgriMinutely,
            models::AgriDaily,
            models::AgriMonthly,
            models::AgriStation,
            models::AgriRealtimeStation,
            models::TableSummary,
            models::StatsSummary,
            models::ReportPeriod,
            models::Statistics,
            models::AsosStationStats,
            models::AgriStationStats,
            models::ComparisonEntry,
            models::ComparisonReport,
            Paginated<models::AsosDaily>,
            Paginated<models::RealtimeObservation>,
            Paginated<models::ShortForecast>,
            Paginated<models::MidForecast>,
            Paginated<models::AgriMinutely>,
            Paginated<models::AgriDaily>,
            Paginated<models::AgriMonthly>,
        )
    ),
    tags(
        (name = "agweather api", description = "read-only API over KMA and RDA agricultural weather observations, forecasts and statistics")
    )
)]
struct ApiDoc;

pub async fn build_app_state(settings: &Settings) -> Result<AppState, anyhow::Error> {
    let db = Db::connect(settings)
        .await
        .map_err(|e| anyhow!("error connecting to postgres: {}", e))?;

    Ok(AppState {
        limits: settings.limits,
        cors_origins: settings.cors_origins.clone(),
        store: Arc::new(db),
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE]);
    let cors = if app_state.cors_origins.iter().any(|origin| origin == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = app_state
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    };

    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        // KMA ASOS daily summaries
        .route("/api/kma/asos/latest", get(routes::asos_latest))
        .route("/api/kma/asos/date/{target_date}", get(routes::asos_by_date))
        .route("/api/kma/asos/range", get(routes::asos_range))
        .route("/api/kma/asos/stations", get(routes::asos_stations))
        // KMA very-short-range observations
        .route("/api/kma/realtime/latest", get(routes::realtime_latest))
        .route(
            "/api/kma/realtime/latest/pivot",
            get(routes::realtime_latest_pivot),
        )
        .route(
            "/api/kma/realtime/region/{region_name}",
            get(routes::realtime_by_region),
        )
        .route("/api/kma/realtime/regions", get(routes::realtime_regions))
        .route("/api/kma/realtime/sidos", get(routes::realtime_sidos))
        // KMA forecasts
        .route(
            "/api/kma/forecast/short/latest",
            get(routes::short_forecast_latest),
        )
        .route(
            "/api/kma/forecast/short/region/{region_name}",
            get(routes::short_forecast_by_region),
        )
        .route(
            "/api/kma/forecast/mid/latest",
            get(routes::mid_forecast_latest),
        )
        .route(
            "/api/kma/forecast/mid/region/{region_name}",
            get(routes::mid_forecast_by_region),
        )
        .route(
            "/api/kma/forecast/mid/regions",
            get(routes::mid_forecast_regions),
        )
        // RDA agri-weather
        .route(
            "/api/rda/weather/realtime/latest",
            get(routes::agri_minutely_latest),
        )
        .route(
            "/api/rda/weather/realtime/station/{stn_cd}",
            get(routes::agri_minutely_by_station),
        )
        .route(
            "/api/rda/weather/realtime/stations",
            get(routes::agri_minutely_stations),
        )
        .route(
            "/api/rda/weather/realtime/provinces",
            get(routes::agri_provinces),
        )
        .route("/api/rda/weather/daily/latest", get(routes::agri_daily_latest))
        .route(
            "/api/rda/weather/daily/date/{target_date}",
            get(routes::agri_daily_by_date),
        )
        .route("/api/rda/weather/daily/range", get(routes::agri_daily_range))
        .route(
            "/api/rda/weather/monthly/latest",
            get(routes::agri_monthly_latest),
        )
        .route(
            "/api/rda/weather/monthly/year/{year}",
            get(routes::agri_monthly_by_year),
        )
        .route(
            "/api/rda/weather/monthly/range",
            get(routes::agri_monthly_range),
        )
        .route("/api/rda/weather/stations", get(routes::agri_stations))
        // Statistics
        .route("/api/stats/summary", get(routes::stats_summary))
        .route(
            "/api/stats/kma/asos/station/{stn_id}",
            get(routes::asos_station_stats),
        )
        .route("/api/stats/rda/station/{stn_cd}", get(routes::agri_station_stats))
        .route("/api/stats/comparison", get(routes::comparison_stats))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default();
    info!(target: "http_request","new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
