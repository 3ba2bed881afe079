//! List and pagination behavior over the HTTP surface: envelope
//! passthrough, limit ceilings and the empty-result 404 rules.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use hyper::Method;
use time::macros::date;
use tower::ServiceExt;

use agweather_api::{Page, Paginated};

use crate::helpers::{sample_asos_row, spawn_app, MockWeatherStore};

async fn get(test_app: &crate::helpers::TestApp, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = test_app.app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn range_endpoint_passes_envelope_through() {
    let mut store = MockWeatherStore::new();
    store
        .expect_asos_range()
        .withf(|range, stn_id, page| {
            range.start == date!(2023 - 06 - 01)
                && range.end == date!(2023 - 06 - 30)
                && stn_id.is_none()
                && *page == Page { offset: 0, limit: 20 }
        })
        .times(1)
        .returning(|_, _, page| {
            Ok(Paginated {
                total: 42,
                offset: page.offset,
                limit: page.limit,
                data: vec![sample_asos_row(108, date!(2023 - 06 - 01))],
            })
        });

    let test_app = spawn_app(store);
    let (status, json) = get(
        &test_app,
        "/api/kma/asos/range?start_date=2023-06-01&end_date=2023-06-30",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 42);
    assert_eq!(json["offset"], 0);
    assert_eq!(json["limit"], 20);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["stn_id"], 108);
}

#[tokio::test]
async fn inverted_range_never_reaches_the_store() {
    let mut store = MockWeatherStore::new();
    store.expect_asos_range().times(0);

    let test_app = spawn_app(store);
    let (status, json) = get(
        &test_app,
        "/api/kma/asos/range?start_date=2023-06-30&end_date=2023-06-01",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"].as_str().unwrap().contains("start date"));
}

#[tokio::test]
async fn interactive_limit_ceiling_is_enforced() {
    let mut store = MockWeatherStore::new();
    store.expect_asos_latest().times(0);

    let test_app = spawn_app(store);
    let (status, json) = get(&test_app, "/api/kma/asos/latest?limit=101").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"].as_str().unwrap().contains("limit"));
}

#[tokio::test]
async fn bulk_range_accepts_larger_limits() {
    let mut store = MockWeatherStore::new();
    store
        .expect_asos_range()
        .withf(|_, _, page| page.limit == 5000 && page.offset == 40)
        .times(1)
        .returning(|_, _, page| {
            Ok(Paginated {
                total: 12_000,
                offset: page.offset,
                limit: page.limit,
                data: Vec::new(),
            })
        });

    let test_app = spawn_app(store);
    let (status, json) = get(
        &test_app,
        "/api/kma/asos/range?start_date=2023-01-01&end_date=2023-12-31&offset=40&limit=5000",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 12_000);
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn malformed_date_is_rejected() {
    let mut store = MockWeatherStore::new();
    store.expect_asos_by_date().times(0);

    let test_app = spawn_app(store);
    let (status, json) = get(&test_app, "/api/kma/asos/date/2023-13-99").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"].as_str().unwrap().contains("invalid date"));
}

#[tokio::test]
async fn empty_date_lookup_is_404() {
    let mut store = MockWeatherStore::new();
    store
        .expect_asos_by_date()
        .times(1)
        .returning(|_, _| Ok(Vec::new()));

    let test_app = spawn_app(store);
    let (status, json) = get(&test_app, "/api/kma/asos/date/2023-06-15").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["detail"].as_str().unwrap().contains("2023-06-15"));
}

#[tokio::test]
async fn empty_monthly_year_is_404() {
    let mut store = MockWeatherStore::new();
    store
        .expect_agri_monthly_by_year()
        .withf(|year, stn_cd| *year == 1999 && stn_cd.is_none())
        .times(1)
        .returning(|_, _| Ok(Vec::new()));

    let test_app = spawn_app(store);
    let (status, json) = get(&test_app, "/api/rda/weather/monthly/year/1999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["detail"].as_str().unwrap().contains("1999"));
}

#[tokio::test]
async fn station_scoped_page_with_no_rows_is_404() {
    let mut store = MockWeatherStore::new();
    store
        .expect_agri_minutely_by_station()
        .withf(|stn_cd, _, _| stn_cd == "A999")
        .times(1)
        .returning(|_, _, page| {
            Ok(Paginated {
                total: 0,
                offset: page.offset,
                limit: page.limit,
                data: Vec::new(),
            })
        });

    let test_app = spawn_app(store);
    let (status, json) = get(&test_app, "/api/rda/weather/realtime/station/A999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["detail"].as_str().unwrap().contains("A999"));
}

#[tokio::test]
async fn store_outage_maps_to_503_with_generic_detail() {
    let mut store = MockWeatherStore::new();
    store
        .expect_asos_latest()
        .times(1)
        .returning(|_, _| Err(agweather_api::DbError::Query(sqlx::Error::PoolTimedOut)));

    let test_app = spawn_app(store);
    let (status, json) = get(&test_app, "/api/kma/asos/latest").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["detail"], "service temporarily unavailable");
}
