//! Statistics endpoints: rounding, reported period, the zero-count 404
//! and comparison composition.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use hyper::Method;
use time::macros::date;
use tower::ServiceExt;

use agweather_api::models::{AggregateRow, ComparisonRow, StationPeriod};

use crate::helpers::{spawn_app, MockWeatherStore};

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

fn three_day_aggregate() -> AggregateRow {
    // Daily temperatures 10.0, 15.0 and 20.0.
    AggregateRow {
        data_count: 3,
        avg_temp: Some(15.0),
        max_temp: Some(20.0),
        min_temp: Some(10.0),
        total_rainfall: Some(12.345),
        avg_humidity: Some(63.25),
        avg_wind_speed: Some(2.345),
        total_sunshine: Some(24.66),
    }
}

#[tokio::test]
async fn station_stats_rounds_and_reports_full_period() {
    let mut store = MockWeatherStore::new();
    store
        .expect_asos_station_aggregates()
        .withf(|stn_id, range| *stn_id == 108 && range.start.is_none() && range.end.is_none())
        .times(1)
        .returning(|_, _| Ok(three_day_aggregate()));
    store
        .expect_asos_station_period()
        .times(1)
        .returning(|_| {
            Ok(Some(StationPeriod {
                name: Some("Seoul".to_string()),
                first_date: Some(date!(2020 - 01 - 01)),
                last_date: Some(date!(2023 - 12 - 31)),
            }))
        });

    let test_app = spawn_app(store);
    let (status, json) = get(&test_app, "/api/stats/kma/asos/station/108").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["stn_id"], 108);
    assert_eq!(json["stn_nm"], "Seoul");
    assert_eq!(json["period"]["start_date"], "2020-01-01");
    assert_eq!(json["period"]["end_date"], "2023-12-31");

    let stats = &json["statistics"];
    assert_eq!(stats["data_count"], 3);
    assert_eq!(stats["avg_temp"], 15.0);
    assert_eq!(stats["max_temp"], 20.0);
    assert_eq!(stats["min_temp"], 10.0);
    // 2 decimals for rainfall and wind, 1 for humidity and sunshine.
    assert_eq!(stats["total_rainfall"], 12.35);
    assert_eq!(stats["avg_wind_speed"], 2.35);
    assert_eq!(stats["avg_humidity"], 63.3);
    assert_eq!(stats["total_sunshine"], 24.7);
}

#[tokio::test]
async fn explicit_window_is_echoed_in_the_period() {
    let mut store = MockWeatherStore::new();
    store
        .expect_asos_station_aggregates()
        .withf(|_, range| {
            range.start == Some(date!(2023 - 06 - 01)) && range.end == Some(date!(2023 - 06 - 30))
        })
        .times(1)
        .returning(|_, _| Ok(three_day_aggregate()));
    store
        .expect_asos_station_period()
        .times(1)
        .returning(|_| {
            Ok(Some(StationPeriod {
                name: Some("Seoul".to_string()),
                first_date: Some(date!(2020 - 01 - 01)),
                last_date: Some(date!(2023 - 12 - 31)),
            }))
        });

    let test_app = spawn_app(store);
    let (status, json) = get(
        &test_app,
        "/api/stats/kma/asos/station/108?start_date=2023-06-01&end_date=2023-06-30",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["period"]["start_date"], "2023-06-01");
    assert_eq!(json["period"]["end_date"], "2023-06-30");
}

#[tokio::test]
async fn zero_count_station_is_404_without_period_lookup() {
    let mut store = MockWeatherStore::new();
    store
        .expect_asos_station_aggregates()
        .times(1)
        .returning(|_, _| {
            Ok(AggregateRow {
                data_count: 0,
                avg_temp: None,
                max_temp: None,
                min_temp: None,
                total_rainfall: None,
                avg_humidity: None,
                avg_wind_speed: None,
                total_sunshine: None,
            })
        });
    store.expect_asos_station_period().times(0);

    let test_app = spawn_app(store);
    let (status, json) = get(&test_app, "/api/stats/kma/asos/station/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["detail"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn comparison_preserves_order_and_omits_empty_stations() {
    let mut store = MockWeatherStore::new();
    store
        .expect_comparison_aggregates()
        .times(3)
        .returning(|stn_id, _| {
            // 999 has no rows in the window.
            if stn_id == 999 {
                return Ok(None);
            }
            Ok(Some(ComparisonRow {
                stn_nm: Some(format!("station-{}", stn_id)),
                data_count: 30,
                avg_temp: Some(14.567),
                max_temp: Some(28.1),
                min_temp: Some(2.4),
                total_rainfall: Some(88.123),
                avg_humidity: Some(61.27),
            }))
        });

    let test_app = spawn_app(store);
    let (status, json) = get(
        &test_app,
        "/api/stats/comparison?stn_ids=108,133,999&start_date=2023-06-01&end_date=2023-06-30",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["period"]["start_date"], "2023-06-01");
    assert_eq!(json["period"]["end_date"], "2023-06-30");

    let stations = json["stations"].as_array().unwrap();
    assert_eq!(stations.len(), 2);
    assert_eq!(stations[0]["stn_id"], 108);
    assert_eq!(stations[1]["stn_id"], 133);
    assert_eq!(stations[0]["avg_temp"], 14.57);
    assert_eq!(stations[0]["avg_humidity"], 61.3);
}

#[tokio::test]
async fn comparison_rejects_too_many_stations() {
    let mut store = MockWeatherStore::new();
    store.expect_comparison_aggregates().times(0);

    let test_app = spawn_app(store);
    let ids = (1..=11).map(|n| n.to_string()).collect::<Vec<_>>().join(",");
    let (status, json) = get(
        &test_app,
        &format!(
            "/api/stats/comparison?stn_ids={}&start_date=2023-06-01&end_date=2023-06-30",
            ids
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"].as_str().unwrap().contains("10"));
}

#[tokio::test]
async fn comparison_rejects_non_numeric_ids() {
    let mut store = MockWeatherStore::new();
    store.expect_comparison_aggregates().times(0);

    let test_app = spawn_app(store);
    let (status, _) = get(
        &test_app,
        "/api/stats/comparison?stn_ids=108,abc&start_date=2023-06-01&end_date=2023-06-30",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
