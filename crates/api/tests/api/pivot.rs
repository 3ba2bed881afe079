//! The wide realtime view over HTTP: fixed category columns and the
//! region-scoped 404 rule.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use hyper::Method;
use time::macros::date;
use tower::ServiceExt;

use agweather_api::models::RealtimePivot;
use agweather_api::Paginated;

use crate::helpers::{spawn_app, MockWeatherStore};

fn wide_row(region: &str) -> RealtimePivot {
    RealtimePivot {
        sido: Some("Gyeonggi".to_string()),
        region_name: region.to_string(),
        base_date: date!(2023 - 06 - 15),
        base_time: "1400".to_string(),
        t1h: Some(24.5),
        rn1: None,
        uuu: Some(1.2),
        vvv: Some(-0.4),
        reh: Some(61.0),
        pty: Some(0.0),
        vec: Some(210.0),
        wsd: Some(2.3),
    }
}

#[tokio::test]
async fn pivot_rows_expose_every_category_column() {
    let mut store = MockWeatherStore::new();
    store
        .expect_realtime_latest_pivot()
        .withf(|sido, region, limit| sido.is_none() && region.is_none() && *limit == 20)
        .times(1)
        .returning(|_, _, _| Ok(vec![wide_row("Suwon")]));

    let test_app = spawn_app(store);
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/kma/realtime/latest/pivot")
        .body(Body::empty())
        .unwrap();

    let response = test_app.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let row = &json[0];

    for category in ["T1H", "RN1", "UUU", "VVV", "REH", "PTY", "VEC", "WSD"] {
        assert!(
            row.get(category).is_some(),
            "column {} missing from pivot row",
            category
        );
    }
    assert_eq!(row["T1H"], 24.5);
    // A category with no matching narrow row is null, never omitted.
    assert_eq!(row["RN1"], serde_json::Value::Null);
    assert_eq!(row["region_name"], "Suwon");
}

#[tokio::test]
async fn pivot_filters_are_forwarded() {
    let mut store = MockWeatherStore::new();
    store
        .expect_realtime_latest_pivot()
        .withf(|sido, region, limit| {
            sido.as_deref() == Some("Gyeonggi")
                && region.as_deref() == Some("Suwon")
                && *limit == 100
        })
        .times(1)
        .returning(|_, _, _| Ok(vec![wide_row("Suwon")]));

    let test_app = spawn_app(store);
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/kma/realtime/latest/pivot?sido=Gyeonggi&region_name=Suwon&limit=100")
        .body(Body::empty())
        .unwrap();

    let response = test_app.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn pivot_limit_uses_the_wide_ceiling() {
    let mut store = MockWeatherStore::new();
    store.expect_realtime_latest_pivot().times(0);

    let test_app = spawn_app(store);
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/kma/realtime/latest/pivot?limit=501")
        .body(Body::empty())
        .unwrap();

    let response = test_app.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_region_is_404() {
    let mut store = MockWeatherStore::new();
    store
        .expect_realtime_by_region()
        .withf(|region, date, _| region == "Atlantis" && date.is_none())
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
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/kma/realtime/region/Atlantis")
        .body(Body::empty())
        .unwrap();

    let response = test_app.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["detail"].as_str().unwrap().contains("Atlantis"));
}
