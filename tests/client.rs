mod common;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use covid_dashboard::{ApiConfig, FetchError, StatsClient, StatsSource};
use reqwest::Method;
use serde_json::{json, Value};

async fn client_for(router: Router) -> StatsClient {
    let base_url = common::spawn_origin(router).await;
    StatsClient::new(ApiConfig::with_base_url(base_url)).unwrap()
}

#[tokio::test]
async fn test_resolves_to_parsed_body() {
    let client = client_for(common::healthy()).await;

    let body: Value = client.get("all").await.unwrap();
    assert_eq!(body, common::summary_body());

    let summary = client.summary().await.unwrap();
    assert_eq!(summary.cases, 1000);
    assert_eq!(summary.deaths, 50);
    assert_eq!(summary.recovered, 800);
    assert_eq!(summary.updated, 1_584_000_000_000);
}

#[tokio::test]
async fn test_countries_keep_source_order() {
    let client = client_for(common::healthy()).await;

    let countries = client.countries().await.unwrap();
    let names: Vec<&str> = countries.iter().map(|c| c.country.as_str()).collect();
    assert_eq!(names, ["Italy", "Switzerland", "Austria", "X"]);

    let italy = &countries[0];
    assert_eq!(italy.today_cases, 5);
    assert_eq!(italy.position(), Some((12.8333, 42.8333)));
    assert_eq!(italy.country_info.as_ref().and_then(|i| i.iso2.as_deref()), Some("IT"));
    assert_eq!(countries[3].position(), None);
}

#[tokio::test]
async fn test_non_success_status_rejects() {
    let client = client_for(common::broken()).await;

    match client.summary().await {
        Err(FetchError::Status { path, status }) => {
            assert_eq!(path, "all");
            assert_eq!(status, 500);
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_path_rejects() {
    let client = client_for(common::healthy()).await;

    let result: Result<Value, _> = client.get("nowhere").await;
    assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
}

#[tokio::test]
async fn test_malformed_body_rejects() {
    let router = Router::new().route("/v3/all", get(|| async { (StatusCode::OK, "<html>not json</html>") }));
    let client = client_for(router).await;

    let err = client.summary().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }));
    assert!(err.to_string().starts_with("fetch failed: could not decode all"));
}

#[tokio::test]
async fn test_null_counters_decode_as_zero() {
    let router = Router::new().route(
        "/v3/all",
        get(|| async { Json(json!({ "cases": 7, "deaths": null, "recovered": null, "updated": 1 })) }),
    );
    let client = client_for(router).await;

    let summary = client.summary().await.unwrap();
    assert_eq!(summary.cases, 7);
    assert_eq!(summary.deaths, 0);
    assert_eq!(summary.recovered, 0);
}

#[tokio::test]
async fn test_explicit_method() {
    let router = Router::new().route("/v3/echo", post(|| async { Json(json!({ "method": "POST" })) }));
    let client = client_for(router).await;

    let body: Value = client.request("echo", Method::POST).await.unwrap();
    assert_eq!(body["method"], "POST");

    // The same path under the default method is not routed
    let result: Result<Value, _> = client.get("echo").await;
    assert!(matches!(result, Err(FetchError::Status { status: 405, .. })));
}
