//! Mock statistics origin shared by the integration tests

#![allow(dead_code)]

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::{json, Value};
use std::time::Duration;

/// Serve `router` on an ephemeral port; returns the `/v3` base URL
pub async fn spawn_origin(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}/v3", addr)
}

pub fn summary_body() -> Value {
    json!({
        "cases": 1000,
        "deaths": 50,
        "recovered": 800,
        "updated": 1584000000000i64,
    })
}

pub fn countries_body() -> Value {
    json!([
        {
            "country": "Italy",
            "countryInfo": { "_id": 380, "iso2": "IT", "iso3": "ITA", "lat": 42.8333, "long": 12.8333, "flag": "https://example.org/it.png" },
            "todayCases": 5, "cases": 100, "deaths": 2, "recovered": 90
        },
        {
            "country": "Switzerland",
            "countryInfo": { "_id": 756, "iso2": "CH", "iso3": "CHE", "lat": 47.0, "long": 8.0 },
            "todayCases": 1, "cases": 40, "deaths": 0, "recovered": 10
        },
        {
            "country": "Austria",
            "countryInfo": { "_id": 40, "iso2": "AT", "iso3": "AUT", "lat": 47.3333, "long": 13.3333 },
            "todayCases": 0, "cases": 30, "deaths": 1, "recovered": 20
        },
        {
            "country": "X",
            "todayCases": 5, "cases": 100, "deaths": 2, "recovered": 90
        }
    ])
}

/// Healthy origin serving both resources
pub fn healthy() -> Router {
    Router::new()
        .route("/v3/all", get(|| async { Json(summary_body()) }))
        .route("/v3/countries", get(|| async { Json(countries_body()) }))
}

/// Origin failing every request
pub fn broken() -> Router {
    async fn boom() -> impl IntoResponse {
        (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
    }

    Router::new()
        .route("/v3/all", get(boom))
        .route("/v3/countries", get(boom))
}

/// Origin answering only after `delay`
pub fn slow(delay: Duration) -> Router {
    Router::new()
        .route(
            "/v3/all",
            get(move || async move {
                tokio::time::sleep(delay).await;
                Json(summary_body())
            }),
        )
        .route(
            "/v3/countries",
            get(move || async move {
                tokio::time::sleep(delay).await;
                Json(countries_body())
            }),
        )
}
