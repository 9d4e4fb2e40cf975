mod common;

use chrono::Utc;
use covid_dashboard::view::{CountryRow, Delta, FooterView};
use covid_dashboard::{
    ApiConfig, Dashboard, DashboardOptions, Outcome, StatsClient, Summary, Viewport,
};
use std::sync::Arc;
use std::time::Duration;

async fn mount(router: axum::Router) -> Dashboard {
    let base_url = common::spawn_origin(router).await;
    let client = StatsClient::new(ApiConfig::with_base_url(base_url)).unwrap();
    Dashboard::mount(Arc::new(client), DashboardOptions::default())
}

#[tokio::test]
async fn test_loaded_dashboard_views() {
    let mut dashboard = mount(common::healthy()).await;
    dashboard.settle().await;

    let footer = FooterView::new(&dashboard.state().summary, &Utc);
    assert_eq!(footer.cases.to_string(), "Total Cases 1,000");
    assert_eq!(footer.deaths.to_string(), "Total Deaths 50");
    assert_eq!(footer.recovered.to_string(), "Recovered 800");
    assert_eq!(footer.updated.to_string(), "Updated At 12 Mar 2020 08:00:00");

    let rows = CountryRow::rows(&dashboard.state().countries);
    assert_eq!(rows.len(), 4);

    let x = &rows[3];
    assert_eq!(x.name, "X");
    assert_eq!(x.today, Delta { text: "+5".to_string(), highlighted: true });
    assert_eq!((x.cases.as_str(), x.deaths.as_str(), x.recovered.as_str()), ("100", "2", "90"));

    let austria = &rows[2];
    assert_eq!(austria.today.text, "0");
    assert!(!austria.today.highlighted);

    // "X" has no position, so only three countries reach the map
    assert_eq!(dashboard.clusters().len(), 3);
}

#[tokio::test]
async fn test_failed_fetches_keep_defaults() {
    let mut dashboard = mount(common::broken()).await;

    let mut failed = Vec::new();
    while let Some(outcome) = dashboard.next_update().await {
        if let Outcome::Failed(resource) = outcome {
            failed.push(resource);
        }
    }
    failed.sort();

    assert_eq!(failed, ["countries", "summary"]);
    assert_eq!(dashboard.state().summary, Summary::default());
    assert!(dashboard.state().countries.is_empty());
    assert_eq!(dashboard.state().viewport, Viewport::default());
    assert!(dashboard
        .state()
        .last_failure
        .as_deref()
        .is_some_and(|msg| msg.contains("returned HTTP 500")));
}

#[tokio::test]
async fn test_unmount_before_resolution() {
    let mut dashboard = mount(common::slow(Duration::from_millis(300))).await;

    tokio::time::sleep(Duration::from_millis(20)).await;
    dashboard.unmount();

    // Outlive the origin's delay; late responses must not land
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert!(dashboard.next_update().await.is_none());
    assert_eq!(dashboard.state().summary, Summary::default());
    assert!(dashboard.state().countries.is_empty());
    assert!(dashboard.clusters().is_empty());
}

#[tokio::test]
async fn test_cluster_click_flies_to_expansion_zoom() {
    let mut dashboard = mount(common::healthy()).await;
    dashboard.settle().await;

    let shown_at = dashboard.state().viewport.zoom;
    let cluster = dashboard
        .visible_features(2.0)
        .into_iter()
        .find(|f| f.is_cluster())
        .unwrap();
    assert_eq!(cluster.point_count, 3);

    dashboard.on_cluster_click(cluster.id).unwrap();

    let viewport = dashboard.state().viewport;
    assert!(viewport.zoom > shown_at);
    assert_eq!(viewport.transition_ms, Some(500));
    assert!((viewport.longitude - cluster.longitude).abs() < 1e-9);
    assert!((viewport.latitude - cluster.latitude).abs() < 1e-9);

    // The cluster has split at the new zoom
    let visible = dashboard.visible_features(2.0);
    assert!(visible.iter().all(|f| f.id != cluster.id));
}
