//! # covid-dashboard
//!
//! COVID-19 statistics dashboard: world summary totals, a per-country list
//! and a clustered map of reporting countries, fed by a public REST API.
//!
//! ## Modules
//!
//! - [`api`]: HTTP client for the `all` and `countries` resources
//! - [`dashboard`]: view state driven by the two fetches
//! - [`map`]: camera viewport, projection and point clustering
//! - [`view`]: number/time formatting and per-region view models
//! - [`tui`]: terminal rendering and key handling
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use covid_dashboard::{ApiConfig, Dashboard, DashboardOptions, StatsClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StatsClient::new(ApiConfig::default())?;
//!     let mut dashboard = Dashboard::mount(Arc::new(client), DashboardOptions::default());
//!
//!     // Apply both fetches, whichever finishes first
//!     dashboard.settle().await;
//!
//!     let state = dashboard.state();
//!     println!("{} cases across {} countries", state.summary.cases, state.countries.len());
//!
//!     dashboard.unmount();
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod map;
pub mod tui;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export top-level types for convenience
pub use api::{
    CountryInfo, CountryStat, FetchError, FetchResult, StatsClient, StatsSource, Summary,
    COUNTRIES_PATH, SUMMARY_PATH,
};

pub use config::{generate_default_config, ApiConfig, Config, ConfigError, LoggingConfig, MapConfig};

pub use dashboard::{Dashboard, DashboardOptions, DashboardState, Outcome, Region, Update};

pub use map::{Bounds, ClusterIndex, ClusterOptions, Feature, MapError, Viewport};

pub use logging::LoggingError;
