//! Statistics API Access
//!
//! The only network-facing part of the dashboard.
//!
//! # Resources
//!
//! - `GET {base_url}/all` - aggregate [`Summary`]
//! - `GET {base_url}/countries` - ordered list of [`CountryStat`]
//!
//! # Example
//!
//! ```rust,no_run
//! use covid_dashboard::api::{StatsClient, StatsSource};
//! use covid_dashboard::config::ApiConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StatsClient::new(ApiConfig::default())?;
//!     let summary = client.summary().await?;
//!     println!("{} cases worldwide", summary.cases);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dto;
pub mod error;

pub use client::{StatsClient, StatsSource, COUNTRIES_PATH, SUMMARY_PATH};
pub use dto::{CountryInfo, CountryStat, Summary};
pub use error::{FetchError, FetchResult};
