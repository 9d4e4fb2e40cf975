//! Statistics REST API Client
//!
//! HTTP client for the public COVID-19 statistics API. One call, one
//! request: no retries and no caching of earlier responses.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

use super::dto::{CountryStat, Summary};
use super::error::{FetchError, FetchResult};
use crate::config::ApiConfig;

/// Path of the aggregate summary resource
pub const SUMMARY_PATH: &str = "all";

/// Path of the per-country list resource
pub const COUNTRIES_PATH: &str = "countries";

/// Where the dashboard gets its numbers from
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Aggregate totals across all regions
    async fn summary(&self) -> FetchResult<Summary>;

    /// Per-country counters, in the order the source reports them
    async fn countries(&self) -> FetchResult<Vec<CountryStat>>;
}

/// Statistics API client bound to one configured origin
pub struct StatsClient {
    client: Client,
    config: ApiConfig,
}

impl StatsClient {
    /// Create a new client with the given configuration
    pub fn new(config: ApiConfig) -> FetchResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Resolve a relative resource path against the base origin
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Issue a GET request and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> FetchResult<T> {
        self.request(path, Method::GET).await
    }

    /// Issue a request with the given method and decode the JSON body
    pub async fn request<T: DeserializeOwned>(&self, path: &str, method: Method) -> FetchResult<T> {
        let request_id = uuid::Uuid::new_v4();
        let url = self.url(path);
        let started = Instant::now();

        tracing::debug!(
            request_id = %request_id,
            method = %method,
            url = %url,
            "Sending request"
        );

        let response = self.client.request(method, &url).send().await?;
        let status = response.status();

        tracing::debug!(
            request_id = %request_id,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Response received"
        );

        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl StatsSource for StatsClient {
    async fn summary(&self) -> FetchResult<Summary> {
        self.get(SUMMARY_PATH).await
    }

    async fn countries(&self) -> FetchResult<Vec<CountryStat>> {
        self.get(COUNTRIES_PATH).await
    }
}
