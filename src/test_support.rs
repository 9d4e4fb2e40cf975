//! Shared test doubles

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Notify;

use crate::api::{CountryStat, FetchError, FetchResult, StatsSource, Summary};

/// In-memory source; each resource can be held back until released
#[derive(Default)]
pub struct FakeSource {
    pub summary: Summary,
    pub countries: Vec<CountryStat>,
    pub fail: bool,
    pub summary_gate: Option<Arc<Notify>>,
    pub countries_gate: Option<Arc<Notify>>,
}

impl FakeSource {
    pub fn loaded() -> Self {
        Self {
            summary: sample_summary(),
            countries: sample_countries(),
            ..Default::default()
        }
    }

    fn failure(path: &str) -> FetchError {
        FetchError::Status {
            path: path.to_string(),
            status: 502,
        }
    }
}

#[async_trait]
impl StatsSource for FakeSource {
    async fn summary(&self) -> FetchResult<Summary> {
        if let Some(gate) = &self.summary_gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(Self::failure("all"));
        }
        Ok(self.summary.clone())
    }

    async fn countries(&self) -> FetchResult<Vec<CountryStat>> {
        if let Some(gate) = &self.countries_gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(Self::failure("countries"));
        }
        Ok(self.countries.clone())
    }
}

pub fn sample_summary() -> Summary {
    Summary {
        cases: 1000,
        deaths: 50,
        recovered: 800,
        updated: 1_584_000_000_000,
        ..Default::default()
    }
}

/// Three neighbouring European countries and India
pub fn sample_countries() -> Vec<CountryStat> {
    vec![
        CountryStat::new("Italy", 5, 100, 2, 90).at(42.8333, 12.8333),
        CountryStat::new("Switzerland", 1, 40, 0, 10).at(47.0, 8.0),
        CountryStat::new("Austria", 0, 30, 1, 20).at(47.3333, 13.3333),
        CountryStat::new("India", 3, 60, 1, 50).at(20.0, 77.0),
    ]
}
