//! Dashboard view state
//!
//! Three independent slices: the summary totals, the country list and the
//! map viewport. Fetch results replace a slice wholesale; failures leave it
//! at its previous value.

use crate::api::{CountryStat, FetchResult, Summary};
use crate::map::Viewport;

/// An independently re-rendered area of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Header,
    Map,
    Footer,
    CountryList,
}

/// A resolved fetch, delivered to the view
#[derive(Debug)]
pub enum Update {
    Summary(FetchResult<Summary>),
    Countries(FetchResult<Vec<CountryStat>>),
}

impl Update {
    /// Name of the resource the update came from
    pub fn resource(&self) -> &'static str {
        match self {
            Update::Summary(_) => "summary",
            Update::Countries(_) => "countries",
        }
    }
}

/// What applying an update did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State replaced; the regions need re-rendering
    Applied(&'static [Region]),
    /// Fetch failed; state untouched
    Failed(&'static str),
}

/// State held by the dashboard view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub summary: Summary,
    pub countries: Vec<CountryStat>,
    pub viewport: Viewport,
    /// Most recent fetch failure, kept for diagnostics only
    pub last_failure: Option<String>,
}

impl DashboardState {
    /// Zeroed summary, empty list, camera at `viewport`
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    /// Apply a resolved fetch
    pub fn apply(&mut self, update: Update) -> Outcome {
        let resource = update.resource();
        match update {
            Update::Summary(Ok(summary)) => {
                self.summary = summary;
                Outcome::Applied(&[Region::Footer])
            }
            Update::Countries(Ok(countries)) => {
                self.countries = countries;
                Outcome::Applied(&[Region::CountryList, Region::Map])
            }
            Update::Summary(Err(e)) | Update::Countries(Err(e)) => {
                tracing::error!(resource, error = %e, "Failed to load dashboard data");
                self.last_failure = Some(e.to_string());
                Outcome::Failed(resource)
            }
        }
    }

    /// Replace the camera from a map interaction
    pub fn set_viewport(&mut self, viewport: Viewport) -> Outcome {
        self.viewport = viewport.normalized();
        Outcome::Applied(&[Region::Map])
    }
}
