//! Dashboard View
//!
//! Owns the view state and drives it from two fetches started at mount.
//!
//! ## Data Flow
//!
//! 1. [`Dashboard::mount`] spawns one task per resource (summary, countries)
//! 2. Each task races its fetch against the teardown signal
//! 3. Results arrive over a channel and are applied by [`Dashboard::next_update`]
//!    on the caller's task, so state is never shared between threads
//! 4. [`Dashboard::unmount`] signals teardown; late results are dropped
//!
//! The two fetches are independent: either may finish first, and a failure
//! of one never affects the other.

mod state;

pub use state::{DashboardState, Outcome, Region, Update};

use std::future::Future;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::api::StatsSource;
use crate::config::MapConfig;
use crate::map::{ClusterIndex, ClusterOptions, Feature, MapError, Viewport};

/// View parameters fixed at mount
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOptions {
    /// Initial camera position
    pub viewport: Viewport,
    pub clusters: ClusterOptions,
    /// Camera transition when a cluster is expanded
    pub transition_ms: u64,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self::from(&MapConfig::default())
    }
}

impl From<&MapConfig> for DashboardOptions {
    fn from(config: &MapConfig) -> Self {
        Self {
            viewport: config.initial_viewport(),
            clusters: config.cluster_options(),
            transition_ms: config.transition_ms,
        }
    }
}

/// A mounted dashboard view
pub struct Dashboard {
    state: DashboardState,
    clusters: ClusterIndex,
    options: DashboardOptions,
    updates: mpsc::UnboundedReceiver<Update>,
    teardown: broadcast::Sender<()>,
    tasks: Vec<JoinHandle<()>>,
    /// Fetches whose result has not been applied yet
    pending: usize,
    mounted: bool,
}

impl Dashboard {
    /// Mount the view and start loading both resources
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(source: Arc<dyn StatsSource>, options: DashboardOptions) -> Self {
        let (tx, updates) = mpsc::unbounded_channel();
        let (teardown, _) = broadcast::channel(1);

        let summary_source = Arc::clone(&source);
        let summary_task = spawn_fetch(
            "summary",
            async move { Update::Summary(summary_source.summary().await) },
            tx.clone(),
            teardown.subscribe(),
        );

        let countries_task = spawn_fetch(
            "countries",
            async move { Update::Countries(source.countries().await) },
            tx,
            teardown.subscribe(),
        );

        tracing::info!("Dashboard mounted, loading summary and country list");

        Self {
            state: DashboardState::new(options.viewport.normalized()),
            clusters: ClusterIndex::empty(options.clusters),
            options,
            updates,
            teardown,
            tasks: vec![summary_task, countries_task],
            pending: 2,
            mounted: true,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn clusters(&self) -> &ClusterIndex {
        &self.clusters
    }

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// True once every fetch has been applied, or the view is torn down
    pub fn is_settled(&self) -> bool {
        !self.mounted || self.pending == 0
    }

    /// Wait for the next fetch to resolve and apply it
    ///
    /// Returns `None` once nothing is outstanding.
    pub async fn next_update(&mut self) -> Option<Outcome> {
        if self.is_settled() {
            return None;
        }

        match self.updates.recv().await {
            Some(update) => {
                self.pending -= 1;
                Some(self.apply(update))
            }
            None => {
                // Every fetch task is gone without reporting back
                tracing::warn!(pending = self.pending, "Fetch tasks ended without a result");
                self.pending = 0;
                None
            }
        }
    }

    /// Apply every outstanding fetch
    pub async fn settle(&mut self) {
        while self.next_update().await.is_some() {}
    }

    /// The map widget reported a new camera (pan, zoom, rotate, tilt)
    pub fn on_viewport_change(&mut self, viewport: Viewport) -> Outcome {
        self.state.set_viewport(viewport)
    }

    /// A cluster marker was clicked: fly to the zoom where it splits apart
    pub fn on_cluster_click(&mut self, feature_id: usize) -> Result<Outcome, MapError> {
        let zoom = self.clusters.expansion_zoom(feature_id)?;
        let feature = self
            .clusters
            .feature(feature_id)
            .ok_or(MapError::UnknownFeature(feature_id))?;

        tracing::debug!(cluster = feature_id, zoom, "Expanding cluster");

        let viewport = self.state.viewport.fly_to(
            feature.longitude,
            feature.latitude,
            zoom as f64,
            self.options.transition_ms,
        );
        Ok(self.state.set_viewport(viewport))
    }

    /// Map features inside the current camera for a map of the given aspect ratio
    pub fn visible_features(&self, aspect: f64) -> Vec<Feature> {
        let viewport = &self.state.viewport;
        self.clusters.features_in(&viewport.bounds(aspect), viewport.zoom)
    }

    /// Tear the view down; fetches still in flight are abandoned
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;

        // No receivers left just means every task already finished
        let _ = self.teardown.send(());
        for task in self.tasks.drain(..) {
            task.abort();
        }
        self.updates.close();

        tracing::info!(abandoned = self.pending, "Dashboard unmounted");
    }

    fn apply(&mut self, update: Update) -> Outcome {
        let outcome = self.state.apply(update);
        if let Outcome::Applied(regions) = outcome {
            if regions.contains(&Region::CountryList) {
                self.clusters = ClusterIndex::build(&self.state.countries, self.options.clusters);
            }
        }
        outcome
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn spawn_fetch<F>(
    resource: &'static str,
    fetch: F,
    tx: mpsc::UnboundedSender<Update>,
    mut teardown: broadcast::Receiver<()>,
) -> JoinHandle<()>
where
    F: Future<Output = Update> + Send + 'static,
{
    tokio::spawn(async move {
        tokio::select! {
            _ = teardown.recv() => {
                tracing::debug!(resource, "View torn down before fetch resolved");
            }
            update = fetch => {
                if tx.send(update).is_err() {
                    tracing::debug!(resource, "View torn down, dropping fetch result");
                }
            }
        }
    })
}
