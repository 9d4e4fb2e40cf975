//! Point clustering
//!
//! Groups nearby countries into clusters at low zoom levels and reveals
//! them as the camera zooms in. The index is built once per country list,
//! from the highest zoom level down: at each level every unclaimed point
//! gathers the unclaimed points within `radius` pixels of it.
//!
//! Feature ids are stable for the lifetime of an index. A cluster formed at
//! zoom `z` is visible at `z` and at lower zooms until a coarser level
//! absorbs it into a larger cluster. It splits into its children at `z + 1`.

use serde::Serialize;
use thiserror::Error;

use super::projection::{lat_y, lng_x, x_lng, y_lat};
use super::viewport::{Bounds, MAX_ZOOM};
use crate::api::CountryStat;

/// Clustering parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterOptions {
    /// Cluster radius in pixels
    pub radius: f64,
    /// Tile extent the radius is measured against
    pub extent: f64,
    /// Lowest zoom at which clusters are computed
    pub min_zoom: u8,
    /// Highest zoom at which points are still clustered
    pub max_zoom: u8,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            radius: 50.0,
            extent: 512.0,
            min_zoom: 0,
            max_zoom: 14,
        }
    }
}

/// A marker on the map: a single country or a group of them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    pub id: usize,
    pub longitude: f64,
    pub latitude: f64,
    /// Number of countries represented
    pub point_count: usize,
    pub cases: i64,
    pub today_cases: i64,
    /// Country name; for clusters, the member with the most cases
    pub label: String,
}

impl Feature {
    pub fn is_cluster(&self) -> bool {
        self.point_count > 1
    }
}

/// Errors from map feature queries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("No map feature with id {0}")]
    UnknownFeature(usize),

    #[error("Feature {0} is a single country, not a cluster")]
    NotACluster(usize),
}

#[derive(Debug, Clone)]
struct Node {
    x: f64,
    y: f64,
    point_count: usize,
    cases: i64,
    today_cases: i64,
    label: String,
    /// Largest single-country case count inside, used to pick the label
    lead_cases: i64,
    /// Zoom at which this cluster was formed; `None` for single countries
    formed_at: Option<u8>,
    children: Vec<usize>,
}

/// Clustered view of the country list, queryable per zoom level
#[derive(Debug, Clone)]
pub struct ClusterIndex {
    options: ClusterOptions,
    nodes: Vec<Node>,
    /// Visible node ids per zoom, from `min_zoom` to `max_zoom + 1`
    levels: Vec<Vec<usize>>,
    points: usize,
}

impl ClusterIndex {
    /// An index with nothing in it
    pub fn empty(options: ClusterOptions) -> Self {
        let options = sanitize(options);
        let level_count = (options.max_zoom - options.min_zoom) as usize + 2;
        Self {
            options,
            nodes: Vec::new(),
            levels: vec![Vec::new(); level_count],
            points: 0,
        }
    }

    /// Cluster every country that has a map position
    pub fn build(countries: &[CountryStat], options: ClusterOptions) -> Self {
        let mut index = Self::empty(options);

        let mut current: Vec<usize> = Vec::new();
        for country in countries {
            let Some((lng, lat)) = country.position() else {
                continue;
            };
            current.push(index.nodes.len());
            index.nodes.push(Node {
                x: lng_x(lng),
                y: lat_y(lat),
                point_count: 1,
                cases: country.cases,
                today_cases: country.today_cases,
                label: country.country.clone(),
                lead_cases: country.cases,
                formed_at: None,
                children: Vec::new(),
            });
        }
        index.points = current.len();

        let top = index.levels.len() - 1;
        index.levels[top] = current.clone();

        let ClusterOptions { min_zoom, max_zoom, .. } = index.options;
        for zoom in (min_zoom..=max_zoom).rev() {
            current = index.cluster_level(&current, zoom);
            index.levels[(zoom - min_zoom) as usize] = current.clone();
        }

        tracing::debug!(
            points = index.points,
            nodes = index.nodes.len(),
            "Built cluster index"
        );

        index
    }

    /// Number of countries placed on the map
    pub fn len(&self) -> usize {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points == 0
    }

    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }

    /// Every feature visible at `zoom`
    pub fn features(&self, zoom: f64) -> Vec<Feature> {
        self.levels[self.level_for(zoom)]
            .iter()
            .map(|&id| self.to_feature(id))
            .collect()
    }

    /// Features visible at `zoom` inside `bounds`
    pub fn features_in(&self, bounds: &Bounds, zoom: f64) -> Vec<Feature> {
        self.features(zoom)
            .into_iter()
            .filter(|feature| bounds.contains(feature.longitude, feature.latitude))
            .collect()
    }

    pub fn feature(&self, id: usize) -> Option<Feature> {
        (id < self.nodes.len()).then(|| self.to_feature(id))
    }

    /// Zoom level at which a cluster splits into its children
    pub fn expansion_zoom(&self, id: usize) -> Result<u8, MapError> {
        let node = self.nodes.get(id).ok_or(MapError::UnknownFeature(id))?;
        node.formed_at
            .map(|zoom| zoom + 1)
            .ok_or(MapError::NotACluster(id))
    }

    /// Features a cluster splits into at its expansion zoom
    pub fn children(&self, id: usize) -> Result<Vec<Feature>, MapError> {
        let node = self.nodes.get(id).ok_or(MapError::UnknownFeature(id))?;
        if node.formed_at.is_none() {
            return Err(MapError::NotACluster(id));
        }
        Ok(node.children.iter().map(|&child| self.to_feature(child)).collect())
    }

    fn level_for(&self, zoom: f64) -> usize {
        let ClusterOptions { min_zoom, max_zoom, .. } = self.options;
        let zoom = if zoom.is_finite() { zoom.floor() } else { min_zoom as f64 };
        let clamped = zoom.clamp(min_zoom as f64, max_zoom as f64 + 1.0) as u8;
        (clamped - min_zoom) as usize
    }

    fn cluster_level(&mut self, ids: &[usize], zoom: u8) -> Vec<usize> {
        let radius = self.options.radius / (self.options.extent * 2f64.powi(zoom as i32));
        let radius_sq = radius * radius;

        let mut claimed = vec![false; ids.len()];
        let mut next = Vec::with_capacity(ids.len());

        for i in 0..ids.len() {
            if claimed[i] {
                continue;
            }
            claimed[i] = true;

            let seed = &self.nodes[ids[i]];
            let (sx, sy) = (seed.x, seed.y);
            let mut group = vec![ids[i]];

            for j in (i + 1)..ids.len() {
                if claimed[j] {
                    continue;
                }
                let other = &self.nodes[ids[j]];
                let (dx, dy) = (other.x - sx, other.y - sy);
                if dx * dx + dy * dy <= radius_sq {
                    claimed[j] = true;
                    group.push(ids[j]);
                }
            }

            if group.len() == 1 {
                next.push(ids[i]);
            } else {
                next.push(self.merge(group, zoom));
            }
        }

        next
    }

    fn merge(&mut self, group: Vec<usize>, zoom: u8) -> usize {
        let mut point_count = 0;
        let (mut wx, mut wy) = (0.0, 0.0);
        let mut cases = 0i64;
        let mut today_cases = 0i64;
        let mut lead: Option<&Node> = None;

        for &id in &group {
            let node = &self.nodes[id];
            point_count += node.point_count;
            wx += node.x * node.point_count as f64;
            wy += node.y * node.point_count as f64;
            cases = cases.saturating_add(node.cases);
            today_cases = today_cases.saturating_add(node.today_cases);
            if lead.map_or(true, |l| node.lead_cases > l.lead_cases) {
                lead = Some(node);
            }
        }

        let (label, lead_cases) = lead
            .map(|l| (l.label.clone(), l.lead_cases))
            .unwrap_or_default();

        let id = self.nodes.len();
        self.nodes.push(Node {
            x: wx / point_count as f64,
            y: wy / point_count as f64,
            point_count,
            cases,
            today_cases,
            label,
            lead_cases,
            formed_at: Some(zoom),
            children: group,
        });
        id
    }

    fn to_feature(&self, id: usize) -> Feature {
        let node = &self.nodes[id];
        Feature {
            id,
            longitude: x_lng(node.x),
            latitude: y_lat(node.y),
            point_count: node.point_count,
            cases: node.cases,
            today_cases: node.today_cases,
            label: node.label.clone(),
        }
    }
}

impl Default for ClusterIndex {
    fn default() -> Self {
        Self::empty(ClusterOptions::default())
    }
}

fn sanitize(mut options: ClusterOptions) -> ClusterOptions {
    // Expansion zoom is one past max_zoom and must stay reachable by the camera
    options.max_zoom = options.max_zoom.min(MAX_ZOOM as u8 - 1);
    options.min_zoom = options.min_zoom.min(options.max_zoom);
    if !(options.extent > 0.0) {
        options.extent = ClusterOptions::default().extent;
    }
    if !(options.radius >= 0.0) {
        options.radius = 0.0;
    }
    options
}
