//! Map Model
//!
//! Camera state, projection and clustering for the dashboard map.
//!
//! - [`Viewport`]: camera position, zoom and orientation
//! - [`ClusterIndex`]: countries grouped per zoom level
//! - [`projection`]: Web Mercator helpers shared by both

mod cluster;
pub mod projection;
mod viewport;

pub use cluster::{ClusterIndex, ClusterOptions, Feature, MapError};
pub use viewport::{Bounds, Viewport, MAX_PITCH, MAX_ZOOM, MIN_ZOOM, VIEW_WIDTH_PX};
