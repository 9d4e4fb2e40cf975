//! Map camera state
//!
//! A [`Viewport`] is replaced wholesale on every interaction; the helpers
//! here return a new value rather than mutating in place.

use serde::{Deserialize, Serialize};

use super::projection::{MAX_LATITUDE, TILE_SIZE};

pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 20.0;
pub const MAX_PITCH: f64 = 60.0;

/// Nominal on-screen width of the map in pixels
pub const VIEW_WIDTH_PX: f64 = 1024.0;

/// Camera parameters controlling the visible map region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    /// Rotation in degrees clockwise from north
    pub bearing: f64,
    /// Tilt in degrees away from straight down
    pub pitch: f64,
    /// Animated transition into this camera position, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_ms: Option<u64>,
}

impl Default for Viewport {
    /// World overview
    fn default() -> Self {
        Self {
            latitude: 19.488205240905323,
            longitude: 76.49824179077201,
            zoom: 1.5,
            bearing: 0.0,
            pitch: 0.0,
            transition_ms: None,
        }
    }
}

impl Viewport {
    /// Clamp every parameter into its valid range
    pub fn normalized(mut self) -> Self {
        self.longitude = wrap_longitude(self.longitude);
        self.latitude = self.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        self.zoom = self.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.bearing = self.bearing.rem_euclid(360.0);
        self.pitch = self.pitch.clamp(0.0, MAX_PITCH);
        self
    }

    /// Degrees of longitude visible across the map
    pub fn longitude_span(&self) -> f64 {
        (VIEW_WIDTH_PX * 360.0 / (TILE_SIZE * 2f64.powf(self.zoom))).min(360.0)
    }

    /// Visible region for a map whose width/height ratio is `aspect`
    pub fn bounds(&self, aspect: f64) -> Bounds {
        let lon_span = self.longitude_span();
        let lat_span = if aspect > 0.0 {
            (lon_span / aspect).min(180.0)
        } else {
            180.0
        };

        Bounds {
            west: self.longitude - lon_span / 2.0,
            east: self.longitude + lon_span / 2.0,
            south: (self.latitude - lat_span / 2.0).max(-90.0),
            north: (self.latitude + lat_span / 2.0).min(90.0),
        }
    }

    /// Move the camera by a fraction of the visible span; positive `dy` is north
    pub fn panned(&self, dx: f64, dy: f64) -> Self {
        let span = self.longitude_span();
        Self {
            longitude: self.longitude + dx * span,
            latitude: self.latitude + dy * span / 2.0,
            transition_ms: None,
            ..*self
        }
        .normalized()
    }

    pub fn zoomed(&self, delta: f64) -> Self {
        Self {
            zoom: self.zoom + delta,
            transition_ms: None,
            ..*self
        }
        .normalized()
    }

    pub fn rotated(&self, degrees: f64) -> Self {
        Self {
            bearing: self.bearing + degrees,
            transition_ms: None,
            ..*self
        }
        .normalized()
    }

    pub fn tilted(&self, degrees: f64) -> Self {
        Self {
            pitch: self.pitch + degrees,
            transition_ms: None,
            ..*self
        }
        .normalized()
    }

    /// Re-centre on a point at a new zoom, animated over `duration_ms`
    pub fn fly_to(&self, longitude: f64, latitude: f64, zoom: f64, duration_ms: u64) -> Self {
        Self {
            longitude,
            latitude,
            zoom,
            transition_ms: Some(duration_ms),
            ..*self
        }
        .normalized()
    }
}

/// A longitude/latitude rectangle; `west`/`east` may extend past ±180
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Bounds {
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        if latitude < self.south || latitude > self.north {
            return false;
        }
        [longitude, longitude - 360.0, longitude + 360.0]
            .iter()
            .any(|lng| *lng >= self.west && *lng <= self.east)
    }
}

fn wrap_longitude(longitude: f64) -> f64 {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}
