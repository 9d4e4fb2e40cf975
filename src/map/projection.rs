//! Web Mercator projection
//!
//! Maps longitude/latitude onto the unit square `[0, 1] x [0, 1]` with the
//! origin in the north-west corner. Multiply by `TILE_SIZE * 2^zoom` for
//! pixel coordinates at a given zoom.

use std::f64::consts::PI;

/// Size of one map tile in pixels
pub const TILE_SIZE: f64 = 512.0;

/// Latitude at which the Mercator square is cut off
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Longitude to unit x
pub fn lng_x(lng: f64) -> f64 {
    lng / 360.0 + 0.5
}

/// Latitude to unit y (north is 0)
pub fn lat_y(lat: f64) -> f64 {
    let lat_rad = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0;
    y.clamp(0.0, 1.0)
}

/// Unit x back to longitude
pub fn x_lng(x: f64) -> f64 {
    (x - 0.5) * 360.0
}

/// Unit y back to latitude
pub fn y_lat(y: f64) -> f64 {
    let n = PI * (1.0 - 2.0 * y);
    n.sinh().atan().to_degrees()
}
