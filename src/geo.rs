//! Local-frame geometry and geodetic projection helpers
//!
//! All flight geometry in this crate lives in a local NED frame (x north,
//! y east, z down, meters). This module provides the angle and distance
//! primitives the engine needs, plus the equirectangular projection used
//! to bring geodetic targets (follow-target repositioning) into the local
//! frame around the navigator's reference point.

use core::f32::consts::PI;

use libm::{atan2f, cos, sqrtf};
use nalgebra::Vector2;

/// Mean Earth radius in meters, used by the local-tangent projection.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Wrap an angle in radians into `(-pi, pi]`.
///
/// Non-finite input is returned unchanged so NaN yaw fields stay NaN and
/// keep failing downstream finiteness checks.
pub fn wrap_pi(angle: f32) -> f32 {
    if !angle.is_finite() {
        return angle;
    }

    let mut a = angle;

    while a > PI {
        a -= 2.0 * PI;
    }

    while a <= -PI {
        a += 2.0 * PI;
    }

    a
}

/// Convert degrees to radians.
pub fn radians(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}

/// Horizontal distance between two local-frame points.
pub fn horizontal_distance(from: Vector2<f32>, to: Vector2<f32>) -> f32 {
    let e_x = to.x - from.x;
    let e_y = to.y - from.y;
    sqrtf(e_x * e_x + e_y * e_y)
}

/// Bearing from one local-frame point to another, radians in `(-pi, pi]`.
///
/// 0 = north, positive toward east (NED convention).
pub fn bearing_to(from: Vector2<f32>, to: Vector2<f32>) -> f32 {
    wrap_pi(atan2f(to.y - from.y, to.x - from.x))
}

/// Reference point for the geodetic -> local-frame projection.
///
/// Owned by the outer navigator; the engine only projects through it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapReference {
    /// Reference latitude in degrees
    pub lat_deg: f64,
    /// Reference longitude in degrees
    pub lon_deg: f64,
}

impl MapReference {
    /// Create a reference at the given geodetic coordinates.
    pub const fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    /// Project geodetic coordinates into the local frame about this
    /// reference using an equirectangular local-tangent approximation.
    ///
    /// Returns `(x, y)` in meters, x north and y east. Adequate for the
    /// few-kilometer offsets mission items operate over.
    pub fn project(&self, lat_deg: f64, lon_deg: f64) -> (f32, f32) {
        let ref_lat = self.lat_deg.to_radians();
        let ref_lon = self.lon_deg.to_radians();
        let lat = lat_deg.to_radians();
        let lon = lon_deg.to_radians();

        let x = EARTH_RADIUS_M * (lat - ref_lat);
        let y = EARTH_RADIUS_M * cos(ref_lat) * (lon - ref_lon);

        (x as f32, y as f32)
    }
}
