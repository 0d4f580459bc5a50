//! Geographic utilities: great-circle distance and bounds calculations.

use crate::{Bounds, TreePoint};

/// Mean Earth radius in meters (spherical model).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Length of one degree of latitude in meters on the spherical model.
pub const DEGREE_LENGTH_M: f64 = std::f64::consts::PI * EARTH_RADIUS_M / 180.0;

/// Calculate the great-circle distance between two points in meters
/// using the haversine formula.
///
/// Assumes a spherical Earth of radius [`EARTH_RADIUS_M`]. Symmetric in its
/// arguments and exactly zero for identical coordinates.
///
/// # Example
/// ```
/// use treethin::{TreePoint, geo_utils::haversine_distance};
///
/// let a = TreePoint::new(35.78, 137.65, 1.0);
/// let b = TreePoint::new(35.79, 137.65, 1.0);
/// let d = haversine_distance(&a, &b);
/// assert!((d - 1112.0).abs() < 1.0); // ~1.1 km per 0.01 deg latitude
/// ```
pub fn haversine_distance(a: &TreePoint, b: &TreePoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlng = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Compute the bounding box of a set of points.
///
/// Returns `None` for an empty slice.
pub fn compute_bounds(points: &[TreePoint]) -> Option<Bounds> {
    Bounds::from_points(points)
}
