//! Spatial conflict graph construction.
//!
//! Builds the set of candidate-tree pairs that are closer together than the
//! configured spacing threshold. An R-tree over `(lng, lat)` restricts the
//! candidate pairs to a degree-space envelope that over-covers the metric
//! search radius; the exact haversine check then decides membership, so the
//! output is identical to the naive all-pairs evaluation.

use rstar::primitives::GeomWithData;
use rstar::{RTree, AABB};

use crate::geo_utils::{haversine_distance, DEGREE_LENGTH_M, EARTH_RADIUS_M};
use crate::{ThinningConfig, TreePoint};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// R-tree entry: `(lng, lat)` position with the point's index as payload.
type IndexedPoint = GeomWithData<[f64; 2], u32>;

/// The spatial conflict graph over a set of candidate trees.
///
/// Stores, for each point `i`, the sorted list of higher-indexed points `j`
/// whose great-circle distance to `i` is strictly below the spacing
/// threshold. Each unordered conflict appears exactly once, under its lower
/// endpoint. Derived from the point array; holds no point data itself.
#[derive(Debug, Clone)]
pub struct ConflictGraph {
    neighbors: Vec<Vec<u32>>,
    conflict_count: usize,
}

impl ConflictGraph {
    /// Build the conflict graph for `points` under `config.spacing_m`.
    ///
    /// Preconditions (checked by [`crate::optimizer::optimize`], not here):
    /// finite in-range coordinates and a positive spacing threshold.
    ///
    /// Pairs at exactly the threshold distance are not conflicts; the rule
    /// is strict `<`.
    pub fn build(points: &[TreePoint], config: &ThinningConfig) -> Self {
        let spacing = config.spacing_m;
        let entries: Vec<IndexedPoint> = points
            .iter()
            .enumerate()
            .map(|(i, p)| IndexedPoint::new([p.longitude, p.latitude], i as u32))
            .collect();
        let tree = RTree::bulk_load(entries);

        #[cfg(feature = "parallel")]
        let neighbors: Vec<Vec<u32>> = (0..points.len())
            .into_par_iter()
            .map(|i| conflicting_neighbors(&tree, points, i, spacing))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let neighbors: Vec<Vec<u32>> = (0..points.len())
            .map(|i| conflicting_neighbors(&tree, points, i, spacing))
            .collect();

        let conflict_count = neighbors.iter().map(Vec::len).sum();

        Self {
            neighbors,
            conflict_count,
        }
    }

    /// Number of points the graph was built over.
    pub fn num_points(&self) -> usize {
        self.neighbors.len()
    }

    /// Total number of conflicting pairs.
    pub fn conflict_count(&self) -> usize {
        self.conflict_count
    }

    /// Sorted higher-indexed neighbors of point `i`.
    pub fn neighbors_of(&self, i: usize) -> &[u32] {
        &self.neighbors[i]
    }

    /// Iterate all conflict pairs in canonical `(i, j)` order with `i < j`.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.neighbors
            .iter()
            .enumerate()
            .flat_map(|(i, js)| js.iter().map(move |&j| (i as u32, j)))
    }
}

/// Find all points `j > i` within `spacing` meters of point `i`.
fn conflicting_neighbors(
    tree: &RTree<IndexedPoint>,
    points: &[TreePoint],
    i: usize,
    spacing: f64,
) -> Vec<u32> {
    let p = &points[i];
    let envelope = search_envelope(p, spacing);

    let mut out: Vec<u32> = tree
        .locate_in_envelope_intersecting(&envelope)
        .filter(|entry| entry.data as usize > i)
        .filter(|entry| haversine_distance(p, &points[entry.data as usize]) < spacing)
        .map(|entry| entry.data)
        .collect();

    // R-tree traversal order is not index order
    out.sort_unstable();
    out
}

/// Degree-space envelope guaranteed to contain every point within `radius_m`
/// meters of `p` on the haversine sphere.
///
/// Latitude: haversine distance is bounded below by `R * |dlat|`, so
/// `radius_m / DEGREE_LENGTH_M` degrees suffices exactly. Longitude: bounded
/// below by `2R * sin(dlng/2) * cos(lat_max)` over the latitude band, which
/// inverts to the span used here; near the poles (or across the
/// antimeridian) the envelope falls back to the full longitude range.
fn search_envelope(p: &TreePoint, radius_m: f64) -> AABB<[f64; 2]> {
    let lat_radius = radius_m / DEGREE_LENGTH_M;

    let band_max_lat = (p.latitude.abs() + lat_radius).min(90.0);
    let cos_band = band_max_lat.to_radians().cos();

    let lng_radius = if cos_band <= 0.0 {
        180.0
    } else {
        let s = radius_m / (2.0 * EARTH_RADIUS_M * cos_band);
        if s >= 1.0 {
            180.0
        } else {
            2.0 * s.asin().to_degrees()
        }
    };

    let (min_lng, max_lng) = if p.longitude - lng_radius < -180.0 || p.longitude + lng_radius > 180.0
    {
        (-180.0, 180.0)
    } else {
        (p.longitude - lng_radius, p.longitude + lng_radius)
    };

    AABB::from_corners(
        [min_lng, p.latitude - lat_radius],
        [max_lng, p.latitude + lat_radius],
    )
}
