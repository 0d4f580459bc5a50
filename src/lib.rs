//! # treethin
//!
//! Tree selection for forest thinning using Maximum-Weight Independent Set
//! (MWIS) optimization.
//!
//! Given candidate trees as geographic points with weights (tree height or
//! an explicit merit value), this library selects the subset to retain that
//! maximizes total weight while keeping every pair of retained trees at
//! least a configured spacing apart.
//!
//! This library provides:
//! - Haversine great-circle distance over WGS84 coordinates
//! - Spatial conflict graph construction with an R-tree index
//! - Encoding of the conflict graph into a binary linear model
//! - A pluggable solver interface with a bundled pure-Rust MILP backend
//! - Parallel graph construction (feature `parallel`)
//!
//! ## Features
//!
//! - **`parallel`** - Parallel conflict-graph construction with rayon
//! - **`synthetic`** - Seeded synthetic stand generation for benches and
//!   stress tests
//!
//! ## Quick Start
//!
//! ```rust
//! use treethin::{optimize, MilpSolver, ThinningConfig, TreePoint};
//!
//! // Two trees ~5 m apart and one far away, threshold 10 m
//! let points = vec![
//!     TreePoint::new(35.780000, 137.650000, 12.0),
//!     TreePoint::new(35.780045, 137.650000, 17.5),
//!     TreePoint::new(35.781000, 137.650000, 15.0),
//! ];
//! let config = ThinningConfig { spacing_m: 10.0 };
//!
//! let result = optimize(&points, &config, &MilpSolver::new()).unwrap();
//! // The taller of the close pair wins, the distant tree is free
//! assert_eq!(result.selection.kept_indices(), vec![1, 2]);
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{Result, ThinningError};

// Geographic utilities (haversine distance, bounds)
pub mod geo_utils;

// Spatial conflict graph construction
pub mod graph;
pub use graph::ConflictGraph;

// MWIS model encoding and solution decoding
pub mod model;
pub use model::{decode_selection, Assignment, MwisModel, Selection, SolveStatus};

// Solver abstraction and bundled backend
pub mod solver;
pub use solver::{MilpSolver, MwisSolver};

// End-to-end pipeline
pub mod optimizer;
pub use optimizer::{optimize, ThinningResult};

// Synthetic stand generation for stress testing and benchmarking
#[cfg(feature = "synthetic")]
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A candidate tree: WGS84 coordinates plus an optimization weight.
///
/// Identity is the index in the input sequence (`0..N-1`, stable, assigned
/// by input order); points are immutable once loaded.
///
/// # Example
/// ```
/// use treethin::TreePoint;
/// let tree = TreePoint::new(35.78, 137.65, 14.2); // Kiso valley, 14.2 m tall
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreePoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Objective coefficient: tree height in meters or an explicit weight.
    pub weight: f64,
}

impl TreePoint {
    /// Create a new candidate tree.
    pub fn new(latitude: f64, longitude: f64, weight: f64) -> Self {
        Self {
            latitude,
            longitude,
            weight,
        }
    }

    /// Check that the coordinates are finite and within WGS84 range.
    pub fn has_valid_coordinates(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Configuration for a thinning run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThinningConfig {
    /// Minimum spacing between retained trees in meters. Pairs strictly
    /// closer than this conflict; pairs at exactly this distance do not.
    /// Default: 10.0
    pub spacing_m: f64,
}

impl Default for ThinningConfig {
    fn default() -> Self {
        Self { spacing_m: 10.0 }
    }
}

/// Bounding box for a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from points. Returns `None` for an empty slice.
    pub fn from_points(points: &[TreePoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Center of the bounds.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}
