//! Synthetic forest stand generator for stress testing and benchmarking.
//!
//! Generates candidate-tree point sets with controllable density around an
//! origin, seeded for reproducibility.
//!
//! Feature-gated behind `synthetic` — not included in production builds.
//!
//! # Example
//!
//! ```rust
//! use treethin::synthetic::StandScenario;
//!
//! let scenario = StandScenario {
//!     origin: (35.78, 137.65),
//!     tree_count: 500,
//!     extent_m: 400.0,
//!     height_range_m: (8.0, 30.0),
//!     seed: 42,
//! };
//!
//! let points = scenario.generate();
//! assert_eq!(points.len(), 500);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geo_utils::DEGREE_LENGTH_M;
use crate::TreePoint;

/// Configuration for a synthetic stand of candidate trees.
#[derive(Debug, Clone)]
pub struct StandScenario {
    /// Center of the stand as `(latitude, longitude)` in degrees.
    pub origin: (f64, f64),
    /// Number of candidate trees to generate.
    pub tree_count: usize,
    /// Side length of the square stand in meters.
    pub extent_m: f64,
    /// Uniform range for tree heights in meters (used as weights).
    pub height_range_m: (f64, f64),
    /// RNG seed for reproducibility.
    pub seed: u64,
}

impl StandScenario {
    /// Generate the candidate trees.
    ///
    /// Positions are uniform over the square; heights uniform over
    /// `height_range_m`. Same seed, same stand.
    pub fn generate(&self) -> Vec<TreePoint> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let (lat0, lng0) = self.origin;

        let half_lat = self.extent_m / 2.0 / DEGREE_LENGTH_M;
        let half_lng = half_lat / lat0.to_radians().cos().max(0.01);
        let (h_min, h_max) = self.height_range_m;

        (0..self.tree_count)
            .map(|_| {
                TreePoint::new(
                    lat0 + rng.gen_range(-half_lat..=half_lat),
                    lng0 + rng.gen_range(-half_lng..=half_lng),
                    rng.gen_range(h_min..=h_max),
                )
            })
            .collect()
    }
}
