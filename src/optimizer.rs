//! End-to-end thinning optimization pipeline.
//!
//! Validate → build conflict graph → encode MWIS model → solve → decode.
//! The pipeline is a pure transform over the input point array; the only
//! potentially long-running step is the solver call.

use log::{debug, info};

use crate::error::{Result, ThinningError};
use crate::graph::ConflictGraph;
use crate::model::{decode_selection, MwisModel, Selection};
use crate::solver::MwisSolver;
use crate::{ThinningConfig, TreePoint};

/// Outcome of one thinning optimization run.
#[derive(Debug, Clone)]
pub struct ThinningResult {
    /// Keep/remove labeling in input order.
    pub selection: Selection,
    /// Objective value reported by the solver (total retained weight).
    pub objective: f64,
    /// Number of conflicting pairs in the spatial graph, for diagnostics.
    pub conflict_count: usize,
}

/// Select the trees to retain.
///
/// Maximizes total retained weight subject to no two retained trees being
/// closer than `config.spacing_m` meters (great-circle). Point identity is
/// the input index; the result labels every input point in order.
///
/// # Errors
/// Precondition violations (non-positive spacing, non-finite coordinates or
/// weights) are rejected before graph construction. A solver that finds no
/// feasible solution surfaces as [`ThinningError::NoSolution`].
///
/// # Example
/// ```
/// use treethin::{optimize, MilpSolver, ThinningConfig, TreePoint};
///
/// let points = vec![
///     TreePoint::new(35.7800, 137.6500, 14.5),
///     TreePoint::new(35.7900, 137.6500, 18.0),
/// ];
/// let config = ThinningConfig { spacing_m: 10.0 };
/// let result = optimize(&points, &config, &MilpSolver::new()).unwrap();
/// // ~1.1 km apart, no conflict: both retained
/// assert_eq!(result.selection.kept_count(), 2);
/// ```
pub fn optimize(
    points: &[TreePoint],
    config: &ThinningConfig,
    solver: &dyn MwisSolver,
) -> Result<ThinningResult> {
    validate(points, config)?;

    let graph = ConflictGraph::build(points, config);
    info!(
        "conflict graph: {} candidates, {} pairs closer than {} m",
        points.len(),
        graph.conflict_count(),
        config.spacing_m
    );

    let weights: Vec<f64> = points.iter().map(|p| p.weight).collect();
    let model = MwisModel::encode(&weights, &graph)?;
    debug!(
        "model: {} binary variables, {} exclusion constraints",
        model.num_variables(),
        model.num_constraints()
    );

    let assignment = solver.solve(&model)?;
    let selection = decode_selection(&model, &assignment)?;

    info!(
        "{}: kept {} of {} trees (objective {:.2})",
        solver.name(),
        selection.kept_count(),
        selection.len(),
        assignment.objective
    );

    Ok(ThinningResult {
        selection,
        objective: assignment.objective,
        conflict_count: graph.conflict_count(),
    })
}

/// Fail fast on malformed input; no partial recovery.
fn validate(points: &[TreePoint], config: &ThinningConfig) -> Result<()> {
    if !(config.spacing_m > 0.0) || !config.spacing_m.is_finite() {
        return Err(ThinningError::NonPositiveSpacing(config.spacing_m));
    }

    for (index, p) in points.iter().enumerate() {
        if !p.has_valid_coordinates() {
            return Err(ThinningError::InvalidCoordinate {
                index,
                latitude: p.latitude,
                longitude: p.longitude,
            });
        }
        if !p.weight.is_finite() {
            return Err(ThinningError::InvalidWeight {
                index,
                weight: p.weight,
            });
        }
    }

    Ok(())
}
