//! MWIS model encoding and solution decoding.
//!
//! Translates per-tree weights plus the conflict graph into a
//! solver-agnostic binary linear model, and translates a solver's variable
//! assignment back into a keep/remove labeling. Both directions are pure
//! transforms with no internal state.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThinningError};
use crate::graph::ConflictGraph;

/// A binary-variable linear model for maximum-weight independent set.
///
/// One binary variable per point, objective `maximize Σ weight[i]·x[i]`,
/// and one constraint `x[i] + x[j] <= 1` per conflict pair. Constraints are
/// emitted one per edge, never merged across overlapping conflicts.
#[derive(Debug, Clone)]
pub struct MwisModel {
    weights: Vec<f64>,
    constraints: Vec<(u32, u32)>,
}

impl MwisModel {
    /// Encode weights and a conflict graph into a model.
    ///
    /// Weights may be zero or negative; the encoder places no sign
    /// restriction on objective coefficients.
    ///
    /// # Errors
    /// [`ThinningError::WeightCountMismatch`] if `weights.len()` differs
    /// from the number of points the graph was built over.
    pub fn encode(weights: &[f64], graph: &ConflictGraph) -> Result<Self> {
        if weights.len() != graph.num_points() {
            return Err(ThinningError::WeightCountMismatch {
                points: graph.num_points(),
                weights: weights.len(),
            });
        }

        Ok(Self {
            weights: weights.to_vec(),
            constraints: graph.edges().collect(),
        })
    }

    /// Number of binary decision variables (one per point).
    pub fn num_variables(&self) -> usize {
        self.weights.len()
    }

    /// Number of pairwise exclusion constraints (one per conflict pair).
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Objective coefficient per variable.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Exclusion constraints as canonical `(i, j)` pairs, `i < j`.
    pub fn constraints(&self) -> &[(u32, u32)] {
        &self.constraints
    }
}

/// Termination status reported by a solver backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Proven optimal solution.
    Optimal,
    /// Feasible but not proven optimal (e.g. stopped at a limit).
    Feasible,
    /// No feasible solution exists.
    Infeasible,
    /// The backend failed without classifying the model.
    Error,
}

impl SolveStatus {
    /// Whether the status carries a usable variable assignment.
    pub fn has_solution(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// A solver's answer for one model: per-variable values in `[0, 1]`,
/// the reported objective value, and the termination status.
///
/// Values may be near-integral rather than exact (continuous relaxations
/// returning 0.999999); decoding thresholds at 0.5.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub values: Vec<f64>,
    pub objective: f64,
    pub status: SolveStatus,
}

/// The keep/remove labeling for each candidate tree, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    keep: Vec<bool>,
}

impl Selection {
    /// Whether tree `i` is retained.
    pub fn is_kept(&self, i: usize) -> bool {
        self.keep[i]
    }

    /// Keep flags in input order.
    pub fn keep_flags(&self) -> &[bool] {
        &self.keep
    }

    /// Indices of retained trees, ascending.
    pub fn kept_indices(&self) -> Vec<usize> {
        self.keep
            .iter()
            .enumerate()
            .filter(|(_, &k)| k)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of retained trees.
    pub fn kept_count(&self) -> usize {
        self.keep.iter().filter(|&&k| k).count()
    }

    /// Number of removed trees.
    pub fn removed_count(&self) -> usize {
        self.keep.len() - self.kept_count()
    }

    /// Total number of trees labeled.
    pub fn len(&self) -> usize {
        self.keep.len()
    }

    /// Whether the labeling is empty (N = 0).
    pub fn is_empty(&self) -> bool {
        self.keep.is_empty()
    }

    /// Sum of `weights` over retained trees.
    pub fn total_weight(&self, weights: &[f64]) -> f64 {
        self.keep
            .iter()
            .zip(weights)
            .filter(|(&k, _)| k)
            .map(|(_, &w)| w)
            .sum()
    }
}

/// Decode a solver assignment into a keep/remove labeling.
///
/// Each variable value is thresholded strictly at 0.5: `0.9999997` decodes
/// to keep, exactly `0.5` decodes to remove. A status without a usable
/// solution is surfaced as [`ThinningError::NoSolution`], never as a
/// default all-remove labeling.
pub fn decode_selection(model: &MwisModel, assignment: &Assignment) -> Result<Selection> {
    if !assignment.status.has_solution() {
        return Err(ThinningError::NoSolution {
            status: assignment.status,
        });
    }
    if assignment.values.len() != model.num_variables() {
        return Err(ThinningError::AssignmentLengthMismatch {
            expected: model.num_variables(),
            got: assignment.values.len(),
        });
    }

    Ok(Selection {
        keep: assignment.values.iter().map(|&v| v > 0.5).collect(),
    })
}
