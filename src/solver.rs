//! Abstract solver interface and the bundled MILP backend.
//!
//! The optimizer depends only on [`MwisSolver`]; swapping in a different
//! engine (a commercial MIP solver, a custom branch-and-bound) means
//! implementing the trait, not touching the graph builder or the encoder.

use good_lp::{
    microlp, variable, variables, Expression, ResolutionError, Solution, SolverModel, Variable,
};
use log::debug;

use crate::error::{Result, ThinningError};
use crate::model::{Assignment, MwisModel, SolveStatus};

/// A backend capable of solving a binary-variable linear model.
///
/// The call is synchronous and opaque to the core; cancellation and time
/// limits are the host's concern.
pub trait MwisSolver {
    /// Solve the model, returning a per-variable assignment and status.
    ///
    /// An infeasible model is a valid answer (an [`Assignment`] with
    /// [`SolveStatus::Infeasible`]); `Err` is reserved for backend
    /// failures.
    fn solve(&self, model: &MwisModel) -> Result<Assignment>;

    /// Backend name for logging and diagnostics.
    fn name(&self) -> &str;
}

/// The bundled mixed-integer solver, backed by `good_lp` with the pure-Rust
/// `microlp` engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct MilpSolver;

impl MilpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl MwisSolver for MilpSolver {
    fn solve(&self, model: &MwisModel) -> Result<Assignment> {
        let n = model.num_variables();

        // An empty model has the empty assignment as its trivial optimum;
        // don't bother the backend with it.
        if n == 0 {
            return Ok(Assignment {
                values: Vec::new(),
                objective: 0.0,
                status: SolveStatus::Optimal,
            });
        }

        let mut vars = variables!();
        let xs: Vec<Variable> = (0..n).map(|_| vars.add(variable().binary())).collect();

        let mut objective = Expression::with_capacity(n);
        for (&x, &w) in xs.iter().zip(model.weights()) {
            objective.add_mul(w, x);
        }

        let mut problem = vars.maximise(objective).using(microlp);
        for &(i, j) in model.constraints() {
            problem = problem.with((xs[i as usize] + xs[j as usize]).leq(1.0));
        }

        debug!(
            "{}: solving {} binary variables, {} constraints",
            self.name(),
            n,
            model.num_constraints()
        );

        match problem.solve() {
            Ok(solution) => {
                let values: Vec<f64> = xs.iter().map(|&x| solution.value(x)).collect();
                let objective = values
                    .iter()
                    .zip(model.weights())
                    .map(|(&v, &w)| v * w)
                    .sum();
                Ok(Assignment {
                    values,
                    objective,
                    status: SolveStatus::Optimal,
                })
            }
            Err(ResolutionError::Infeasible) => Ok(Assignment {
                values: Vec::new(),
                objective: f64::NAN,
                status: SolveStatus::Infeasible,
            }),
            Err(e) => Err(ThinningError::SolverFailure(e.to_string())),
        }
    }

    fn name(&self) -> &str {
        "good_lp/microlp"
    }
}
