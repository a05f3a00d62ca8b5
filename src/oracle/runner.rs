//! Feasibility decisions for single parameter points.

use super::allocation::build_allocation_model;
use super::point::ParameterPoint;
use crate::error::{Error, Result};
use crate::ilp::{BranchAndBoundSolver, IlpSolver, SolverConfig, SolverStatus};
use log::trace;

/// Decides feasibility of the allocation model, one point at a time.
///
/// Holds no state between calls: every query builds a fresh model and
/// hands it to the solver.
///
/// # Examples
///
/// ```
/// use ilr_table::oracle::{FeasibilityOracle, ParameterPoint};
///
/// let oracle = FeasibilityOracle::new();
/// assert!(oracle.is_feasible(&ParameterPoint::origin()).unwrap());
/// assert!(!oracle
///     .is_feasible(&ParameterPoint::new([0, 1, 0, 0, 0], [0, 0, 0]))
///     .unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct FeasibilityOracle<S = BranchAndBoundSolver> {
    solver: S,
    config: SolverConfig,
}

impl FeasibilityOracle<BranchAndBoundSolver> {
    /// Oracle backed by [`BranchAndBoundSolver`] with default limits.
    pub fn new() -> Self {
        Self::with_solver(BranchAndBoundSolver::new(), SolverConfig::default())
    }
}

impl Default for FeasibilityOracle<BranchAndBoundSolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: IlpSolver> FeasibilityOracle<S> {
    pub fn with_solver(solver: S, config: SolverConfig) -> Self {
        Self { solver, config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Whether the allocation model for `point` has a solution.
    ///
    /// `Ok(false)` only when the solver proves infeasibility. Every
    /// status that is not a verdict becomes [`Error::Solver`].
    pub fn is_feasible(&self, point: &ParameterPoint) -> Result<bool> {
        let model = build_allocation_model(point);
        let solution = self.solver.solve(&model, &self.config);
        trace!(
            "point ({point}): {} after {} nodes",
            solution.status,
            solution.nodes
        );

        match solution.status {
            SolverStatus::Optimal | SolverStatus::Feasible => Ok(true),
            SolverStatus::Infeasible => Ok(false),
            status => Err(Error::Solver {
                point: *point,
                status,
            }),
        }
    }
}

/// Feasibility of one point with the bundled solver and default limits.
pub fn is_feasible(point: &ParameterPoint) -> Result<bool> {
    FeasibilityOracle::new().is_feasible(point)
}
