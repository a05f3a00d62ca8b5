//! Feasibility oracle.
//!
//! Answers one question per [`ParameterPoint`]: can five item types be
//! split so that the unallocated remainder seen by each of three budgets
//! fits its capacity? The answer comes from solving the allocation ILP
//! built by [`build_allocation_model`] with any [`IlpSolver`].
//!
//! [`IlpSolver`]: crate::ilp::IlpSolver

mod allocation;
mod point;
mod runner;

pub use allocation::{build_allocation_model, ALLOCATION_VARS, BUDGET_VIEWS, TYPE_SPLITS};
pub use point::{ParameterPoint, BUDGETS, ITEM_TYPES};
pub use runner::{is_feasible, FeasibilityOracle};
