//! Integer Linear Programming (ILP) layer.
//!
//! Provides a small modeling layer for integer linear programs and a
//! solver interface with one bundled implementation.
//!
//! # Key Components
//!
//! - **Variables**: [`IntVar`] — integer decision variables
//! - **Expressions**: [`LinearExpr`] — `sum(coef * var) + constant`
//! - **Constraints**: [`Constraint`] — `<=` and `==` over linear expressions
//! - **Model**: [`IlpModel`] — container for variables, constraints, objective
//! - **Solver**: [`IlpSolver`] trait, [`BranchAndBoundSolver`]
//!
//! # Design
//!
//! The [`IlpSolver`] trait separates model construction from solving, so
//! an external backend can be plugged in without touching the code that
//! builds models. [`SolverStatus`] keeps "no solution exists" apart from
//! "the solver could not decide".
//!
//! # References
//!
//! Wolsey (1998), "Integer Programming", ch. 7 (branch and bound)

mod model;
mod solver;
mod variables;

pub use model::{Constraint, IlpModel, LinearExpr, Objective};
pub use solver::{
    BranchAndBoundSolver, IlpSolution, IlpSolver, SolverConfig, SolverStatus,
};
pub use variables::IntVar;
