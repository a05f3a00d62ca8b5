//! Precomputed feasibility tables for a five-type, three-budget
//! allocation problem.
//!
//! For every point `(n1..n5, p1..p3)` of a bounded parameter space the
//! crate decides whether five item types can be split so that the
//! unallocated remainder seen by each of three budgets fits its capacity,
//! and stores the verdicts as a flat text table for O(1) lookups later.
//!
//! - **ILP**: Modeling layer for integer linear programs with a pluggable
//!   solver trait and a bundled branch-and-bound solver.
//! - **Oracle**: Builds the allocation model for one point and turns the
//!   solver status into a verdict, never confusing solver failure with
//!   infeasibility.
//! - **Table**: Enumerates the parameter space in a fixed order, drives the
//!   oracle (optionally in parallel), writes and loads table artifacts.
//!
//! # Example
//!
//! ```
//! use ilr_table::oracle::ParameterPoint;
//! use ilr_table::table::{TableConfig, TableGenerator};
//!
//! let table = TableGenerator::new()
//!     .generate(&TableConfig::new(2, 1), std::io::sink())
//!     .unwrap();
//! let point = ParameterPoint::new([1, 0, 0, 0, 1], [1, 1, 0]);
//! assert_eq!(table.get(&point), Some(true));
//! ```

pub mod error;
pub mod ilp;
pub mod oracle;
pub mod table;

pub use error::{Error, Result};
