//! Feasibility table generation.
//!
//! Sweeps every valid parameter point within a count bound `L` and a
//! capacity bound `D`, asks the [`FeasibilityOracle`] about each one and
//! persists the verdicts as text, one record per line:
//!
//! ```text
//! n1 n2 n3 n4 n5 p1 p2 p3 true|false
//! ```
//!
//! Records follow the enumeration order of [`ParameterPoints`], so the
//! line index of a record is the [`rank`] of its point.
//!
//! # Key Components
//!
//! - **Configuration**: [`TableConfig`] — bounds, parallelism, solver limits
//! - **Enumeration**: [`ParameterPoints`], [`rank`], [`point_at`]
//! - **Generation**: [`TableGenerator`], [`generate_table`]
//! - **Storage**: [`FeasibilityTable`], [`FeasibilityRecord`]
//! - **Verification**: [`audit_sample`]
//!
//! [`FeasibilityOracle`]: crate::oracle::FeasibilityOracle

mod audit;
mod config;
mod generator;
mod points;
mod record;
mod store;

pub use audit::audit_sample;
pub use config::TableConfig;
pub use generator::{generate_table, TableGenerator};
pub use points::{
    binomial, capacity_block, count_tuples, point_at, rank, valid_point_count, ParameterPoints,
};
pub use record::FeasibilityRecord;
pub use store::FeasibilityTable;
