//! Crate-wide error type.

use crate::ilp::SolverStatus;
use crate::oracle::ParameterPoint;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{name} must be in [0, {max}], got {value}", max = u32::MAX)]
    InvalidBound { name: &'static str, value: i64 },
    #[error("Invalid solver configuration: {0}")]
    Config(String),
    #[error("Solver could not decide point ({point}): status {status}")]
    Solver {
        point: ParameterPoint,
        status: SolverStatus,
    },
    #[error("IO error, more details: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed record on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Record on line {line} is out of order: expected ({expected}), found ({found})")]
    Order {
        line: usize,
        expected: ParameterPoint,
        found: ParameterPoint,
    },
    #[error("Table holds {found} records, expected {expected}")]
    Incomplete { expected: u64, found: u64 },
}
