//! Table generation configuration.

use crate::error::{Error, Result};
use crate::ilp::SolverConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for one table generation run.
///
/// Bounds are signed so that a negative request is rejected by
/// [`validate`](Self::validate) instead of wrapping.
///
/// # Examples
///
/// ```
/// use ilr_table::table::TableConfig;
///
/// let config = TableConfig::new(8, 1).with_parallel(true);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.artifact_name(), "ilr_8_1.txt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableConfig {
    /// Bound `L` on `n1 + ... + n5`.
    pub count_bound: i64,

    /// Bound `D` on each capacity.
    pub capacity_bound: i64,

    /// Whether to solve `n1` slices in parallel using rayon.
    ///
    /// Needs the `parallel` feature; output is identical either way.
    pub parallel: bool,

    /// Limits handed to the solver for every point.
    pub solver: SolverConfig,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            count_bound: 8,
            capacity_bound: 1,
            parallel: false,
            solver: SolverConfig::default(),
        }
    }
}

impl TableConfig {
    pub fn new(count_bound: i64, capacity_bound: i64) -> Self {
        Self {
            count_bound,
            capacity_bound,
            ..Self::default()
        }
    }

    pub fn with_count_bound(mut self, bound: i64) -> Self {
        self.count_bound = bound;
        self
    }

    pub fn with_capacity_bound(mut self, bound: i64) -> Self {
        self.capacity_bound = bound;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.bounds()?;
        self.solver.validate().map_err(Error::Config)
    }

    /// The validated bounds `(L, D)`.
    pub fn bounds(&self) -> Result<(u32, u32)> {
        Ok((
            to_bound("count_bound", self.count_bound)?,
            to_bound("capacity_bound", self.capacity_bound)?,
        ))
    }

    /// File name of the artifact: `ilr_{L}_{D}.txt`.
    ///
    /// Equal bounds always give the same name; different bounds never do.
    pub fn artifact_name(&self) -> String {
        format!("ilr_{}_{}.txt", self.count_bound, self.capacity_bound)
    }
}

fn to_bound(name: &'static str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::InvalidBound { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TableConfig::default();
        assert_eq!(config.count_bound, 8);
        assert_eq!(config.capacity_bound, 1);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bounds() {
        assert_eq!(TableConfig::new(3, 0).bounds().unwrap(), (3, 0));
    }

    #[test]
    fn test_validate_negative_count_bound() {
        let config = TableConfig::default().with_count_bound(-1);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidBound {
                name: "count_bound",
                value: -1
            })
        ));
    }

    #[test]
    fn test_validate_negative_capacity_bound() {
        let config = TableConfig::default().with_capacity_bound(-4);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidBound {
                name: "capacity_bound",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_oversized_bound() {
        let config = TableConfig::new(i64::from(u32::MAX) + 1, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_solver_config() {
        let config =
            TableConfig::default().with_solver(SolverConfig::default().with_time_limit_ms(-5));
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_artifact_name_is_stable() {
        assert_eq!(TableConfig::new(8, 1).artifact_name(), "ilr_8_1.txt");
        assert_eq!(
            TableConfig::new(8, 1).artifact_name(),
            TableConfig::new(8, 1).with_parallel(true).artifact_name()
        );
    }

    #[test]
    fn test_artifact_names_do_not_collide() {
        let mut names = std::collections::HashSet::new();
        for l in 0..30 {
            for d in 0..30 {
                assert!(names.insert(TableConfig::new(l, d).artifact_name()));
            }
        }
    }
}
