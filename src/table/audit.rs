//! Sampled re-verification of a stored table.

use super::points::point_at;
use super::record::FeasibilityRecord;
use super::store::FeasibilityTable;
use crate::error::Result;
use crate::ilp::IlpSolver;
use crate::oracle::FeasibilityOracle;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Re-solves `samples` points drawn uniformly (with replacement) from the
/// table and returns the stored records the oracle now disagrees with.
///
/// Meant for artifacts loaded from disk, e.g. produced by an older build
/// or another solver backend. The same `seed` always draws the same points.
///
/// # Examples
///
/// ```
/// use ilr_table::oracle::FeasibilityOracle;
/// use ilr_table::table::{audit_sample, TableConfig, TableGenerator};
///
/// let table = TableGenerator::new()
///     .generate(&TableConfig::new(2, 1), std::io::sink())
///     .unwrap();
/// let mismatches = audit_sample(&table, &FeasibilityOracle::new(), 20, 7).unwrap();
/// assert!(mismatches.is_empty());
/// ```
pub fn audit_sample<S: IlpSolver>(
    table: &FeasibilityTable,
    oracle: &FeasibilityOracle<S>,
    samples: usize,
    seed: u64,
) -> Result<Vec<FeasibilityRecord>> {
    if table.is_empty() {
        return Ok(Vec::new());
    }
    let (l, d) = (table.count_bound(), table.capacity_bound());
    let total = table.len() as u64;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut mismatches = Vec::new();
    for _ in 0..samples {
        let index = rng.random_range(0..total);
        let Some(point) = point_at(index, l, d) else {
            continue;
        };
        let Some(stored) = table.get(&point) else {
            continue;
        };
        if oracle.is_feasible(&point)? != stored {
            warn!("stored verdict {stored} for ({point}) does not match a fresh solve");
            mismatches.push(FeasibilityRecord::new(point, stored));
        }
    }
    info!(
        "audited {samples} samples of table L={l} D={d}: {} mismatches",
        mismatches.len()
    );
    Ok(mismatches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{valid_point_count, TableConfig, TableGenerator};

    #[test]
    fn test_audit_clean_table() {
        let table = TableGenerator::new()
            .generate(&TableConfig::new(2, 1), std::io::sink())
            .unwrap();
        let mismatches = audit_sample(&table, &FeasibilityOracle::new(), 50, 42).unwrap();
        assert!(mismatches.is_empty());
    }

    #[test]
    fn test_audit_finds_flipped_verdicts() {
        // Every verdict inverted: each sampled point must be reported.
        let table = TableGenerator::new()
            .generate(&TableConfig::new(1, 1), std::io::sink())
            .unwrap();
        let flipped: Vec<bool> = table.records().map(|r| !r.feasible).collect();
        let corrupted = FeasibilityTable::from_verdicts(1, 1, flipped).unwrap();

        let mismatches = audit_sample(&corrupted, &FeasibilityOracle::new(), 10, 3).unwrap();
        assert_eq!(mismatches.len(), 10);
        for record in mismatches {
            assert_eq!(corrupted.get(&record.point), Some(record.feasible));
            assert_ne!(table.get(&record.point), Some(record.feasible));
        }
    }

    #[test]
    fn test_audit_is_reproducible() {
        let n = valid_point_count(1, 1) as usize;
        let corrupted = FeasibilityTable::from_verdicts(1, 1, vec![false; n]).unwrap();
        let oracle = FeasibilityOracle::new();
        let a = audit_sample(&corrupted, &oracle, 25, 11).unwrap();
        let b = audit_sample(&corrupted, &oracle, 25, 11).unwrap();
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }
}
