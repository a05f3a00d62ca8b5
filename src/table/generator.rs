//! Table generation loop.

use super::config::TableConfig;
use super::points::{valid_point_count, ParameterPoints};
use super::record::FeasibilityRecord;
use super::store::FeasibilityTable;
use crate::error::Result;
use crate::ilp::{BranchAndBoundSolver, IlpSolver};
use crate::oracle::FeasibilityOracle;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Sweeps the parameter space and records one verdict per valid point.
///
/// # Examples
///
/// ```
/// use ilr_table::table::{TableConfig, TableGenerator};
///
/// let mut artifact = Vec::new();
/// let table = TableGenerator::new()
///     .generate(&TableConfig::new(1, 0), &mut artifact)
///     .unwrap();
///
/// assert_eq!(table.len(), 6);
/// assert!(String::from_utf8(artifact).unwrap().starts_with("0 0 0 0 0 0 0 0 true\n"));
/// ```
#[derive(Debug, Clone)]
pub struct TableGenerator<S = BranchAndBoundSolver> {
    oracle: FeasibilityOracle<S>,
}

impl TableGenerator<BranchAndBoundSolver> {
    /// Generator backed by the bundled solver with default limits.
    pub fn new() -> Self {
        Self::with_oracle(FeasibilityOracle::new())
    }
}

impl Default for TableGenerator<BranchAndBoundSolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: IlpSolver + Sync> TableGenerator<S> {
    pub fn with_oracle(oracle: FeasibilityOracle<S>) -> Self {
        Self { oracle }
    }

    pub fn oracle(&self) -> &FeasibilityOracle<S> {
        &self.oracle
    }

    /// Runs the sweep for `config`, writing records to `sink`.
    ///
    /// The configuration is validated before anything is written. On a
    /// solver or I/O error the run stops; whatever reached `sink` by then
    /// is a truncated table and must be discarded.
    pub fn generate<W: Write>(&self, config: &TableConfig, mut sink: W) -> Result<FeasibilityTable> {
        config.validate()?;
        let (l, d) = config.bounds()?;
        let total = valid_point_count(l, d);
        info!("generating feasibility table for L={l} D={d}: {total} points");
        let start_time = Instant::now();

        let verdicts = if config.parallel {
            self.generate_parallel(l, d, &mut sink)?
        } else {
            self.generate_sequential(l, d, &mut sink)?
        };
        sink.flush()?;

        let table = FeasibilityTable::from_verdicts(l, d, verdicts)?;
        info!(
            "table L={l} D={d} done: {} of {} points feasible in {} ms",
            table.feasible_count(),
            table.len(),
            start_time.elapsed().as_millis()
        );
        Ok(table)
    }

    /// Runs the sweep into `dir/ilr_{L}_{D}.txt`, truncating any previous
    /// artifact, and returns its path with the table.
    pub fn generate_in_dir(
        &self,
        config: &TableConfig,
        dir: impl AsRef<Path>,
    ) -> Result<(PathBuf, FeasibilityTable)> {
        // Reject bad bounds before the artifact is created.
        config.validate()?;
        let path = dir.as_ref().join(config.artifact_name());
        let file = File::create(&path)?;
        let table = self.generate(config, BufWriter::new(file))?;
        info!("wrote {}", path.display());
        Ok((path, table))
    }

    fn generate_sequential<W: Write>(&self, l: u32, d: u32, sink: &mut W) -> Result<Vec<bool>> {
        let mut verdicts = Vec::with_capacity(ParameterPoints::new(l, d).len());
        for n1 in 0..=l {
            let before = verdicts.len();
            for point in ParameterPoints::slice(l, d, n1) {
                let feasible = self.oracle.is_feasible(&point)?;
                writeln!(sink, "{}", FeasibilityRecord::new(point, feasible))?;
                verdicts.push(feasible);
            }
            debug!("slice n1={n1}: {} points", verdicts.len() - before);
        }
        Ok(verdicts)
    }

    #[cfg(feature = "parallel")]
    fn generate_parallel<W: Write>(&self, l: u32, d: u32, sink: &mut W) -> Result<Vec<bool>> {
        let slices: Vec<Vec<FeasibilityRecord>> = (0..=l)
            .into_par_iter()
            .map(|n1| self.solve_slice(l, d, n1))
            .collect::<Result<_>>()?;

        let mut verdicts = Vec::with_capacity(slices.iter().map(Vec::len).sum());
        for record in slices.into_iter().flatten() {
            writeln!(sink, "{record}")?;
            verdicts.push(record.feasible);
        }
        Ok(verdicts)
    }

    #[cfg(not(feature = "parallel"))]
    fn generate_parallel<W: Write>(&self, l: u32, d: u32, sink: &mut W) -> Result<Vec<bool>> {
        log::warn!("`parallel` feature is disabled; generating sequentially");
        self.generate_sequential(l, d, sink)
    }

    #[cfg(feature = "parallel")]
    fn solve_slice(&self, l: u32, d: u32, n1: u32) -> Result<Vec<FeasibilityRecord>> {
        let records = ParameterPoints::slice(l, d, n1)
            .map(|point| Ok(FeasibilityRecord::new(point, self.oracle.is_feasible(&point)?)))
            .collect::<Result<Vec<_>>>()?;
        debug!("slice n1={n1}: {} points", records.len());
        Ok(records)
    }
}

/// Generates `ilr_{L}_{D}.txt` in the working directory with the bundled
/// solver and returns the table.
pub fn generate_table(count_bound: i64, capacity_bound: i64) -> Result<FeasibilityTable> {
    let config = TableConfig::new(count_bound, capacity_bound);
    TableGenerator::new()
        .generate_in_dir(&config, ".")
        .map(|(_, table)| table)
}
