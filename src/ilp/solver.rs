//! ILP solver interface and a branch-and-bound implementation.

use super::model::{Constraint, IlpModel, Objective};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Status of the solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolverStatus {
    /// Proven optimal solution found.
    Optimal,
    /// Feasible (but not necessarily optimal) solution found.
    Feasible,
    /// No feasible solution exists.
    Infeasible,
    /// Model is invalid or malformed.
    ModelInvalid,
    /// A variable has no finite upper bound after propagation.
    Unbounded,
    /// Solver exceeded its time or node limit without a result.
    Timeout,
    /// No result for unknown reasons.
    Unknown,
}

impl SolverStatus {
    /// Whether the status carries a solution.
    pub fn is_solution_found(self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::Feasible)
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverStatus::Optimal => "optimal",
            SolverStatus::Feasible => "feasible",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::ModelInvalid => "model invalid",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::Timeout => "timeout",
            SolverStatus::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Solution from an ILP solver.
#[derive(Debug, Clone)]
pub struct IlpSolution {
    /// Solver status.
    pub status: SolverStatus,
    /// Objective function value (if any).
    pub objective_value: Option<i64>,
    /// Integer variable assignments.
    pub values: HashMap<String, i64>,
    /// Search nodes explored.
    pub nodes: u64,
    /// Solve time in milliseconds.
    pub solve_time_ms: i64,
}

impl IlpSolution {
    /// Creates an empty solution with the given status.
    pub fn empty(status: SolverStatus) -> Self {
        Self {
            status,
            objective_value: None,
            values: HashMap::new(),
            nodes: 0,
            solve_time_ms: 0,
        }
    }

    /// Whether a feasible solution was found.
    pub fn is_solution_found(&self) -> bool {
        self.status.is_solution_found()
    }
}

/// Solver configuration.
///
/// # Examples
///
/// ```
/// use ilr_table::ilp::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_time_limit_ms(5_000)
///     .with_node_limit(100_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Maximum solve time in milliseconds.
    pub time_limit_ms: i64,
    /// Maximum number of search nodes. 0 = no limit.
    pub node_limit: u64,
    /// Stop after finding the first feasible solution.
    pub stop_after_first: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 60_000,
            node_limit: 0,
            stop_after_first: false,
        }
    }
}

impl SolverConfig {
    pub fn with_time_limit_ms(mut self, ms: i64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = nodes;
        self
    }

    pub fn with_stop_after_first(mut self, stop: bool) -> Self {
        self.stop_after_first = stop;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.time_limit_ms <= 0 {
            return Err(format!(
                "time_limit_ms must be positive, got {}",
                self.time_limit_ms
            ));
        }
        Ok(())
    }
}

/// Trait for ILP solver implementations.
///
/// Implementors decide feasibility and optimality of an [`IlpModel`].
/// Any failure to reach a verdict must be reported through a status
/// other than [`SolverStatus::Infeasible`].
pub trait IlpSolver {
    /// Solves the model and returns a solution.
    fn solve(&self, model: &IlpModel, config: &SolverConfig) -> IlpSolution;
}

/// Depth-first branch-and-bound over bounded integer domains.
///
/// Every node tightens variable bounds by propagating the linear
/// constraints to a fixpoint, then splits the smallest open domain in
/// half, upper half first. Subtrees whose objective bound cannot beat the
/// incumbent are pruned.
///
/// # Limitations
///
/// - Every variable must have a finite upper bound after root propagation,
///   otherwise the status is [`SolverStatus::Unbounded`]
/// - No LP relaxation: intended for small models with narrow domains
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchAndBoundSolver;

impl BranchAndBoundSolver {
    pub fn new() -> Self {
        Self
    }
}

impl IlpSolver for BranchAndBoundSolver {
    fn solve(&self, model: &IlpModel, config: &SolverConfig) -> IlpSolution {
        if model.validate().is_err() || config.validate().is_err() {
            return IlpSolution::empty(SolverStatus::ModelInvalid);
        }

        let start_time = Instant::now();
        let rows = normalize(model);
        let mut bounds: Vec<Bounds> = model
            .int_vars
            .iter()
            .map(|v| Bounds { lo: v.min, hi: v.max })
            .collect();

        let mut solution = IlpSolution::empty(SolverStatus::Unknown);

        if !propagate(&rows, &mut bounds) {
            solution.status = SolverStatus::Infeasible;
            solution.solve_time_ms = start_time.elapsed().as_millis() as i64;
            return solution;
        }
        if bounds.iter().any(|b| b.hi.is_none()) {
            solution.status = SolverStatus::Unbounded;
            solution.solve_time_ms = start_time.elapsed().as_millis() as i64;
            return solution;
        }

        // Minimization is solved as maximization of the negated weights.
        let (weights, sign) = objective_weights(model);

        let mut search = Search {
            rows: &rows,
            weights: &weights,
            config,
            start_time,
            nodes: 0,
            best: None,
            limit_hit: false,
            done: false,
        };
        search.explore(bounds);

        solution.nodes = search.nodes;
        solution.status = match (&search.best, search.limit_hit, search.done) {
            (Some(_), false, false) => SolverStatus::Optimal,
            (Some(_), _, _) if weights.iter().all(|&w| w == 0) => SolverStatus::Optimal,
            (Some(_), _, _) => SolverStatus::Feasible,
            (None, false, _) => SolverStatus::Infeasible,
            (None, true, _) => SolverStatus::Timeout,
        };
        if let Some((value, assignment)) = search.best {
            solution.objective_value = model.objective.as_ref().map(|_| sign * value);
            solution.values = model
                .int_vars
                .iter()
                .zip(assignment)
                .map(|(var, v)| (var.name.clone(), v))
                .collect();
        }
        solution.solve_time_ms = start_time.elapsed().as_millis() as i64;
        solution
    }
}

/// Current domain of one variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    lo: i64,
    hi: Option<i64>,
}

/// `sum(coef * x[idx]) <= rhs`, with constants folded into `rhs`.
#[derive(Debug, Clone)]
struct Row {
    terms: Vec<(usize, i64)>,
    rhs: i128,
}

impl Row {
    fn is_satisfied(&self, assignment: &[i64]) -> bool {
        let activity: i128 = self
            .terms
            .iter()
            .map(|&(idx, coef)| coef as i128 * assignment[idx] as i128)
            .sum();
        activity <= self.rhs
    }
}

/// Propagation sweeps before giving up on reaching a fixpoint.
const MAX_PROPAGATION_ROUNDS: usize = 1_000;

/// Checked for every this many nodes.
const TIME_CHECK_INTERVAL: u64 = 256;

fn normalize(model: &IlpModel) -> Vec<Row> {
    let mut rows = Vec::with_capacity(model.constraints.len());
    for constraint in &model.constraints {
        let expr = constraint.expr();
        let mut merged: Vec<(usize, i64)> = Vec::with_capacity(expr.terms.len());
        for (name, coef) in &expr.terms {
            // validate() guarantees the name resolves
            let Some(idx) = model.var_index(name) else {
                continue;
            };
            match merged.iter_mut().find(|(i, _)| *i == idx) {
                Some((_, c)) => *c += coef,
                None => merged.push((idx, *coef)),
            }
        }
        merged.retain(|&(_, c)| c != 0);

        match constraint {
            Constraint::LessEq { rhs, .. } => rows.push(Row {
                terms: merged,
                rhs: *rhs as i128 - expr.constant as i128,
            }),
            Constraint::Equal { rhs, .. } => {
                let rhs = *rhs as i128 - expr.constant as i128;
                let negated = merged.iter().map(|&(i, c)| (i, -c)).collect();
                rows.push(Row { terms: merged, rhs });
                rows.push(Row {
                    terms: negated,
                    rhs: -rhs,
                });
            }
        }
    }
    rows
}

fn objective_weights(model: &IlpModel) -> (Vec<i64>, i64) {
    let mut weights = vec![0i64; model.var_count()];
    let (terms, sign) = match &model.objective {
        Some(Objective::Maximize { terms }) => (terms.as_slice(), 1),
        Some(Objective::Minimize { terms }) => (terms.as_slice(), -1),
        None => (&[][..], 1),
    };
    for (name, coef) in terms {
        if let Some(idx) = model.var_index(name) {
            weights[idx] += sign * coef;
        }
    }
    (weights, sign)
}

/// Tightens `bounds` to a fixpoint. Returns `false` on conflict.
fn propagate(rows: &[Row], bounds: &mut [Bounds]) -> bool {
    for _ in 0..MAX_PROPAGATION_ROUNDS {
        let mut changed = false;
        for row in rows {
            match propagate_row(row, bounds) {
                Some(row_changed) => changed |= row_changed,
                None => return false,
            }
        }
        if !changed {
            break;
        }
    }
    true
}

/// Minimum contribution of one term, `None` for minus infinity.
fn min_contribution(coef: i64, b: Bounds) -> Option<i128> {
    if coef > 0 {
        Some(coef as i128 * b.lo as i128)
    } else {
        b.hi.map(|hi| coef as i128 * hi as i128)
    }
}

fn propagate_row(row: &Row, bounds: &mut [Bounds]) -> Option<bool> {
    let mut finite_sum: i128 = 0;
    let mut infinite = 0usize;
    for &(idx, coef) in &row.terms {
        match min_contribution(coef, bounds[idx]) {
            Some(c) => finite_sum += c,
            None => infinite += 1,
        }
    }
    if infinite == 0 && finite_sum > row.rhs {
        return None;
    }

    let mut changed = false;
    for &(idx, coef) in &row.terms {
        let own = min_contribution(coef, bounds[idx]);
        let rest = match own {
            Some(c) if infinite == 0 => finite_sum - c,
            None if infinite == 1 => finite_sum,
            _ => continue,
        };
        let slack = row.rhs - rest;
        let b = &mut bounds[idx];
        if coef > 0 {
            let new_hi = clamp_i64(div_floor(slack, coef as i128));
            if b.hi.is_none_or(|hi| new_hi < hi) {
                if new_hi < b.lo {
                    return None;
                }
                b.hi = Some(new_hi);
                changed = true;
            }
        } else {
            let new_lo = clamp_i64(div_ceil(slack, coef as i128));
            if new_lo > b.lo {
                if b.hi.is_some_and(|hi| new_lo > hi) {
                    return None;
                }
                b.lo = new_lo;
                changed = true;
            }
        }
    }
    Some(changed)
}

fn div_floor(a: i128, b: i128) -> i128 {
    let (q, r) = (a / b, a % b);
    if r != 0 && ((r < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

fn div_ceil(a: i128, b: i128) -> i128 {
    let (q, r) = (a / b, a % b);
    if r != 0 && ((r > 0) == (b > 0)) {
        q + 1
    } else {
        q
    }
}

fn clamp_i64(v: i128) -> i64 {
    v.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

struct Search<'a> {
    rows: &'a [Row],
    weights: &'a [i64],
    config: &'a SolverConfig,
    start_time: Instant,
    nodes: u64,
    /// Incumbent objective (in maximization form) and assignment.
    best: Option<(i64, Vec<i64>)>,
    limit_hit: bool,
    /// Stopped early on the first solution.
    done: bool,
}

impl Search<'_> {
    fn explore(&mut self, bounds: Vec<Bounds>) {
        if self.limit_hit || self.done {
            return;
        }
        self.nodes += 1;
        if self.config.node_limit > 0 && self.nodes > self.config.node_limit {
            self.limit_hit = true;
            return;
        }
        if self.nodes.is_multiple_of(TIME_CHECK_INTERVAL)
            && self.start_time.elapsed().as_millis() as i64 > self.config.time_limit_ms
        {
            self.limit_hit = true;
            return;
        }

        if let Some((incumbent, _)) = &self.best {
            if self.objective_bound(&bounds) <= *incumbent {
                return;
            }
        }

        let open = bounds
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.hi.filter(|&hi| hi > b.lo).map(|hi| (i, hi - b.lo)))
            .min_by_key(|&(i, width)| (width, i));

        let Some((var, _)) = open else {
            let assignment: Vec<i64> = bounds.iter().map(|b| b.lo).collect();
            if !self.rows.iter().all(|row| row.is_satisfied(&assignment)) {
                return;
            }
            let value = self.objective_bound(&bounds);
            if self.best.as_ref().is_none_or(|(best, _)| value > *best) {
                self.best = Some((value, assignment));
            }
            if self.config.stop_after_first {
                self.done = true;
            }
            return;
        };

        let Bounds { lo, hi } = bounds[var];
        let hi = hi.unwrap_or(lo);
        let mid = lo + (hi - lo) / 2;
        for (child_lo, child_hi) in [(mid + 1, hi), (lo, mid)] {
            let mut child = bounds.clone();
            child[var] = Bounds {
                lo: child_lo,
                hi: Some(child_hi),
            };
            if propagate(self.rows, &mut child) {
                self.explore(child);
            }
            if self.limit_hit || self.done {
                return;
            }
        }
    }

    /// Upper bound of the (maximization) objective over `bounds`.
    fn objective_bound(&self, bounds: &[Bounds]) -> i64 {
        self.weights
            .iter()
            .zip(bounds)
            .map(|(&w, b)| {
                if w > 0 {
                    w * b.hi.unwrap_or(b.lo)
                } else {
                    w * b.lo
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ilp::{IntVar, LinearExpr};

    fn knapsack() -> IlpModel {
        // max 5a + 4b + 3c s.t. 2a + 3b + c <= 5, 4a + b + 2c <= 11, 3a + 4b + 2c <= 8
        let mut model = IlpModel::new("knapsack");
        for name in ["a", "b", "c"] {
            model.add_int_var(IntVar::non_negative(name));
        }
        model.add_less_eq(
            LinearExpr::new().term("a", 2).term("b", 3).term("c", 1),
            5,
        );
        model.add_less_eq(
            LinearExpr::new().term("a", 4).term("b", 1).term("c", 2),
            11,
        );
        model.add_less_eq(
            LinearExpr::new().term("a", 3).term("b", 4).term("c", 2),
            8,
        );
        model.set_objective(Objective::Maximize {
            terms: vec![("a".into(), 5), ("b".into(), 4), ("c".into(), 3)],
        });
        model
    }

    #[test]
    fn test_knapsack_optimal() {
        let model = knapsack();
        let solution = BranchAndBoundSolver::new().solve(&model, &SolverConfig::default());

        assert_eq!(solution.status, SolverStatus::Optimal);
        // a = 2, b = 0, c = 1 -> 13 is the integer optimum
        assert_eq!(solution.objective_value, Some(13));
        assert!(model.is_satisfied_by(&solution.values));
    }

    #[test]
    fn test_minimize() {
        let mut model = IlpModel::new("min");
        model.add_int_var(IntVar::new("x", 0, 10));
        model.add_int_var(IntVar::new("y", 0, 10));
        // x + y >= 7  <=>  -x - y <= -7
        model.add_less_eq(LinearExpr::new().term("x", -1).term("y", -1), -7);
        model.set_objective(Objective::Minimize {
            terms: vec![("x".into(), 3), ("y".into(), 2)],
        });

        let solution = BranchAndBoundSolver::new().solve(&model, &SolverConfig::default());

        assert_eq!(solution.status, SolverStatus::Optimal);
        assert_eq!(solution.objective_value, Some(14));
        assert_eq!(solution.values["x"], 0);
        assert_eq!(solution.values["y"], 7);
    }

    #[test]
    fn test_infeasible() {
        let mut model = IlpModel::new("infeasible");
        model.add_int_var(IntVar::non_negative("x"));
        model.add_int_var(IntVar::non_negative("y"));
        model.add_less_eq(LinearExpr::sum(["x", "y"]), 1);
        model.add_less_eq(LinearExpr::new().constant(1).term("x", -1), 0);
        model.add_less_eq(LinearExpr::new().constant(1).term("y", -1), 0);

        let solution = BranchAndBoundSolver::new().solve(&model, &SolverConfig::default());

        assert_eq!(solution.status, SolverStatus::Infeasible);
        assert!(!solution.is_solution_found());
        assert!(solution.values.is_empty());
    }

    #[test]
    fn test_infeasible_needs_branching() {
        // 2x + 2y + 2z == 3 has no integer solution but propagation alone
        // cannot see it at the root.
        let mut model = IlpModel::new("parity");
        for name in ["x", "y", "z"] {
            model.add_int_var(IntVar::new(name, 0, 5));
        }
        model.add_constraint(Constraint::Equal {
            expr: LinearExpr::new().term("x", 2).term("y", 2).term("z", 2),
            rhs: 3,
        });

        let solution = BranchAndBoundSolver::new().solve(&model, &SolverConfig::default());

        assert_eq!(solution.status, SolverStatus::Infeasible);
        assert!(solution.nodes >= 1);
    }

    #[test]
    fn test_equality() {
        let mut model = IlpModel::new("eq");
        model.add_int_var(IntVar::new("x", 0, 9));
        model.add_int_var(IntVar::new("y", 0, 9));
        model.add_constraint(Constraint::Equal {
            expr: LinearExpr::new().term("x", 3).term("y", 5),
            rhs: 19,
        });
        model.set_objective(Objective::Maximize {
            terms: vec![("x".into(), 1)],
        });

        let solution = BranchAndBoundSolver::new().solve(&model, &SolverConfig::default());

        assert_eq!(solution.status, SolverStatus::Optimal);
        assert_eq!(solution.values["x"], 3);
        assert_eq!(solution.values["y"], 2);
    }

    #[test]
    fn test_unbounded_variable() {
        let mut model = IlpModel::new("open");
        model.add_int_var(IntVar::non_negative("x"));
        model.set_objective(Objective::Maximize {
            terms: vec![("x".into(), 1)],
        });

        let solution = BranchAndBoundSolver::new().solve(&model, &SolverConfig::default());

        assert_eq!(solution.status, SolverStatus::Unbounded);
    }

    #[test]
    fn test_invalid_model() {
        let mut model = IlpModel::new("bad");
        model.add_less_eq(LinearExpr::new().term("missing", 1), 0);

        let solution = BranchAndBoundSolver::new().solve(&model, &SolverConfig::default());

        assert_eq!(solution.status, SolverStatus::ModelInvalid);
    }

    #[test]
    fn test_invalid_config() {
        let solution = BranchAndBoundSolver::new().solve(
            &knapsack(),
            &SolverConfig::default().with_time_limit_ms(0),
        );

        assert_eq!(solution.status, SolverStatus::ModelInvalid);
    }

    #[test]
    fn test_node_limit_reports_timeout() {
        let mut model = IlpModel::new("parity");
        for name in ["x", "y", "z"] {
            model.add_int_var(IntVar::new(name, 0, 1_000));
        }
        model.add_constraint(Constraint::Equal {
            expr: LinearExpr::new().term("x", 2).term("y", 2).term("z", 2),
            rhs: 1_001,
        });

        let config = SolverConfig::default().with_node_limit(3);
        let solution = BranchAndBoundSolver::new().solve(&model, &config);

        assert_eq!(solution.status, SolverStatus::Timeout);
    }

    #[test]
    fn test_stop_after_first() {
        let config = SolverConfig::default().with_stop_after_first(true);
        let model = knapsack();
        let solution = BranchAndBoundSolver::new().solve(&model, &config);

        assert!(solution.is_solution_found());
        assert!(model.is_satisfied_by(&solution.values));
    }

    #[test]
    fn test_no_objective_is_optimal() {
        let mut model = IlpModel::new("plain");
        model.add_int_var(IntVar::new("x", 0, 3));
        model.add_less_eq(LinearExpr::new().term("x", 1), 2);

        let config = SolverConfig::default().with_stop_after_first(true);
        let solution = BranchAndBoundSolver::new().solve(&model, &config);

        assert_eq!(solution.status, SolverStatus::Optimal);
        assert_eq!(solution.objective_value, None);
    }

    #[test]
    fn test_rounding_helpers() {
        assert_eq!(div_floor(7, 2), 3);
        assert_eq!(div_floor(-7, 2), -4);
        assert_eq!(div_ceil(7, 2), 4);
        assert_eq!(div_ceil(-7, 2), -3);
        assert_eq!(div_ceil(7, -2), -3);
        assert_eq!(div_floor(7, -2), -4);
    }

    #[test]
    fn test_solver_config_default() {
        let config = SolverConfig::default();
        assert_eq!(config.time_limit_ms, 60_000);
        assert_eq!(config.node_limit, 0);
        assert!(!config.stop_after_first);
    }
}
