//! ILP model definition.

use super::variables::IntVar;
use std::collections::HashMap;

/// A linear expression `sum(coef * var) + constant`.
///
/// # Examples
///
/// ```
/// use ilr_table::ilp::LinearExpr;
///
/// // (3 - x) + (2 - y)
/// let expr = LinearExpr::new().constant(3).term("x", -1).constant(2).term("y", -1);
/// assert_eq!(expr.constant, 5);
/// assert_eq!(expr.terms.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    /// (variable_name, coefficient) pairs.
    pub terms: Vec<(String, i64)>,
    /// Constant offset.
    pub constant: i64,
}

impl LinearExpr {
    /// Creates the empty expression (value 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `coef * name`.
    pub fn term(mut self, name: impl Into<String>, coef: i64) -> Self {
        self.terms.push((name.into(), coef));
        self
    }

    /// Adds `value` to the constant offset.
    pub fn constant(mut self, value: i64) -> Self {
        self.constant += value;
        self
    }

    /// Sum of several variables, each with coefficient 1.
    pub fn sum<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(Self::new(), |expr, name| expr.term(name, 1))
    }

    /// Evaluates the expression under a full assignment.
    ///
    /// Returns `None` if a referenced variable is missing.
    pub fn evaluate(&self, values: &HashMap<String, i64>) -> Option<i64> {
        self.terms.iter().try_fold(self.constant, |acc, (name, coef)| {
            values.get(name).map(|v| acc + coef * v)
        })
    }
}

/// A linear constraint in the ILP model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// `expr <= rhs`.
    LessEq {
        /// Left-hand side.
        expr: LinearExpr,
        /// Right-hand side.
        rhs: i64,
    },

    /// `expr == rhs`.
    Equal {
        /// Left-hand side.
        expr: LinearExpr,
        /// Right-hand side.
        rhs: i64,
    },
}

impl Constraint {
    /// The left-hand side expression.
    pub fn expr(&self) -> &LinearExpr {
        match self {
            Constraint::LessEq { expr, .. } | Constraint::Equal { expr, .. } => expr,
        }
    }

    /// Whether the constraint holds under a full assignment.
    pub fn is_satisfied(&self, values: &HashMap<String, i64>) -> bool {
        match self {
            Constraint::LessEq { expr, rhs } => expr.evaluate(values).is_some_and(|v| v <= *rhs),
            Constraint::Equal { expr, rhs } => expr.evaluate(values).is_some_and(|v| v == *rhs),
        }
    }
}

/// Objective function for the ILP model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Objective {
    /// Minimize a linear combination of integer variables.
    Minimize {
        /// (variable_name, coefficient) pairs.
        terms: Vec<(String, i64)>,
    },

    /// Maximize a linear combination of integer variables.
    Maximize {
        /// (variable_name, coefficient) pairs.
        terms: Vec<(String, i64)>,
    },
}

impl Objective {
    /// The objective terms, independent of direction.
    pub fn terms(&self) -> &[(String, i64)] {
        match self {
            Objective::Minimize { terms } | Objective::Maximize { terms } => terms,
        }
    }
}

/// An integer linear program.
///
/// Variables keep their insertion order, which is also the order in which
/// the bundled solver branches on them.
///
/// # Examples
///
/// ```
/// use ilr_table::ilp::{IlpModel, IntVar, LinearExpr, Objective};
///
/// let mut model = IlpModel::new("example");
/// model.add_int_var(IntVar::non_negative("x"));
/// model.add_int_var(IntVar::non_negative("y"));
/// model.add_less_eq(LinearExpr::sum(["x", "y"]), 4);
/// model.set_objective(Objective::Maximize {
///     terms: vec![("x".into(), 1), ("y".into(), 2)],
/// });
/// assert!(model.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct IlpModel {
    /// Model name.
    pub name: String,
    /// Integer variables, in insertion order.
    pub int_vars: Vec<IntVar>,
    /// Constraints.
    pub constraints: Vec<Constraint>,
    /// Objective function.
    pub objective: Option<Objective>,
    index: HashMap<String, usize>,
}

impl IlpModel {
    /// Creates a new empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            int_vars: Vec::new(),
            constraints: Vec::new(),
            objective: None,
            index: HashMap::new(),
        }
    }

    /// Adds an integer variable and returns its position.
    pub fn add_int_var(&mut self, var: IntVar) -> usize {
        let position = self.int_vars.len();
        self.index.entry(var.name.clone()).or_insert(position);
        self.int_vars.push(var);
        position
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Convenience: add `expr <= rhs`.
    pub fn add_less_eq(&mut self, expr: LinearExpr, rhs: i64) {
        self.constraints.push(Constraint::LessEq { expr, rhs });
    }

    /// Sets the objective function.
    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = Some(objective);
    }

    /// Position of a variable by name.
    pub fn var_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Validates the model for consistency.
    ///
    /// Checks for duplicate variable names, empty domains, and references
    /// to undefined variables.
    pub fn validate(&self) -> Result<(), String> {
        if self.index.len() != self.int_vars.len() {
            return Err("duplicate variable name".into());
        }
        for var in &self.int_vars {
            if var.max.is_some_and(|max| max < var.min) {
                return Err(format!("empty domain for variable: {}", var.name));
            }
        }
        for constraint in &self.constraints {
            for (name, _) in &constraint.expr().terms {
                if !self.index.contains_key(name) {
                    return Err(format!("undefined variable: {name}"));
                }
            }
        }
        if let Some(objective) = &self.objective {
            for (name, _) in objective.terms() {
                if !self.index.contains_key(name) {
                    return Err(format!("undefined variable in objective: {name}"));
                }
            }
        }
        Ok(())
    }

    /// Checks a full assignment against bounds and every constraint.
    pub fn is_satisfied_by(&self, values: &HashMap<String, i64>) -> bool {
        let in_domain = self.int_vars.iter().all(|var| {
            values
                .get(&var.name)
                .is_some_and(|&v| v >= var.min && var.max.is_none_or(|max| v <= max))
        });
        in_domain && self.constraints.iter().all(|c| c.is_satisfied(values))
    }

    /// Returns the number of variables.
    pub fn var_count(&self) -> usize {
        self.int_vars.len()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}
