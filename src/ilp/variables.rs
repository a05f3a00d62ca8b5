//! ILP variable types.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An integer decision variable with domain `[min, max]`.
///
/// `max == None` leaves the variable unbounded above; the solver has to
/// derive a finite upper bound from the constraints before it can branch
/// on it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntVar {
    /// Variable name (unique identifier within a model).
    pub name: String,
    /// Minimum value.
    pub min: i64,
    /// Maximum value, if bounded.
    pub max: Option<i64>,
}

impl IntVar {
    /// Creates a new integer variable with the given bounds.
    pub fn new(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            name: name.into(),
            min,
            max: Some(max),
        }
    }

    /// Creates a variable with domain `[0, +inf)`.
    pub fn non_negative(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min: 0,
            max: None,
        }
    }

    /// Creates a fixed integer variable.
    pub fn fixed(name: impl Into<String>, value: i64) -> Self {
        Self::new(name, value, value)
    }

    /// Whether this variable is fixed to a single value.
    pub fn is_fixed(&self) -> bool {
        self.max == Some(self.min)
    }

    /// Whether the variable has a finite upper bound.
    pub fn is_bounded(&self) -> bool {
        self.max.is_some()
    }

    /// Domain size (max - min + 1), or `None` when unbounded.
    pub fn domain_size(&self) -> Option<i64> {
        self.max.map(|max| max - self.min + 1)
    }
}
