//! Parameter points of the feasibility sweep.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of item types.
pub const ITEM_TYPES: usize = 5;

/// Number of capacity budgets.
pub const BUDGETS: usize = 3;

/// One coordinate of the sweep: five item-type counts and three capacities.
///
/// Displays as the eight values separated by single spaces, which is also
/// the prefix of a persisted record line.
///
/// # Examples
///
/// ```
/// use ilr_table::oracle::ParameterPoint;
///
/// let point = ParameterPoint::new([1, 0, 2, 0, 0], [0, 1, 1]);
/// assert_eq!(point.total_count(), 3);
/// assert_eq!(point.to_string(), "1 0 2 0 0 0 1 1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParameterPoint {
    /// Item-type counts `n1..n5`.
    pub counts: [u32; ITEM_TYPES],
    /// Capacities `p1..p3`.
    pub capacities: [u32; BUDGETS],
}

impl ParameterPoint {
    pub fn new(counts: [u32; ITEM_TYPES], capacities: [u32; BUDGETS]) -> Self {
        Self { counts, capacities }
    }

    /// The all-zero point.
    pub fn origin() -> Self {
        Self::default()
    }

    /// `n1 + ... + n5`.
    pub fn total_count(&self) -> u64 {
        self.counts.iter().map(|&n| u64::from(n)).sum()
    }

    /// Whether the point lies inside the sweep bounded by `(count_bound, capacity_bound)`.
    pub fn is_within(&self, count_bound: u32, capacity_bound: u32) -> bool {
        self.total_count() <= u64::from(count_bound)
            && self.capacities.iter().all(|&p| p <= capacity_bound)
    }
}

impl Default for ParameterPoint {
    fn default() -> Self {
        Self {
            counts: [0; ITEM_TYPES],
            capacities: [0; BUDGETS],
        }
    }
}

impl fmt::Display for ParameterPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [n1, n2, n3, n4, n5] = self.counts;
        let [p1, p2, p3] = self.capacities;
        write!(f, "{n1} {n2} {n3} {n4} {n5} {p1} {p2} {p3}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin() {
        let origin = ParameterPoint::origin();
        assert_eq!(origin.total_count(), 0);
        assert_eq!(origin.to_string(), "0 0 0 0 0 0 0 0");
    }

    #[test]
    fn test_is_within() {
        let point = ParameterPoint::new([2, 1, 0, 0, 1], [1, 0, 1]);
        assert!(point.is_within(4, 1));
        assert!(!point.is_within(3, 1));
        assert!(!point.is_within(4, 0));
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = ParameterPoint::new([0, 0, 0, 0, 1], [0, 0, 0]);
        let b = ParameterPoint::new([0, 0, 0, 0, 0], [1, 1, 1]);
        assert!(b < a);
    }
}
