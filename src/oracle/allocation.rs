//! The allocation model behind every feasibility verdict.
//!
//! Ten non-negative split variables distribute the five item types:
//! type 1 has one split (`N1a`), types 2 to 4 have two (`a`, `b`) and
//! type 5 has three (`a`, `b`, `c`). Each capacity budget sees the
//! unallocated remainder of every type through one particular split:
//!
//! ```text
//! budget 1: (n1-N1a) + (n2-N2a) + (n3-N3a) + (n4-N4b) + (n5-N5a) <= p1
//! budget 2: (n1-N1a) + (n2-N2a) + (n3-N3b) + (n4-N4a) + (n5-N5b) <= p2
//! budget 3: (n1-N1a) + (n2-N2b) + (n3-N3a) + (n4-N4a) + (n5-N5c) <= p3
//! ```
//!
//! and the splits of one type never exceed its count. The objective
//! maximizes the total allocation; only feasibility is consumed.

use super::point::{ParameterPoint, BUDGETS, ITEM_TYPES};
use crate::ilp::{IlpModel, IntVar, LinearExpr, Objective};

/// Allocation variables in model order.
pub const ALLOCATION_VARS: [&str; 10] = [
    "N1a", "N2a", "N2b", "N3a", "N3b", "N4a", "N4b", "N5a", "N5b", "N5c",
];

/// Split subtracted from each item type's count, per budget.
///
/// This mapping is the whole content of the model and must not be
/// reordered.
pub const BUDGET_VIEWS: [[&str; ITEM_TYPES]; BUDGETS] = [
    ["N1a", "N2a", "N3a", "N4b", "N5a"],
    ["N1a", "N2a", "N3b", "N4a", "N5b"],
    ["N1a", "N2b", "N3a", "N4a", "N5c"],
];

/// Splits of each item type.
pub const TYPE_SPLITS: [&[&str]; ITEM_TYPES] = [
    &["N1a"],
    &["N2a", "N2b"],
    &["N3a", "N3b"],
    &["N4a", "N4b"],
    &["N5a", "N5b", "N5c"],
];

/// Builds the allocation ILP for one parameter point.
///
/// The model has the three budget constraints first, then the five
/// conservation constraints, in type order.
///
/// # Examples
///
/// ```
/// use ilr_table::oracle::{build_allocation_model, ParameterPoint};
///
/// let model = build_allocation_model(&ParameterPoint::new([1, 0, 0, 0, 0], [0, 0, 0]));
/// assert_eq!(model.var_count(), 10);
/// assert_eq!(model.constraint_count(), 8);
/// ```
pub fn build_allocation_model(point: &ParameterPoint) -> IlpModel {
    let mut model = IlpModel::new("ILP");
    for name in ALLOCATION_VARS {
        model.add_int_var(IntVar::non_negative(name));
    }

    for (view, &capacity) in BUDGET_VIEWS.iter().zip(&point.capacities) {
        let remainder = point
            .counts
            .iter()
            .zip(view)
            .fold(LinearExpr::new(), |expr, (&count, &split)| {
                expr.constant(i64::from(count)).term(split, -1)
            });
        model.add_less_eq(remainder, i64::from(capacity));
    }

    for (splits, &count) in TYPE_SPLITS.iter().zip(&point.counts) {
        model.add_less_eq(LinearExpr::sum(splits.iter().copied()), i64::from(count));
    }

    model.set_objective(Objective::Maximize {
        terms: ALLOCATION_VARS.iter().map(|&name| (name.into(), 1)).collect(),
    });
    model
}
