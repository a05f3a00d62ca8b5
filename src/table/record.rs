//! One persisted line of a feasibility table.

use crate::oracle::{ParameterPoint, BUDGETS, ITEM_TYPES};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parameter point paired with its verdict.
///
/// The text form is `n1 n2 n3 n4 n5 p1 p2 p3 <true|false>`.
///
/// # Examples
///
/// ```
/// use ilr_table::oracle::ParameterPoint;
/// use ilr_table::table::FeasibilityRecord;
///
/// let record = FeasibilityRecord::new(ParameterPoint::new([1, 0, 0, 0, 0], [0, 0, 0]), true);
/// assert_eq!(record.to_string(), "1 0 0 0 0 0 0 0 true");
/// assert_eq!("1 0 0 0 0 0 0 0 true".parse::<FeasibilityRecord>(), Ok(record));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeasibilityRecord {
    pub point: ParameterPoint,
    pub feasible: bool,
}

impl FeasibilityRecord {
    pub fn new(point: ParameterPoint, feasible: bool) -> Self {
        Self { point, feasible }
    }
}

impl fmt::Display for FeasibilityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.point, self.feasible)
    }
}

impl FromStr for FeasibilityRecord {
    type Err = String;

    /// Parses the exact text form: single spaces, no sign, no leading zeros.
    fn from_str(line: &str) -> Result<Self, String> {
        let fields: Vec<&str> = line.split(' ').collect();
        if fields.len() != ITEM_TYPES + BUDGETS + 1 {
            return Err(format!(
                "expected {} fields, found {}",
                ITEM_TYPES + BUDGETS + 1,
                fields.len()
            ));
        }

        let mut values = [0u32; ITEM_TYPES + BUDGETS];
        for (slot, field) in values.iter_mut().zip(&fields) {
            *slot = parse_coordinate(field)?;
        }
        let feasible = match fields[ITEM_TYPES + BUDGETS] {
            "true" => true,
            "false" => false,
            other => return Err(format!("invalid verdict {other:?}")),
        };

        let mut point = ParameterPoint::origin();
        point.counts.copy_from_slice(&values[..ITEM_TYPES]);
        point.capacities.copy_from_slice(&values[ITEM_TYPES..]);
        Ok(Self { point, feasible })
    }
}

fn parse_coordinate(field: &str) -> Result<u32, String> {
    let canonical = !field.is_empty()
        && field.bytes().all(|b| b.is_ascii_digit())
        && (field == "0" || !field.starts_with('0'));
    if !canonical {
        return Err(format!("invalid coordinate {field:?}"));
    }
    field
        .parse()
        .map_err(|e| format!("invalid coordinate {field:?}: {e}"))
}
