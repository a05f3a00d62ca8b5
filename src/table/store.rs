//! In-memory feasibility table.

use super::points::{rank, valid_point_count, ParameterPoints};
use super::record::FeasibilityRecord;
use crate::error::{Error, Result};
use crate::oracle::ParameterPoint;
use std::io::{BufRead, Write};

/// Verdicts for every valid point of a sweep, indexed by enumeration rank.
///
/// A table is only ever constructed complete: one verdict per valid point.
/// Lookups are O(1) in the number of points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeasibilityTable {
    count_bound: u32,
    capacity_bound: u32,
    verdicts: Vec<bool>,
}

impl FeasibilityTable {
    /// Wraps verdicts listed in enumeration order.
    ///
    /// Fails with [`Error::Incomplete`] unless there is exactly one
    /// verdict per valid point.
    pub fn from_verdicts(count_bound: u32, capacity_bound: u32, verdicts: Vec<bool>) -> Result<Self> {
        let expected = valid_point_count(count_bound, capacity_bound);
        if verdicts.len() as u64 != expected {
            return Err(Error::Incomplete {
                expected,
                found: verdicts.len() as u64,
            });
        }
        Ok(Self {
            count_bound,
            capacity_bound,
            verdicts,
        })
    }

    pub fn count_bound(&self) -> u32 {
        self.count_bound
    }

    pub fn capacity_bound(&self) -> u32 {
        self.capacity_bound
    }

    /// Verdict for `point`, or `None` if it lies outside the bounds.
    pub fn get(&self, point: &ParameterPoint) -> Option<bool> {
        let index = rank(point, self.count_bound, self.capacity_bound)?;
        self.verdicts.get(usize::try_from(index).ok()?).copied()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    /// Number of feasible points.
    pub fn feasible_count(&self) -> usize {
        self.verdicts.iter().filter(|&&v| v).count()
    }

    /// Records in enumeration order.
    pub fn records(&self) -> impl Iterator<Item = FeasibilityRecord> + '_ {
        ParameterPoints::new(self.count_bound, self.capacity_bound)
            .zip(self.verdicts.iter())
            .map(|(point, &feasible)| FeasibilityRecord::new(point, feasible))
    }

    /// Writes the artifact text: one record per line.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        for record in self.records() {
            writeln!(writer, "{record}")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Loads an artifact written for bounds `(L, D)`.
    ///
    /// Every line must parse and hold the point expected at its position;
    /// missing or surplus records are rejected.
    pub fn read_from<R: BufRead>(reader: R, count_bound: u32, capacity_bound: u32) -> Result<Self> {
        let expected_total = valid_point_count(count_bound, capacity_bound);
        let mut points = ParameterPoints::new(count_bound, capacity_bound);
        let mut verdicts = Vec::with_capacity(points.len());

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = i + 1;
            let record: FeasibilityRecord = line.parse().map_err(|message| Error::Parse {
                line: line_no,
                message,
            })?;
            let Some(expected) = points.next() else {
                return Err(Error::Incomplete {
                    expected: expected_total,
                    found: line_no as u64,
                });
            };
            if record.point != expected {
                return Err(Error::Order {
                    line: line_no,
                    expected,
                    found: record.point,
                });
            }
            verdicts.push(record.feasible);
        }

        Self::from_verdicts(count_bound, capacity_bound, verdicts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn alternating(l: u32, d: u32) -> FeasibilityTable {
        let n = valid_point_count(l, d) as usize;
        FeasibilityTable::from_verdicts(l, d, (0..n).map(|i| i % 3 == 0).collect()).unwrap()
    }

    #[test]
    fn test_from_verdicts_rejects_wrong_length() {
        assert!(matches!(
            FeasibilityTable::from_verdicts(1, 0, vec![true; 5]),
            Err(Error::Incomplete {
                expected: 6,
                found: 5
            })
        ));
    }

    #[test]
    fn test_get() {
        let table = alternating(2, 1);
        for (index, point) in ParameterPoints::new(2, 1).enumerate() {
            assert_eq!(table.get(&point), Some(index % 3 == 0));
        }
        assert_eq!(table.get(&ParameterPoint::new([3, 0, 0, 0, 0], [0, 0, 0])), None);
        assert_eq!(table.get(&ParameterPoint::new([0, 0, 0, 0, 0], [0, 0, 2])), None);
    }

    #[test]
    fn test_counts() {
        let table = alternating(1, 0);
        assert_eq!(table.len(), 6);
        assert!(!table.is_empty());
        assert_eq!(table.feasible_count(), 2);
    }

    #[test]
    fn test_write_then_read() {
        let table = alternating(2, 1);
        let mut buf = Vec::new();
        table.write_to(&mut buf).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.ends_with("false\n") || text.ends_with("true\n"));
        assert_eq!(text.lines().count(), table.len());
        assert!(text.starts_with("0 0 0 0 0 0 0 0 true\n0 0 0 0 0 0 0 1 false\n"));

        let loaded = FeasibilityTable::read_from(Cursor::new(buf), 2, 1).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_read_rejects_truncated() {
        let text = "0 0 0 0 0 0 0 0 true\n0 0 0 0 1 0 0 0 false\n";
        assert!(matches!(
            FeasibilityTable::read_from(Cursor::new(text), 1, 0),
            Err(Error::Incomplete {
                expected: 6,
                found: 2
            })
        ));
    }

    #[test]
    fn test_read_rejects_surplus() {
        let mut buf = Vec::new();
        alternating(0, 0).write_to(&mut buf).unwrap();
        buf.extend_from_slice(b"0 0 0 0 0 0 0 0 true\n");
        assert!(matches!(
            FeasibilityTable::read_from(Cursor::new(buf), 0, 0),
            Err(Error::Incomplete { expected: 1, .. })
        ));
    }

    #[test]
    fn test_read_rejects_out_of_order() {
        let text = "0 0 0 0 1 0 0 0 true\n";
        match FeasibilityTable::read_from(Cursor::new(text), 1, 0) {
            Err(Error::Order {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 1);
                assert_eq!(expected, ParameterPoint::origin());
                assert_eq!(found, ParameterPoint::new([0, 0, 0, 0, 1], [0, 0, 0]));
            }
            other => panic!("expected order error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_rejects_malformed() {
        let text = "0 0 0 0 0 0 0 0 yes\n";
        assert!(matches!(
            FeasibilityTable::read_from(Cursor::new(text), 1, 0),
            Err(Error::Parse { line: 1, .. })
        ));
    }
}
