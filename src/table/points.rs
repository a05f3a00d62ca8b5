//! Enumeration of the parameter space.
//!
//! Valid points are visited in lexicographic order of
//! `(n1, n2, n3, n4, n5, p1, p2, p3)`, `n1` outermost. The line index of a
//! record in a table artifact is the rank of its point in this order, and
//! [`rank`] / [`point_at`] convert between the two without enumerating.

use crate::oracle::{ParameterPoint, BUDGETS, ITEM_TYPES};

/// `C(n, k)`, saturating at `u64::MAX`.
pub fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc * u128::from(n - i) / u128::from(i + 1);
        if acc > u128::from(u64::MAX) {
            return u64::MAX;
        }
    }
    acc as u64
}

/// Number of `slots`-tuples of non-negative integers with sum `<= budget`.
pub fn count_tuples(slots: usize, budget: u64) -> u64 {
    binomial(budget + slots as u64, slots as u64)
}

/// Number of capacity triples per count tuple: `(D + 1)^3`.
pub fn capacity_block(capacity_bound: u32) -> u64 {
    (u64::from(capacity_bound) + 1).saturating_pow(BUDGETS as u32)
}

/// Number of valid points: `C(L + 5, 5) * (D + 1)^3`.
///
/// # Examples
///
/// ```
/// use ilr_table::table::valid_point_count;
///
/// assert_eq!(valid_point_count(1, 0), 6);
/// assert_eq!(valid_point_count(8, 1), 1287 * 8);
/// ```
pub fn valid_point_count(count_bound: u32, capacity_bound: u32) -> u64 {
    count_tuples(ITEM_TYPES, u64::from(count_bound)).saturating_mul(capacity_block(capacity_bound))
}

/// Position of `point` in the enumeration order, or `None` if it lies
/// outside the bounds.
pub fn rank(point: &ParameterPoint, count_bound: u32, capacity_bound: u32) -> Option<u64> {
    if !point.is_within(count_bound, capacity_bound) {
        return None;
    }

    // Tuples before this one: for coordinate i holding value n, every
    // smaller value v contributes count_tuples(rest, remaining - v), which
    // telescopes by the hockey-stick identity.
    let mut tuple_rank = 0u64;
    let mut remaining = u64::from(count_bound);
    for (i, &n) in point.counts.iter().enumerate() {
        let n = u64::from(n);
        let rest = ITEM_TYPES - i - 1;
        tuple_rank += count_tuples(rest + 1, remaining) - count_tuples(rest + 1, remaining - n);
        remaining -= n;
    }

    let width = u64::from(capacity_bound) + 1;
    let capacity_rank = point
        .capacities
        .iter()
        .fold(0u64, |acc, &p| acc * width + u64::from(p));
    Some(tuple_rank * capacity_block(capacity_bound) + capacity_rank)
}

/// Point at position `index` of the enumeration order, or `None` past the end.
pub fn point_at(index: u64, count_bound: u32, capacity_bound: u32) -> Option<ParameterPoint> {
    if index >= valid_point_count(count_bound, capacity_bound) {
        return None;
    }
    let block = capacity_block(capacity_bound);
    let mut tuple_rank = index / block;
    let mut capacity_rank = index % block;

    let mut counts = [0u32; ITEM_TYPES];
    let mut remaining = u64::from(count_bound);
    for (i, slot) in counts.iter_mut().enumerate() {
        let rest = ITEM_TYPES - i - 1;
        let mut v = 0u64;
        loop {
            let below = count_tuples(rest, remaining - v);
            if tuple_rank < below {
                break;
            }
            tuple_rank -= below;
            v += 1;
        }
        *slot = v as u32;
        remaining -= v;
    }

    let width = u64::from(capacity_bound) + 1;
    let mut capacities = [0u32; BUDGETS];
    for slot in capacities.iter_mut().rev() {
        *slot = (capacity_rank % width) as u32;
        capacity_rank /= width;
    }
    Some(ParameterPoint::new(counts, capacities))
}

/// Lazy iterator over the valid points in enumeration order.
///
/// Restartable by construction: a fresh iterator always begins at the
/// first point. Points with `n1 + ... + n5 > L` are never produced.
///
/// # Examples
///
/// ```
/// use ilr_table::table::ParameterPoints;
///
/// let points: Vec<String> = ParameterPoints::new(1, 0).map(|p| p.to_string()).collect();
/// assert_eq!(points[0], "0 0 0 0 0 0 0 0");
/// assert_eq!(points[1], "0 0 0 0 1 0 0 0");
/// assert_eq!(points[5], "1 0 0 0 0 0 0 0");
/// assert_eq!(points.len(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct ParameterPoints {
    count_bound: u32,
    capacity_bound: u32,
    next: Option<ParameterPoint>,
    /// When set, iteration stops once `n1` moves past this value.
    first_count: Option<u32>,
    remaining: u64,
}

impl ParameterPoints {
    /// All valid points for bounds `(L, D)`.
    pub fn new(count_bound: u32, capacity_bound: u32) -> Self {
        Self {
            count_bound,
            capacity_bound,
            next: Some(ParameterPoint::origin()),
            first_count: None,
            remaining: valid_point_count(count_bound, capacity_bound),
        }
    }

    /// Valid points whose first count equals `n1`.
    ///
    /// Concatenating the slices for `n1 = 0..=L` reproduces [`new`](Self::new).
    pub fn slice(count_bound: u32, capacity_bound: u32, n1: u32) -> Self {
        let (next, remaining) = if n1 <= count_bound {
            let mut start = ParameterPoint::origin();
            start.counts[0] = n1;
            let tuples = count_tuples(ITEM_TYPES - 1, u64::from(count_bound - n1));
            (
                Some(start),
                tuples.saturating_mul(capacity_block(capacity_bound)),
            )
        } else {
            (None, 0)
        };
        Self {
            count_bound,
            capacity_bound,
            next,
            first_count: Some(n1),
            remaining,
        }
    }

    fn advance(&self, point: &ParameterPoint) -> Option<ParameterPoint> {
        let mut next = *point;

        for p in next.capacities.iter_mut().rev() {
            if *p < self.capacity_bound {
                *p += 1;
                return Some(next);
            }
            *p = 0;
        }

        // Odometer over the counts. Once bumping a coordinate overflows
        // the bound, every larger value does too, so carry immediately.
        let limit = u64::from(self.count_bound);
        for i in (0..ITEM_TYPES).rev() {
            next.counts[i] += 1;
            if next.total_count() <= limit {
                return match self.first_count {
                    Some(n1) if next.counts[0] != n1 => None,
                    _ => Some(next),
                };
            }
            next.counts[i] = 0;
        }
        None
    }
}

impl Iterator for ParameterPoints {
    type Item = ParameterPoint;

    fn next(&mut self) -> Option<ParameterPoint> {
        let current = self.next?;
        self.next = self.advance(&current);
        self.remaining = self.remaining.saturating_sub(1);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

impl ExactSizeIterator for ParameterPoints {}

impl std::iter::FusedIterator for ParameterPoints {}
