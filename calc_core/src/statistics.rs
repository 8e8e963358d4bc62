//! # Statistics
//!
//! Stateless summary statistics over a slice of [`Number`]s. All three
//! functions reject an empty slice with `InvalidOperation`.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::number::Number;
//! use calc_core::statistics::{mean, median, mode};
//!
//! let values: Vec<Number> = [1, 2, 2, 3, 3, 3].into_iter().map(Number::from).collect();
//! assert_eq!(mean(&values).unwrap(), 14.0 / 6.0);
//! assert_eq!(median(&values).unwrap(), 2.5);
//! assert_eq!(mode(&values).unwrap(), Number::Integer(3));
//! ```

use std::collections::HashMap;

use crate::errors::{CalcError, CalcResult};
use crate::number::Number;

/// Arithmetic mean, `sum / count`.
pub fn mean(numbers: &[Number]) -> CalcResult<f64> {
    if numbers.is_empty() {
        return Err(CalcError::empty_input("mean"));
    }
    let sum: f64 = numbers.iter().map(|n| n.as_f64()).sum();
    Ok(sum / numbers.len() as f64)
}

/// Middle value after sorting ascending; the average of the two central
/// values for an even count.
///
/// NaN sorts after `+inf` (IEEE total order).
pub fn median(numbers: &[Number]) -> CalcResult<f64> {
    if numbers.is_empty() {
        return Err(CalcError::empty_input("median"));
    }
    let mut sorted: Vec<f64> = numbers.iter().map(|n| n.as_f64()).collect();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Grouping key under which numerically equal values collide:
/// `2` and `2.0` share a key, as do `0.0` and `-0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ValueKey {
    Int(i64),
    Bits(u64),
}

impl ValueKey {
    fn of(n: Number) -> Self {
        match n {
            Number::Integer(i) => ValueKey::Int(i),
            Number::Float(f) if n.is_integral() && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                ValueKey::Int(f as i64)
            }
            Number::Float(f) => ValueKey::Bits(f.to_bits()),
        }
    }
}

/// Most frequent value.
///
/// When several values share the highest count, the one whose first
/// occurrence comes earliest in `numbers` wins. The returned value is the
/// first-seen representation (`mode([2.0, 2])` is `2.0`). NaN never equals
/// anything, so each NaN counts once.
pub fn mode(numbers: &[Number]) -> CalcResult<Number> {
    if numbers.is_empty() {
        return Err(CalcError::empty_input("mode"));
    }

    // (first-seen value, count) in first-occurrence order
    let mut groups: Vec<(Number, usize)> = Vec::new();
    let mut positions: HashMap<ValueKey, usize> = HashMap::new();

    for &n in numbers {
        if n.as_f64().is_nan() {
            groups.push((n, 1));
            continue;
        }
        match positions.get(&ValueKey::of(n)) {
            Some(&pos) => groups[pos].1 += 1,
            None => {
                positions.insert(ValueKey::of(n), groups.len());
                groups.push((n, 1));
            }
        }
    }

    let max_count = groups.iter().map(|&(_, count)| count).max().unwrap_or(0);
    groups
        .into_iter()
        .find(|&(_, count)| count == max_count)
        .map(|(value, _)| value)
        .ok_or_else(|| CalcError::empty_input("mode"))
}
