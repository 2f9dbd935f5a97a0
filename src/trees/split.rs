//! Split scoring: information gain, gain ratio and weighted Gini.
//!
//! Partitions are described by the per-class counts of each child, so the
//! same functions serve multiway and binary splits.
use crate::metrics::impurity::{entropy_from_counts, gini_from_counts};
use std::cmp::Ordering;

/// Substituted for a split information of exactly zero.
pub const SPLIT_INFO_FLOOR: f64 = 1e-9;

/// How the rows of a view are sent to children.
#[derive(Clone, Debug, PartialEq)]
pub enum SplitRule {
    /// One child per distinct value.
    Multiway,
    /// `value <= threshold` versus the rest.
    Threshold(f64),
    /// `value == v` versus the rest.
    Equals(String),
}

/// The best split found for one attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitCandidate {
    pub attribute: usize,
    pub rule: SplitRule,
    pub score: f64,
}

impl SplitCandidate {
    pub fn new(attribute: usize, rule: SplitRule, score: f64) -> Self {
        Self {
            attribute,
            rule,
            score,
        }
    }
}

fn total(counts: &[usize]) -> usize {
    counts.iter().sum()
}

/// `entropy(parent) - Σ |child|/|parent| · entropy(child)`.
pub fn information_gain(parent: &[usize], children: &[Vec<usize>]) -> f64 {
    let n = total(parent);
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    let weighted: f64 = children
        .iter()
        .filter(|child| total(child) > 0)
        .map(|child| total(child) as f64 / n * entropy_from_counts(child))
        .sum();
    entropy_from_counts(parent) - weighted
}

/// Entropy of the child-size distribution, ignoring labels.
pub fn split_information(child_sizes: &[usize]) -> f64 {
    entropy_from_counts(child_sizes)
}

/// `gain / split_info`, with [`SPLIT_INFO_FLOOR`] standing in for a zero split info.
pub fn gain_ratio(gain: f64, split_info: f64) -> f64 {
    if split_info == 0.0 {
        gain / SPLIT_INFO_FLOOR
    } else {
        gain / split_info
    }
}

/// `Σ |child|/|parent| · gini(child)`; lower is better.
pub fn weighted_gini(children: &[Vec<usize>]) -> f64 {
    let n: usize = children.iter().map(|child| total(child)).sum();
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    children
        .iter()
        .filter(|child| total(child) > 0)
        .map(|child| total(child) as f64 / n * gini_from_counts(child))
        .sum()
}

/// Visits every midpoint threshold of a continuous attribute in ascending order.
///
/// `pairs` holds `(value, class)` for each row and is sorted in place. The
/// visitor receives the threshold and the class counts of the `<=` and `>`
/// sides; both sides are always non-empty. Fewer than two distinct values
/// means no visit at all.
pub fn scan_thresholds<F>(pairs: &mut [(f64, usize)], n_classes: usize, mut visit: F)
where
    F: FnMut(f64, &[usize], &[usize]),
{
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let mut left = vec![0; n_classes];
    let mut right = vec![0; n_classes];
    for &(_, class) in pairs.iter() {
        right[class] += 1;
    }

    let mut i = 0;
    while i < pairs.len() {
        let value = pairs[i].0;
        while i < pairs.len() && pairs[i].0 == value {
            left[pairs[i].1] += 1;
            right[pairs[i].1] -= 1;
            i += 1;
        }
        if i < pairs.len() {
            visit((value + pairs[i].0) / 2.0, &left, &right);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_information_gain_perfect_split() {
        let gain = information_gain(&[2, 2], &[vec![2, 0], vec![0, 2]]);
        assert_relative_eq!(gain, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_information_gain_useless_split() {
        let gain = information_gain(&[2, 2], &[vec![1, 1], vec![1, 1]]);
        assert_relative_eq!(gain, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_information_gain_outlook() {
        // Play Tennis: Sunny 2+/3-, Overcast 4+/0-, Rain 3+/2-
        let gain = information_gain(&[9, 5], &[vec![2, 3], vec![4, 0], vec![3, 2]]);
        assert_relative_eq!(gain, 0.246_749_819_774_439_1, epsilon = 1e-9);
    }

    #[test]
    fn test_gain_ratio_divides_by_split_info() {
        let split_info = split_information(&[4, 4]);
        assert_relative_eq!(split_info, 1.0, epsilon = 1e-12);
        assert_relative_eq!(gain_ratio(0.5, split_info), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_gain_ratio_floor_on_zero_split_info() {
        assert_eq!(split_information(&[6]), 0.0);
        assert_relative_eq!(gain_ratio(0.25, 0.0), 0.25 / SPLIT_INFO_FLOOR);
        assert_eq!(gain_ratio(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_weighted_gini() {
        assert_eq!(weighted_gini(&[vec![3, 0], vec![0, 3]]), 0.0);
        assert_relative_eq!(weighted_gini(&[vec![1, 1], vec![2, 0]]), 0.25, epsilon = 1e-12);
        assert_relative_eq!(weighted_gini(&[vec![2, 2], vec![]]), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_scan_thresholds_counts() {
        let mut pairs = vec![(3.0, 1), (1.0, 0), (2.0, 0), (3.0, 1), (1.0, 1)];
        let mut seen = Vec::new();
        scan_thresholds(&mut pairs, 2, |threshold, left, right| {
            seen.push((threshold, left.to_vec(), right.to_vec()));
        });
        assert_eq!(
            seen,
            vec![
                (1.5, vec![1, 1], vec![1, 2]),
                (2.5, vec![2, 1], vec![0, 2]),
            ]
        );
    }

    #[test]
    fn test_scan_thresholds_single_value() {
        let mut pairs = vec![(5.0, 0), (5.0, 1)];
        let mut visits = 0;
        scan_thresholds(&mut pairs, 2, |_, _, _| visits += 1);
        assert_eq!(visits, 0);
    }
}
