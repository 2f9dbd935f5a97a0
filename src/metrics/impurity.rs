//! Impurity measures over class-label multisets.
//!
//! Every function accepts either the labels themselves or the per-class
//! counts of a partition. Empty inputs score `0.0`.
use std::collections::HashMap;
use std::hash::Hash;

/// Counts each distinct label, in order of first occurrence.
pub fn class_frequencies<T, I>(labels: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut positions: HashMap<T, usize> = HashMap::new();
    let mut frequencies: Vec<(T, usize)> = Vec::new();
    for label in labels {
        match positions.get(&label) {
            Some(&position) => frequencies[position].1 += 1,
            None => {
                positions.insert(label.clone(), frequencies.len());
                frequencies.push((label, 1));
            }
        }
    }
    frequencies
}

/// Most frequent label. Ties go to the label seen first.
///
/// Returns `None` for an empty input.
pub fn majority_label<T, I>(labels: I) -> Option<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut best: Option<(T, usize)> = None;
    for (label, count) in class_frequencies(labels) {
        match &best {
            Some((_, best_count)) if count <= *best_count => {}
            _ => best = Some((label, count)),
        }
    }
    best.map(|(label, _)| label)
}

/// Shannon entropy in bits: `-Σ p_i · log2(p_i)`.
pub fn entropy<T: Eq + Hash + Clone>(labels: &[T]) -> f64 {
    let counts = class_frequencies(labels.iter().cloned())
        .into_iter()
        .map(|(_, count)| count)
        .collect::<Vec<_>>();
    entropy_from_counts(&counts)
}

/// Gini impurity: `1 - Σ p_i²`.
pub fn gini<T: Eq + Hash + Clone>(labels: &[T]) -> f64 {
    let counts = class_frequencies(labels.iter().cloned())
        .into_iter()
        .map(|(_, count)| count)
        .collect::<Vec<_>>();
    gini_from_counts(&counts)
}

/// Entropy of a distribution given as per-class counts. Zero counts are skipped.
pub fn entropy_from_counts(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Gini impurity of a distribution given as per-class counts.
pub fn gini_from_counts(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    let sum_sq: f64 = counts
        .iter()
        .map(|&count| {
            let p = count as f64 / total;
            p * p
        })
        .sum();
    1.0 - sum_sq
}
