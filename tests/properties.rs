//! Properties every induced tree must satisfy, checked on seeded random tables.

use std::collections::HashSet;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rusty_trees::data::dataset::Dataset;
use rusty_trees::metrics::impurity::{entropy, gini};
use rusty_trees::trees::classifier::DecisionTreeClassifier;
use rusty_trees::trees::split::{gain_ratio, information_gain, split_information, SPLIT_INFO_FLOOR};
use rusty_trees::trees::strategy::Algorithm;

const ALGORITHMS: [Algorithm; 3] = [Algorithm::Id3, Algorithm::C45, Algorithm::Cart];

/// A table mixing categorical and continuous columns with a noisy target.
///
/// Column `c0` and `c1` draw from small vocabularies, `n0` is continuous with
/// repeated values, `n1` has a few decimals. Labels come from `classes`.
fn random_dataset(seed: u64, n_rows: usize, classes: &[&str]) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let header = ["c0", "c1", "n0", "n1", "label"]
        .iter()
        .map(|name| name.to_string())
        .collect();
    let rows = (0..n_rows)
        .map(|_| {
            vec![
                ["red", "green", "blue"][rng.gen_range(0..3)].to_string(),
                ["s", "m", "l", "xl"][rng.gen_range(0..4)].to_string(),
                rng.gen_range(0..8).to_string(),
                format!("{:.2}", rng.gen_range(-5.0..5.0)),
                classes[rng.gen_range(0..classes.len())].to_string(),
            ]
        })
        .collect();
    Dataset::from_records(header, rows, "label").unwrap()
}

#[test]
fn every_leaf_label_occurs_in_the_target() {
    for seed in 0..20 {
        let data = random_dataset(seed, 60, &["alpha", "beta", "gamma"]);
        let labels = data.classes().iter().map(String::as_str).collect::<HashSet<_>>();
        for algorithm in ALGORITHMS {
            let mut classifier = DecisionTreeClassifier::new(algorithm);
            let tree = classifier.fit(&data).unwrap();
            for label in tree.leaf_labels() {
                assert!(labels.contains(label), "{algorithm} invented {label}");
            }
        }
    }
}

#[test]
fn induction_terminates_on_conflicting_rows() {
    // few distinct rows, many repeats with different labels
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let header = vec!["a".to_string(), "x".to_string(), "y".to_string()];
        let rows = (0..200)
            .map(|_| {
                vec![
                    ["p", "q"][rng.gen_range(0..2)].to_string(),
                    rng.gen_range(0..3).to_string(),
                    ["yes", "no"][rng.gen_range(0..2)].to_string(),
                ]
            })
            .collect();
        let data = Dataset::from_records(header, rows, "y").unwrap();
        for algorithm in ALGORITHMS {
            let mut classifier = DecisionTreeClassifier::new(algorithm);
            let tree = classifier.fit(&data).unwrap();
            // rows sharing (a, x) always land in the same leaf
            assert!(tree.n_leaves() <= 6, "{algorithm}: {}", tree.n_leaves());
        }
    }
}

#[test]
fn id3_depth_is_bounded_by_attribute_count() {
    for seed in 0..10 {
        let data = random_dataset(seed, 80, &["0", "1"]);
        let mut classifier = DecisionTreeClassifier::new(Algorithm::Id3);
        let tree = classifier.fit(&data).unwrap();
        assert!(tree.depth() <= data.n_attributes());
    }
}

#[test]
fn cart_trees_are_binary() {
    for seed in 0..10 {
        let data = random_dataset(seed, 50, &["a", "b"]);
        let mut classifier = DecisionTreeClassifier::new(Algorithm::Cart);
        let tree = classifier.fit(&data).unwrap();
        assert!(tree
            .iter()
            .filter_map(|node| node.as_decision())
            .all(|decision| decision.branches().len() == 2 && decision.test().is_binary()));
    }
}

#[test]
fn induction_is_deterministic() {
    let data = random_dataset(7, 120, &["u", "v", "w"]);
    for algorithm in ALGORITHMS {
        let first = DecisionTreeClassifier::new(algorithm)
            .fit(&data)
            .unwrap()
            .clone();
        for _ in 0..3 {
            let mut classifier = DecisionTreeClassifier::new(algorithm);
            assert_eq!(classifier.fit(&data).unwrap(), &first);
        }
    }
}

#[test]
fn impurity_bounds_hold_on_random_multisets() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let len = rng.gen_range(1..40);
        let labels = (0..len).map(|_| rng.gen_range(0..5u8)).collect::<Vec<_>>();
        let distinct = labels.iter().collect::<HashSet<_>>().len() as f64;

        let h = entropy(&labels);
        let g = gini(&labels);
        assert!(h >= 0.0 && h <= distinct.log2() + 1e-12);
        assert!(g >= 0.0 && g <= 1.0 - 1.0 / distinct + 1e-12);
        assert_eq!(h == 0.0, distinct == 1.0);
        assert_eq!(g == 0.0, distinct == 1.0);
    }
}

#[test]
fn gain_ratio_is_gain_over_split_information() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let children = (0..rng.gen_range(2..5))
            .map(|_| (0..3).map(|_| rng.gen_range(0..6)).collect::<Vec<usize>>())
            .collect::<Vec<_>>();
        let parent = (0..3)
            .map(|class| children.iter().map(|child| child[class]).sum())
            .collect::<Vec<usize>>();
        let sizes = children
            .iter()
            .map(|child| child.iter().sum())
            .collect::<Vec<usize>>();

        let gain = information_gain(&parent, &children);
        let split_info = split_information(&sizes);
        if split_info > 0.0 {
            assert_relative_eq!(gain_ratio(gain, split_info), gain / split_info);
        } else {
            assert_relative_eq!(gain_ratio(gain, split_info), gain / SPLIT_INFO_FLOOR);
        }
    }
}
