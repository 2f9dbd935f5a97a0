//! End-to-end induction scenarios on small hand-checked tables.

use rusty_trees::data::dataset::Dataset;
use rusty_trees::data::reader::DatasetReader;
use rusty_trees::trees::classifier::DecisionTreeClassifier;
use rusty_trees::trees::node::{BranchKey, TreeNode};
use rusty_trees::trees::strategy::Algorithm;

const PLAY_TENNIS: &str = "\
Day,Outlook,Temperature,Humidity,Wind,PlayTennis
D1,Sunny,Hot,High,Weak,No
D2,Sunny,Hot,High,Strong,No
D3,Overcast,Hot,High,Weak,Yes
D4,Rain,Mild,High,Weak,Yes
D5,Rain,Cool,Normal,Weak,Yes
D6,Rain,Cool,Normal,Strong,No
D7,Overcast,Cool,Normal,Strong,Yes
D8,Sunny,Mild,High,Weak,No
D9,Sunny,Cool,Normal,Weak,Yes
D10,Rain,Mild,Normal,Weak,Yes
D11,Sunny,Mild,Normal,Strong,Yes
D12,Overcast,Mild,High,Strong,Yes
D13,Overcast,Hot,Normal,Weak,Yes
D14,Rain,Mild,High,Strong,No
";

fn read(csv: &str, target: &str) -> Dataset {
    DatasetReader::new("<memory>")
        .read_from(csv.as_bytes(), target)
        .unwrap()
}

/// Play Tennis without the row identifier column.
fn play_tennis() -> Dataset {
    let csv = PLAY_TENNIS
        .lines()
        .map(|line| line.split_once(',').map_or(line, |(_, rest)| rest))
        .collect::<Vec<_>>()
        .join("\n");
    read(&csv, "PlayTennis")
}

fn fit(algorithm: Algorithm, dataset: &Dataset) -> TreeNode {
    let mut classifier = DecisionTreeClassifier::new(algorithm);
    classifier.fit(dataset).unwrap().clone()
}

fn value(key: &str) -> BranchKey {
    BranchKey::Value(key.to_string())
}

#[test]
fn play_tennis_id3_splits_on_outlook() {
    let tree = fit(Algorithm::Id3, &play_tennis());

    let root = tree.as_decision().unwrap();
    assert_eq!(root.test().to_string(), "Outlook");
    let keys = root
        .branches()
        .iter()
        .map(|branch| branch.outcome().to_string())
        .collect::<Vec<_>>();
    assert_eq!(keys, vec!["Sunny", "Overcast", "Rain"]);
    assert_eq!(root.branch(&value("Overcast")), Some(&TreeNode::leaf("Yes")));
}

#[test]
fn play_tennis_id3_full_tree() {
    let tree = fit(Algorithm::Id3, &play_tennis());
    assert_eq!(
        tree.to_json_string(false).unwrap(),
        r#"{"Outlook":{"Sunny":{"Humidity":{"High":"No","Normal":"Yes"}},"Overcast":"Yes","Rain":{"Wind":{"Weak":"Yes","Strong":"No"}}}}"#
    );
    assert_eq!(tree.depth(), 2);
    assert_eq!(tree.n_leaves(), 5);
}

#[test]
fn play_tennis_c45_matches_id3_on_categorical_data() {
    let data = play_tennis();
    assert_eq!(fit(Algorithm::C45, &data), fit(Algorithm::Id3, &data));

    let mut classifier = DecisionTreeClassifier::new(Algorithm::C45);
    classifier.set_c45_categorical_gain_ratio(true);
    let tree = classifier.fit(&data).unwrap();
    assert_eq!(tree.as_decision().unwrap().test().to_string(), "Outlook");
}

#[test]
fn play_tennis_cart_is_binary_and_reuses_attributes() {
    let tree = fit(Algorithm::Cart, &play_tennis());
    for node in tree.iter() {
        if let Some(decision) = node.as_decision() {
            assert!(decision.test().is_binary());
            let keys = decision
                .branches()
                .iter()
                .map(|branch| branch.outcome().clone())
                .collect::<Vec<_>>();
            assert_eq!(keys, vec![BranchKey::Yes, BranchKey::No]);
        }
    }
    assert!(tree.leaf_labels().iter().all(|&label| label == "Yes" || label == "No"));
}

#[test]
fn play_tennis_dot_uses_algorithm_style() {
    let data = play_tennis();

    let mut id3 = DecisionTreeClassifier::new(Algorithm::Id3);
    id3.fit(&data).unwrap();
    let dot = id3.to_dot().unwrap();
    assert!(dot.starts_with("digraph {"));
    assert!(dot.contains("[label=\"Outlook = Overcast\\n→ Yes\" shape=box]"));
    assert!(dot.contains("[label=\"Outlook = Sunny\"]"));

    let mut c45 = DecisionTreeClassifier::new(Algorithm::C45);
    c45.fit(&data).unwrap();
    assert!(c45.to_dot().unwrap().contains("[label=\"Outlook [Sunny]\"]"));
}

#[test]
fn interleaved_numeric_attribute_is_split_at_the_separating_midpoint() {
    let data = read("x,y\n4,b\n1,a\n5,b\n2,a\n6,b\n3,a\n", "y");
    for algorithm in [Algorithm::C45, Algorithm::Cart] {
        let tree = fit(algorithm, &data);
        assert_eq!(
            tree.to_json_string(false).unwrap(),
            r#"{"x <= 3.5":{"yes":"a","no":"b"}}"#,
            "{algorithm}"
        );
        assert_eq!(tree.n_nodes(), 3);
        assert_eq!(tree.n_leaves(), 2);
    }
}

#[test]
fn id3_groups_numeric_cells_by_value() {
    let data = read("x,y\n1,a\n2.5,b\n1.0,a\n2.50,b\n", "y");
    assert_eq!(
        fit(Algorithm::Id3, &data).to_json_string(false).unwrap(),
        r#"{"x":{"1.0":"a","2.5":"b"}}"#
    );

    let data = read("x,y\n7,a\n07,a\n3,b\n", "y");
    assert_eq!(
        fit(Algorithm::Id3, &data).to_json_string(false).unwrap(),
        r#"{"x":{"7":"a","3":"b"}}"#
    );
}

#[test]
fn non_integral_thresholds_print_in_shortest_form() {
    let data = read("x,y\n0.1,a\n0.2,a\n0.4,b\n", "y");
    let tree = fit(Algorithm::Cart, &data);
    let test = tree.as_decision().unwrap().test().to_string();
    assert_eq!(test, format!("x <= {}", (0.2f64 + 0.4) / 2.0));
}

#[test]
fn constant_target_gives_a_single_leaf() {
    let data = read("a,b,y\np,1,same\nq,2,same\nr,3,same\n", "y");
    for algorithm in [Algorithm::Id3, Algorithm::C45, Algorithm::Cart] {
        assert_eq!(fit(algorithm, &data), TreeNode::leaf("same"));
    }
}

#[test]
fn exhausted_attributes_leave_the_majority_label() {
    // once `a` is used the sunny branch has nothing left to split on
    let data = read("a,y\nsunny,no\nsunny,yes\nsunny,no\nrain,yes\n", "y");
    for algorithm in [Algorithm::Id3, Algorithm::C45] {
        let tree = fit(algorithm, &data);
        let root = tree.as_decision().unwrap();
        assert_eq!(root.test().to_string(), "a");
        assert_eq!(root.branch(&value("sunny")), Some(&TreeNode::leaf("no")));
        assert_eq!(root.branch(&value("rain")), Some(&TreeNode::leaf("yes")));
    }
}

#[test]
fn majority_ties_go_to_the_first_label() {
    let data = read("y\nlate\nearly\nearly\nlate\n", "y");
    for algorithm in [Algorithm::Id3, Algorithm::C45, Algorithm::Cart] {
        assert_eq!(fit(algorithm, &data), TreeNode::leaf("late"));
    }
}

#[test]
fn max_depth_limits_every_algorithm() {
    let data = play_tennis();
    for algorithm in [Algorithm::Id3, Algorithm::C45, Algorithm::Cart] {
        let mut classifier = DecisionTreeClassifier::with_params(algorithm, None, Some(1)).unwrap();
        let tree = classifier.fit(&data).unwrap();
        assert_eq!(tree.depth(), 1, "{algorithm}");
    }
}
