//! # Rusty-trees
//!
//! `rusty-trees` induces classification trees from tabular data with the ID3, C4.5 and CART
//! algorithms. Trees can be exported as nested JSON mappings or as Graphviz source.
//!
//! ## Getting Started
//!
//! To use `rusty-trees`, add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! rusty-trees = "*"
//! ```
//!
//! ## Example Usage
//!
//! As a quick example, here's how you can use `rusty-trees` to induce a C4.5 tree on a small table:
//!
//! ```rust
//!
//! use rusty_trees::data::reader::DatasetReader;
//! use rusty_trees::trees::classifier::DecisionTreeClassifier;
//! use rusty_trees::trees::strategy::Algorithm;
//!
//! let csv = "outlook,humidity,play\nsunny,85,no\nsunny,90,no\novercast,78,yes\nrain,70,yes\n";
//!
//! let dataset = DatasetReader::new("weather.csv")
//!     .read_from(csv.as_bytes(), "play")
//!     .unwrap();
//!
//! let mut model = DecisionTreeClassifier::new(Algorithm::C45);
//!
//! model.fit(&dataset).unwrap();
//!
//! let json = model.to_json(false).unwrap();
//! assert!(json.starts_with("{\"outlook\""));
//! ```

/// Tabular datasets and CSV loading
pub mod data;
/// Error type shared by the crate
pub mod error;
/// Impurity measures
pub mod metrics;
/// Tree rendering
pub mod render;
/// Decision trees
pub mod trees;
